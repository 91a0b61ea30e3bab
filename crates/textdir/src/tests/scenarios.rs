//! End-to-end scenario tests over the public API.

use std::sync::Arc;

use crate::core::{ContentLine, Directory, Parameters, Value};
use crate::parse::ParseErrorKind;
use crate::profile::{DirectoryRegistry, Profile};

#[test]
fn note_with_escaped_comma() {
    let registry = DirectoryRegistry::vcard();
    let lines = registry
        .process("BEGIN:VCARD\r\nNOTE:Hello\\, world\r\nEND:VCARD\r\n")
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].value, Value::Text("Hello, world".to_string()));
}

#[test]
fn empty_vcard_block() {
    let registry = DirectoryRegistry::vcard();
    let lines = registry.process("BEGIN:VCARD\r\nEND:VCARD\r\n").unwrap();
    assert!(lines.is_empty());
}

#[test_log::test]
fn structured_address_with_types() {
    let registry = DirectoryRegistry::vcard();
    let input =
        "BEGIN:VCARD\r\nADR;TYPE=home,postal:;;123 Oak St;Springfield;IL;62701;USA\r\nEND:VCARD\r\n";
    let lines = registry.process(input).unwrap();

    assert_eq!(lines.len(), 1);
    let addr = lines[0].value.as_address().unwrap();
    assert_eq!(addr.street, "123 Oak St");
    assert_eq!(addr.locality, "Springfield");
    assert_eq!(addr.region, "IL");
    assert_eq!(addr.postal_code, "62701");
    assert_eq!(addr.country, "USA");

    assert!(lines[0].params.has_value("TYPE", "HOME"));
    assert!(lines[0].params.has_value("TYPE", "POSTAL"));
}

#[test]
fn long_line_folds_and_survives_reparse() {
    let registry = DirectoryRegistry::vcard();
    let note: String = "word ".repeat(40);
    let mut line = ContentLine::new("NOTE", note.clone());
    line.profile = Some("VCARD".to_string());

    let serialized = registry
        .serialize(&[
            ContentLine::new("BEGIN", "VCARD"),
            line,
            ContentLine::new("END", "VCARD"),
        ])
        .unwrap();
    assert!(serialized.contains("\r\n "));

    let reparsed = registry.process(&serialized).unwrap();
    assert_eq!(reparsed.len(), 1);
    assert_eq!(reparsed[0].value.as_text(), Some(note.as_str()));
}

#[test]
fn orphan_end_stops_processing() {
    let registry = DirectoryRegistry::vcard();
    let err = registry
        .process("NOTE:ok\r\nEND:FOO\r\nNOTE:unreached\r\n")
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EndWithoutBegin);
}

/// A test profile that types every line as integer.
struct IntegerProfile;

impl Profile for IntegerProfile {
    fn name(&self) -> &str {
        "INTS"
    }

    fn value_type(
        &self,
        _profile: Option<&str>,
        _group: Option<&str>,
        _name: &str,
        _params: &Parameters,
    ) -> Option<String> {
        Some("integer".to_string())
    }

    fn create_directory(&self, _lines: &[ContentLine]) -> Option<Directory> {
        None
    }
}

#[test]
fn value_param_beats_profile_type_either_registration_order() {
    // Profile registered before or after the codec registrations: the
    // VALUE= parameter wins in both.
    for reregister_codecs in [false, true] {
        let mut registry = DirectoryRegistry::new();
        registry.register_profile(Arc::new(IntegerProfile));
        if reregister_codecs {
            let codec = Arc::new(crate::profile::predefined::BaseCodec);
            registry.register_value_factory("text", codec.clone());
            registry.register_value_factory("integer", codec);
        }

        let lines = registry
            .process("PROFILE:INTS\r\nX-COUNT;VALUE=text:42\r\nX-PLAIN:7\r\n")
            .unwrap();

        // VALUE=text overrides the profile's integer typing
        assert_eq!(lines[0].value, Value::Text("42".to_string()));
        // Without VALUE=, the profile's opinion stands
        assert_eq!(lines[1].value, Value::Integer(7));
    }
}

#[test]
fn profile_stack_discipline_nested_blocks() {
    let registry = DirectoryRegistry::vcard();
    let input = "\
BEGIN:OUTER\r\n\
NOTE:in outer\r\n\
BEGIN:INNER\r\n\
NOTE:in inner\r\n\
END:INNER\r\n\
NOTE:outer again\r\n\
END:OUTER\r\n";

    let lines = registry.process(input).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].profile.as_deref(), Some("OUTER"));
    assert_eq!(lines[1].profile.as_deref(), Some("INNER"));
    assert_eq!(lines[2].profile.as_deref(), Some("OUTER"));
}

#[test]
fn registry_state_does_not_leak_between_calls() {
    let registry = DirectoryRegistry::vcard();

    // First call errors mid-document with a block open
    assert!(registry.process("BEGIN:VCARD\r\nEND:\r\n").is_err());

    // The same registry instance parses a clean document untainted
    let lines = registry.process("NOTE:fresh\r\n").unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].profile, None);
}

#[test]
fn name_line_becomes_display_name() {
    let registry = DirectoryRegistry::new();
    let dir = registry.parse("NAME:Directory of Things\r\nX-A:1\r\n").unwrap();
    assert_eq!(dir.display_name.as_deref(), Some("Directory of Things"));
    assert_eq!(dir.content_lines.len(), 1);
}
