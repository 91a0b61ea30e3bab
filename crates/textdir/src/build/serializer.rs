//! The directory serializer.
//!
//! Mirrors the processor in reverse: re-derives profile context from the
//! `BEGIN`/`END`/`PROFILE` lines in the sequence, resolves a serializer with
//! the same precedence the processor uses for factories, and folds the
//! output at 75 characters.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::escape::{escape_param_value, escape_text};
use super::fold::Folder;
use crate::core::{ContentLine, Parameters, Value};
use crate::error::SerializeError;
use crate::profile::{DirectoryRegistry, ProfileState};
use crate::vcard::structured::{serialize_address, serialize_structured_name};

/// Serializes content lines to folded wire form, CRLF line endings.
///
/// ## Errors
/// Returns an error for an `END` line below an empty profile stack or a
/// value the parameter/value grammar cannot represent.
#[tracing::instrument(skip(registry, lines), fields(count = lines.len()))]
pub fn serialize_content_lines(
    registry: &DirectoryRegistry,
    lines: &[ContentLine],
) -> Result<String, SerializeError> {
    let mut state = ProfileState::new();
    let mut folder = Folder::new();

    for (idx, line) in lines.iter().enumerate() {
        let mut text = String::new();

        if let Some(group) = &line.group {
            text.push_str(group);
            text.push('.');
        }
        text.push_str(&line.name);
        write_params(&line.params, &mut text)?;
        text.push(':');

        match line.name.as_str() {
            "BEGIN" => {
                let block = structural_value(line)?;
                state.push(block.trim());
                text.push_str(block);
            }
            "END" => {
                let block = structural_value(line)?;
                if state.pop().is_none() {
                    return Err(SerializeError::EndWithoutBegin(idx + 1));
                }
                text.push_str(block);
            }
            "PROFILE" => {
                let profile = structural_value(line)?;
                state.set_explicit(profile.trim());
                text.push_str(profile);
            }
            _ => {
                let profile_name = state.current().map(str::to_string);
                write_value(registry, profile_name.as_deref(), line, &mut text)?;
            }
        }

        folder.push_str(&text);
        folder.push_str("\r\n");
    }

    Ok(folder.finish())
}

/// Structural lines carry their block or profile name as plain text.
fn structural_value(line: &ContentLine) -> Result<&str, SerializeError> {
    line.value.as_text().ok_or_else(|| {
        SerializeError::Unencodable(format!("{} line with a non-text value", line.name))
    })
}

/// Resolves and applies a value serializer for one line.
///
/// Mirrors the factory precedence: the profile responsible for the line is
/// tried first through its serializer capability, then the serializer
/// registered for the resolved value type, then the default rendering.
fn write_value(
    registry: &DirectoryRegistry,
    profile_name: Option<&str>,
    line: &ContentLine,
    out: &mut String,
) -> Result<(), SerializeError> {
    let value_type = registry.resolve_value_type(
        profile_name,
        line.group.as_deref(),
        &line.name,
        &line.params,
    );

    let resolved = registry.resolved_profile(profile_name);
    if let Some(serializer) = resolved.as_value_serializer()
        && serializer.serialize_value(
            profile_name,
            line.group.as_deref(),
            &line.name,
            &line.params,
            &line.value,
            value_type.as_deref(),
            out,
        )?
    {
        return Ok(());
    }

    if let Some(value_type) = &value_type
        && let Some(serializer) = registry.serializer(value_type)
        && serializer.serialize_value(
            profile_name,
            line.group.as_deref(),
            &line.name,
            &line.params,
            &line.value,
            Some(value_type),
            out,
        )?
    {
        return Ok(());
    }

    write_default(&line.value, out);
    Ok(())
}

/// Fallback rendering for values no serializer claimed.
fn write_default(value: &Value, out: &mut String) {
    match value {
        Value::Raw(s) | Value::Uri(s) | Value::PhoneNumber(s) => out.push_str(s),
        Value::Text(s) => out.push_str(&escape_text(s)),
        Value::Date(d) => out.push_str(&d.format("%Y-%m-%d").to_string()),
        Value::Time(t) => {
            out.push_str(&t.time.format("%H:%M:%S").to_string());
            if t.utc {
                out.push('Z');
            }
        }
        Value::DateTime(dt) => {
            out.push_str(&dt.date.format("%Y-%m-%d").to_string());
            out.push('T');
            out.push_str(&dt.time.format("%H:%M:%S").to_string());
            if dt.utc {
                out.push('Z');
            }
        }
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&f.to_string()),
        Value::Boolean(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        Value::Binary(data) => out.push_str(&BASE64.encode(data)),
        Value::UtcOffset(offset) => {
            out.push(if offset.positive { '+' } else { '-' });
            out.push_str(&format!("{:02}:{:02}", offset.hours, offset.minutes));
        }
        Value::StructuredName(name) => out.push_str(&serialize_structured_name(name)),
        Value::Address(addr) => out.push_str(&serialize_address(addr)),
    }
}

/// Writes the parameter list, coalescing runs of same-named parameters back
/// into `NAME=v1,v2` form. Bare parameters are written without `=`.
fn write_params(params: &Parameters, out: &mut String) -> Result<(), SerializeError> {
    let mut iter = params.iter().peekable();

    while let Some(param) = iter.next() {
        out.push(';');
        out.push_str(&param.name);

        if let Some(value) = &param.value {
            out.push('=');
            out.push_str(&escape_param_value(value)?);

            while let Some(next) = iter.next_if(|n| n.is_named(&param.name) && n.value.is_some()) {
                if let Some(next_value) = &next.value {
                    out.push(',');
                    out.push_str(&escape_param_value(next_value)?);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Parameter, StructuredName};

    fn registry() -> DirectoryRegistry {
        DirectoryRegistry::vcard()
    }

    fn line_in_vcard(mut line: ContentLine) -> Vec<ContentLine> {
        line.profile = Some("VCARD".to_string());
        vec![
            ContentLine::new("BEGIN", "VCARD"),
            line,
            ContentLine::new("END", "VCARD"),
        ]
    }

    #[test]
    fn simple_text_line() {
        let out = registry()
            .serialize(&[ContentLine::new("NAME", "Team Roster")])
            .unwrap();
        assert_eq!(out, "NAME:Team Roster\r\n");
    }

    #[test]
    fn text_value_is_escaped() {
        let lines = line_in_vcard(ContentLine::new("NOTE", "Hello, world"));
        let out = registry().serialize(&lines).unwrap();
        assert!(out.contains("NOTE:Hello\\, world\r\n"));
    }

    #[test]
    fn params_coalesce_into_comma_list() {
        let mut line = ContentLine::new("ADR", Value::Address(crate::core::Address::default()));
        line.params.push(Parameter::new("TYPE", "home"));
        line.params.push(Parameter::new("TYPE", "postal"));
        let out = registry().serialize(&line_in_vcard(line)).unwrap();
        assert!(out.contains("ADR;TYPE=home,postal:"));
    }

    #[test]
    fn bare_param_written_without_equals() {
        let mut line = ContentLine::new("TEL", Value::PhoneNumber("5551212".to_string()));
        line.params.push(Parameter::bare("HOME"));
        let out = registry().serialize(&line_in_vcard(line)).unwrap();
        assert!(out.contains("TEL;HOME:5551212\r\n"));
    }

    #[test]
    fn param_value_with_delimiter_is_quoted() {
        let mut line = ContentLine::new("NOTE", "x");
        line.params.push(Parameter::new("LABEL", "a;b"));
        let out = registry().serialize(&[line]).unwrap();
        assert!(out.contains("NOTE;LABEL=\"a;b\":x\r\n"));
    }

    #[test]
    fn structured_name_serialized_by_profile_capability() {
        let name = StructuredName::simple("Doe", "John");
        let lines = line_in_vcard(ContentLine::new("N", Value::StructuredName(name)));
        let out = registry().serialize(&lines).unwrap();
        assert!(out.contains("N:Doe;John;;;\r\n"));
    }

    #[test]
    fn end_without_begin_is_fatal() {
        let err = registry()
            .serialize(&[ContentLine::new("END", "VCARD")])
            .unwrap_err();
        assert_eq!(err, SerializeError::EndWithoutBegin(1));
    }

    #[test]
    fn long_line_is_folded() {
        let lines = line_in_vcard(ContentLine::new("NOTE", "x".repeat(200)));
        let out = registry().serialize(&lines).unwrap();
        assert!(out.contains("\r\n "));
        for physical in out.split("\r\n") {
            assert!(physical.chars().count() <= 76);
        }
    }

    #[test]
    fn group_prefix_written() {
        let mut line = ContentLine::new("TEL", Value::PhoneNumber("5551212".to_string()));
        line.group = Some("item1".to_string());
        let out = registry().serialize(&line_in_vcard(line)).unwrap();
        assert!(out.contains("item1.TEL:5551212\r\n"));
    }
}
