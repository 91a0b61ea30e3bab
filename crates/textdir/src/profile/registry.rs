//! Profile and value-codec registries.

use std::collections::HashMap;
use std::sync::Arc;

use super::predefined::{BaseCodec, PredefinedProfile, value_types};
use super::{Profile, ValueFactory, ValueSerializer};
use crate::core::{ContentLine, Directory, Parameters};
use crate::error::{DirectoryResult, SerializeError};
use crate::parse::ParseResult;
use crate::vcard::{VCardCodec, VCardProfile, vcard_value_types};

/// Policy for a `BEGIN` block left open at end of input.
///
/// RFC 2425 does not say whether this is fatal, so it is configurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockPolicy {
    /// Log a warning and accept the document.
    #[default]
    Tolerate,
    /// Fail the parse.
    Error,
}

/// The profile and value-codec registry.
///
/// Populated by configuration before use and read-only during a parse or
/// serialize pass; all per-pass state lives in locals inside the processor
/// and serializer. Keys are lowercased profile names and value-type strings.
pub struct DirectoryRegistry {
    profiles: HashMap<String, Arc<dyn Profile>>,
    factories: HashMap<String, Arc<dyn ValueFactory>>,
    serializers: HashMap<String, Arc<dyn ValueSerializer>>,
    predefined: Arc<dyn Profile>,
    block_policy: BlockPolicy,
}

impl DirectoryRegistry {
    /// Creates a registry with the predefined profile and the eight RFC 2425
    /// value types registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            profiles: HashMap::new(),
            factories: HashMap::new(),
            serializers: HashMap::new(),
            predefined: Arc::new(PredefinedProfile),
            block_policy: BlockPolicy::default(),
        };

        let base = Arc::new(BaseCodec);
        for value_type in value_types::ALL {
            registry.register_value_factory(value_type, base.clone());
            registry.register_value_serializer(value_type, base.clone());
        }

        registry
    }

    /// Creates a registry that additionally knows the vCard profile and its
    /// value types (RFC 2426).
    #[must_use]
    pub fn vcard() -> Self {
        let mut registry = Self::new();
        registry.register_profile(Arc::new(VCardProfile));

        let codec = Arc::new(VCardCodec);
        for value_type in vcard_value_types::ALL {
            registry.register_value_factory(value_type, codec.clone());
            registry.register_value_serializer(value_type, codec.clone());
        }

        registry
    }

    /// Registers a profile under its own (lowercased) name.
    pub fn register_profile(&mut self, profile: Arc<dyn Profile>) {
        self.profiles
            .insert(profile.name().to_ascii_lowercase(), profile);
    }

    /// Registers a value factory for a value-type string.
    pub fn register_value_factory(&mut self, value_type: &str, factory: Arc<dyn ValueFactory>) {
        self.factories
            .insert(value_type.to_ascii_lowercase(), factory);
    }

    /// Registers a value serializer for a value-type string.
    pub fn register_value_serializer(
        &mut self,
        value_type: &str,
        serializer: Arc<dyn ValueSerializer>,
    ) {
        self.serializers
            .insert(value_type.to_ascii_lowercase(), serializer);
    }

    /// Sets the policy for unterminated `BEGIN` blocks.
    pub fn set_block_policy(&mut self, policy: BlockPolicy) {
        self.block_policy = policy;
    }

    /// Returns the configured block policy.
    #[must_use]
    pub fn block_policy(&self) -> BlockPolicy {
        self.block_policy
    }

    /// Looks up a profile by name (case-insensitive).
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&Arc<dyn Profile>> {
        self.profiles.get(&name.to_ascii_lowercase())
    }

    /// Returns the predefined fallback profile.
    #[must_use]
    pub fn predefined(&self) -> &Arc<dyn Profile> {
        &self.predefined
    }

    /// Returns the profile responsible for lines tagged `profile_name`: the
    /// registered profile if there is one, else the predefined profile.
    #[must_use]
    pub fn resolved_profile(&self, profile_name: Option<&str>) -> &Arc<dyn Profile> {
        profile_name
            .and_then(|name| self.profile(name))
            .unwrap_or(&self.predefined)
    }

    /// Looks up a value factory by value-type string (case-insensitive).
    #[must_use]
    pub fn factory(&self, value_type: &str) -> Option<&Arc<dyn ValueFactory>> {
        self.factories.get(&value_type.to_ascii_lowercase())
    }

    /// Looks up a value serializer by value-type string (case-insensitive).
    #[must_use]
    pub fn serializer(&self, value_type: &str) -> Option<&Arc<dyn ValueSerializer>> {
        self.serializers.get(&value_type.to_ascii_lowercase())
    }

    /// Resolves the value type for a content line.
    ///
    /// Precedence, in order: an explicit `VALUE=` parameter; the profile
    /// registered for the line's profile tag; the predefined profile,
    /// unless it was the profile already consulted.
    #[must_use]
    pub fn resolve_value_type(
        &self,
        profile_name: Option<&str>,
        group: Option<&str>,
        name: &str,
        params: &Parameters,
    ) -> Option<String> {
        if let Some(explicit) = params.first_value("VALUE") {
            return Some(explicit.to_ascii_lowercase());
        }

        let mut consulted_predefined = false;
        if let Some(profile) = profile_name.and_then(|n| self.profile(n)) {
            consulted_predefined = profile
                .name()
                .eq_ignore_ascii_case(self.predefined.name());
            if let Some(value_type) = profile.value_type(profile_name, group, name, params) {
                return Some(value_type.to_ascii_lowercase());
            }
        }

        if consulted_predefined {
            None
        } else {
            self.predefined
                .value_type(profile_name, group, name, params)
                .map(|t| t.to_ascii_lowercase())
        }
    }

    /// Parses a directory stream into a [`Directory`].
    ///
    /// ## Errors
    /// Returns the first syntax, structural, or value error encountered.
    pub fn parse(&self, input: &str) -> ParseResult<Directory> {
        crate::parse::processor::parse(self, input)
    }

    /// Parses a directory stream into its processed content-line sequence.
    ///
    /// ## Errors
    /// Returns the first syntax, structural, or value error encountered.
    pub fn process(&self, input: &str) -> ParseResult<Vec<ContentLine>> {
        crate::parse::processor::process(self, input)
    }

    /// Serializes content lines back to folded wire form.
    ///
    /// ## Errors
    /// Returns an error for an `END` below an empty stack or a value no
    /// serializer can encode.
    pub fn serialize(&self, lines: &[ContentLine]) -> Result<String, SerializeError> {
        crate::build::serializer::serialize_content_lines(self, lines)
    }

    /// Parses a stream and serializes it back to canonical form: uppercase
    /// names, CRLF line endings, folding at 75 characters.
    ///
    /// ## Errors
    /// Returns [`crate::error::DirectoryError`] wrapping the parse error for
    /// malformed input, or the serialize error if a value cannot be
    /// re-encoded.
    pub fn normalize(&self, input: &str) -> DirectoryResult<String> {
        let directory = self.parse(input)?;
        Ok(self.serialize(&directory.to_content_lines())?)
    }
}

impl Default for DirectoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parameter;

    #[test]
    fn value_param_beats_profile_opinion() {
        // The vCard profile says NOTE is text, but VALUE= wins.
        let registry = DirectoryRegistry::vcard();
        let mut params = Parameters::new();
        params.push(Parameter::new("VALUE", "uri"));

        let resolved = registry.resolve_value_type(Some("VCARD"), None, "NOTE", &params);
        assert_eq!(resolved.as_deref(), Some("uri"));
    }

    #[test]
    fn profile_consulted_before_predefined() {
        let registry = DirectoryRegistry::vcard();
        let params = Parameters::new();

        // TEL is phone-number under vCard but unknown to the predefined profile
        let resolved = registry.resolve_value_type(Some("VCARD"), None, "TEL", &params);
        assert_eq!(resolved.as_deref(), Some("phone-number"));
    }

    #[test]
    fn predefined_fallback_without_profile() {
        let registry = DirectoryRegistry::new();
        let params = Parameters::new();

        let resolved = registry.resolve_value_type(None, None, "SOURCE", &params);
        assert_eq!(resolved.as_deref(), Some("uri"));
    }

    #[test]
    fn unknown_name_resolves_to_no_type() {
        let registry = DirectoryRegistry::new();
        let params = Parameters::new();
        assert_eq!(
            registry.resolve_value_type(None, None, "X-THING", &params),
            None
        );
    }

    #[test]
    fn normalize_rewrites_to_canonical_form() {
        let registry = DirectoryRegistry::vcard();
        let normalized = registry
            .normalize("begin:VCARD\nFN:John Doe\nend:VCARD\n")
            .unwrap();
        assert_eq!(normalized, "BEGIN:VCARD\r\nFN:John Doe\r\nEND:VCARD\r\n");
    }

    #[test]
    fn normalize_surfaces_parse_errors() {
        let registry = DirectoryRegistry::vcard();
        let err = registry.normalize("BROKEN\r\n").unwrap_err();
        assert!(matches!(err, crate::error::DirectoryError::Parse(_)));
    }

    #[test]
    fn codec_lookup_is_case_insensitive() {
        let registry = DirectoryRegistry::new();
        assert!(registry.factory("TEXT").is_some());
        assert!(registry.serializer("Date-Time").is_some());
        assert!(registry.factory("no-such-type").is_none());
    }
}
