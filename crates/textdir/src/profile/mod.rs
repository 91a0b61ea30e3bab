//! The profile and value-codec extension protocol.
//!
//! A [`Profile`] is a named policy object: it resolves value types for
//! content lines read under its name and may materialize a [`Directory`]
//! from the processed line sequence. [`ValueFactory`] and
//! [`ValueSerializer`] are pluggable codecs keyed by a value-type string.
//!
//! Dispatch is data-driven: the registry looks codecs up by lowercased
//! string, and a profile that also acts as a codec advertises it through the
//! [`Profile::as_value_factory`] / [`Profile::as_value_serializer`]
//! capability hooks rather than through downcasting.

pub mod predefined;
pub mod registry;
pub mod state;

pub use predefined::PredefinedProfile;
pub use registry::{BlockPolicy, DirectoryRegistry};
pub use state::ProfileState;

use crate::core::{ContentLine, Directory, Parameters, Value};
use crate::error::SerializeError;
use crate::parse::ParseResult;

/// A named extension point defining value types and directory construction
/// for a class of documents.
pub trait Profile: Send + Sync {
    /// The profile name, matched case-insensitively.
    fn name(&self) -> &str;

    /// Resolves the value type for a content line, or `None` for no opinion.
    fn value_type(
        &self,
        profile: Option<&str>,
        group: Option<&str>,
        name: &str,
        params: &Parameters,
    ) -> Option<String>;

    /// Attempts to materialize a directory from the processed lines.
    ///
    /// Returns `None` if this profile has no opinion about the document.
    fn create_directory(&self, lines: &[ContentLine]) -> Option<Directory>;

    /// Returns this profile's value-factory capability, if it has one.
    ///
    /// A profile with this capability is consulted for every line read under
    /// it, before any type-keyed factory, so profile-specific structured
    /// types win over generic handling.
    fn as_value_factory(&self) -> Option<&dyn ValueFactory> {
        None
    }

    /// Returns this profile's value-serializer capability, if it has one.
    fn as_value_serializer(&self) -> Option<&dyn ValueSerializer> {
        None
    }
}

/// Converts raw content-line text into typed values.
pub trait ValueFactory: Send + Sync {
    /// Produces zero or more values from the raw value text.
    ///
    /// `Ok(None)` means no opinion: resolution falls through to the next
    /// precedence step. A comma-separated source value yields one entry per
    /// element; the processor emits one sibling content line per value.
    ///
    /// ## Errors
    /// A factory that recognizes the type but cannot parse the text returns
    /// a fatal [`crate::parse::ParseError`].
    fn create_values(
        &self,
        profile: Option<&str>,
        group: Option<&str>,
        name: &str,
        params: &Parameters,
        value_type: Option<&str>,
        raw: &str,
        line_num: usize,
    ) -> ParseResult<Option<Vec<Value>>>;
}

/// Converts typed values back into content-line text.
pub trait ValueSerializer: Send + Sync {
    /// Writes the serialized form of `value` into `out`.
    ///
    /// Returns `Ok(false)` for no opinion, letting resolution fall through.
    ///
    /// ## Errors
    /// A serializer that recognizes the type but cannot encode the value
    /// returns a [`SerializeError`].
    fn serialize_value(
        &self,
        profile: Option<&str>,
        group: Option<&str>,
        name: &str,
        params: &Parameters,
        value: &Value,
        value_type: Option<&str>,
        out: &mut String,
    ) -> Result<bool, SerializeError>;
}
