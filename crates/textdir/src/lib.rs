//! `text/directory` content-line engine (RFC 2425) with a vCard profile
//! (RFC 2426).
//!
//! The format is a grammar of folded content lines, each an optional group,
//! a name, parameters, and a typed value, organized into `BEGIN`/`END`
//! blocks. Parsing and serialization are driven by a
//! [`DirectoryRegistry`] of pluggable [`Profile`]s and value codecs keyed by
//! value-type string; the registry is configured once and read-only during a
//! pass.
//!
//! ## Parsing
//!
//! ```rust
//! use textdir::DirectoryRegistry;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! FN:John Doe\r\n\
//! NOTE:Hello\\, world\r\n\
//! END:VCARD\r\n";
//!
//! let registry = DirectoryRegistry::vcard();
//! let directory = registry.parse(input).unwrap();
//! assert_eq!(directory.display_name.as_deref(), Some("John Doe"));
//! assert_eq!(
//!     directory.get("NOTE").unwrap().value.as_text(),
//!     Some("Hello, world"),
//! );
//! ```
//!
//! ## Serializing
//!
//! ```rust
//! use textdir::DirectoryRegistry;
//!
//! let registry = DirectoryRegistry::vcard();
//! let directory = registry.parse("BEGIN:VCARD\r\nFN:Jane Doe\r\nEND:VCARD\r\n").unwrap();
//! let output = registry.serialize(&directory.to_content_lines()).unwrap();
//! assert!(output.starts_with("BEGIN:VCARD\r\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`mod@core`] - Content lines, parameters, values, directories
//! - [`parse`] - Unfolding, tokenizing, and the directory processor
//! - [`build`] - Escaping, folding, and the directory serializer
//! - [`profile`] - The `Profile` / value-codec extension protocol
//! - [`vcard`] - The vCard profile collaborator

pub mod build;
pub mod core;
pub mod error;
pub mod parse;
pub mod profile;
pub mod vcard;

#[cfg(test)]
mod tests;

pub use build::fold_line;
pub use self::core::{Address, ContentLine, Directory, Parameter, Parameters, StructuredName, Value};
pub use error::{DirectoryError, DirectoryResult, SerializeError};
pub use parse::{ParseError, ParseErrorKind, ParseResult, unfold};
pub use profile::{
    BlockPolicy, DirectoryRegistry, Profile, ProfileState, ValueFactory, ValueSerializer,
};
