//! Serialization: escaping, folding, and the directory serializer.

pub mod escape;
pub mod fold;
pub mod serializer;

pub use escape::{escape_component, escape_param_value, escape_text};
pub use fold::{Folder, fold_line};
pub use serializer::serialize_content_lines;
