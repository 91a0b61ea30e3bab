//! Core data model: content lines, parameters, values, and directories.

pub mod content_line;
pub mod directory;
pub mod structured;
pub mod value;

pub use content_line::{ContentLine, Parameter, Parameters};
pub use directory::Directory;
pub use structured::{Address, StructuredName};
pub use value::{DateTime, Time, UtcOffset, Value};
