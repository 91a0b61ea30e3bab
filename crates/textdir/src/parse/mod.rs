//! Parsing: unfolding, tokenizing, and the directory processor.

pub mod error;
pub mod lexer;
pub mod processor;
pub mod unfold;
pub mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{RawContentLine, tokenize};
pub use unfold::{split_lines, unfold};
