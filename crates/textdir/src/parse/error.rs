//! Parse error types.

use std::fmt;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing a `text/directory` stream.
///
/// Any parse error is fatal to the current document; there is no partial
/// recovery.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Logical line number where the error occurred (1-based).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates an unexpected-character error naming the expected delimiter set.
    #[must_use]
    pub fn unexpected(line: usize, expected: &str, found: char) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedChar,
            line,
            format!("expected one of {expected}, found {found:?}"),
        )
    }

    /// Creates an unexpected-end-of-line error naming the expected delimiter set.
    #[must_use]
    pub fn unexpected_eol(line: usize, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof,
            line,
            format!("expected one of {expected}, found end of line"),
        )
    }

    /// Creates an invalid value error for a value factory rejection.
    #[must_use]
    pub fn invalid_value(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidValue, line, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected end of input or line.
    UnexpectedEof,
    /// Unexpected character at a delimiter position.
    UnexpectedChar,
    /// Invalid property or group name.
    InvalidName,
    /// Malformed parameter (bad quoting, empty name).
    InvalidParameter,
    /// Unterminated quoted parameter value.
    UnterminatedQuote,
    /// A value factory rejected the value text.
    InvalidValue,
    /// Unrecognized escape sequence in a text value.
    InvalidEscape,
    /// `END` encountered with an empty profile stack.
    EndWithoutBegin,
    /// `END:x` does not match the most recent `BEGIN`.
    MismatchedEnd,
    /// A `BEGIN` was left open at end of input.
    UnterminatedBlock,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::UnexpectedChar => write!(f, "unexpected character"),
            Self::InvalidName => write!(f, "invalid name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnterminatedQuote => write!(f, "unterminated quoted string"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::InvalidEscape => write!(f, "invalid escape sequence"),
            Self::EndWithoutBegin => write!(f, "END without BEGIN"),
            Self::MismatchedEnd => write!(f, "mismatched END"),
            Self::UnterminatedBlock => write!(f, "unterminated BEGIN block"),
        }
    }
}
