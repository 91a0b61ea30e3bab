//! Content-line tokenizer (RFC 2425 §5.8.2).
//!
//! Splits one unfolded logical line into group, name, parameter list, and
//! raw value text:
//!
//! ```text
//! contentline = [group "."] name *(";" param) ":" value
//! param       = paramname ["=" paramvalue *("," paramvalue)]
//! ```
//!
//! Parameter values may be double-quoted to hide `;`, `,`, and `:` from the
//! delimiter grammar. A parameter name with no `=` is recorded with a null
//! value (bare type flags emitted by some producers).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::core::{Parameter, Parameters};

/// A tokenized content line, before value materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContentLine {
    /// Property group, if any.
    pub group: Option<String>,
    /// Property name, uppercased. Never empty.
    pub name: String,
    /// Parameters in encounter order.
    pub params: Parameters,
    /// Raw value text, exactly as written.
    pub value: String,
}

/// Character cursor over one logical line, tracking the source line number
/// for error reporting.
struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str, line: usize) -> Self {
        Self {
            chars: input.chars().peekable(),
            line,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Reads a token up to (not including) any of `delims`.
    ///
    /// Returns the token and the delimiter hit, or an error naming the
    /// expected delimiter set if the line ends first.
    fn token_until(&mut self, delims: &[char], expected: &str) -> ParseResult<(String, char)> {
        let mut token = String::new();
        while let Some(c) = self.peek() {
            if delims.contains(&c) {
                self.bump();
                return Ok((token, c));
            }
            token.push(c);
            self.bump();
        }
        Err(ParseError::unexpected_eol(self.line, expected))
    }

    /// Consumes the rest of the line verbatim.
    fn rest(&mut self) -> String {
        let mut rest = String::new();
        while let Some(c) = self.bump() {
            rest.push(c);
        }
        rest
    }
}

/// Tokenizes a single unfolded content line.
///
/// ## Errors
/// Returns a syntax error if a required delimiter is missing, the property
/// name is empty or invalid, or a quoted parameter value is unterminated.
pub fn tokenize(line: &str, line_num: usize) -> ParseResult<RawContentLine> {
    let mut cursor = Cursor::new(line, line_num);

    // Read until '.', ';', or ':' -- a '.' makes the token the group.
    let (first, delim) = cursor.token_until(&['.', ';', ':'], "'.', ';', ':'")?;

    let (group, name, delim) = if delim == '.' {
        validate_name(&first, "group", line_num)?;
        let (name, delim) = cursor.token_until(&[';', ':'], "';', ':'")?;
        (Some(first), name, delim)
    } else {
        (None, first, delim)
    };

    validate_name(&name, "property name", line_num)?;

    let params = if delim == ';' {
        parse_parameters(&mut cursor)?
    } else {
        Parameters::new()
    };

    let value = cursor.rest();

    Ok(RawContentLine {
        group,
        name: name.to_ascii_uppercase(),
        params,
        value,
    })
}

fn validate_name(name: &str, what: &str, line_num: usize) -> ParseResult<()> {
    if name.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::InvalidName,
            line_num,
            format!("empty {what}"),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidName,
            line_num,
            format!("invalid {what}: {name}"),
        ));
    }
    Ok(())
}

/// Parses `paramname ["=" paramvalue *("," paramvalue)]` repeatedly until the
/// value-separating `:` is consumed.
fn parse_parameters(cursor: &mut Cursor<'_>) -> ParseResult<Parameters> {
    let mut params = Parameters::new();

    loop {
        let (name, delim) = cursor.token_until(&['=', ';', ':'], "'=', ';', ':'")?;
        if name.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                cursor.line,
                "empty parameter name",
            ));
        }

        match delim {
            // Bare parameter, no value
            ';' => {
                params.push(Parameter::bare(name));
            }
            ':' => {
                params.push(Parameter::bare(name));
                return Ok(params);
            }
            _ => {
                // '=': one or more comma-separated values
                loop {
                    let (value, delim) = parse_param_value(cursor)?;
                    params.push(Parameter::new(name.clone(), value));
                    match delim {
                        ',' => {}
                        ';' => break,
                        _ => return Ok(params),
                    }
                }
            }
        }
    }
}

/// Parses one parameter value: either a double-quoted string or a bare token
/// terminated by `;`, `,`, or `:`. Returns the value and the delimiter that
/// ended it.
fn parse_param_value(cursor: &mut Cursor<'_>) -> ParseResult<(String, char)> {
    if cursor.peek() == Some('"') {
        cursor.bump();
        let mut value = String::new();
        loop {
            match cursor.bump() {
                Some('"') => break,
                Some(c) => value.push(c),
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedQuote,
                        cursor.line,
                        "unterminated quoted parameter value",
                    ));
                }
            }
        }
        // A quoted value must be followed directly by a delimiter
        match cursor.bump() {
            Some(c @ (';' | ',' | ':')) => Ok((value, c)),
            Some(c) => Err(ParseError::unexpected(cursor.line, "';', ',', ':'", c)),
            None => Err(ParseError::unexpected_eol(cursor.line, "';', ',', ':'")),
        }
    } else {
        cursor.token_until(&[';', ',', ':'], "';', ',', ':'")
    }
}
