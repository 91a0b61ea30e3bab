//! Value and parameter escaping for serialization.

use crate::error::SerializeError;

/// Escapes a text value: backslash, comma, and newline.
///
/// A CRLF pair (or a lone CR) is normalized to the `\n` escape, so line
/// breaks survive a round trip in LF form.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            _ => result.push(c),
        }
    }
    result
}

/// Escapes one component of a structured value: as [`escape_text`], plus
/// semicolon.
#[must_use]
pub fn escape_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            _ => result.push(c),
        }
    }
    result
}

/// Encodes a parameter value, quoting it when it contains a delimiter.
///
/// ## Errors
/// Returns an error for values containing DQUOTE or line breaks, which the
/// parameter grammar cannot represent.
pub fn escape_param_value(s: &str) -> Result<String, SerializeError> {
    if s.contains(['"', '\r', '\n']) {
        return Err(SerializeError::Unencodable(format!(
            "parameter value {s:?} contains a quote or line break"
        )));
    }
    if s.contains([';', ',', ':']) {
        Ok(format!("\"{s}\""))
    } else {
        Ok(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::values::unescape_text;

    #[test]
    fn escape_text_basics() {
        assert_eq!(escape_text("a,b"), r"a\,b");
        assert_eq!(escape_text("a\nb"), r"a\nb");
        assert_eq!(escape_text(r"a\b"), r"a\\b");
        // Semicolon is not escaped in plain text values
        assert_eq!(escape_text("a;b"), "a;b");
    }

    #[test]
    fn escape_component_adds_semicolon() {
        assert_eq!(escape_component("a;b"), r"a\;b");
    }

    #[test]
    fn carriage_returns_normalize_to_newline_escape() {
        assert_eq!(escape_text("a\r\nb"), r"a\nb");
        assert_eq!(escape_text("a\rb"), r"a\nb");
        assert_eq!(escape_component("a\r\nb"), r"a\nb");
        assert_eq!(
            unescape_text(&escape_text("line one\r\nline two"), 1).unwrap(),
            "line one\nline two"
        );
    }

    #[test]
    fn unescape_inverts_escape() {
        for s in ["", "plain", "a,b;c", "line\nbreak", r"back\slash", ",,;;"] {
            assert_eq!(unescape_text(&escape_component(s), 1).unwrap(), s);
            let text_round = unescape_text(&escape_text(s), 1).unwrap();
            assert_eq!(text_round, s);
        }
    }

    #[test]
    fn param_value_quoted_when_needed() {
        assert_eq!(escape_param_value("home").unwrap(), "home");
        assert_eq!(
            escape_param_value("a;b,c:d").unwrap(),
            "\"a;b,c:d\""
        );
        assert!(escape_param_value("has\"quote").is_err());
    }
}
