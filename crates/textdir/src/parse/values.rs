//! Text escaping and predefined value parsers (RFC 2425 §5.8.4).

use chrono::{NaiveDate, NaiveTime};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::core::value::{DateTime, Time, UtcOffset};

/// Unescapes a text value.
///
/// Recognized escapes: `\n` / `\N` (newline), `\\`, `\,`, `\;`. Anything
/// else after a backslash is an error.
///
/// ## Errors
/// Returns [`ParseErrorKind::InvalidEscape`] for an unrecognized escape or a
/// trailing backslash.
pub fn unescape_text(s: &str, line_num: usize) -> ParseResult<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidEscape,
                        line_num,
                        format!("unrecognized escape sequence: \\{other}"),
                    ));
                }
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidEscape,
                        line_num,
                        "trailing backslash",
                    ));
                }
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}

/// Splits a value on unescaped commas, preserving escapes in each part.
///
/// A content line with a comma-separated value yields one sibling value per
/// part; parts are returned still escaped so each can go through
/// [`unescape_text`] (or a numeric parser) individually.
#[must_use]
pub fn split_list(s: &str) -> Vec<&str> {
    split_on_unescaped(s, ',')
}

/// Splits a structured value on unescaped semicolons.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    split_on_unescaped(s, ';')
}

fn split_on_unescaped(s: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_backslash = false;

    for (i, c) in s.char_indices() {
        if prev_backslash {
            prev_backslash = false;
            continue;
        }
        if c == '\\' {
            prev_backslash = true;
        } else if c == delim {
            parts.push(&s[start..i]);
            start = i + delim.len_utf8();
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Parses an ISO 8601 date in basic (`19850412`) or extended (`1985-04-12`)
/// format.
///
/// ## Errors
/// Returns an invalid-value error if the text is not a valid date.
pub fn parse_date(s: &str, line_num: usize) -> ParseResult<NaiveDate> {
    let format = if s.contains('-') { "%Y-%m-%d" } else { "%Y%m%d" };
    NaiveDate::parse_from_str(s, format)
        .map_err(|e| ParseError::invalid_value(line_num, format!("invalid date {s:?}: {e}")))
}

/// Parses an ISO 8601 time of day, with an optional trailing `Z`.
///
/// ## Errors
/// Returns an invalid-value error if the text is not a valid time.
pub fn parse_time(s: &str, line_num: usize) -> ParseResult<Time> {
    let (body, utc) = match s.strip_suffix(['Z', 'z']) {
        Some(body) => (body, true),
        None => (s, false),
    };
    let format = if body.contains(':') { "%H:%M:%S" } else { "%H%M%S" };
    let time = NaiveTime::parse_from_str(body, format)
        .map_err(|e| ParseError::invalid_value(line_num, format!("invalid time {s:?}: {e}")))?;
    Ok(Time { time, utc })
}

/// Parses a combined date and time (`19960415T083000Z` or extended form).
///
/// ## Errors
/// Returns an invalid-value error if the text is not a valid date-time.
pub fn parse_datetime(s: &str, line_num: usize) -> ParseResult<DateTime> {
    let (date_part, time_part) = s.split_once(['T', 't']).ok_or_else(|| {
        ParseError::invalid_value(line_num, format!("invalid date-time {s:?}: missing 'T'"))
    })?;
    let date = parse_date(date_part, line_num)?;
    let Time { time, utc } = parse_time(time_part, line_num)?;
    Ok(DateTime { date, time, utc })
}

/// Parses a signed integer.
///
/// ## Errors
/// Returns an invalid-value error if the text is not a valid integer.
pub fn parse_integer(s: &str, line_num: usize) -> ParseResult<i64> {
    s.trim()
        .parse()
        .map_err(|e| ParseError::invalid_value(line_num, format!("invalid integer {s:?}: {e}")))
}

/// Parses a float.
///
/// ## Errors
/// Returns an invalid-value error if the text is not a valid float.
pub fn parse_float(s: &str, line_num: usize) -> ParseResult<f64> {
    s.trim()
        .parse()
        .map_err(|e| ParseError::invalid_value(line_num, format!("invalid float {s:?}: {e}")))
}

/// Parses a boolean (`TRUE` / `FALSE`, case-insensitive).
///
/// ## Errors
/// Returns an invalid-value error for any other text.
pub fn parse_boolean(s: &str, line_num: usize) -> ParseResult<bool> {
    if s.eq_ignore_ascii_case("TRUE") {
        Ok(true)
    } else if s.eq_ignore_ascii_case("FALSE") {
        Ok(false)
    } else {
        Err(ParseError::invalid_value(
            line_num,
            format!("invalid boolean {s:?}"),
        ))
    }
}

/// Parses a UTC offset (`+HH:MM`, `-HHMM`).
///
/// ## Errors
/// Returns an invalid-value error if the sign is missing or the components
/// are out of range.
pub fn parse_utc_offset(s: &str, line_num: usize) -> ParseResult<UtcOffset> {
    let err = || ParseError::invalid_value(line_num, format!("invalid UTC offset {s:?}"));

    let (positive, rest) = match s.as_bytes().first() {
        Some(b'+') => (true, &s[1..]),
        Some(b'-') => (false, &s[1..]),
        _ => return Err(err()),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let hours: u8 = digits[..2].parse().map_err(|_| err())?;
    let minutes: u8 = digits[2..].parse().map_err(|_| err())?;
    if hours > 23 || minutes > 59 {
        return Err(err());
    }

    Ok(UtcOffset::new(positive, hours, minutes))
}

/// Checks that a URI value at least carries a scheme.
///
/// ## Errors
/// Returns an invalid-value error if no `scheme:` prefix is present.
pub fn check_uri(s: &str, line_num: usize) -> ParseResult<()> {
    let valid = s.split_once(':').is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    if valid {
        Ok(())
    } else {
        Err(ParseError::invalid_value(
            line_num,
            format!("invalid URI {s:?}: missing scheme"),
        ))
    }
}
