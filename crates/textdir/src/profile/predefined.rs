//! The predefined `text/directory` profile and base value codec (RFC 2425 §5).

use super::{Profile, ValueFactory, ValueSerializer};
use crate::build::escape::escape_text;
use crate::core::{ContentLine, Directory, Parameters, Value};
use crate::error::SerializeError;
use crate::parse::ParseResult;
use crate::parse::values::{
    check_uri, parse_boolean, parse_date, parse_datetime, parse_float, parse_integer, parse_time,
    split_list, unescape_text,
};

/// The predefined value-type strings (RFC 2425 §5.8.4).
pub mod value_types {
    pub const URI: &str = "uri";
    pub const TEXT: &str = "text";
    pub const DATE: &str = "date";
    pub const TIME: &str = "time";
    pub const DATE_TIME: &str = "date-time";
    pub const INTEGER: &str = "integer";
    pub const BOOLEAN: &str = "boolean";
    pub const FLOAT: &str = "float";

    pub const ALL: [&str; 8] = [URI, TEXT, DATE, TIME, DATE_TIME, INTEGER, BOOLEAN, FLOAT];
}

/// The built-in fallback profile.
///
/// Knows the predefined directory types (`SOURCE`, `NAME`, `PROFILE`) and
/// builds the default directory: the first `NAME` text line is claimed as
/// the display name, everything else passes through.
pub struct PredefinedProfile;

impl Profile for PredefinedProfile {
    fn name(&self) -> &str {
        "directory"
    }

    fn value_type(
        &self,
        _profile: Option<&str>,
        _group: Option<&str>,
        name: &str,
        _params: &Parameters,
    ) -> Option<String> {
        match name.to_ascii_uppercase().as_str() {
            "SOURCE" => Some(value_types::URI.to_string()),
            "NAME" | "PROFILE" | "BEGIN" | "END" => Some(value_types::TEXT.to_string()),
            _ => None,
        }
    }

    fn create_directory(&self, lines: &[ContentLine]) -> Option<Directory> {
        let mut directory = Directory::new();
        let mut claimed_name = false;

        for line in lines {
            if !claimed_name
                && line.is_named("NAME")
                && let Value::Text(text) = &line.value
            {
                directory.display_name = Some(text.clone());
                claimed_name = true;
                continue;
            }
            directory.content_lines.push(line.clone());
        }

        Some(directory)
    }
}

/// The codec for the eight predefined value types.
///
/// One data-driven codec registered under every predefined type name,
/// dispatching on the resolved `value_type` string. List-capable types
/// (`text`, `date`, `time`, `date-time`, `integer`, `float`) split the raw
/// text on unescaped commas and produce one sibling value per element.
pub struct BaseCodec;

impl ValueFactory for BaseCodec {
    fn create_values(
        &self,
        _profile: Option<&str>,
        _group: Option<&str>,
        _name: &str,
        _params: &Parameters,
        value_type: Option<&str>,
        raw: &str,
        line_num: usize,
    ) -> ParseResult<Option<Vec<Value>>> {
        let values = match value_type {
            Some(value_types::URI) => {
                check_uri(raw, line_num)?;
                vec![Value::Uri(raw.to_string())]
            }
            Some(value_types::TEXT) => split_list(raw)
                .into_iter()
                .map(|part| Ok(Value::Text(unescape_text(part, line_num)?)))
                .collect::<ParseResult<_>>()?,
            Some(value_types::DATE) => split_list(raw)
                .into_iter()
                .map(|part| Ok(Value::Date(parse_date(part, line_num)?)))
                .collect::<ParseResult<_>>()?,
            Some(value_types::TIME) => split_list(raw)
                .into_iter()
                .map(|part| Ok(Value::Time(parse_time(part, line_num)?)))
                .collect::<ParseResult<_>>()?,
            Some(value_types::DATE_TIME) => split_list(raw)
                .into_iter()
                .map(|part| Ok(Value::DateTime(parse_datetime(part, line_num)?)))
                .collect::<ParseResult<_>>()?,
            Some(value_types::INTEGER) => split_list(raw)
                .into_iter()
                .map(|part| Ok(Value::Integer(parse_integer(part, line_num)?)))
                .collect::<ParseResult<_>>()?,
            Some(value_types::FLOAT) => split_list(raw)
                .into_iter()
                .map(|part| Ok(Value::Float(parse_float(part, line_num)?)))
                .collect::<ParseResult<_>>()?,
            Some(value_types::BOOLEAN) => vec![Value::Boolean(parse_boolean(raw, line_num)?)],
            _ => return Ok(None),
        };
        Ok(Some(values))
    }
}

impl ValueSerializer for BaseCodec {
    fn serialize_value(
        &self,
        _profile: Option<&str>,
        _group: Option<&str>,
        _name: &str,
        _params: &Parameters,
        value: &Value,
        value_type: Option<&str>,
        out: &mut String,
    ) -> Result<bool, SerializeError> {
        match (value_type, value) {
            (Some(value_types::URI), Value::Uri(s)) => out.push_str(s),
            (Some(value_types::TEXT), Value::Text(s)) => out.push_str(&escape_text(s)),
            (Some(value_types::DATE), Value::Date(d)) => {
                out.push_str(&d.format("%Y-%m-%d").to_string());
            }
            (Some(value_types::TIME), Value::Time(t)) => {
                out.push_str(&t.time.format("%H:%M:%S").to_string());
                if t.utc {
                    out.push('Z');
                }
            }
            (Some(value_types::DATE_TIME), Value::DateTime(dt)) => {
                out.push_str(&dt.date.format("%Y-%m-%d").to_string());
                out.push('T');
                out.push_str(&dt.time.format("%H:%M:%S").to_string());
                if dt.utc {
                    out.push('Z');
                }
            }
            (Some(value_types::INTEGER), Value::Integer(i)) => out.push_str(&i.to_string()),
            (Some(value_types::BOOLEAN), Value::Boolean(b)) => {
                out.push_str(if *b { "TRUE" } else { "FALSE" });
            }
            (Some(value_types::FLOAT), Value::Float(f)) => out.push_str(&f.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
