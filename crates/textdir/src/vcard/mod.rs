//! The vCard profile (RFC 2426).
//!
//! Plugs into the core through the [`Profile`] / [`ValueFactory`] /
//! [`ValueSerializer`] contracts: the profile maps the vCard property set to
//! value types, handles the structured `N` and `ADR` values itself through
//! its codec capability (so they win over generic text handling even without
//! a `VALUE=` parameter), and materializes a `VCARD`-kind directory with the
//! `FN` text copied into the display name.

pub mod structured;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use self::structured::{
    parse_address, parse_structured_name, serialize_address, serialize_structured_name,
};
use crate::core::{ContentLine, Directory, Parameters, Value};
use crate::error::SerializeError;
use crate::parse::values::parse_utc_offset;
use crate::parse::{ParseError, ParseResult};
use crate::profile::predefined::value_types;
use crate::profile::{Profile, ValueFactory, ValueSerializer};

/// Value-type strings vCard adds on top of RFC 2425.
pub mod vcard_value_types {
    pub const BINARY: &str = "binary";
    pub const VCARD: &str = "vcard";
    pub const PHONE_NUMBER: &str = "phone-number";
    pub const UTC_OFFSET: &str = "utc-offset";

    pub const ALL: [&str; 4] = [BINARY, VCARD, PHONE_NUMBER, UTC_OFFSET];
}

/// The vCard profile.
pub struct VCardProfile;

impl Profile for VCardProfile {
    fn name(&self) -> &str {
        "VCARD"
    }

    fn value_type(
        &self,
        _profile: Option<&str>,
        _group: Option<&str>,
        name: &str,
        _params: &Parameters,
    ) -> Option<String> {
        let value_type = match name.to_ascii_uppercase().as_str() {
            // N and ADR are handled by this profile's own factory
            "N" | "ADR" => return None,
            "TEL" => vcard_value_types::PHONE_NUMBER,
            "PHOTO" | "LOGO" | "SOUND" | "KEY" => vcard_value_types::BINARY,
            "TZ" => vcard_value_types::UTC_OFFSET,
            "AGENT" => vcard_value_types::VCARD,
            "BDAY" => value_types::DATE,
            "REV" => value_types::DATE_TIME,
            "URL" | "SOURCE" => value_types::URI,
            "FN" | "NICKNAME" | "LABEL" | "MAILER" | "TITLE" | "ROLE" | "ORG" | "CATEGORIES"
            | "NOTE" | "PRODID" | "SORT-STRING" | "UID" | "CLASS" | "EMAIL" | "VERSION"
            | "NAME" | "PROFILE" => value_types::TEXT,
            _ => return None,
        };
        Some(value_type.to_string())
    }

    fn create_directory(&self, lines: &[ContentLine]) -> Option<Directory> {
        let display_name = lines
            .iter()
            .find(|l| l.is_named("FN"))
            .and_then(|l| l.value.as_text())
            .map(str::to_string);

        Some(Directory {
            kind: Some("VCARD".to_string()),
            display_name,
            content_lines: lines.to_vec(),
        })
    }

    fn as_value_factory(&self) -> Option<&dyn ValueFactory> {
        Some(self)
    }

    fn as_value_serializer(&self) -> Option<&dyn ValueSerializer> {
        Some(self)
    }
}

impl ValueFactory for VCardProfile {
    /// Handles the structured `N` and `ADR` properties.
    ///
    /// Defers (`Ok(None)`) when an explicit `VALUE=` parameter resolved a
    /// type, so the parameter keeps its precedence.
    fn create_values(
        &self,
        _profile: Option<&str>,
        _group: Option<&str>,
        name: &str,
        _params: &Parameters,
        value_type: Option<&str>,
        raw: &str,
        line_num: usize,
    ) -> ParseResult<Option<Vec<Value>>> {
        if value_type.is_some() {
            return Ok(None);
        }
        match name.to_ascii_uppercase().as_str() {
            "N" => Ok(Some(vec![Value::StructuredName(parse_structured_name(
                raw, line_num,
            )?)])),
            "ADR" => Ok(Some(vec![Value::Address(parse_address(raw, line_num)?)])),
            _ => Ok(None),
        }
    }
}

impl ValueSerializer for VCardProfile {
    fn serialize_value(
        &self,
        _profile: Option<&str>,
        _group: Option<&str>,
        _name: &str,
        _params: &Parameters,
        value: &Value,
        _value_type: Option<&str>,
        out: &mut String,
    ) -> Result<bool, SerializeError> {
        match value {
            Value::StructuredName(name) => out.push_str(&serialize_structured_name(name)),
            Value::Address(addr) => out.push_str(&serialize_address(addr)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Codec for the vCard-specific value types.
pub struct VCardCodec;

impl ValueFactory for VCardCodec {
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
        let value = match value_type {
            Some(vcard_value_types::BINARY) => {
                let decoded = BASE64.decode(raw.trim()).map_err(|e| {
                    ParseError::invalid_value(line_num, format!("invalid base64 data: {e}"))
                })?;
                Value::Binary(decoded)
            }
            Some(vcard_value_types::PHONE_NUMBER) => {
                check_phone_number(raw, line_num)?;
                Value::PhoneNumber(raw.to_string())
            }
            Some(vcard_value_types::UTC_OFFSET) => {
                Value::UtcOffset(parse_utc_offset(raw, line_num)?)
            }
            // Nested vCard (AGENT): kept verbatim for the caller to reparse
            Some(vcard_value_types::VCARD) => Value::Raw(raw.to_string()),
            _ => return Ok(None),
        };
        Ok(Some(vec![value]))
    }
}

impl ValueSerializer for VCardCodec {
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
            (Some(vcard_value_types::BINARY), Value::Binary(data)) => {
                out.push_str(&BASE64.encode(data));
            }
            (Some(vcard_value_types::PHONE_NUMBER), Value::PhoneNumber(s)) => out.push_str(s),
            (Some(vcard_value_types::UTC_OFFSET), Value::UtcOffset(offset)) => {
                out.push(if offset.positive { '+' } else { '-' });
                out.push_str(&format!("{:02}:{:02}", offset.hours, offset.minutes));
            }
            (Some(vcard_value_types::VCARD), Value::Raw(s)) => out.push_str(s),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Validates a telephone number: at least one digit, and only characters
/// from the conventional dialing set.
fn check_phone_number(s: &str, line_num: usize) -> ParseResult<()> {
    let has_digit = s.chars().any(|c| c.is_ascii_digit());
    let chars_ok = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | '(' | ')' | ' ' | '/' | 'x'));
    if has_digit && chars_ok {
        Ok(())
    } else {
        Err(ParseError::invalid_value(
            line_num,
            format!("malformed telephone number {s:?}"),
        ))
    }
}
