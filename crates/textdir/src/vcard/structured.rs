//! Structured vCard value parsing and serialization (RFC 2426 §3).
//!
//! `N` and `ADR` values are semicolon-separated component lists. Components
//! are escaped individually; `;` is escaped inside components in addition to
//! the text escapes.

use crate::build::escape::escape_component;
use crate::core::{Address, StructuredName};
use crate::parse::ParseResult;
use crate::parse::values::{split_structured, unescape_text};

/// Parses an `N` value: family;given;additional;prefixes;suffixes.
///
/// Missing trailing components are tolerated and read as empty.
///
/// ## Errors
/// Returns an error for an invalid escape sequence in any component.
pub fn parse_structured_name(raw: &str, line_num: usize) -> ParseResult<StructuredName> {
    let parts = split_structured(raw);
    let component = |idx: usize| -> ParseResult<String> {
        parts
            .get(idx)
            .map_or(Ok(String::new()), |p| unescape_text(p, line_num))
    };

    Ok(StructuredName {
        family: component(0)?,
        given: component(1)?,
        additional: component(2)?,
        prefixes: component(3)?,
        suffixes: component(4)?,
    })
}

/// Serializes an `N` value.
#[must_use]
pub fn serialize_structured_name(name: &StructuredName) -> String {
    [
        &name.family,
        &name.given,
        &name.additional,
        &name.prefixes,
        &name.suffixes,
    ]
    .map(|c| escape_component(c))
    .join(";")
}

/// Parses an `ADR` value:
/// pobox;extended;street;locality;region;postal-code;country.
///
/// ## Errors
/// Returns an error for an invalid escape sequence in any component.
pub fn parse_address(raw: &str, line_num: usize) -> ParseResult<Address> {
    let parts = split_structured(raw);
    let component = |idx: usize| -> ParseResult<String> {
        parts
            .get(idx)
            .map_or(Ok(String::new()), |p| unescape_text(p, line_num))
    };

    Ok(Address {
        po_box: component(0)?,
        extended: component(1)?,
        street: component(2)?,
        locality: component(3)?,
        region: component(4)?,
        postal_code: component(5)?,
        country: component(6)?,
    })
}

/// Serializes an `ADR` value.
#[must_use]
pub fn serialize_address(addr: &Address) -> String {
    [
        &addr.po_box,
        &addr.extended,
        &addr.street,
        &addr.locality,
        &addr.region,
        &addr.postal_code,
        &addr.country,
    ]
    .map(|c| escape_component(c))
    .join(";")
}
