//! Typed content-line values.
//!
//! Covers the RFC 2425 predefined value types plus the vCard additions
//! (RFC 2426): binary, phone-number, and utc-offset.

use chrono::{NaiveDate, NaiveTime};

use super::structured::{Address, StructuredName};

/// A materialized content-line value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text value, unescaped.
    Text(String),

    /// URI value (RFC 1738 form, kept as written).
    Uri(String),

    /// Date value (ISO 8601 calendar date).
    Date(NaiveDate),

    /// Time value with UTC marker.
    Time(Time),

    /// Combined date and time.
    DateTime(DateTime),

    /// Integer value.
    Integer(i64),

    /// Boolean value.
    Boolean(bool),

    /// Float value.
    Float(f64),

    /// Binary data (base64 in the source stream).
    Binary(Vec<u8>),

    /// Telephone number (vCard `phone-number` type).
    PhoneNumber(String),

    /// UTC offset (vCard `utc-offset` type).
    UtcOffset(UtcOffset),

    /// Structured name (vCard `N` property).
    StructuredName(StructuredName),

    /// Structured delivery address (vCard `ADR` property).
    Address(Address),

    /// Raw text for lines with no registered factory, kept verbatim.
    Raw(String),
}

impl Value {
    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Raw(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a URI if applicable.
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a date if applicable.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the value as an integer if applicable.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a boolean if applicable.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as binary data if applicable.
    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a structured name if applicable.
    #[must_use]
    pub fn as_structured_name(&self) -> Option<&StructuredName> {
        match self {
            Self::StructuredName(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as an address if applicable.
    #[must_use]
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<StructuredName> for Value {
    fn from(n: StructuredName) -> Self {
        Self::StructuredName(n)
    }
}

impl From<Address> for Value {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

/// A time of day with a UTC marker.
///
/// `utc` records whether the source carried a trailing `Z`, so a round trip
/// reproduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    /// The time of day.
    pub time: NaiveTime,
    /// Whether the time was given in UTC (`Z` suffix).
    pub utc: bool,
}

/// A combined date and time with a UTC marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    /// The calendar date.
    pub date: NaiveDate,
    /// The time of day.
    pub time: NaiveTime,
    /// Whether the time was given in UTC (`Z` suffix).
    pub utc: bool,
}

/// A UTC offset (`+HH:MM` / `-HH:MM`).
///
/// The sign is carried separately so negative zero offsets like `-00:30`
/// are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset {
    /// Whether the offset is east of UTC.
    pub positive: bool,
    /// Hours component (0..=23).
    pub hours: u8,
    /// Minutes component (0..=59).
    pub minutes: u8,
}

impl UtcOffset {
    /// Creates a UTC offset.
    #[must_use]
    pub fn new(positive: bool, hours: u8, minutes: u8) -> Self {
        Self {
            positive,
            hours,
            minutes,
        }
    }

    /// Total offset in seconds, signed.
    #[must_use]
    pub fn total_seconds(&self) -> i32 {
        let magnitude = i32::from(self.hours) * 3600 + i32::from(self.minutes) * 60;
        if self.positive { magnitude } else { -magnitude }
    }
}
