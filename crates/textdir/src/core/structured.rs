//! Structured vCard value types (RFC 2426 §3.1).
//!
//! These back the `N` and `ADR` properties, whose values are
//! semicolon-separated component lists. Components may be empty.

/// Structured name (`N` property, RFC 2426 §3.1.2).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    /// Family name (surname).
    pub family: String,
    /// Given name.
    pub given: String,
    /// Additional (middle) names.
    pub additional: String,
    /// Honorific prefixes (e.g. "Dr.").
    pub prefixes: String,
    /// Honorific suffixes (e.g. "Jr.").
    pub suffixes: String,
}

impl StructuredName {
    /// Creates an empty structured name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            given: given.into(),
            ..Self::default()
        }
    }

    /// Returns whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
            && self.given.is_empty()
            && self.additional.is_empty()
            && self.prefixes.is_empty()
            && self.suffixes.is_empty()
    }

    /// Formats as a display name (given then family).
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.given.is_empty() {
            parts.push(self.given.as_str());
        }
        if !self.family.is_empty() {
            parts.push(self.family.as_str());
        }
        parts.join(" ")
    }
}

/// Delivery address (`ADR` property, RFC 2426 §3.2.1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Post office box.
    pub po_box: String,
    /// Extended address (apartment or suite).
    pub extended: String,
    /// Street address.
    pub street: String,
    /// Locality (city).
    pub locality: String,
    /// Region (state or province).
    pub region: String,
    /// Postal code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
}

impl Address {
    /// Creates an empty address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.po_box.is_empty()
            && self.extended.is_empty()
            && self.street.is_empty()
            && self.locality.is_empty()
            && self.region.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
    }

    /// Formats as a single comma-separated line, skipping empty components.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_name_display() {
        let name = StructuredName::simple("Doe", "John");
        assert_eq!(name.display_name(), "John Doe");
    }

    #[test]
    fn empty_name() {
        assert!(StructuredName::new().is_empty());
    }

    #[test]
    fn address_one_line_skips_empty() {
        let addr = Address {
            street: "123 Oak St".to_string(),
            locality: "Springfield".to_string(),
            region: "IL".to_string(),
            ..Address::default()
        };
        assert_eq!(addr.one_line(), "123 Oak St, Springfield, IL");
    }
}
