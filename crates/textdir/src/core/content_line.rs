//! Content line and parameter types (RFC 2425 §5.8.2).

use super::value::Value;

/// A single content-line parameter.
///
/// A parameter is a name with an optional value. Some producers emit bare
/// parameter names with no `=value` part as implicit type flags; those carry
/// `value: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name, case preserved as written.
    pub name: String,
    /// Parameter value, or `None` for a bare parameter name.
    pub value: Option<String>,
}

impl Parameter {
    /// Creates a parameter with a value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a bare parameter with no value.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Returns whether this parameter has the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An ordered parameter list.
///
/// Duplicate names are allowed; encounter order is preserved so that a
/// serialized line reproduces the source faithfully. A source parameter with
/// comma-separated values (`TYPE=home,postal`) is stored as one entry per
/// value, all sharing the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, param: Parameter) {
        self.0.push(param);
    }

    /// Returns the first parameter with the given name (case-insensitive).
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.is_named(name))
    }

    /// Returns the first non-`None` value for the given name.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .filter(|p| p.is_named(name))
            .find_map(|p| p.value.as_deref())
    }

    /// Returns every value recorded under the given name, in order.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|p| p.is_named(name))
            .filter_map(|p| p.value.as_deref())
            .collect()
    }

    /// Returns whether any value under `name` equals `value` (case-insensitive).
    #[must_use]
    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.all(name)
            .iter()
            .any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Iterates over parameters in encounter order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    /// Returns whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One logical record of a `text/directory` stream.
///
/// Group, name, and parameters come straight from the tokenizer; the value
/// has already been materialized by a value factory. The `profile` field is
/// the tag applied by the processor: the name of the profile active at the
/// moment the line was read, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLine {
    /// Profile active when this line was read.
    pub profile: Option<String>,
    /// Property group (e.g. "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name, normalized to ASCII uppercase. Never empty.
    pub name: String,
    /// Parameters in encounter order.
    pub params: Parameters,
    /// The typed value.
    pub value: Value,
}

impl ContentLine {
    /// Creates a content line with no profile, group, or parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            profile: None,
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            value: value.into(),
        }
    }

    /// Returns whether this line has the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the explicit `VALUE=` parameter, lowercased, if present.
    #[must_use]
    pub fn value_type_param(&self) -> Option<String> {
        self.params
            .first_value("VALUE")
            .map(str::to_ascii_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_preserve_order_and_duplicates() {
        let mut params = Parameters::new();
        params.push(Parameter::new("TYPE", "home"));
        params.push(Parameter::new("type", "postal"));
        params.push(Parameter::new("LANGUAGE", "en"));

        assert_eq!(params.len(), 3);
        assert_eq!(params.all("type"), vec!["home", "postal"]);
        assert_eq!(params.first_value("TYPE"), Some("home"));
        assert_eq!(params.first_value("language"), Some("en"));
    }

    #[test]
    fn bare_parameter_has_no_value() {
        let mut params = Parameters::new();
        params.push(Parameter::bare("HOME"));

        assert!(params.first("home").is_some());
        assert_eq!(params.first_value("home"), None);
        assert!(params.all("home").is_empty());
    }

    #[test]
    fn has_value_is_case_insensitive() {
        let mut params = Parameters::new();
        params.push(Parameter::new("TYPE", "Home"));
        assert!(params.has_value("type", "HOME"));
        assert!(!params.has_value("type", "work"));
    }

    #[test]
    fn content_line_uppercases_name() {
        let line = ContentLine::new("note", "hi");
        assert_eq!(line.name, "NOTE");
        assert!(line.is_named("Note"));
    }
}
