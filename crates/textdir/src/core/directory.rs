//! The directory aggregate produced by a parse.

use super::content_line::ContentLine;
use super::value::Value;

/// A parsed `text/directory` document.
///
/// Profiles materialize this from the processed line sequence. `kind` is the
/// enclosing block name (e.g. `VCARD`) when a block profile produced the
/// directory; the predefined fallback leaves it unset. Lines claimed by an
/// accessor (the predefined `NAME` line) are removed from `content_lines`
/// and re-derived by [`Directory::to_content_lines`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    /// Block name of the profile that built this directory, if any.
    pub kind: Option<String>,
    /// Display name, from `NAME` (predefined) or `FN` (vCard).
    pub display_name: Option<String>,
    /// Content lines not claimed by a specific accessor, in source order.
    pub content_lines: Vec<ContentLine>,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first line with the given name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ContentLine> {
        self.content_lines.iter().find(|l| l.is_named(name))
    }

    /// Returns every line with the given name, in order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&ContentLine> {
        self.content_lines
            .iter()
            .filter(|l| l.is_named(name))
            .collect()
    }

    /// Re-derives a serializable content-line sequence.
    ///
    /// A block directory is wrapped in `BEGIN:<kind>` / `END:<kind>`. A plain
    /// directory that claimed a `NAME` line re-emits it from `display_name`.
    #[must_use]
    pub fn to_content_lines(&self) -> Vec<ContentLine> {
        let mut lines = Vec::with_capacity(self.content_lines.len() + 2);

        if let Some(kind) = &self.kind {
            lines.push(ContentLine::new("BEGIN", Value::Text(kind.clone())));
            lines.extend(self.content_lines.iter().cloned());
            lines.push(ContentLine::new("END", Value::Text(kind.clone())));
        } else {
            if let Some(name) = &self.display_name {
                lines.push(ContentLine::new("NAME", Value::Text(name.clone())));
            }
            lines.extend(self.content_lines.iter().cloned());
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_directory_wraps_in_begin_end() {
        let dir = Directory {
            kind: Some("VCARD".to_string()),
            display_name: None,
            content_lines: vec![ContentLine::new("NOTE", "hi")],
        };
        let lines = dir.to_content_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].name, "BEGIN");
        assert_eq!(lines[2].name, "END");
    }

    #[test]
    fn plain_directory_reemits_name() {
        let dir = Directory {
            kind: None,
            display_name: Some("Team Roster".to_string()),
            content_lines: Vec::new(),
        };
        let lines = dir.to_content_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "NAME");
        assert_eq!(lines[0].value.as_text(), Some("Team Roster"));
    }

    #[test]
    fn get_is_case_insensitive() {
        let dir = Directory {
            kind: None,
            display_name: None,
            content_lines: vec![ContentLine::new("NOTE", "hi")],
        };
        assert!(dir.get("note").is_some());
        assert!(dir.get("TEL").is_none());
    }
}
