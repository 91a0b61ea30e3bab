//! Line folding (RFC 2425 §5.8.1).

/// Maximum characters between fold points.
const MAX_LINE_CHARS: usize = 75;

/// A folding writer.
///
/// Counts non-CRLF characters written since the last fold point and inserts
/// CRLF + space before the character that would exceed 75, which then counts
/// as the first character of the continuation. CR resets the counter; LF is
/// not counted.
#[derive(Debug, Default)]
pub struct Folder {
    out: String,
    col: usize,
}

impl Folder {
    /// Creates an empty folder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a string through the folder.
    pub fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            self.push(c);
        }
    }

    /// Writes one character through the folder.
    pub fn push(&mut self, c: char) {
        match c {
            '\r' => {
                self.out.push(c);
                self.col = 0;
            }
            '\n' => {
                self.out.push(c);
            }
            _ => {
                if self.col >= MAX_LINE_CHARS {
                    self.out.push_str("\r\n ");
                    self.col = 0;
                }
                self.out.push(c);
                self.col += 1;
            }
        }
    }

    /// Consumes the folder and returns the folded output.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

/// Folds a single logical line (no embedded CRLF).
#[must_use]
pub fn fold_line(line: &str) -> String {
    let mut folder = Folder::new();
    folder.push_str(line);
    folder.finish()
}
