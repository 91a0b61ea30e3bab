//! Line unfolding (RFC 2425 §5.8.1).
//!
//! A long logical line may be split across physical lines by inserting
//! CRLF followed by a single space or tab. Unfolding removes those
//! sequences. Bare LF is accepted for lenient parsing of non-conforming
//! producers.

/// Unfolds a directory stream by removing line continuations.
///
/// Every CRLF (or bare LF) immediately followed by a space or tab is removed
/// together with the whitespace character. Logical line endings are
/// normalized to `\n`. The peekable one-character lookahead means a fold
/// straddling any buffer boundary is handled the same as one in the middle.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    // Fold: drop CRLF and the single whitespace
                    chars.next();
                } else {
                    result.push('\n');
                }
            } else {
                result.push(c);
            }
        } else if c == '\n' {
            if matches!(chars.peek(), Some(' ' | '\t')) {
                chars.next();
            } else {
                result.push('\n');
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits raw input into numbered logical lines.
///
/// Continuation lines (leading space or tab) are merged into the preceding
/// line with the fold whitespace removed. Each entry carries the 1-based
/// physical line number where the logical line began, for error reporting.
/// Whitespace-only physical lines yield no content lines.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_num = idx + 1;

        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            // A whitespace-only physical line is not a continuation
            if rest.trim().is_empty() {
                continue;
            }
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(rest);
            } else {
                lines.push((line_num, rest.to_string()));
            }
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        lines.push((line_num, line.to_string()));
    }

    lines
}
