//! Immutable source text with a line index.
//!
//! [`SourceText`] owns the characters of one script file and records the byte
//! offset at which every line starts, so offset-to-line queries are a binary
//! search instead of a rescan.

use std::{fmt, ops::Range};

/// The text of one script file plus its line-start index.
///
/// Line numbers returned by this type are zero-based. `\n`, `\r\n` and a lone
/// `\r` all terminate a line.
///
/// # Examples
///
/// ```
/// use nss_core::source_text::SourceText;
///
/// let text = SourceText::new("chapter main\n{\n}\n");
/// assert_eq!(text.line_count(), 4);
/// assert_eq!(text.line_index(13), 1);
/// assert_eq!(text.slice(0..7), "chapter");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    /// Wraps `text` and builds its line index.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self { text, line_starts }
    }

    /// Returns the full text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of lines. An empty text still has one line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the zero-based line containing byte `offset`.
    ///
    /// Offsets past the end map to the last line.
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Returns the byte range of line `line`, excluding its terminator.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let content = &self.text[start..end];
        let trimmed = content.trim_end_matches(['\n', '\r']);
        Some(start..start + trimmed.len())
    }

    /// Returns the zero-based `(line, column)` of `offset`, column in characters.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.line_starts[line];
        let end = offset.min(self.text.len());
        let column = self
            .text
            .get(start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, column)
    }

    /// Returns the text covered by `range`, or an empty string if the range is
    /// out of bounds or splits a character.
    pub fn slice(&self, range: Range<usize>) -> &str {
        self.text.get(range).unwrap_or_default()
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("len", &self.text.len())
            .field("lines", &self.line_starts.len())
            .finish()
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = vec![0];
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                starts.push(i + 2);
                i += 2;
            }
            b'\r' | b'\n' => {
                starts.push(i + 1);
                i += 1;
            }
            _ => i += 1,
        }
    }
    starts
}
