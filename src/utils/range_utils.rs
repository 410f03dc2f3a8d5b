//! Utilities for position/range conversions

use std::ops::Range;

/// Maps 1-based line numbers and character columns onto byte offsets of a document.
#[derive(Debug)]
pub struct LineIndex<'a> {
    content: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        Self { content, line_starts }
    }

    /// Get the global start byte offset for a given 1-based line number.
    ///
    /// The line one past the last line maps to the end of the document.
    pub fn get_line_start_byte(&self, line_num: usize) -> Option<usize> {
        if line_num == 0 {
            return None;
        }
        match self.line_starts.get(line_num - 1) {
            Some(&start) => Some(start),
            None if line_num - 1 == self.line_starts.len() => Some(self.content.len()),
            None => None,
        }
    }

    /// Text of a 1-based line without its line ending.
    pub fn line_text(&self, line_num: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line_num.checked_sub(1)?)?;
        let end = self.line_starts.get(line_num).map_or(self.content.len(), |&next| next);
        Some(self.content[start..end].trim_end_matches(['\n', '\r']))
    }

    /// Byte range covered by `char_len` characters starting at a 1-based character column.
    ///
    /// Columns past the end of the line are clamped to the line end.
    pub fn char_range_to_byte_range(&self, line_num: usize, column: usize, char_len: usize) -> Option<Range<usize>> {
        let line_start = self.get_line_start_byte(line_num)?;
        let text = self.line_text(line_num).unwrap_or("");
        let start = line_start + char_to_byte_offset(text, column.saturating_sub(1));
        let end = line_start + char_to_byte_offset(text, column.saturating_sub(1) + char_len);
        Some(start..end)
    }
}

/// Byte offset of the `char_index`-th character of `text`, clamped to `text.len()`.
pub fn char_to_byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices().nth(char_index).map_or(text.len(), |(i, _)| i)
}

/// 1-based character column of a byte offset within `text`.
pub fn byte_to_char_column(text: &str, byte_offset: usize) -> usize {
    let end = byte_offset.min(text.len());
    text.get(..end).map_or(end, |prefix| prefix.chars().count()) + 1
}
