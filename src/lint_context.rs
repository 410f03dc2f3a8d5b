mod block_scan;
mod code_spans;
mod line_computation;
mod list_blocks;
pub mod types;

pub use types::*;

/// Everything the rules need to know about one document, computed once per lint run.
///
/// A context is built by value for every invocation and shared by reference with each
/// rule, so concurrent runs never observe each other's state.
pub struct LintContext<'a> {
    pub content: &'a str,
    /// Raw lines without line endings
    pub raw_lines: Vec<&'a str>,
    /// Byte offset of the start of each line
    pub line_offsets: Vec<usize>,
    /// Structural metadata, one entry per line
    pub lines: Vec<LineInfo>,
    /// List blocks in the order they open
    pub list_blocks: Vec<ListBlock<'a>>,
    /// Positions of `*`/`_` characters that are not emphasis markup
    pub code_span_ranges: InlineCodeSpanRanges,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str) -> Self {
        let (raw_lines, line_offsets) = split_lines(content);
        let scan = block_scan::scan_blocks(content, &raw_lines, &line_offsets);
        let lines = line_computation::compute_line_infos(&raw_lines, &line_offsets, &scan);
        let list_blocks = scan.list_blocks;
        let code_span_ranges = scan.ignored_markers;

        Self {
            content,
            raw_lines,
            line_offsets,
            lines,
            list_blocks,
            code_span_ranges,
        }
    }

    pub fn line_count(&self) -> usize {
        self.raw_lines.len()
    }

    /// Raw text of a 0-based line, or `None` past either end of the document
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.raw_lines.get(index).copied()
    }

    /// Text of the line before `index`, `None` at the first line
    pub fn previous_line(&self, index: usize) -> Option<&'a str> {
        index.checked_sub(1).and_then(|i| self.line(i))
    }

    /// Iterate lines with their metadata in document order
    pub fn classified_lines(&self) -> impl Iterator<Item = ClassifiedLine<'_, 'a>> + '_ {
        self.raw_lines
            .iter()
            .zip(&self.lines)
            .enumerate()
            .map(|(index, (&text, info))| ClassifiedLine { index, text, info })
    }

    pub fn has_fences(&self) -> bool {
        self.lines.iter().any(|info| info.fence.is_some())
    }

    pub fn has_char(&self, c: char) -> bool {
        self.content.contains(c)
    }
}

/// Split a document on `\n` / `\r\n`, returning the lines and their start offsets.
///
/// A trailing line ending does not start an extra empty line.
pub(crate) fn split_lines(content: &str) -> (Vec<&str>, Vec<usize>) {
    let mut lines = Vec::new();
    let mut offsets = Vec::new();
    let mut offset = 0;
    for segment in content.split_inclusive('\n') {
        let text = segment.strip_suffix('\n').unwrap_or(segment);
        let text = text.strip_suffix('\r').unwrap_or(text);
        lines.push(text);
        offsets.push(offset);
        offset += segment.len();
    }
    (lines, offsets)
}
