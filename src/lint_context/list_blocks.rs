use super::types::{ListBlock, ListItemRecord};
use crate::utils::is_blank_line;

/// Collects list blocks and item line spans while the block scan walks pulldown events.
///
/// Lists are recorded when they open, so parents precede their nested lists. Item spans are
/// kept in event order so that numbering applied later lets inner items override outer ones.
pub(super) struct ListCollector<'r, 'a> {
    raw_lines: &'r [&'a str],
    blocks: Vec<ListBlock<'a>>,
    open: Vec<usize>,
    item_spans: Vec<(usize, usize)>,
}

impl<'r, 'a> ListCollector<'r, 'a> {
    pub(super) fn new(raw_lines: &'r [&'a str]) -> Self {
        Self {
            raw_lines,
            blocks: Vec::new(),
            open: Vec::new(),
            item_spans: Vec::new(),
        }
    }

    /// A list opens; `first_line` and `last_line` are the lines covered by its source range.
    pub(super) fn open_list(&mut self, is_ordered: bool, first_line: usize, last_line: usize) {
        let end_line = self.last_content_line(first_line, last_line) + 1;
        self.open.push(self.blocks.len());
        self.blocks.push(ListBlock {
            is_ordered,
            start_line: first_line,
            end_line,
            nesting: self.open.len() - 1,
            items: Vec::new(),
        });
    }

    pub(super) fn close_list(&mut self) {
        self.open.pop();
    }

    pub(super) fn add_item(&mut self, first_line: usize, last_line: usize) {
        let Some(text) = self.raw_lines.get(first_line).copied() else {
            return;
        };
        if let Some(&current) = self.open.last() {
            self.blocks[current].items.push(ListItemRecord {
                line_index: first_line,
                text,
            });
        }
        let last_line = self.last_content_line(first_line, last_line);
        self.item_spans.push((first_line, last_line));
    }

    /// Walk back over trailing blank lines, never above `first_line`
    fn last_content_line(&self, first_line: usize, last_line: usize) -> usize {
        let mut line = last_line.min(self.raw_lines.len().saturating_sub(1));
        while line > first_line && is_blank_line(self.raw_lines.get(line).copied()) {
            line -= 1;
        }
        line
    }

    pub(super) fn finish(self) -> (Vec<ListBlock<'a>>, Vec<(usize, usize)>) {
        (self.blocks, self.item_spans)
    }
}
