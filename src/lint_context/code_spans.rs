use std::ops::Range;

use pulldown_cmark::LinkType;

use super::types::InlineCodeSpanRanges;

/// Records the positions of `*`/`_` characters that belong to non-markup inline content.
pub(super) struct MarkerCollector<'a> {
    content: &'a str,
    line_offsets: &'a [usize],
    ranges: InlineCodeSpanRanges,
}

impl<'a> MarkerCollector<'a> {
    pub(super) fn new(content: &'a str, line_offsets: &'a [usize]) -> Self {
        Self {
            content,
            line_offsets,
            ranges: InlineCodeSpanRanges::with_line_count(line_offsets.len()),
        }
    }

    /// Ignore every marker character inside `range`
    pub(super) fn mark_range(&mut self, range: Range<usize>) {
        let Some(text) = self.content.get(range.clone()) else {
            return;
        };
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'*' || byte == b'_' {
                let offset = range.start + i;
                let line = line_of(self.line_offsets, offset);
                self.ranges.insert(line, offset - self.line_offsets[line]);
            }
        }
    }

    /// Ignore markers in the non-text part of a link or image.
    ///
    /// Autolinks are ignored entirely. Inline links ignore their `(destination "title")`
    /// part and full reference links their `[label]` part; the link text stays markup.
    pub(super) fn mark_link(&mut self, link_type: LinkType, range: Range<usize>) {
        let Some(source) = self.content.get(range.clone()) else {
            return;
        };
        match link_type {
            LinkType::Autolink | LinkType::Email => self.mark_range(range),
            LinkType::Inline => {
                if let Some(pos) = source.rfind("](") {
                    self.mark_range(range.start + pos + 1..range.end);
                }
            }
            LinkType::Reference | LinkType::ReferenceUnknown => {
                if let Some(pos) = source.rfind("][") {
                    self.mark_range(range.start + pos + 1..range.end);
                }
            }
            _ => {}
        }
    }

    pub(super) fn finish(mut self) -> InlineCodeSpanRanges {
        self.ranges.finish();
        self.ranges
    }
}

/// 0-based line containing a byte offset
pub(super) fn line_of(line_offsets: &[usize], offset: usize) -> usize {
    line_offsets.partition_point(|&start| start <= offset).saturating_sub(1)
}
