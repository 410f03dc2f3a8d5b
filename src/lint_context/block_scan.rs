use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use super::code_spans::{MarkerCollector, line_of};
use super::list_blocks::ListCollector;
use super::types::{InlineCodeSpanRanges, ListBlock};
use crate::utils::is_blank_line;

/// A fenced code block located by the block scan (0-based lines)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FencedBlock {
    pub open_line: usize,
    /// `None` when the fence is never closed
    pub close_line: Option<usize>,
    /// Last line covered by the block, closing fence included
    pub last_line: usize,
}

/// Block-level structure gathered from one pulldown-cmark pass
#[derive(Debug, Default)]
pub(super) struct BlockScan<'a> {
    pub fenced_blocks: Vec<FencedBlock>,
    /// Inclusive line ranges of indented code blocks
    pub indented_blocks: Vec<(usize, usize)>,
    pub list_blocks: Vec<ListBlock<'a>>,
    /// Inclusive line spans of list items, in document order
    pub item_spans: Vec<(usize, usize)>,
    pub horizontal_rules: Vec<usize>,
    /// Last line of leading front matter
    pub front_matter_end: Option<usize>,
    pub ignored_markers: InlineCodeSpanRanges,
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_MATH);
    options.insert(Options::ENABLE_GFM);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options
}

/// Walk the document once with pulldown-cmark and record block boundaries by line.
pub(super) fn scan_blocks<'a>(content: &'a str, raw_lines: &[&'a str], line_offsets: &[usize]) -> BlockScan<'a> {
    let mut scan = BlockScan::default();
    if raw_lines.is_empty() {
        return scan;
    }

    let last_line_of = |start: usize, end: usize| line_of(line_offsets, end.saturating_sub(1).max(start));
    let mut lists = ListCollector::new(raw_lines);
    let mut markers = MarkerCollector::new(content, line_offsets);

    for (event, range) in Parser::new_ext(content, parser_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
                let open_line = line_of(line_offsets, range.start);
                let last_line = last_line_of(range.start, range.end);
                let close_line = (last_line > open_line)
                    .then(|| fence_marker(raw_lines[open_line], range.start - line_offsets[open_line]))
                    .flatten()
                    .filter(|&(marker, len)| is_closing_fence(raw_lines[last_line], marker, len))
                    .map(|_| last_line);
                scan.fenced_blocks.push(FencedBlock {
                    open_line,
                    close_line,
                    last_line,
                });
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)) => {
                let first = line_of(line_offsets, range.start);
                let mut last = last_line_of(range.start, range.end);
                while last > first && is_blank_line(Some(raw_lines[last])) {
                    last -= 1;
                }
                scan.indented_blocks.push((first, last));
            }
            Event::Start(Tag::List(start_number)) => {
                let first = line_of(line_offsets, range.start);
                lists.open_list(start_number.is_some(), first, last_line_of(range.start, range.end));
            }
            Event::End(TagEnd::List(_)) => lists.close_list(),
            Event::Start(Tag::Item) => {
                let mut first = line_of(line_offsets, range.start);
                if content.as_bytes().get(range.start) == Some(&b'\n') && first + 1 < raw_lines.len() {
                    first += 1;
                }
                lists.add_item(first, last_line_of(range.start, range.end));
            }
            Event::Rule => scan.horizontal_rules.push(line_of(line_offsets, range.start)),
            Event::Start(Tag::MetadataBlock(_)) if range.start == 0 => {
                let mut end = last_line_of(range.start, range.end);
                // Make sure the closing delimiter is part of the block
                if !is_front_matter_delimiter(raw_lines[end])
                    && raw_lines.get(end + 1).is_some_and(|line| is_front_matter_delimiter(line))
                {
                    end += 1;
                }
                scan.front_matter_end = Some(end);
            }
            Event::Code(_) | Event::InlineMath(_) | Event::DisplayMath(_) | Event::InlineHtml(_) => {
                markers.mark_range(range);
            }
            Event::Start(Tag::Link { link_type, .. }) | Event::Start(Tag::Image { link_type, .. }) => {
                markers.mark_link(link_type, range);
            }
            _ => {}
        }
    }

    let (list_blocks, item_spans) = lists.finish();
    scan.list_blocks = list_blocks;
    scan.item_spans = item_spans;
    scan.ignored_markers = markers.finish();
    log::trace!(
        "Block scan: {} fences, {} indented code blocks, {} lists",
        scan.fenced_blocks.len(),
        scan.indented_blocks.len(),
        scan.list_blocks.len()
    );
    scan
}

/// Marker character and run length of the fence that starts at or after `from`
fn fence_marker(line: &str, from: usize) -> Option<(u8, usize)> {
    let bytes = line.as_bytes();
    let start = from + bytes.get(from..)?.iter().position(|&b| b == b'`' || b == b'~')?;
    let marker = bytes[start];
    let len = bytes[start..].iter().take_while(|&&b| b == marker).count();
    Some((marker, len))
}

/// A closing fence repeats the opening character at least as many times, followed by whitespace only
fn is_closing_fence(line: &str, marker: u8, min_len: usize) -> bool {
    let rest = line.trim_start_matches(|c: char| c == '>' || c.is_whitespace());
    let run = rest.bytes().take_while(|&b| b == marker).count();
    run >= min_len && rest[run..].trim().is_empty()
}

fn is_front_matter_delimiter(line: &str) -> bool {
    matches!(line.trim_end(), "---" | "...")
}
