/// Which end of a fenced code block a line sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceBoundary {
    /// The line opens a fence (the line above must be blank)
    Open,
    /// The line closes a fence (the line below must be blank)
    Close,
}

/// A line that opens or closes a fenced code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceLine {
    pub boundary: FenceBoundary,
    /// Literal text before the first backtick/tilde, with trailing whitespace removed.
    /// This is what a fix has to repeat to insert a blank line inside the same container.
    pub prefix: Option<String>,
}

/// Pre-computed information about a line
#[derive(Debug, Clone, Default)]
pub struct LineInfo {
    /// Byte offset where this line starts in the document
    pub byte_offset: usize,
    /// Length of the line in bytes (without newline)
    pub byte_len: usize,
    /// Whether the line is blank (see `utils::is_blank_line`)
    pub is_blank: bool,
    /// Whether this line is inside a code block (fence boundary lines excluded)
    pub in_code_block: bool,
    /// Set on the opening and closing lines of a fenced code block
    pub fence: Option<FenceLine>,
    /// Whether this line belongs to a pipe table
    pub in_table: bool,
    /// 0 when not in a list item, 1 on the item's marker line, n on the n-th line of the
    /// innermost item covering this line
    pub item_line: usize,
    /// Whether this line is a horizontal rule (---, ***, ___, etc.)
    pub is_horizontal_rule: bool,
    /// Whether this line is inside a math block ($$ ... $$), delimiters included
    pub in_math_block: bool,
    /// Whether this line is inside front matter
    pub in_front_matter: bool,
}

impl LineInfo {
    /// Whether this line is the marker line of a list item
    pub fn is_item_start(&self) -> bool {
        self.item_line == 1
    }

    pub fn in_list_item(&self) -> bool {
        self.item_line > 0
    }

    /// Signed fence encoding: 1 opens, -1 closes, 0 is not a fence boundary
    pub fn fence_direction(&self) -> i8 {
        match self.fence.as_ref().map(|f| f.boundary) {
            Some(FenceBoundary::Open) => 1,
            Some(FenceBoundary::Close) => -1,
            None => 0,
        }
    }

    pub fn is_fence_open(&self) -> bool {
        self.fence_direction() > 0
    }

    pub fn is_fence_close(&self) -> bool {
        self.fence_direction() < 0
    }
}

/// A single item of a list block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemRecord<'a> {
    /// 0-based index of the item's marker line
    pub line_index: usize,
    /// Raw text of the marker line, container prefixes included
    pub text: &'a str,
}

/// A list reduced to its direct items
///
/// Nested lists are separate blocks, ordered by where they open in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock<'a> {
    pub is_ordered: bool,
    /// 0-based line of the first item
    pub start_line: usize,
    /// 0-based line one past the last non-blank line of the list
    pub end_line: usize,
    /// Nesting depth (0 for a top-level list)
    pub nesting: usize,
    pub items: Vec<ListItemRecord<'a>>,
}

impl ListBlock<'_> {
    /// True when every item occupies exactly one line
    pub fn all_single_line(&self) -> bool {
        self.end_line.saturating_sub(self.start_line) == self.items.len()
    }
}

/// Byte offsets (relative to the line start) of `*`/`_` characters that are not markup
///
/// These sit in code spans, inline math, inline HTML, autolinks, or link destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineCodeSpanRanges {
    by_line: Vec<Vec<usize>>,
}

impl InlineCodeSpanRanges {
    pub(super) fn with_line_count(line_count: usize) -> Self {
        Self {
            by_line: vec![Vec::new(); line_count],
        }
    }

    pub(super) fn insert(&mut self, line_index: usize, column: usize) {
        if let Some(columns) = self.by_line.get_mut(line_index) {
            columns.push(column);
        }
    }

    pub(super) fn finish(&mut self) {
        for columns in &mut self.by_line {
            columns.sort_unstable();
            columns.dedup();
        }
    }

    /// Ignored marker offsets for a line, sorted ascending
    pub fn for_line(&self, line_index: usize) -> &[usize] {
        self.by_line.get(line_index).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, line_index: usize, column: usize) -> bool {
        self.for_line(line_index).binary_search(&column).is_ok()
    }
}

/// One step of `LintContext::classified_lines`
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedLine<'ctx, 'a> {
    /// 0-based line index
    pub index: usize,
    pub text: &'a str,
    pub info: &'ctx LineInfo,
}

impl ClassifiedLine<'_, '_> {
    /// 1-based line number
    pub fn line_number(&self) -> usize {
        self.index + 1
    }
}
