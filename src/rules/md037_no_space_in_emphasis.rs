//!
//! Rule MD037: Spaces inside emphasis markers
//!
//! Emphasis runs are tracked across the lines of a paragraph with a small state machine.
//! A run opens on a `*`/`_` marker and closes on a marker of the same kind whose length
//! matches the run's effective length. Runs of three adjust the effective length instead of
//! closing, which mirrors how renderers resolve `***` sequences.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::lint_context::{ClassifiedLine, LintContext};
use crate::rule::{BoundaryFlags, ColumnSpan, Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::rules::context_utils::shorten_context;
use crate::utils::range_utils::byte_to_char_column;

/// An asterisk bullet that would otherwise read as an emphasis marker
static ASTERISK_ITEM_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([\s>]*)\*(\s+)").unwrap());

const MAX_RUN_LEN: usize = 3;

/// One run of 1-3 identical marker characters found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerRun {
    /// Byte offset of the first marker character
    index: usize,
    len: usize,
    kind: u8,
}

impl MarkerRun {
    fn end(&self) -> usize {
        self.index + self.len
    }
}

/// Finds marker runs that are not escaped by a backslash.
///
/// A run may start at the beginning of the line, after any character other than a
/// backslash, or after an escaped backslash pair. The cursor can be moved back one
/// position so a marker that ended the previous run can begin the next one.
struct MarkerScanner<'l> {
    bytes: &'l [u8],
    cursor: usize,
}

impl<'l> MarkerScanner<'l> {
    fn new(line: &'l str) -> Self {
        Self {
            bytes: line.as_bytes(),
            cursor: 0,
        }
    }

    fn next_run(&mut self) -> Option<MarkerRun> {
        let bytes = self.bytes;
        for start in self.cursor..bytes.len() {
            let at_line_start = if start == 0 { run_at(bytes, 0) } else { None };
            let run = at_line_start
                .or_else(|| (bytes[start] != b'\\').then(|| run_at(bytes, start + 1)).flatten())
                .or_else(|| bytes[start..].starts_with(b"\\\\").then(|| run_at(bytes, start + 2)).flatten());
            if let Some(run) = run {
                self.cursor = run.end();
                return Some(run);
            }
        }
        self.cursor = bytes.len();
        None
    }

    fn back_up(&mut self) {
        if self.cursor > 1 {
            self.cursor -= 1;
        }
    }
}

fn run_at(bytes: &[u8], index: usize) -> Option<MarkerRun> {
    let kind = *bytes.get(index)?;
    if kind != b'*' && kind != b'_' {
        return None;
    }
    let len = bytes[index..]
        .iter()
        .take(MAX_RUN_LEN)
        .take_while(|&&b| b == kind)
        .count();
    Some(MarkerRun { index, len, kind })
}

/// An emphasis run waiting for its closing marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenRun {
    /// Byte offset where the emphasized text starts; 0 once the run continues onto a new line
    content_start: usize,
    /// Length of the opening marker on this line; 0 once the run continues onto a new line
    marker_len: usize,
    kind: u8,
    effective_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Open(OpenRun),
}

/// Run state carried from line to line
#[derive(Debug, Clone)]
struct RunTracker {
    state: RunState,
    /// Finding for an earlier line of the open run, reported only if the run closes
    pending: Option<LintWarning>,
}

impl RunTracker {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
            pending: None,
        }
    }

    fn reset(&mut self) {
        self.state = RunState::Idle;
        self.pending = None;
    }
}

/// How the text between two markers ends
#[derive(Clone, Copy)]
enum RunEnd<'t> {
    /// A closing marker at `index`
    Marker { index: usize, marker: &'t str },
    /// The end of the line
    LineEnd,
}

#[derive(Clone, Default)]
pub struct MD037NoSpaceInEmphasis;

impl MD037NoSpaceInEmphasis {
    /// Check the text between an open run and where it ends
    fn check_run(
        &self,
        line_number: usize,
        text: &str,
        open: &OpenRun,
        end: RunEnd<'_>,
        in_table: bool,
    ) -> Option<LintWarning> {
        let (content_end, right_marker) = match end {
            RunEnd::Marker { index, marker } => (index, marker),
            RunEnd::LineEnd => (text.len(), ""),
        };
        let mut content = text.get(open.content_start..content_end).unwrap_or("");
        if open.marker_len == 0 {
            content = content.trim_start();
        }
        if matches!(end, RunEnd::LineEnd) {
            content = content.trim_end();
        }

        let left = content.starts_with(char::is_whitespace);
        let right = content.ends_with(char::is_whitespace);
        if !(left || right) || (in_table && content.contains('|')) {
            return None;
        }

        let context_start = open.content_start - open.marker_len;
        let context_end = content_end + right_marker.len();
        let context = text.get(context_start..context_end)?;
        let left_marker = text.get(context_start..open.content_start).unwrap_or("");
        let column = byte_to_char_column(text, context_start);
        let length = context.chars().count();

        Some(LintWarning {
            rule_name: self.name(),
            rule_alias: self.primary_alias(),
            line: line_number,
            column,
            message: self.description().to_string(),
            detail: None,
            context: Some(shorten_context(context, left, right)),
            boundary: Some(BoundaryFlags { left, right }),
            span: Some(ColumnSpan { column, length }),
            severity: Severity::Warning,
            fix: Some(Fix::replace(
                line_number,
                column,
                length,
                format!("{left_marker}{}{right_marker}", content.trim()),
            )),
        })
    }

    /// Scan one line, advancing the tracker. Returns the findings confirmed on this line and
    /// whether the line ended with a lone `*` that opened a run and has nothing after it.
    fn scan_line(
        &self,
        tracker: &mut RunTracker,
        text: &str,
        line: &ClassifiedLine<'_, '_>,
        ignored: &[usize],
    ) -> (Vec<LintWarning>, bool) {
        let mut found = Vec::new();
        let line_number = line.line_number();
        let in_table = line.info.in_table;
        let mut scanner = MarkerScanner::new(text);

        while let Some(run) = scanner.next_run() {
            if ignored.binary_search(&run.index).is_ok() {
                continue;
            }
            match tracker.state {
                RunState::Idle => {
                    tracker.state = RunState::Open(OpenRun {
                        content_start: run.end(),
                        marker_len: run.len,
                        kind: run.kind,
                        effective_len: run.len,
                    });
                }
                RunState::Open(mut open) if open.kind == run.kind => {
                    if run.len == open.effective_len {
                        found.extend(tracker.pending.take());
                        let marker = &text[run.index..run.end()];
                        let end = RunEnd::Marker {
                            index: run.index,
                            marker,
                        };
                        found.extend(self.check_run(line_number, text, &open, end, in_table));
                        tracker.reset();
                    } else {
                        open.effective_len = if run.len == MAX_RUN_LEN {
                            MAX_RUN_LEN - open.effective_len
                        } else if open.effective_len == MAX_RUN_LEN {
                            open.effective_len - run.len
                        } else {
                            open.effective_len + run.len
                        };
                        tracker.state = RunState::Open(open);
                    }
                    scanner.back_up();
                }
                RunState::Open(_) => scanner.back_up(),
            }
        }

        let mut dangling_asterisk = false;
        if let RunState::Open(mut open) = tracker.state {
            dangling_asterisk = open.kind == b'*'
                && open.marker_len == 1
                && text.get(open.content_start..).is_some_and(|rest| rest.trim().is_empty());
            if tracker.pending.is_none() {
                tracker.pending = self.check_run(line_number, text, &open, RunEnd::LineEnd, in_table);
            }
            open.content_start = 0;
            open.marker_len = 0;
            tracker.state = RunState::Open(open);
        }
        (found, dangling_asterisk)
    }
}

/// True when the item starting at `line_index` is the only item of its list and spans one line
fn is_lone_one_line_item(ctx: &LintContext, line_index: usize) -> bool {
    ctx.list_blocks
        .iter()
        .find(|block| block.items.iter().any(|item| item.line_index == line_index))
        .is_some_and(|block| block.items.len() == 1 && block.all_single_line())
}

impl Rule for MD037NoSpaceInEmphasis {
    fn name(&self) -> &'static str {
        "MD037"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["no-space-in-emphasis"]
    }

    fn description(&self) -> &'static str {
        "Spaces inside emphasis markers"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["whitespace", "emphasis"]
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();
        let mut tracker = RunTracker::new();

        for line in ctx.classified_lines() {
            let info = line.info;
            let opaque = info.in_code_block || info.fence.is_some() || info.is_horizontal_rule || info.in_front_matter;
            // Emphasis cannot continue across these boundaries
            if opaque || info.in_table || info.is_item_start() || info.is_blank {
                tracker.reset();
            }
            if opaque || info.in_math_block {
                continue;
            }

            let ignored = ctx.code_span_ranges.for_line(line.index);
            let bullet_trimmed = if info.is_item_start() {
                ASTERISK_ITEM_MARKER.replace(line.text, "${1} ${2}")
            } else {
                Cow::Borrowed(line.text)
            };

            let mut attempt = tracker.clone();
            let (found, dangling_asterisk) = self.scan_line(&mut attempt, &bullet_trimmed, &line, ignored);
            // `* text *` as a whole list: the bullet is really the opening marker of the trailing `*`
            if matches!(bullet_trimmed, Cow::Owned(_)) && dangling_asterisk && is_lone_one_line_item(ctx, line.index) {
                let (found, _) = self.scan_line(&mut tracker, line.text, &line, ignored);
                warnings.extend(found);
            } else {
                tracker = attempt;
                warnings.extend(found);
            }
        }

        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.has_char('*') && !ctx.has_char('_')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Emphasis
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(MD037NoSpaceInEmphasis)
    }
}
