//! Utilities for applying fixes consistently between `Rule::fix` and the CLI `--fix` mode.

use std::ops::Range;

use crate::rule::LintWarning;
use crate::utils::detect_line_ending;
use crate::utils::range_utils::LineIndex;

/// Apply every fix carried by `warnings` to `content`.
///
/// Fixes are converted from (line, character column) to byte ranges against the original
/// content, identical edits are applied once, edits overlapping an earlier edit are skipped,
/// and the remaining edits are applied from the end of the document backwards so earlier
/// offsets stay valid. Inserted newlines follow the document's line ending style.
pub fn apply_warning_fixes(content: &str, warnings: &[LintWarning]) -> Result<String, String> {
    let line_ending = detect_line_ending(content);
    let index = LineIndex::new(content);

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    for fix in warnings.iter().filter_map(|w| w.fix.as_ref()) {
        let range = index
            .char_range_to_byte_range(fix.line_number, fix.edit_column, fix.delete_count)
            .ok_or_else(|| format!("Fix targets line {} which is outside the document", fix.line_number))?;
        let replacement = if line_ending == "\r\n" && !fix.insert_text.contains("\r\n") {
            fix.insert_text.replace('\n', "\r\n")
        } else {
            fix.insert_text.clone()
        };
        edits.push((range, replacement));
    }

    // Stable sort keeps detection order for edits at the same position
    edits.sort_by(|(a, _), (b, _)| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
    edits.dedup();

    let mut accepted: Vec<(Range<usize>, String)> = Vec::with_capacity(edits.len());
    for (range, replacement) in edits {
        if let Some((last, _)) = accepted.last()
            && range.start < last.end
        {
            log::debug!("Skipping fix at byte {} that overlaps an earlier fix", range.start);
            continue;
        }
        accepted.push((range, replacement));
    }

    let mut result = content.to_string();
    for (range, replacement) in accepted.into_iter().rev() {
        if range.end > result.len() || range.start > range.end {
            return Err(format!("Invalid fix range {}..{}", range.start, range.end));
        }
        result.replace_range(range, &replacement);
    }
    Ok(result)
}
