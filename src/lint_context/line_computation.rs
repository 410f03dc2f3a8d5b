use regex::Regex;
use std::sync::LazyLock;

use super::block_scan::BlockScan;
use super::types::{FenceBoundary, FenceLine, LineInfo};
use crate::utils::{TableUtils, is_blank_line};

/// Everything before the first backtick/tilde, minus trailing whitespace
static FENCE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s*[`~]").unwrap());

/// Build the per-line metadata from the raw lines and the block scan
pub(super) fn compute_line_infos(raw_lines: &[&str], line_offsets: &[usize], scan: &BlockScan<'_>) -> Vec<LineInfo> {
    let mut lines: Vec<LineInfo> = raw_lines
        .iter()
        .zip(line_offsets)
        .map(|(&text, &byte_offset)| LineInfo {
            byte_offset,
            byte_len: text.len(),
            is_blank: is_blank_line(Some(text)),
            ..Default::default()
        })
        .collect();

    if let Some(end) = scan.front_matter_end {
        for info in lines.iter_mut().take(end + 1) {
            info.in_front_matter = true;
        }
    }

    for block in &scan.fenced_blocks {
        lines[block.open_line].fence = Some(fence_line(raw_lines[block.open_line], FenceBoundary::Open));
        let content_end = match block.close_line {
            Some(close) => {
                lines[close].fence = Some(fence_line(raw_lines[close], FenceBoundary::Close));
                close
            }
            None => block.last_line + 1,
        };
        for info in lines.iter_mut().take(content_end).skip(block.open_line + 1) {
            info.in_code_block = true;
        }
    }

    for &(first, last) in &scan.indented_blocks {
        for info in lines.iter_mut().take(last + 1).skip(first) {
            info.in_code_block = true;
        }
    }

    for &(first, last) in &scan.item_spans {
        for (count, info) in lines.iter_mut().take(last + 1).skip(first).enumerate() {
            info.item_line = count + 1;
        }
    }

    for &line in &scan.horizontal_rules {
        if let Some(info) = lines.get_mut(line) {
            info.is_horizontal_rule = true;
        }
    }

    let math_map = compute_math_block_line_map(raw_lines, &lines);
    for (info, in_math) in lines.iter_mut().zip(math_map) {
        info.in_math_block = in_math;
    }

    let table_map = compute_table_line_map(raw_lines, &lines);
    for (info, in_table) in lines.iter_mut().zip(table_map) {
        info.in_table = in_table;
    }

    lines
}

fn fence_line(text: &str, boundary: FenceBoundary) -> FenceLine {
    FenceLine {
        boundary,
        prefix: FENCE_PREFIX.captures(text).map(|caps| caps[1].to_string()),
    }
}

/// Lines where block-level inline structure (tables, math) cannot start
fn is_opaque(info: &LineInfo) -> bool {
    info.in_code_block || info.fence.is_some() || info.in_front_matter
}

/// Pre-compute which lines are inside math blocks ($$ ... $$) - O(n) single pass
/// Returns a Vec<bool> where index i indicates if line i is in a math block
fn compute_math_block_line_map(raw_lines: &[&str], lines: &[LineInfo]) -> Vec<bool> {
    let mut in_math_block = vec![false; raw_lines.len()];
    let mut inside_math = false;

    for (i, line) in raw_lines.iter().enumerate() {
        if is_opaque(&lines[i]) {
            continue;
        }

        if line.trim() == "$$" {
            in_math_block[i] = true;
            inside_math = !inside_math;
        } else if inside_math {
            in_math_block[i] = true;
        }
    }

    in_math_block
}

/// Pre-compute which lines belong to pipe tables
///
/// A table opens on a header row followed by a matching delimiter row and runs through
/// the following non-blank lines that still contain a pipe.
fn compute_table_line_map(raw_lines: &[&str], lines: &[LineInfo]) -> Vec<bool> {
    let mut in_table = vec![false; raw_lines.len()];
    let excluded = |i: usize| is_opaque(&lines[i]) || lines[i].in_math_block;

    let mut i = 0;
    while i + 1 < raw_lines.len() {
        if excluded(i) || excluded(i + 1) || !TableUtils::is_table_start(raw_lines[i], raw_lines[i + 1]) {
            i += 1;
            continue;
        }
        in_table[i] = true;
        in_table[i + 1] = true;
        let mut row = i + 2;
        while row < raw_lines.len()
            && !excluded(row)
            && !lines[row].is_blank
            && TableUtils::is_potential_table_row(raw_lines[row])
        {
            in_table[row] = true;
            row += 1;
        }
        i = row;
    }

    in_table
}
