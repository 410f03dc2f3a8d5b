/// Shared table detection utilities for the line classifier
///
/// Tables are recognized line by line: a header row containing a pipe, followed by a
/// delimiter row whose cell count matches the header. Body rows continue while lines are
/// non-blank and still contain a pipe.
pub struct TableUtils;

impl TableUtils {
    /// Strip blockquote markers and indentation that precede a table row.
    pub fn strip_container_prefix(line: &str) -> &str {
        line.trim_start_matches(|c: char| c == '>' || c.is_whitespace())
    }

    /// Check if a line contains at least one unescaped pipe
    pub fn is_potential_table_row(line: &str) -> bool {
        let trimmed = Self::strip_container_prefix(line).trim_end();
        if trimmed.is_empty() {
            return false;
        }
        let mut escaped = false;
        for c in trimmed.chars() {
            match c {
                '\\' => escaped = !escaped,
                '|' if !escaped => return true,
                _ => escaped = false,
            }
        }
        false
    }

    /// Split a row on unescaped pipes, dropping the empty cells produced by outer pipes.
    pub fn split_cells(line: &str) -> Vec<&str> {
        let row = Self::strip_container_prefix(line).trim_end();
        let mut cells = Vec::new();
        let mut start = 0;
        let mut escaped = false;
        for (i, c) in row.char_indices() {
            match c {
                '\\' => escaped = !escaped,
                '|' if !escaped => {
                    cells.push(row[start..i].trim());
                    start = i + 1;
                }
                _ => escaped = false,
            }
        }
        cells.push(row[start..].trim());

        if cells.first().is_some_and(|c| c.is_empty()) {
            cells.remove(0);
        }
        if cells.len() > 1 && cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        cells
    }

    /// Check if a line is a table delimiter row (e.g., |---|:--:|)
    pub fn is_delimiter_row(line: &str) -> bool {
        let row = Self::strip_container_prefix(line).trim_end();
        if !row.starts_with(['|', '-', ':']) || !row.contains('-') {
            return false;
        }
        let cells = Self::split_cells(row);
        !cells.is_empty() && cells.iter().all(|cell| Self::is_delimiter_cell(cell))
    }

    fn is_delimiter_cell(cell: &str) -> bool {
        let inner = cell.strip_prefix(':').unwrap_or(cell);
        let inner = inner.strip_suffix(':').unwrap_or(inner);
        !inner.is_empty() && inner.bytes().all(|b| b == b'-')
    }

    /// Check whether `header` followed by `delimiter` opens a table.
    pub fn is_table_start(header: &str, delimiter: &str) -> bool {
        if !Self::is_potential_table_row(header) || !Self::is_delimiter_row(delimiter) {
            return false;
        }
        Self::split_cells(header).len() == Self::split_cells(delimiter).len()
    }
}
