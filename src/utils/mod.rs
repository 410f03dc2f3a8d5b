pub mod fix_utils;
pub mod range_utils;
pub mod table_utils;

pub use range_utils::LineIndex;
pub use table_utils::TableUtils;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// Check whether a line counts as blank for "surrounded by blank lines" checks.
///
/// A line is blank when nothing but whitespace remains after removing HTML comments
/// (including a comment that started on an earlier line or continues onto a later one)
/// and blockquote `>` markers. A missing line, past either end of the document, is blank.
pub fn is_blank_line(line: Option<&str>) -> bool {
    let Some(line) = line else {
        return true;
    };
    if line.trim().is_empty() {
        return true;
    }
    strip_html_comments(line).chars().all(|c| c == '>' || c.is_whitespace())
}

fn strip_html_comments(line: &str) -> String {
    let mut text = line.to_string();
    loop {
        let start = text.find(COMMENT_START);
        let end = text.find(COMMENT_END);
        match (start, end) {
            (Some(start), Some(end)) if end >= start => {
                text.replace_range(start..end + COMMENT_END.len(), "");
            }
            // Comment end without a start on this line
            (_, Some(end)) => {
                text.drain(..end + COMMENT_END.len());
            }
            // Comment start without an end
            (Some(start), None) => text.truncate(start),
            (None, None) => return text,
        }
    }
}

/// Detect the predominant line ending of a document.
pub fn detect_line_ending(content: &str) -> &'static str {
    let crlf = content.matches("\r\n").count();
    let lf = content.matches('\n').count() - crlf;
    if crlf > lf { "\r\n" } else { "\n" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank_line() {
        assert!(is_blank_line(None));
        assert!(is_blank_line(Some("")));
        assert!(is_blank_line(Some("   \t")));
        assert!(is_blank_line(Some(">")));
        assert!(is_blank_line(Some("> > ")));
        assert!(is_blank_line(Some("<!-- comment -->")));
        assert!(is_blank_line(Some("> <!-- a --> <!-- b -->")));
        assert!(is_blank_line(Some("<!-- opens here")));
        assert!(is_blank_line(Some("closes here -->")));
        assert!(!is_blank_line(Some("text")));
        assert!(!is_blank_line(Some("> quoted")));
        assert!(!is_blank_line(Some("<!-- c --> text")));
        assert!(!is_blank_line(Some("```")));
    }

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(detect_line_ending("a\nb\n"), "\n");
        assert_eq!(detect_line_ending("a\r\nb\r\n"), "\r\n");
        assert_eq!(detect_line_ending("no newline"), "\n");
    }
}
