/// Rule MD020: No missing space inside closed ATX heading
///
/// Escaped closing hashes (`\#`) are treated as part of the heading text, so `# C\#` is not
/// a closed heading while `# Heading \##` needs a space before the real closing hash.
use crate::lint_context::LintContext;
use crate::rule::{BoundaryFlags, ColumnSpan, Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::rules::context_utils::shorten_context;
use regex::Regex;
use std::sync::LazyLock;

/// Opening hashes, left space, text, right space, optional escaped hash, closing hashes, trailing space
static CLOSED_ATX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)([ \t]*)([^#]*?[^#\\])([ \t]*)((?:\\#)?)(#+)(\s*)$").unwrap());

#[derive(Clone, Default)]
pub struct MD020NoMissingSpaceClosedAtx;

impl MD020NoMissingSpaceClosedAtx {
    pub fn new() -> Self {
        Self
    }

    fn check_line(&self, line_number: usize, line: &str) -> Option<LintWarning> {
        let caps = CLOSED_ATX.captures(line)?;
        let left_hash = caps.get(1)?.as_str();
        let left_space = caps.get(2)?.as_str();
        let heading_text = caps.get(3)?.as_str();
        let right_space = caps.get(4)?.as_str();
        let right_escape = caps.get(5)?.as_str();
        let right_hash = caps.get(6)?.as_str();
        let trailing = caps.get(7)?.as_str();

        let left = left_space.is_empty();
        let right = right_space.is_empty() || !right_escape.is_empty();
        if !left && !right {
            return None;
        }

        let line_chars = line.chars().count();
        let span = if left {
            ColumnSpan {
                column: 1,
                length: left_hash.len() + 1,
            }
        } else {
            ColumnSpan {
                column: line_chars - trailing.chars().count() - right_hash.len(),
                length: right_hash.len() + 1,
            }
        };

        let message = match (left, right) {
            (true, true) => format!("Missing space inside {left_hash} and {right_hash} of closed heading"),
            (true, false) => format!("Missing space after {left_hash} at start of closed heading"),
            _ => format!("Missing space before {right_hash} at end of closed heading"),
        };
        let escape_replacement = if right_escape.is_empty() {
            String::new()
        } else {
            format!("{right_escape} ")
        };

        Some(LintWarning {
            rule_name: self.name(),
            rule_alias: self.primary_alias(),
            line: line_number,
            column: span.column,
            message,
            detail: None,
            context: Some(shorten_context(line.trim(), left, right)),
            boundary: Some(BoundaryFlags { left, right }),
            span: Some(span),
            severity: Severity::Warning,
            fix: Some(Fix::replace(
                line_number,
                1,
                line_chars,
                format!("{left_hash} {heading_text} {escape_replacement}{right_hash}"),
            )),
        })
    }
}

impl Rule for MD020NoMissingSpaceClosedAtx {
    fn name(&self) -> &'static str {
        "MD020"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["no-missing-space-closed-atx", "closed-heading-space"]
    }

    fn description(&self) -> &'static str {
        "No space inside hashes on closed atx style heading"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["headings", "headers", "atx_closed", "spaces"]
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let warnings = ctx
            .classified_lines()
            .filter(|line| !line.info.in_code_block && !line.info.in_front_matter)
            .filter_map(|line| self.check_line(line.line_number(), line.text))
            .collect();
        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.has_char('#')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(MD020NoMissingSpaceClosedAtx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<LintWarning> {
        let ctx = LintContext::new(content);
        MD020NoMissingSpaceClosedAtx.check(&ctx).unwrap()
    }

    #[test]
    fn test_valid_closed_heading() {
        assert!(check("# Heading #\n\n## Sub ##").is_empty());
    }

    #[test]
    fn test_missing_both_spaces() {
        let warnings = check("#Heading#");
        assert_eq!(warnings.len(), 1);
        let warning = &warnings[0];
        assert_eq!(warning.boundary, Some(BoundaryFlags { left: true, right: true }));
        assert_eq!(warning.span, Some(ColumnSpan { column: 1, length: 2 }));
        assert_eq!(warning.fix, Some(Fix::replace(1, 1, 9, "# Heading #")));
        assert_eq!(warning.context.as_deref(), Some("#Heading#"));
    }

    #[test]
    fn test_missing_right_space() {
        let warnings = check("## Heading##");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].boundary, Some(BoundaryFlags { left: false, right: true }));
        assert_eq!(warnings[0].span, Some(ColumnSpan { column: 10, length: 3 }));
        assert_eq!(warnings[0].column, 10);
        assert_eq!(warnings[0].fix.as_ref().map(|f| f.insert_text.as_str()), Some("## Heading ##"));
    }

    #[test]
    fn test_missing_left_space() {
        let warnings = check("#Heading #");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].boundary, Some(BoundaryFlags { left: true, right: false }));
        assert_eq!(warnings[0].fix.as_ref().map(|f| f.insert_text.as_str()), Some("# Heading #"));
    }

    #[test]
    fn test_escaped_hash() {
        // `C\#` is text, not a closing sequence
        assert!(check(r"# C\#").is_empty());

        let warnings = check(r"# Heading \##");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].boundary, Some(BoundaryFlags { left: false, right: true }));
        assert_eq!(
            warnings[0].fix.as_ref().map(|f| f.insert_text.as_str()),
            Some(r"# Heading \# #")
        );
    }

    #[test]
    fn test_open_heading_is_not_checked() {
        assert!(check("#Heading\n# Heading").is_empty());
    }

    #[test]
    fn test_code_block_is_skipped() {
        assert!(check("```\n#Heading#\n```").is_empty());
        assert!(check("    #Heading#").is_empty());
    }

    #[test]
    fn test_unicode_columns() {
        let warnings = check("# Überschrift#");
        assert_eq!(warnings[0].span, Some(ColumnSpan { column: 13, length: 2 }));
        assert_eq!(warnings[0].fix, Some(Fix::replace(1, 1, 14, "# Überschrift #")));
    }

    #[test]
    fn test_trailing_whitespace_is_dropped_by_fix() {
        let warnings = check("#Heading#  ");
        assert_eq!(warnings[0].fix, Some(Fix::replace(1, 1, 11, "# Heading #")));
    }
}
