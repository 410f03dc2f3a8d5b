//! Default text output formatter with colors and context

use crate::output::OutputFormatter;
use crate::rule::LintWarning;
use colored::*;

/// Default human-readable formatter with colors
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String {
        let lines: Vec<String> = warnings
            .iter()
            .map(|warning| {
                let rule = format!("[{}/{}]", warning.rule_name, warning.rule_alias);
                let detail = warning
                    .detail
                    .as_ref()
                    .map(|detail| format!(" [{detail}]"))
                    .unwrap_or_default();
                let context = warning
                    .context
                    .as_ref()
                    .map(|context| format!(" [Context: \"{context}\"]"))
                    .unwrap_or_default();
                let fix_indicator = if warning.fix.is_some() { " [*]" } else { "" };

                // file:line:column: [rule/alias] message [detail] [context] [*]
                format!(
                    "{}:{}:{}: {} {}{}{}{}",
                    self.paint(file_path, |s| s.blue().underline()),
                    self.paint(&warning.line.to_string(), |s| s.cyan()),
                    self.paint(&warning.column.to_string(), |s| s.cyan()),
                    self.paint(&rule, |s| s.yellow()),
                    warning.message,
                    detail,
                    self.paint(&context, |s| s.dimmed()),
                    self.paint(fix_indicator, |s| s.green()),
                )
            })
            .collect();
        lines.join("\n")
    }

    fn format_summary(&self, files_processed: usize, total_warnings: usize, duration_ms: u64) -> Option<String> {
        let file_text = if files_processed == 1 { "file" } else { "files" };
        let summary = if total_warnings == 0 {
            format!(
                "{} No issues found in {files_processed} {file_text} ({duration_ms}ms)",
                self.paint("Success:", |s| s.green().bold())
            )
        } else {
            format!(
                "{} Found {total_warnings} issues in {files_processed} {file_text} ({duration_ms}ms)",
                self.paint("Issues:", |s| s.yellow().bold())
            )
        };
        Some(summary)
    }

    fn use_colors(&self) -> bool {
        self.use_colors
    }
}
