//!
//! Rule MD030: Spaces after list markers
//!
//! The expected number of spaces depends on whether the list is ordered and on whether
//! every item of the list fits on a single line.

use crate::lint_context::{LintContext, ListBlock};
use crate::rule::{ColumnSpan, Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::rule_config_serde::{config_section, load_rule_config};
use crate::types::PositiveUsize;
use regex::Regex;
use std::sync::LazyLock;

mod md030_config;
pub use md030_config::MD030Config;

/// Container prefix, the list marker, then the spaces after it
static MARKER_AND_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s>]*\S+(\s*)").unwrap());

#[derive(Clone, Default)]
pub struct MD030ListMarkerSpace {
    config: MD030Config,
}

impl MD030ListMarkerSpace {
    pub fn new(ul_single: usize, ul_multi: usize, ol_single: usize, ol_multi: usize) -> Self {
        let spaces = |n: usize| PositiveUsize::new(n).unwrap_or_default();
        Self {
            config: MD030Config {
                ul_single: spaces(ul_single),
                ul_multi: spaces(ul_multi),
                ol_single: spaces(ol_single),
                ol_multi: spaces(ol_multi),
            },
        }
    }

    pub fn from_config_struct(config: MD030Config) -> Self {
        Self { config }
    }

    fn expected_spaces(&self, list: &ListBlock<'_>) -> usize {
        let spaces = match (list.is_ordered, list.all_single_line()) {
            (false, true) => self.config.ul_single,
            (false, false) => self.config.ul_multi,
            (true, true) => self.config.ol_single,
            (true, false) => self.config.ol_multi,
        };
        spaces.get()
    }
}

impl Rule for MD030ListMarkerSpace {
    fn name(&self) -> &'static str {
        "MD030"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["list-marker-space"]
    }

    fn description(&self) -> &'static str {
        "Spaces after list markers"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["ol", "ul", "whitespace"]
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for list in &ctx.list_blocks {
            let expected = self.expected_spaces(list);
            for item in &list.items {
                let Some(caps) = MARKER_AND_SPACES.captures(item.text) else {
                    continue;
                };
                let (Some(whole), Some(spaces)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                // Empty items have nothing after the marker to space out
                if whole.end() >= item.text.len() {
                    continue;
                }

                let match_len = whole.as_str().chars().count();
                let actual = spaces.as_str().chars().count();
                if actual == expected {
                    continue;
                }

                let line_number = item.line_index + 1;
                warnings.push(LintWarning {
                    rule_name: self.name(),
                    rule_alias: self.primary_alias(),
                    line: line_number,
                    column: 1,
                    message: self.description().to_string(),
                    detail: Some(format!("Expected: {expected}; Actual: {actual}")),
                    context: None,
                    boundary: None,
                    span: Some(ColumnSpan {
                        column: 1,
                        length: match_len,
                    }),
                    severity: Severity::Warning,
                    fix: Some(Fix::replace(
                        line_number,
                        match_len - actual + 1,
                        actual,
                        " ".repeat(expected),
                    )),
                });
            }
        }

        // Nested lists are visited after their parents
        warnings.sort_by_key(|w| w.line);
        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        ctx.list_blocks.is_empty()
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::List
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, serde_json::Value)> {
        config_section(&self.config)
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = load_rule_config::<MD030Config>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}
