/// Rule MD031: Blank lines around fenced code blocks
///
/// An opening fence needs a blank line above it and a closing fence a blank line below it.
/// The document edges count as blank.
use crate::lint_context::LintContext;
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory, Severity};
use crate::rule_config_serde::{RuleConfig, config_section, load_rule_config};
use crate::rules::context_utils::shorten_context;
use crate::utils::is_blank_line;

mod md031_config;
pub use md031_config::MD031Config;

/// Rule MD031: Fenced code blocks should be surrounded by blank lines
#[derive(Clone, Default)]
pub struct MD031BlanksAroundFences {
    config: MD031Config,
}

impl MD031BlanksAroundFences {
    pub fn new(list_items: bool) -> Self {
        Self {
            config: MD031Config { list_items },
        }
    }

    pub fn from_config_struct(config: MD031Config) -> Self {
        Self { config }
    }
}

impl Rule for MD031BlanksAroundFences {
    fn name(&self) -> &'static str {
        "MD031"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["blanks-around-fences"]
    }

    fn description(&self) -> &'static str {
        "Fenced code blocks should be surrounded by blank lines"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["code", "blank_lines"]
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut warnings = Vec::new();

        for line in ctx.classified_lines() {
            let Some(fence) = line.info.fence.as_ref() else {
                continue;
            };
            if !self.config.list_items && line.info.in_list_item() {
                continue;
            }

            let (neighbor, fix_line, message) = if line.info.is_fence_open() {
                (
                    ctx.previous_line(line.index),
                    line.line_number(),
                    "No blank line before fenced code block",
                )
            } else {
                (
                    ctx.line(line.index + 1),
                    line.line_number() + 1,
                    "No blank line after fenced code block",
                )
            };
            if is_blank_line(neighbor) {
                continue;
            }

            warnings.push(LintWarning {
                rule_name: self.name(),
                rule_alias: self.primary_alias(),
                line: line.line_number(),
                column: 1,
                message: message.to_string(),
                detail: None,
                context: Some(shorten_context(line.text.trim(), false, false)),
                boundary: None,
                span: None,
                severity: Severity::Warning,
                fix: fence
                    .prefix
                    .as_ref()
                    .map(|prefix| Fix::insert(fix_line, 1, format!("{prefix}\n"))),
            });
        }

        Ok(warnings)
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.has_fences()
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::CodeBlock
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
        let rule_config = load_rule_config::<MD031Config>(config);
        log::debug!("{} list_items = {}", MD031Config::RULE_NAME, rule_config.list_items);
        Box::new(Self::from_config_struct(rule_config))
    }
}
