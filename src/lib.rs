pub mod config;
pub mod exit_codes;
pub mod lint_context;
#[cfg(feature = "native")]
pub mod output;
pub mod rule;
pub mod rule_config_serde;
pub mod rules;
pub mod types;
pub mod utils;

pub use rules::*;

pub use crate::config::Config;
pub use crate::lint_context::LintContext;
use crate::rule::{LintError, LintResult, Rule};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Instant;

/// The marker a post author uses to opt out of Markdown linting
static CODE_OPT_OUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\[code\]").unwrap());

/// Lint a document with every rule `config` enables.
///
/// Findings are ordered by line; findings on the same line keep rule order, then the order
/// each rule reported them in.
pub fn lint(content: &str, config: &Config) -> LintResult {
    let rules = rules::configured_rules(config);
    lint_with_rules(content, &rules)
}

/// Lint a document against an already configured set of rules
pub fn lint_with_rules(content: &str, rules: &[Box<dyn Rule>]) -> LintResult {
    let overall_start = Instant::now();
    let mut warnings = Vec::new();

    // Classify the document once for all rules
    let lint_ctx = LintContext::new(content);

    for rule in rules {
        if rule.should_skip(&lint_ctx) {
            log::trace!("Skipping {}: nothing to check", rule.name());
            continue;
        }

        let rule_start = Instant::now();
        let rule_warnings = rule.check(&lint_ctx).map_err(|e| {
            log::error!("Error checking rule {}: {e}", rule.name());
            e
        })?;
        log::debug!(
            "Rule {} found {} issue(s) in {:?}",
            rule.name(),
            rule_warnings.len(),
            rule_start.elapsed()
        );
        warnings.extend(rule_warnings);
    }

    // Stable: same-line findings keep rule order
    warnings.sort_by_key(|w| w.line);

    log::debug!("Total lint time: {:?}", overall_start.elapsed());
    Ok(warnings)
}

/// Apply the fixes of every enabled rule, one rule at a time, re-reading the document
/// between rules so each rule sees the previous rule's output.
pub fn fix(content: &str, config: &Config) -> Result<String, LintError> {
    let rules = rules::configured_rules(config);
    fix_with_rules(content, &rules)
}

pub fn fix_with_rules(content: &str, rules: &[Box<dyn Rule>]) -> Result<String, LintError> {
    let mut fixed = content.to_string();
    for rule in rules {
        let ctx = LintContext::new(&fixed);
        if rule.should_skip(&ctx) {
            continue;
        }
        let updated = rule.fix(&ctx)?;
        if updated != fixed {
            log::debug!("Rule {} changed the document", rule.name());
            fixed = updated;
        }
    }
    Ok(fixed)
}

/// Whether the document has any finding under `config`
pub fn has_unformatted_markdown(content: &str, config: &Config) -> Result<bool, LintError> {
    Ok(!lint(content, config)?.is_empty())
}

/// Whether the document carries the `[code]` opt-out marker (case-insensitive)
pub fn contains_code_opt_out(content: &str) -> bool {
    CODE_OPT_OUT.is_match(content)
}
