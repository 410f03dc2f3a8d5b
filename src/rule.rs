//!
//! This module defines the Rule trait and related types for implementing linting rules in umdlint.
//! Includes rule categories, the finding/fix records, and dynamic dispatch helpers.

use dyn_clone::DynClone;
use serde::Serialize;
use thiserror::Error;

use crate::lint_context::LintContext;
use crate::utils::fix_utils::apply_warning_fixes;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fix failed: {0}")]
    FixFailed(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    ParsingError(String),
}

pub type LintResult = Result<Vec<LintWarning>, LintError>;

/// One reported rule violation.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LintWarning {
    /// Canonical rule identifier, e.g. `MD031`
    pub rule_name: &'static str,
    /// Human-readable rule alias, e.g. `blanks-around-fences`
    pub rule_alias: &'static str,
    /// 1-based line number
    pub line: usize,
    /// 1-based column of the reported span, or 1 when the whole line is reported
    pub column: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<BoundaryFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<ColumnSpan>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

/// Which side of a construct is at fault.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct BoundaryFlags {
    pub left: bool,
    pub right: bool,
}

/// A character span within a single line (1-based column).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct ColumnSpan {
    pub column: usize,
    pub length: usize,
}

/// A precise single-line text edit.
///
/// Columns and counts are in characters, not bytes. An edit whose column is one past the end
/// of the document's last line appends to the document.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Fix {
    /// 1-based line the edit applies to
    pub line_number: usize,
    /// 1-based column where deletion/insertion starts
    pub edit_column: usize,
    /// Number of characters to delete
    pub delete_count: usize,
    pub insert_text: String,
}

impl Fix {
    pub fn insert(line_number: usize, edit_column: usize, insert_text: impl Into<String>) -> Self {
        Self {
            line_number,
            edit_column,
            delete_count: 0,
            insert_text: insert_text.into(),
        }
    }

    pub fn replace(
        line_number: usize,
        edit_column: usize,
        delete_count: usize,
        insert_text: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            edit_column,
            delete_count,
            insert_text: insert_text.into(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Type of rule for selective processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Heading,
    List,
    CodeBlock,
    Emphasis,
    Whitespace,
    Other,
}

pub trait Rule: DynClone + Send + Sync {
    fn name(&self) -> &'static str;

    /// Alternate names accepted in configuration. The first alias is the one reported.
    fn aliases(&self) -> &'static [&'static str];

    fn description(&self) -> &'static str;

    /// Group names that can enable or disable several rules at once.
    fn tags(&self) -> &'static [&'static str] {
        &[]
    }

    fn check(&self, ctx: &LintContext) -> LintResult;

    /// Apply every fix this rule proposes for the document.
    fn fix(&self, ctx: &LintContext) -> Result<String, LintError> {
        let warnings = self.check(ctx)?;
        apply_warning_fixes(ctx.content, &warnings).map_err(LintError::FixFailed)
    }

    /// Check if this rule should quickly skip processing based on content
    fn should_skip(&self, _ctx: &LintContext) -> bool {
        false
    }

    /// Get the category of this rule for selective processing
    fn category(&self) -> RuleCategory {
        RuleCategory::Other
    }

    fn as_any(&self) -> &dyn std::any::Any;

    /// Returns the rule name and default options if the rule has options.
    fn default_config_section(&self) -> Option<(String, serde_json::Value)> {
        None
    }

    /// Factory: create a rule from config (if present), or use defaults.
    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;

    /// Primary alias reported alongside the rule name.
    fn primary_alias(&self) -> &'static str {
        self.aliases().first().copied().unwrap_or_else(|| self.name())
    }

    /// Whether `key` names this rule directly (name or alias, case-insensitive).
    fn answers_to(&self, key: &str) -> bool {
        self.name().eq_ignore_ascii_case(key) || self.aliases().iter().any(|alias| alias.eq_ignore_ascii_case(key))
    }

    /// Whether `key` is one of this rule's tags (case-insensitive).
    fn has_tag(&self, key: &str) -> bool {
        self.tags().iter().any(|tag| tag.eq_ignore_ascii_case(key))
    }
}

// Implement the cloning logic for the Rule trait object
dyn_clone::clone_trait_object!(Rule);

/// Extension trait to add downcasting capabilities to Rule
pub trait RuleExt {
    fn downcast_ref<T: 'static>(&self) -> Option<&T>;
}

impl RuleExt for Box<dyn Rule> {
    fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
