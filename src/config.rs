//!
//! This module defines configuration structures, loading logic, and rule resolution for umdlint.
//! Supports JSON, YAML and TOML files in the markdownlint configuration shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::rule::Rule;

/// Files searched, in order, in each directory during discovery
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".umdlint.toml",
    ".markdownlint.json",
    ".markdownlint.yaml",
    ".markdownlint.yml",
];

/// How a configuration key sets up a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    /// `true` enables with default options, `false` disables
    Enabled(bool),
    /// Enables the rule with these options
    Options(serde_json::Map<String, Value>),
    /// Any other value: truthy values enable with defaults, falsy values disable
    Other(Value),
}

impl RuleSetting {
    /// Options this setting enables the rule with, or `None` if it disables the rule
    fn as_options(&self) -> Option<serde_json::Map<String, Value>> {
        match self {
            RuleSetting::Enabled(true) => Some(serde_json::Map::new()),
            RuleSetting::Enabled(false) => None,
            RuleSetting::Options(options) => Some(options.clone()),
            RuleSetting::Other(value) => is_truthy(value).then(serde_json::Map::new),
        }
    }
}

/// Truthiness the way markdownlint-style configs are commonly written
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Lint configuration: a global default plus per-rule (or per-tag) settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whether rules not mentioned by any key are enabled
    pub default: bool,
    /// Keys in file order; each names a rule, a rule alias, or a tag
    pub rules: IndexMap<String, RuleSetting>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default: true,
            rules: IndexMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: std::io::Error, path: String },

    /// Failed to parse the config content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// The file extension does not name a supported format
    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    /// The document parsed but is not a key/value mapping
    #[error("Configuration must be an object, found {0}")]
    InvalidShape(String),
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used by the CLI and tests
    pub fn with_rule(mut self, key: impl Into<String>, setting: RuleSetting) -> Self {
        self.rules.insert(key.into(), setting);
        self
    }

    /// Build a config from an already parsed document
    pub fn from_json_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::InvalidShape(describe(&value).to_string()));
        };

        let mut config = Config::default();
        for (key, value) in map {
            if key.eq_ignore_ascii_case("default") {
                config.default = is_truthy(&value);
                continue;
            }
            let setting = serde_json::from_value(value).map_err(|e| ConfigError::ParseError(e.to_string()))?;
            config.rules.insert(key, setting);
        }
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_json_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        // An empty YAML document means "no settings"
        if value.is_null() {
            return Ok(Config::default());
        }
        Self::from_json_value(value)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Load a config file, choosing the format from its extension
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        log::debug!("Loading config from {}", path.display());
        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "toml" => Self::from_toml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Search `start` and its ancestors for the first known config file
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Config)>, ConfigError> {
        for dir in start.ancestors() {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    let config = Self::load_from_file(&candidate)?;
                    return Ok(Some((candidate, config)));
                }
            }
        }
        Ok(None)
    }

    /// Resolve a rule against this config.
    ///
    /// `default` sets the baseline; then every key naming the rule (by name, alias or tag)
    /// is applied in file order, so later keys win. Returns the rule's options when it is
    /// enabled and `None` when it is disabled.
    pub fn rule_options(&self, rule: &dyn Rule) -> Option<serde_json::Map<String, Value>> {
        let mut effective = self.default.then(serde_json::Map::new);
        for (key, setting) in &self.rules {
            if rule.answers_to(key) || rule.has_tag(key) {
                effective = setting.as_options();
            }
        }
        effective
    }

    pub fn is_rule_enabled(&self, rule: &dyn Rule) -> bool {
        self.rule_options(rule).is_some()
    }

    /// Keys that name neither a rule, an alias, nor a tag
    pub fn unknown_keys<'a>(&'a self, rules: &'a [Box<dyn Rule>]) -> impl Iterator<Item = &'a str> + 'a {
        self.rules
            .keys()
            .filter(move |key| !rules.iter().any(|rule| rule.answers_to(key) || rule.has_tag(key)))
            .map(String::as_str)
    }

    /// Serialize back into the markdownlint JSON shape
    pub fn to_json_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("default".to_string(), Value::Bool(self.default));
        for (key, setting) in &self.rules {
            map.insert(key.clone(), serde_json::to_value(setting).unwrap_or(Value::Null));
        }
        Value::Object(map)
    }

    /// A config that spells out every rule with its default options
    pub fn with_rule_defaults(rules: &[Box<dyn Rule>]) -> Self {
        let mut config = Config::default();
        for rule in rules {
            let setting = match rule.default_config_section() {
                Some((_, Value::Object(options))) => RuleSetting::Options(options),
                _ => RuleSetting::Enabled(true),
            };
            config.rules.insert(rule.name().to_string(), setting);
        }
        config
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
