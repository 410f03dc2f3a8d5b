use crate::config::is_truthy;
use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Deserializer, Serialize};

/// Configuration for MD031 (Blank lines around fenced code blocks)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct MD031Config {
    /// Also check fences inside list items (default: true)
    #[serde(default = "default_list_items", alias = "list_items", deserialize_with = "deserialize_truthy")]
    pub list_items: bool,
}

fn default_list_items() -> bool {
    true
}

/// Accept any JSON value and interpret it by truthiness, so `0`, `""` and `null` turn the option off
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

impl Default for MD031Config {
    fn default() -> Self {
        Self {
            list_items: default_list_items(),
        }
    }
}

impl RuleConfig for MD031Config {
    const RULE_NAME: &'static str = "MD031";
}
