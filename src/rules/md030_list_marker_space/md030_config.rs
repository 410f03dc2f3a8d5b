use crate::rule_config_serde::RuleConfig;
use crate::types::{PositiveUsize, deserialize_lenient_positive};
use serde::{Deserialize, Serialize};

/// Configuration for MD030 (Spaces after list markers)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct MD030Config {
    /// Spaces for single-line unordered list items (default: 1)
    #[serde(
        default = "default_spaces",
        alias = "ul_single",
        deserialize_with = "deserialize_lenient_positive"
    )]
    pub ul_single: PositiveUsize,

    /// Spaces for multi-line unordered list items (default: 1)
    #[serde(
        default = "default_spaces",
        alias = "ul_multi",
        deserialize_with = "deserialize_lenient_positive"
    )]
    pub ul_multi: PositiveUsize,

    /// Spaces for single-line ordered list items (default: 1)
    #[serde(
        default = "default_spaces",
        alias = "ol_single",
        deserialize_with = "deserialize_lenient_positive"
    )]
    pub ol_single: PositiveUsize,

    /// Spaces for multi-line ordered list items (default: 1)
    #[serde(
        default = "default_spaces",
        alias = "ol_multi",
        deserialize_with = "deserialize_lenient_positive"
    )]
    pub ol_multi: PositiveUsize,
}

fn default_spaces() -> PositiveUsize {
    PositiveUsize::from_const(1)
}

impl Default for MD030Config {
    fn default() -> Self {
        Self {
            ul_single: default_spaces(),
            ul_multi: default_spaces(),
            ol_single: default_spaces(),
            ol_multi: default_spaces(),
        }
    }
}

impl RuleConfig for MD030Config {
    const RULE_NAME: &'static str = "MD030";
}
