/// Serde-based configuration system for rules
///
/// Each rule with options declares a struct implementing [`RuleConfig`]. The options found
/// for the rule in the user's configuration are decoded into it once, when the rule is built.
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;

/// Trait for rule configurations
pub trait RuleConfig: Serialize + DeserializeOwned + Default + Clone {
    /// The rule name (e.g., "MD030")
    const RULE_NAME: &'static str;
}

/// Load a rule's options from the configuration, falling back to defaults.
///
/// Options may be given under the rule's name, any alias, or a tag; unknown option keys are
/// ignored. A value the rule cannot use is replaced by its default and logged.
pub fn load_rule_config<T: RuleConfig>(config: &Config) -> T {
    let Some(rule) = crate::rules::find_rule(T::RULE_NAME) else {
        return T::default();
    };
    let Some(options) = config.rule_options(rule.as_ref()) else {
        return T::default();
    };
    decode_rule_config(options)
}

/// Decode an options map into a rule config struct
pub fn decode_rule_config<T: RuleConfig>(options: serde_json::Map<String, serde_json::Value>) -> T {
    serde_json::from_value(serde_json::Value::Object(options)).unwrap_or_else(|e| {
        log::warn!("Invalid options for {}: {e}; using defaults", T::RULE_NAME);
        T::default()
    })
}

/// Serialize a rule config into its default config section
pub fn config_section<T: RuleConfig>(config: &T) -> Option<(String, serde_json::Value)> {
    serde_json::to_value(config)
        .ok()
        .map(|value| (T::RULE_NAME.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSetting;
    use crate::rules::md030_list_marker_space::MD030Config;
    use crate::rules::md031_blanks_around_fences::MD031Config;
    use serde_json::json;

    #[test]
    fn test_load_by_alias() {
        let mut options = serde_json::Map::new();
        options.insert("ul_multi".to_string(), json!(3));
        let config = Config::new().with_rule("list-marker-space", RuleSetting::Options(options));
        let loaded: MD030Config = load_rule_config(&config);
        assert_eq!(loaded.ul_multi.get(), 3);
        assert_eq!(loaded.ul_single.get(), 1);
    }

    #[test]
    fn test_disabled_rule_uses_defaults() {
        let config = Config::new().with_rule("MD031", RuleSetting::Enabled(false));
        let loaded: MD031Config = load_rule_config(&config);
        assert!(loaded.list_items);
    }

    #[test]
    fn test_config_section() {
        let (name, value) = config_section(&MD031Config::default()).unwrap();
        assert_eq!(name, "MD031");
        assert_eq!(value, json!({ "list-items": true }));
    }
}
