//! JSON output formatter

use crate::output::OutputFormatter;
use crate::rule::LintWarning;
use serde_json::{Value, json};

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn warning_to_json(file_path: &str, warning: &LintWarning) -> Value {
    let mut value = serde_json::to_value(warning).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("file".to_string(), json!(file_path));
        map.insert("fixable".to_string(), json!(warning.fix.is_some()));
    }
    value
}

impl OutputFormatter for JsonFormatter {
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String {
        let json_warnings: Vec<Value> = warnings.iter().map(|w| warning_to_json(file_path, w)).collect();
        serde_json::to_string_pretty(&json_warnings).unwrap_or_default()
    }
}

/// Format all warnings from multiple files as a single JSON document
pub fn format_all_warnings_as_json(all_warnings: &[(String, Vec<LintWarning>)]) -> String {
    let json_warnings: Vec<Value> = all_warnings
        .iter()
        .flat_map(|(file_path, warnings)| warnings.iter().map(move |w| warning_to_json(file_path, w)))
        .collect();
    serde_json::to_string_pretty(&json_warnings).unwrap_or_default()
}
