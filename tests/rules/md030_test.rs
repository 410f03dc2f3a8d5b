use umdlint_lib::config::{Config, RuleSetting};
use umdlint_lib::lint_context::LintContext;
use umdlint_lib::rule::{Fix, Rule};
use umdlint_lib::rules::MD030ListMarkerSpace;
use serde_json::json;

#[test]
fn test_valid_unordered_list() {
    let rule = MD030ListMarkerSpace::default();
    let content = "* Item 1\n* Item 2\n  * Nested item\n* Item 3";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_valid_ordered_list() {
    let rule = MD030ListMarkerSpace::default();
    let content = "1. First\n2. Second\n   1. Nested\n3. Third";
    let ctx = LintContext::new(content);
    assert!(rule.check(&ctx).unwrap().is_empty());
}

#[test]
fn test_too_many_spaces_unordered() {
    let rule = MD030ListMarkerSpace::default();
    let content = "*  Item 1\n*  Item 2";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].line, 1);
    assert_eq!(result[1].line, 2);
    assert_eq!(result[0].detail.as_deref(), Some("Expected: 1; Actual: 2"));
}

#[test]
fn test_too_many_spaces_ordered_fix() {
    let rule = MD030ListMarkerSpace::default();
    let content = "1.   First\n2.   Second";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result[0].fix, Some(Fix::replace(1, 3, 3, " ")));
    assert_eq!(rule.fix(&ctx).unwrap(), "1. First\n2. Second");
}

#[test]
fn test_multi_line_list_uses_multi_settings() {
    let rule = MD030ListMarkerSpace::new(1, 3, 1, 2);
    let content = "-   Item one\n    continued\n-   Item two\n\n1.  First\n    continued\n2.  Second";
    let ctx = LintContext::new(content);
    assert!(rule.check(&ctx).unwrap().is_empty());
}

#[test]
fn test_single_and_multi_line_lists_are_independent() {
    let rule = MD030ListMarkerSpace::new(1, 3, 1, 1);
    // First list is single-line, second has a multi-line item
    let content = "- a\n- b\n\nText\n\n-   c\n    more\n-   d";
    let ctx = LintContext::new(content);
    assert!(rule.check(&ctx).unwrap().is_empty());
}

#[test]
fn test_nested_list_checked_separately() {
    let rule = MD030ListMarkerSpace::default();
    let content = "- Parent\n  -  Child\n- Parent 2";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 2);
}

#[test]
fn test_list_in_code_block_is_ignored() {
    let rule = MD030ListMarkerSpace::default();
    let content = "```\n-  not a list\n```";
    let ctx = LintContext::new(content);
    assert!(rule.check(&ctx).unwrap().is_empty());
}

#[test]
fn test_from_config_reads_options() {
    let mut options = serde_json::Map::new();
    options.insert("ul_single".to_string(), json!(2));
    let config = Config::default().with_rule("MD030", RuleSetting::Options(options));
    let rule = MD030ListMarkerSpace::from_config(&config);
    let ctx = LintContext::new("-  a\n-  b");
    assert!(rule.check(&ctx).unwrap().is_empty());

    let ctx = LintContext::new("- a\n- b");
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].detail.as_deref(), Some("Expected: 2; Actual: 1"));
}

#[test]
fn test_fix_then_check_is_clean() {
    let rule = MD030ListMarkerSpace::default();
    let content = "-    a\n-  b\n\n1.  x\n2.     y";
    let fixed = rule.fix(&LintContext::new(content)).unwrap();
    assert_eq!(fixed, "- a\n- b\n\n1. x\n2. y");
    assert!(rule.check(&LintContext::new(&fixed)).unwrap().is_empty());
}
