use umdlint_lib::config::{Config, RuleSetting};
use umdlint_lib::lint_context::LintContext;
use umdlint_lib::rule::{Fix, Rule};
use umdlint_lib::rules::MD031BlanksAroundFences;
use serde_json::json;

#[test]
fn test_valid_fenced_blocks() {
    let rule = MD031BlanksAroundFences::default();
    let content = "Text before\n\n```\ncode block\n```\n\nText after";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_no_blank_before() {
    let rule = MD031BlanksAroundFences::default();
    let content = "Text before\n```\ncode block\n```\n\nText after";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 2);
    assert_eq!(result[0].message, "No blank line before fenced code block");
}

#[test]
fn test_no_blank_after() {
    let rule = MD031BlanksAroundFences::default();
    let content = "Text before\n\n```\ncode block\n```\nText after";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 4);
    assert_eq!(result[0].message, "No blank line after fenced code block");
    assert_eq!(result[0].fix, Some(Fix::insert(5, 1, "\n")));
}

#[test]
fn test_fix_both_sides() {
    let rule = MD031BlanksAroundFences::default();
    let content = "Text before\n```\ncode block\n```\nText after";
    let ctx = LintContext::new(content);
    let fixed = rule.fix(&ctx).unwrap();
    assert_eq!(fixed, "Text before\n\n```\ncode block\n```\n\nText after");
}

#[test]
fn test_tilde_fences() {
    let rule = MD031BlanksAroundFences::default();
    let content = "Text\n~~~python\nprint()\n~~~\nText";
    let ctx = LintContext::new(content);
    assert_eq!(rule.check(&ctx).unwrap().len(), 2);
}

#[test]
fn test_unclosed_fence_reports_only_open() {
    let rule = MD031BlanksAroundFences::default();
    let content = "para\n```code```\npara\n```\nnever closed";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 4);
    assert_eq!(result[0].message, "No blank line before fenced code block");
}

#[test]
fn test_nested_fence_markers_inside_longer_fence() {
    let rule = MD031BlanksAroundFences::default();
    let content = "````\n```\ninner\n```\n````";
    let ctx = LintContext::new(content);
    assert!(rule.check(&ctx).unwrap().is_empty());
}

#[test]
fn test_list_items_disabled_via_config() {
    let mut options = serde_json::Map::new();
    options.insert("list_items".to_string(), json!(false));
    let config = Config::default().with_rule("blanks-around-fences", RuleSetting::Options(options));
    let rule = MD031BlanksAroundFences::from_config(&config);

    let content = "- item\n  ```\n  code\n  ```\n- next";
    let ctx = LintContext::new(content);
    assert!(rule.check(&ctx).unwrap().is_empty());

    // Fences outside lists are still checked
    let ctx = LintContext::new("Text\n```\ncode\n```");
    assert_eq!(rule.check(&ctx).unwrap().len(), 1);
}

#[test]
fn test_fix_inside_list_keeps_structure() {
    let rule = MD031BlanksAroundFences::default();
    let content = "- item\n  ```\n  code\n  ```\n- next";
    let fixed = rule.fix(&LintContext::new(content)).unwrap();
    assert_eq!(fixed, "- item\n\n  ```\n  code\n  ```\n\n- next");
    assert!(rule.check(&LintContext::new(&fixed)).unwrap().is_empty());
}

#[test]
fn test_fence_at_document_edges() {
    let rule = MD031BlanksAroundFences::default();
    let ctx = LintContext::new("```\ncode\n```\n");
    assert!(rule.check(&ctx).unwrap().is_empty());
}
