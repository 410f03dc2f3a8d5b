use umdlint_lib::lint_context::LintContext;
use umdlint_lib::rule::Rule;
use umdlint_lib::rules::MD020NoMissingSpaceClosedAtx;

#[test]
fn test_valid_closed_atx_headings() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "# Heading 1 #\n## Heading 2 ##\n### Heading 3 ###";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_invalid_closed_atx_headings() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "# Heading 1#\n## Heading 2##\n### Heading 3###";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result[0].line, 1);
    assert_eq!(result[0].column, 11);
    assert_eq!(result[0].message, "Missing space before # at end of closed heading");
    assert_eq!(result[2].message, "Missing space before ### at end of closed heading");
}

#[test]
fn test_missing_space_after_opening_hashes() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let ctx = LintContext::new("##Heading ##");
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].column, 1);
    assert_eq!(result[0].message, "Missing space after ## at start of closed heading");
}

#[test]
fn test_mixed_closed_atx_headings() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "# Heading 1 #\n## Heading 2##\n### Heading 3 ###\n#### Heading 4####";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn test_code_block() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "```markdown\n# Not a heading#\n## Also not a heading##\n```\n# Real Heading #";
    let ctx = LintContext::new(content);
    let result = rule.check(&ctx).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_front_matter_is_skipped() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "---\ntitle: #tag#\n---\n\n# Heading #";
    let ctx = LintContext::new(content);
    assert!(rule.check(&ctx).unwrap().is_empty());
}

#[test]
fn test_fix_closed_atx_headings() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "# Heading 1#\n## Heading 2##\n### Heading 3###";
    let ctx = LintContext::new(content);
    let result = rule.fix(&ctx).unwrap();
    assert_eq!(result, "# Heading 1 #\n## Heading 2 ##\n### Heading 3 ###");
}

#[test]
fn test_fix_mixed_closed_atx_headings() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "# Heading 1 #\n## Heading 2##\n### Heading 3 ###\n#### Heading 4####";
    let ctx = LintContext::new(content);
    let result = rule.fix(&ctx).unwrap();
    assert_eq!(
        result,
        "# Heading 1 #\n## Heading 2 ##\n### Heading 3 ###\n#### Heading 4 ####"
    );
}

#[test]
fn test_fix_is_idempotent() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "#Both#\n\n## Left ##\n\n##Right##\n\n# Escaped \\##";
    let fixed = rule.fix(&LintContext::new(content)).unwrap();
    assert!(rule.check(&LintContext::new(&fixed)).unwrap().is_empty());
}

#[test]
fn test_crlf_line_endings() {
    let rule = MD020NoMissingSpaceClosedAtx::new();
    let content = "#Heading#\r\nText\r\n";
    let fixed = rule.fix(&LintContext::new(content)).unwrap();
    assert_eq!(fixed, "# Heading #\r\nText\r\n");
}
