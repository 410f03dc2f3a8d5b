use umdlint_lib::lint_context::LintContext;
use umdlint_lib::rule::{BoundaryFlags, Rule};
use umdlint_lib::rules::MD037NoSpaceInEmphasis;

fn check(content: &str) -> Vec<umdlint_lib::rule::LintWarning> {
    MD037NoSpaceInEmphasis.check(&LintContext::new(content)).unwrap()
}

fn fix(content: &str) -> String {
    MD037NoSpaceInEmphasis.fix(&LintContext::new(content)).unwrap()
}

#[test]
fn test_valid_emphasis() {
    let content = "*text* and **text** and _text_ and __text__ and ***text***";
    assert!(check(content).is_empty());
}

#[test]
fn test_spaces_inside_asterisk_emphasis() {
    let content = "Here is * text * in one line";
    let result = check(content);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 1);
    assert_eq!(result[0].column, 9);
    assert_eq!(result[0].message, "Spaces inside emphasis markers");
}

#[test]
fn test_spaces_inside_mixed_markers() {
    let content = "Here is * text * and _ text _ in one line";
    let result = check(content);
    assert_eq!(result.len(), 2);
    assert_eq!(fix(content), "Here is *text* and _text_ in one line");
}

#[test]
fn test_spaces_inside_strong_emphasis() {
    let content = "** text ** and **text ** and ** text**";
    let result = check(content);
    assert_eq!(result.len(), 3);
    assert_eq!(result[1].boundary, Some(BoundaryFlags { left: false, right: true }));
    assert_eq!(fix(content), "**text** and **text** and **text**");
}

#[test]
fn test_bare_bullet_with_trailing_marker() {
    let result = check("* text *");
    assert_eq!(result.len(), 1);
    assert_eq!(fix("* text *"), "*text*");
}

#[test]
fn test_trailing_marker_inside_multi_item_list() {
    let content = "* first\n* second *\n* third";
    assert!(check(content).is_empty());
    assert_eq!(fix(content), content);
    assert_eq!(LintContext::new(&fix(content)).list_blocks[0].items.len(), 3);
}

#[test]
fn test_list_items_with_emphasis() {
    let content = "* Item with *emphasis*\n* Item with * bad *\n- Dash item with _ bad _";
    let result = check(content);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].line, 2);
    assert_eq!(result[1].line, 3);
}

#[test]
fn test_emphasis_across_lines() {
    let content = "This is ** strong\ntext** ok";
    let result = check(content);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 1);
    assert_eq!(fix(content), "This is **strong\ntext** ok");
}

#[test]
fn test_blank_line_breaks_run() {
    let content = "Open ** here\n\nclose** there";
    assert!(check(content).is_empty());
}

#[test]
fn test_code_is_ignored() {
    let content = "```\n* not emphasis *\n```\n\n    * indented code *\n\nInline `* code *` span";
    assert!(check(content).is_empty());
}

#[test]
fn test_math_is_ignored() {
    let content = "$$\nx * y * z\n$$\n\nInline $a * b * c$ math";
    assert!(check(content).is_empty());
}

#[test]
fn test_escaped_markers() {
    assert!(check(r"Escaped \* text \* markers").is_empty());
}

#[test]
fn test_table_cells() {
    let content = "| A | B |\n|---|---|\n| * x * | y |";
    let result = check(content);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 3);

    // A pipe between the markers means the markers are in different cells
    let content = "| A | B |\n|---|---|\n| * x | y * |";
    assert!(check(content).is_empty());
}

#[test]
fn test_horizontal_rule_not_emphasis() {
    assert!(check("Text\n\n* * *\n\n___\n\nMore").is_empty());
}

#[test]
fn test_fix_is_idempotent() {
    let content = "Some * text * and __ bold __\n\nMore ** strong\nspan ** end";
    let fixed = fix(content);
    assert!(check(&fixed).is_empty());
}
