//! End-to-end scenarios through the public `lint` entry point
use pretty_assertions::assert_eq;
use serde_json::json;
use umdlint_lib::config::{Config, RuleSetting};
use umdlint_lib::rule::{Fix, LintWarning};
use umdlint_lib::utils::fix_utils::apply_warning_fixes;
use umdlint_lib::{fix, lint};

fn summary(warnings: &[LintWarning]) -> Vec<(usize, &'static str)> {
    warnings.iter().map(|w| (w.line, w.rule_name)).collect()
}

#[test]
fn scenario_emphasis_without_inner_spaces() {
    assert_eq!(lint(" *text* ", &Config::default()).unwrap(), vec![]);
}

#[test]
fn scenario_emphasis_with_inner_spaces() {
    let warnings = lint("* text *", &Config::default()).unwrap();
    assert_eq!(summary(&warnings), vec![(1, "MD037")]);
    assert_eq!(warnings[0].fix, Some(Fix::replace(1, 1, 8, "*text*")));

    let warnings = lint("Some * text * here", &Config::default()).unwrap();
    assert_eq!(summary(&warnings), vec![(1, "MD037")]);
    assert_eq!(warnings[0].fix.as_ref().map(|f| f.insert_text.as_str()), Some("*text*"));
}

#[test]
fn scenario_unclosed_fence_after_inline_triple_backticks() {
    let content = "para\n```code```\npara\n```";
    let warnings = lint(content, &Config::default()).unwrap();
    assert_eq!(summary(&warnings), vec![(4, "MD031")]);
    assert_eq!(warnings[0].fix, Some(Fix::insert(4, 1, "\n")));
}

#[test]
fn scenario_list_marker_spacing() {
    let config = Config::default().with_rule(
        "MD030",
        RuleSetting::Options(json!({ "ul_single": 1 }).as_object().cloned().unwrap_or_default()),
    );
    assert_eq!(lint("- a\n- b", &config).unwrap(), vec![]);

    let content = "-  a\n-  b";
    let warnings = lint(content, &config).unwrap();
    assert_eq!(summary(&warnings), vec![(1, "MD030"), (2, "MD030")]);
    assert_eq!(apply_warning_fixes(content, &warnings).unwrap(), "- a\n- b");
}

#[test]
fn scenario_markers_inside_fenced_code() {
    let content = "```\n* text *\n** bold **\n```";
    assert_eq!(lint(content, &Config::default()).unwrap(), vec![]);
}

#[test]
fn findings_are_sorted_by_line_then_rule_order() {
    let content = "#Title#\n-  item * one *\n-  two\n\nText\n```\ncode\n```";
    let warnings = lint(content, &Config::default()).unwrap();
    assert_eq!(
        summary(&warnings),
        vec![(1, "MD020"), (2, "MD030"), (2, "MD037"), (3, "MD030"), (6, "MD031")]
    );
}

#[test]
fn default_false_disables_unlisted_rules() {
    let mut config = Config::default();
    config.default = false;
    let config = config.with_rule("no-space-in-emphasis", RuleSetting::Enabled(true));
    let warnings = lint("#Title#\n\nSome * text * here", &config).unwrap();
    assert_eq!(summary(&warnings), vec![(3, "MD037")]);
}

#[test]
fn front_matter_is_not_linted() {
    let content = "---\ntitle: * x *\ntags:\n-  a\n---\n\n# Title #\n";
    assert_eq!(lint(content, &Config::default()).unwrap(), vec![]);
}

#[test]
fn fix_resolves_every_fixable_finding() {
    let content = "#Title#\nText\n```\ncode\n```\n-  item with * emphasis *\n";
    let fixed = fix(content, &Config::default()).unwrap();
    assert_eq!(
        fixed,
        "# Title #\nText\n\n```\ncode\n```\n\n- item with *emphasis*\n"
    );
    assert_eq!(lint(&fixed, &Config::default()).unwrap(), vec![]);
}
