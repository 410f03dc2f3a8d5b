pub mod context_utils;

pub mod md020_no_missing_space_closed_atx;
pub mod md030_list_marker_space;
pub mod md031_blanks_around_fences;
pub mod md037_no_space_in_emphasis;

pub use md020_no_missing_space_closed_atx::MD020NoMissingSpaceClosedAtx;
pub use md030_list_marker_space::{MD030Config, MD030ListMarkerSpace};
pub use md031_blanks_around_fences::{MD031BlanksAroundFences, MD031Config};
pub use md037_no_space_in_emphasis::MD037NoSpaceInEmphasis;

use crate::config::Config;
use crate::rule::Rule;

/// Returns all rule instances, built from `config`, in reporting order
pub fn all_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    macro_rules! rule {
        ($ctor:ident) => {
            $ctor::from_config(config)
        };
    }
    vec![
        rule!(MD020NoMissingSpaceClosedAtx),
        rule!(MD030ListMarkerSpace),
        rule!(MD031BlanksAroundFences),
        rule!(MD037NoSpaceInEmphasis),
    ]
}

/// The rules `config` enables, built with their configured options
pub fn configured_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    all_rules(config)
        .into_iter()
        .filter(|rule| config.is_rule_enabled(rule.as_ref()))
        .collect()
}

/// Look up a rule by name or alias, with default options
pub fn find_rule(key: &str) -> Option<Box<dyn Rule>> {
    let defaults: [Box<dyn Rule>; 4] = [
        Box::new(MD020NoMissingSpaceClosedAtx),
        Box::new(MD030ListMarkerSpace::default()),
        Box::new(MD031BlanksAroundFences::default()),
        Box::new(MD037NoSpaceInEmphasis),
    ];
    defaults.into_iter().find(|rule| rule.answers_to(key))
}
