//! Placeholder scanning and substitution.
//!
//! Templates support exactly one construct: `{{identifier}}`, where the
//! identifier is made of ASCII letters, digits and underscores. There are no
//! conditionals, loops or expressions. Anything that does not match the
//! placeholder pattern is copied through untouched.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches `{{name}}` and captures `name`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is a valid regex")
});

/// Distinct placeholder names in order of first occurrence.
pub fn placeholder_names(template: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Whether the template references `name` at least once.
pub fn uses_placeholder(template: &str, name: &str) -> bool {
    PLACEHOLDER
        .captures_iter(template)
        .any(|caps| caps.get(1).is_some_and(|m| m.as_str() == name))
}

/// Replace every placeholder with the value returned by `lookup`.
///
/// Placeholders for which `lookup` returns `None` are left verbatim.
pub fn substitute<'t, F>(template: &'t str, mut lookup: F) -> Cow<'t, str>
where
    F: FnMut(&str) -> Option<String>,
{
    PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
}
