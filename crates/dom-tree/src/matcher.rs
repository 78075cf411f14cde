//! Own-text matching under configurable comparison rules

use serde::{Deserialize, Serialize};

use crate::element::DomElement;

/// Comparison rules for own-text matching.
///
/// Defaults mirror the strictest query shape: case-sensitive exact
/// matching with spaces and tabs ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFlags {
    pub case_sensitive: bool,
    pub exact_match: bool,
    pub ignore_whitespace: bool,
}

impl Default for MatchFlags {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            exact_match: true,
            ignore_whitespace: true,
        }
    }
}

/// Whether the element's own (non-descendant) text satisfies
/// `pattern` under `flags`.
///
/// An element with no own text never matches, and an empty pattern
/// matches nothing. With `ignore_whitespace` set, space and tab
/// characters are removed from both operands before comparison, so
/// `"Sign In"` matches the pattern `"SignIn"`. Exactly one of the
/// four comparison modes applies per call.
pub fn matches_own_text(element: &DomElement<'_>, pattern: &str, flags: MatchFlags) -> bool {
    let own_text = element.own_text();
    if own_text.is_empty() || pattern.is_empty() {
        return false;
    }

    let (text, pattern) = if flags.ignore_whitespace {
        (strip_spaces(&own_text), strip_spaces(pattern))
    } else {
        (own_text, pattern.to_string())
    };

    match (flags.case_sensitive, flags.exact_match) {
        (true, true) => text == pattern,
        (true, false) => text.contains(&pattern),
        (false, true) => text.to_lowercase() == pattern.to_lowercase(),
        (false, false) => text.to_lowercase().contains(&pattern.to_lowercase()),
    }
}

fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, ' ' | '\t')).collect()
}
