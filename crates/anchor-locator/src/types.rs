//! Core types for anchor-relative resolution

use dom_tree::{DomElement, MatchFlags};
use serde::{Deserialize, Serialize};

/// Anchor or candidate query specification
///
/// One canonical struct covers every query shape: optional tag-name
/// pre-filter, required own-text pattern, comparison flags, and an
/// optional disambiguation index applied when several elements match.
/// `index_if_multiple: None` means "do not disambiguate"; multiplicity
/// is then judged by the caller's uniqueness policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementQuery {
    /// Tag-name pre-filter, compared trimmed and case-insensitively
    pub tag_name: Option<String>,

    /// Pattern the element's own text must satisfy
    pub own_text: String,

    /// Compare text case-sensitively
    pub case_sensitive: bool,

    /// Require the whole own text to match (vs. substring)
    pub exact_match: bool,

    /// Strip spaces and tabs from both operands before comparing
    pub ignore_whitespace: bool,

    /// Zero-based index selecting one element among several matches
    pub index_if_multiple: Option<usize>,
}

impl ElementQuery {
    /// Query by own text across the whole document.
    pub fn with_text(own_text: impl Into<String>) -> Self {
        Self {
            tag_name: None,
            own_text: own_text.into(),
            case_sensitive: true,
            exact_match: true,
            ignore_whitespace: true,
            index_if_multiple: None,
        }
    }

    /// Query by tag name and own text.
    pub fn with_tag_and_text(tag_name: impl Into<String>, own_text: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            ..Self::with_text(own_text)
        }
    }

    /// Loosen to substring matching.
    pub fn containing(mut self) -> Self {
        self.exact_match = false;
        self
    }

    /// Loosen to case-insensitive matching.
    pub fn ignore_case(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Compare text verbatim instead of stripping spaces and tabs.
    pub fn keep_whitespace(mut self) -> Self {
        self.ignore_whitespace = false;
        self
    }

    /// Select the `index`-th match instead of treating multiplicity as
    /// ambiguous.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index_if_multiple = Some(index);
        self
    }

    /// Comparison flags for the text matcher.
    pub fn match_flags(&self) -> MatchFlags {
        MatchFlags {
            case_sensitive: self.case_sensitive,
            exact_match: self.exact_match,
            ignore_whitespace: self.ignore_whitespace,
        }
    }
}

/// One candidate resolved against an anchor
///
/// Carries the minimal shared-subtree root (needed by the xpath
/// synthesizer) and the candidate's index in its originating ordered
/// set (needed to recover document order for the winning subset).
#[derive(Debug, Clone)]
pub struct CandidateRecord<'a> {
    /// The candidate element itself
    pub element: DomElement<'a>,

    /// Root of the smallest subtree containing both candidate and anchor
    pub root: DomElement<'a>,

    /// Structural distance to the anchor within that subtree
    pub distance: usize,

    /// Index of the candidate in the originating candidate list
    pub index: usize,
}
