//! Error types for anchor-relative resolution

use dom_tree::DomError;
use thiserror::Error;

/// Locator error enumeration
///
/// Only structurally impossible or ambiguous resolutions are errors;
/// "legitimately nothing there" surfaces as an empty result or `None`
/// from the entry points instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// Anchor query matched zero elements
    #[error("no anchor element found")]
    NoAnchorFound,

    /// Anchor query matched more than one element with no
    /// disambiguation index supplied
    #[error("{0} anchor elements found where exactly one was expected")]
    AmbiguousAnchors(usize),

    /// Disambiguation index exceeds the anchor match count
    #[error("anchor index {index} is out of bound for {found} matched anchors")]
    AnchorIndexOutOfBound { index: usize, found: usize },

    /// More than one candidate tied at the minimal distance, returned
    /// from a single-result entry point
    #[error("{0} candidate elements tie at the minimal distance to the anchor")]
    AmbiguousCandidates(usize),

    /// Structural candidate query could not be parsed
    #[error("invalid css selector: {0}")]
    InvalidSelector(String),

    /// Browser driver failure surfaced through the bridge
    #[error("driver error: {0}")]
    Driver(String),
}

impl LocatorError {
    /// True for the two ambiguity conditions, which callers commonly
    /// downgrade to list-returning variants.
    pub fn is_ambiguity(&self) -> bool {
        matches!(
            self,
            LocatorError::AmbiguousAnchors(_) | LocatorError::AmbiguousCandidates(_)
        )
    }
}

impl From<DomError> for LocatorError {
    fn from(err: DomError) -> Self {
        match err {
            DomError::InvalidSelector(reason) => LocatorError::InvalidSelector(reason),
        }
    }
}
