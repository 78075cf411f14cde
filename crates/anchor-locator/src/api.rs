//! Public resolution API
//!
//! Composes selection, proximity resolution and xpath synthesis, and
//! enforces the uniqueness policies: exactly one anchor per query
//! (unless a disambiguation index narrows the matches), and exactly
//! one minimal-distance candidate for the single-result entry points.
//! List-returning variants hand ties back to the caller instead.

use dom_tree::{Document, DomElement};
use tracing::{debug, warn};

use crate::{
    errors::LocatorError,
    resolver::closest_candidates,
    select::{apply_index, elements_matching},
    types::ElementQuery,
    xpath::build_xpath,
};

/// Resolve the anchor query to exactly one element.
fn resolve_anchor<'a>(
    document: &'a Document,
    query: &ElementQuery,
) -> Result<DomElement<'a>, LocatorError> {
    let matches = elements_matching(document, query);
    let active = apply_index(query, matches)?;
    match active.len() {
        0 => Err(LocatorError::NoAnchorFound),
        1 => Ok(active[0]),
        n => {
            warn!(anchors = n, pattern = %query.own_text, "anchor query is ambiguous");
            Err(LocatorError::AmbiguousAnchors(n))
        }
    }
}

/// Elements matching `search_css` closest to the anchor, in document
/// order. Ties at the minimal distance are all returned; an empty
/// candidate set yields an empty list, not an error.
pub fn closest_elements<'a>(
    document: &'a Document,
    anchor: &ElementQuery,
    search_css: &str,
) -> Result<Vec<DomElement<'a>>, LocatorError> {
    let anchor_element = resolve_anchor(document, anchor)?;
    let candidates = document.select(search_css)?;
    Ok(closest_elements_from(&anchor_element, &candidates))
}

/// The single element matching `search_css` closest to the anchor.
/// `Ok(None)` when nothing matches; `AmbiguousCandidates` when several
/// elements tie at the minimal distance.
pub fn closest_element<'a>(
    document: &'a Document,
    anchor: &ElementQuery,
    search_css: &str,
) -> Result<Option<DomElement<'a>>, LocatorError> {
    let found = closest_elements(document, anchor, search_css)?;
    if found.len() > 1 {
        return Err(LocatorError::AmbiguousCandidates(found.len()));
    }
    Ok(found.into_iter().next())
}

/// Xpath expressions for the candidates closest to the anchor, one per
/// surviving tie.
pub fn xpaths_to_closest(
    document: &Document,
    anchor: &ElementQuery,
    search_css: &str,
) -> Result<Vec<String>, LocatorError> {
    let anchor_element = resolve_anchor(document, anchor)?;
    let candidates = document.select(search_css)?;
    Ok(xpaths_from(&anchor_element, &candidates))
}

/// The single xpath expression for the candidate closest to the
/// anchor; `AmbiguousCandidates` when ties survive.
pub fn xpath_to_closest(
    document: &Document,
    anchor: &ElementQuery,
    search_css: &str,
) -> Result<Option<String>, LocatorError> {
    let xpaths = xpaths_to_closest(document, anchor, search_css)?;
    if xpaths.len() > 1 {
        return Err(LocatorError::AmbiguousCandidates(xpaths.len()));
    }
    Ok(xpaths.into_iter().next())
}

/// Candidates from an explicit list closest to an already-resolved
/// anchor element. No anchor policy applies at this level.
pub fn closest_elements_from<'a>(
    anchor: &DomElement<'a>,
    candidates: &[DomElement<'a>],
) -> Vec<DomElement<'a>> {
    closest_candidates(anchor, candidates)
        .into_iter()
        .map(|record| record.element)
        .collect()
}

/// Xpath expressions for the closest candidates of an explicit list.
pub fn xpaths_from<'a>(anchor: &DomElement<'a>, candidates: &[DomElement<'a>]) -> Vec<String> {
    let records = closest_candidates(anchor, candidates);
    let xpaths: Vec<String> = records
        .iter()
        .filter_map(|record| build_xpath(record, anchor))
        .collect();
    debug!(candidates = candidates.len(), xpaths = xpaths.len(), "xpaths synthesized");
    xpaths
}

/// The single xpath expression for the closest candidate of an
/// explicit list; `AmbiguousCandidates` when ties survive.
pub fn xpath_from<'a>(
    anchor: &DomElement<'a>,
    candidates: &[DomElement<'a>],
) -> Result<Option<String>, LocatorError> {
    let xpaths = xpaths_from(anchor, candidates);
    if xpaths.len() > 1 {
        return Err(LocatorError::AmbiguousCandidates(xpaths.len()));
    }
    Ok(xpaths.into_iter().next())
}
