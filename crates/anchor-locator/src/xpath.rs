//! XPath synthesis for a resolved anchor/candidate pairing
//!
//! The emitted dialect is deliberately small: a descendant step to the
//! shared-subtree root, a `contains(text(),'…')` predicate on the
//! anchor's own text, and plain child steps. Evaluated against the
//! same document, the expression re-selects the resolved candidate.

use dom_tree::DomElement;
use tracing::warn;

use crate::types::CandidateRecord;

/// Build the xpath expression reproducing a resolved pairing.
///
/// Four shapes, keyed on which of the root-to-anchor and
/// root-to-candidate tag paths is empty (a target sitting on the
/// shared root itself yields an empty path). Returns `None` when
/// either target is not reachable from the recorded root, which the
/// proximity resolver's guarantees rule out for its own records.
pub fn build_xpath(record: &CandidateRecord<'_>, anchor: &DomElement<'_>) -> Option<String> {
    let to_candidate = path_between(&record.root, &record.element)?;
    let to_anchor = path_between(&record.root, anchor)?;
    let root_tag = record.root.tag_name();
    let anchor_text = anchor.own_text();

    let xpath = match (to_anchor.is_empty(), to_candidate.is_empty()) {
        (true, true) => format!("//{root_tag}[contains(text(),'{anchor_text}')]"),
        (true, false) => {
            format!("//{root_tag}[contains(text(),'{anchor_text}')]/{to_candidate}")
        }
        (false, true) => format!("//{root_tag}[{to_anchor}[contains(text(),'{anchor_text}')]]"),
        (false, false) => {
            format!("//{root_tag}[{to_anchor}[contains(text(),'{anchor_text}')]]/{to_candidate}")
        }
    };
    Some(xpath)
}

/// `/`-joined tag names strictly between `root` (exclusive) and `leaf`
/// (inclusive), in root-to-leaf order. Empty when the leaf is the root
/// itself; `None` when the leaf does not descend from the root.
pub(crate) fn path_between(root: &DomElement<'_>, leaf: &DomElement<'_>) -> Option<String> {
    let mut tags: Vec<&str> = Vec::new();
    let mut current = *leaf;
    while !current.matches(root) {
        tags.push(current.tag_name());
        match current.parent() {
            Some(parent) => current = parent,
            None => {
                warn!(
                    leaf = leaf.tag_name(),
                    root = root.tag_name(),
                    "leaf is not reachable from the presumed shared root"
                );
                return None;
            }
        }
    }
    tags.reverse();
    Some(tags.join("/"))
}
