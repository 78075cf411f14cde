//! Proximity resolver: minimal shared subtree and distance ranking
//!
//! For each candidate, walk upward from the anchor until a subtree
//! containing the candidate is found, measure the combined depth of
//! both elements within that subtree, and keep only the candidates at
//! the globally minimal distance. Ambiguity (several candidates tying
//! for the minimum) is not an error at this layer; the public API
//! decides whether more than one survivor is reportable.

use dom_tree::{build_tree, find_in_tree, DomElement, TreePosition, TreeRecord};
use tracing::debug;

use crate::types::CandidateRecord;

/// Resolve the candidates closest to `anchor`.
///
/// Returns one record per candidate at the minimal structural
/// distance, in the candidates' own order, each carrying the minimal
/// shared-subtree root and the candidate's original index. Candidates
/// that share no subtree with the anchor (elements of a different
/// document) are skipped.
pub fn closest_candidates<'a>(
    anchor: &DomElement<'a>,
    candidates: &[DomElement<'a>],
) -> Vec<CandidateRecord<'a>> {
    let mut records = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        let Some((candidate_position, tree)) = enclosing_tree(anchor, candidate) else {
            debug!(index, "candidate shares no subtree with the anchor");
            continue;
        };
        let Some(anchor_record) = find_in_tree(&tree, anchor) else {
            // The walk starts at the anchor, so the anchor is always in
            // the tree; this arm is unreachable for well-formed input.
            continue;
        };

        // build_tree always emits the traversal root first.
        let root = tree[0].element;
        let distance = candidate_position.depth() + anchor_record.position.depth() - 2;
        records.push(CandidateRecord {
            element: *candidate,
            root,
            distance,
            index,
        });
    }

    retain_minimal(records)
}

/// Smallest subtree rooted at the anchor or one of its ancestors that
/// contains `candidate`, as an explicit iterative upward walk: rebuild
/// the positional tree at each ancestor level and stop as soon as the
/// candidate appears. Returns the candidate's position in that tree
/// together with the tree itself, or `None` once the walk runs past
/// the document root.
fn enclosing_tree<'a>(
    anchor: &DomElement<'a>,
    candidate: &DomElement<'a>,
) -> Option<(TreePosition, Vec<TreeRecord<'a>>)> {
    let mut root = *anchor;
    loop {
        let tree = build_tree(root);
        if let Some(found) = find_in_tree(&tree, candidate) {
            return Some((found.position.clone(), tree));
        }
        root = root.parent()?;
    }
}

fn retain_minimal(records: Vec<CandidateRecord<'_>>) -> Vec<CandidateRecord<'_>> {
    let Some(minimal) = records.iter().map(|record| record.distance).min() else {
        return records;
    };
    let survivors: Vec<CandidateRecord<'_>> = records
        .into_iter()
        .filter(|record| record.distance == minimal)
        .collect();
    debug!(
        distance = minimal,
        survivors = survivors.len(),
        "minimal-distance candidates retained"
    );
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_tree::Document;

    const TWO_ROWS: &str = r#"
        <div><label>Email</label><input id="a"/></div>
        <div><label>Name</label><input id="b"/></div>
    "#;

    fn anchor<'a>(document: &'a Document, text: &str) -> DomElement<'a> {
        document
            .select("label")
            .unwrap()
            .into_iter()
            .find(|l| l.own_text() == text)
            .unwrap()
    }

    #[test]
    fn test_nearest_input_wins() {
        let document = Document::parse(TWO_ROWS);
        let email = anchor(&document, "Email");
        let inputs = document.select("input").unwrap();

        let records = closest_candidates(&email, &inputs);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].element.attr("id"), Some("a"));
        assert_eq!(records[0].root.tag_name(), "div");
        assert_eq!(records[0].distance, 2);
        assert_eq!(records[0].index, 0);
    }

    #[test]
    fn test_ties_are_kept_in_candidate_order() {
        let document =
            Document::parse(r#"<div><label>Pick</label><input id="x"/><input id="y"/></div>"#);
        let label = document.select("label").unwrap()[0];
        let inputs = document.select("input").unwrap();

        let records = closest_candidates(&label, &inputs);
        assert_eq!(records.len(), 2);
        let ids: Vec<_> = records
            .iter()
            .filter_map(|r| r.element.attr("id"))
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert_eq!(records[0].distance, records[1].distance);
    }

    #[test]
    fn test_candidate_equal_to_anchor_has_distance_zero() {
        let document = Document::parse("<label>Email</label>");
        let label = document.select("label").unwrap()[0];
        let records = closest_candidates(&label, &[label]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distance, 0);
        assert_eq!(records[0].root.tag_name(), "label");
    }

    #[test]
    fn test_descendant_candidate_rooted_at_anchor() {
        let document = Document::parse("<div>Owner<input id=\"c\"/></div>");
        let div = document.select("div").unwrap()[0];
        let inputs = document.select("input").unwrap();
        let records = closest_candidates(&div, &inputs);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distance, 1);
        assert_eq!(records[0].root.tag_name(), "div");
    }

    #[test]
    fn test_shared_root_is_stable_across_candidate_order() {
        let document = Document::parse(TWO_ROWS);
        let email = anchor(&document, "Email");
        let mut inputs = document.select("input").unwrap();

        let forward = closest_candidates(&email, &inputs);
        inputs.reverse();
        let backward = closest_candidates(&email, &inputs);

        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert!(forward[0].root.matches(&backward[0].root));
        assert_eq!(forward[0].distance, backward[0].distance);
    }

    #[test]
    fn test_foreign_candidates_are_skipped() {
        let document = Document::parse(TWO_ROWS);
        let other = Document::parse("<p>elsewhere</p>");
        let email = anchor(&document, "Email");
        let foreign = other.select("p").unwrap();
        assert!(closest_candidates(&email, &foreign).is_empty());
    }

    #[test]
    fn test_empty_candidate_list() {
        let document = Document::parse(TWO_ROWS);
        let email = anchor(&document, "Email");
        assert!(closest_candidates(&email, &[]).is_empty());
    }
}
