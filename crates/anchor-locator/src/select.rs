//! Anchor and candidate selection over a parsed document

use dom_tree::{matches_own_text, Document, DomElement, MatchFlags};
use tracing::debug;

use crate::{errors::LocatorError, types::ElementQuery};

/// Elements of the document matching an [`ElementQuery`], in document
/// order. When the query carries a tag name, the pool is pre-filtered
/// by tag (trimmed, case-insensitive) before own-text matching.
pub fn elements_matching<'a>(document: &'a Document, query: &ElementQuery) -> Vec<DomElement<'a>> {
    let pool = match &query.tag_name {
        Some(tag_name) => elements_by_tag_name(document, tag_name),
        None => document.all_elements(),
    };
    let matched = filter_matching(pool, &query.own_text, query.match_flags());
    debug!(
        pattern = %query.own_text,
        tag = query.tag_name.as_deref().unwrap_or("*"),
        matched = matched.len(),
        "own-text query resolved"
    );
    matched
}

/// Elements of the document with the given tag name, compared trimmed
/// and ASCII case-insensitively, in document order.
pub fn elements_by_tag_name<'a>(document: &'a Document, tag_name: &str) -> Vec<DomElement<'a>> {
    let wanted = tag_name.trim();
    document
        .all_elements()
        .into_iter()
        .filter(|element| element.tag_name().trim().eq_ignore_ascii_case(wanted))
        .collect()
}

/// Keep the elements of an explicit list whose own text satisfies the
/// pattern under `flags`, preserving order.
pub fn filter_matching<'a>(
    elements: Vec<DomElement<'a>>,
    pattern: &str,
    flags: MatchFlags,
) -> Vec<DomElement<'a>> {
    elements
        .into_iter()
        .filter(|element| matches_own_text(element, pattern, flags))
        .collect()
}

/// Apply the query's disambiguation index to a match list.
///
/// No index, or an empty match list, passes the list through
/// untouched. An in-bounds index narrows the list to that single
/// element; an out-of-bounds index is an error.
pub fn apply_index<'a>(
    query: &ElementQuery,
    matches: Vec<DomElement<'a>>,
) -> Result<Vec<DomElement<'a>>, LocatorError> {
    match query.index_if_multiple {
        None => Ok(matches),
        Some(_) if matches.is_empty() => Ok(matches),
        Some(index) if index < matches.len() => Ok(vec![matches[index]]),
        Some(index) => Err(LocatorError::AnchorIndexOutOfBound {
            index,
            found: matches.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"
        <form>
            <label>Email</label><input id="email"/>
            <label>Name</label><input id="name"/>
            <span>Email</span>
        </form>
    "#;

    #[test]
    fn test_text_only_query_spans_whole_document() {
        let document = Document::parse(FORM);
        let query = ElementQuery::with_text("Email");
        let matches = elements_matching(&document, &query);
        let tags: Vec<&str> = matches.iter().map(|e| e.tag_name()).collect();
        assert_eq!(tags, vec!["label", "span"]);
    }

    #[test]
    fn test_tag_filter_narrows_pool() {
        let document = Document::parse(FORM);
        let query = ElementQuery::with_tag_and_text("label", "Email");
        let matches = elements_matching(&document, &query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tag_name(), "label");
    }

    #[test]
    fn test_tag_filter_is_case_insensitive_and_trimmed() {
        let document = Document::parse(FORM);
        let query = ElementQuery::with_tag_and_text(" LABEL ", "Email");
        assert_eq!(elements_matching(&document, &query).len(), 1);
    }

    #[test]
    fn test_apply_index_passthrough_without_index() {
        let document = Document::parse(FORM);
        let query = ElementQuery::with_tag_and_text("label", "Email");
        let matches = elements_matching(&document, &query);
        let kept = apply_index(&query, matches).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_apply_index_in_bounds() {
        let document = Document::parse(FORM);
        let query = ElementQuery::with_text("Email").at_index(1);
        let matches = elements_matching(&document, &query);
        let kept = apply_index(&query, matches).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tag_name(), "span");
    }

    #[test]
    fn test_apply_index_out_of_bounds() {
        let document = Document::parse(FORM);
        let query = ElementQuery::with_text("Email").at_index(5);
        let matches = elements_matching(&document, &query);
        let err = apply_index(&query, matches).unwrap_err();
        assert_eq!(err, LocatorError::AnchorIndexOutOfBound { index: 5, found: 2 });
    }

    #[test]
    fn test_apply_index_empty_matches_stay_empty() {
        let document = Document::parse(FORM);
        let query = ElementQuery::with_text("Missing").at_index(5);
        let matches = elements_matching(&document, &query);
        assert!(apply_index(&query, matches).unwrap().is_empty());
    }
}
