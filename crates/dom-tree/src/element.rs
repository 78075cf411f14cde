//! Document and element handles over the parsed HTML tree

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Document model error enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Structural query string could not be parsed
    #[error("invalid css selector: {0}")]
    InvalidSelector(String),
}

/// A parsed HTML document
///
/// Owns the node tree; every `DomElement` handed out borrows from it
/// and stays valid for the document's lifetime. The document is never
/// mutated after parsing.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document. A missing `html`/`body` skeleton is
    /// supplied by the parser.
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// Parse raw inner markup, e.g. the serialized `innerHTML` of a
    /// live document root.
    pub fn parse_fragment(inner_html: &str) -> Self {
        Self {
            html: Html::parse_fragment(inner_html),
        }
    }

    /// The root `html` element.
    pub fn root(&self) -> DomElement<'_> {
        DomElement {
            inner: self.html.root_element(),
        }
    }

    /// All elements of the document in depth-first document order,
    /// starting with the root `html` element.
    pub fn all_elements(&self) -> Vec<DomElement<'_>> {
        let mut elements = Vec::new();
        collect_depth_first(self.root(), &mut elements);
        elements
    }

    /// Elements matching a CSS selector, in document order.
    pub fn select(&self, css_query: &str) -> Result<Vec<DomElement<'_>>, DomError> {
        let selector =
            Selector::parse(css_query).map_err(|e| DomError::InvalidSelector(e.to_string()))?;
        Ok(self
            .html
            .select(&selector)
            .map(|inner| DomElement { inner })
            .collect())
    }
}

fn collect_depth_first<'a>(element: DomElement<'a>, out: &mut Vec<DomElement<'a>>) {
    out.push(element);
    for child in element.children() {
        collect_depth_first(child, out);
    }
}

/// Handle to one element inside a [`Document`]
///
/// Cheap to copy; two handles may refer to the same node.
#[derive(Debug, Clone, Copy)]
pub struct DomElement<'a> {
    inner: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for DomElement<'a> {
    fn from(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }
}

impl<'a> DomElement<'a> {
    /// Tag name, lowercased by the parser.
    pub fn tag_name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Text directly owned by this element, excluding descendants'
    /// text, with whitespace runs collapsed to single spaces.
    pub fn own_text(&self) -> String {
        let mut raw = String::new();
        for child in self.inner.children() {
            if let Some(text) = child.value().as_text() {
                raw.push_str(text);
            }
        }
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Element children in document order.
    pub fn children(&self) -> Vec<DomElement<'a>> {
        self.inner
            .children()
            .filter_map(ElementRef::wrap)
            .map(DomElement::from)
            .collect()
    }

    /// Parent element; `None` at the document root.
    pub fn parent(&self) -> Option<DomElement<'a>> {
        self.inner
            .parent()
            .and_then(ElementRef::wrap)
            .map(DomElement::from)
    }

    /// Serialized subtree including the element itself.
    pub fn outer_html(&self) -> String {
        self.inner.html()
    }

    /// True when both handles point at the same node of the same tree.
    pub fn same_node(&self, other: &DomElement<'_>) -> bool {
        let lhs: &scraper::Node = (*self.inner).value();
        let rhs: &scraper::Node = (*other.inner).value();
        std::ptr::eq(lhs, rhs)
    }

    /// Element equality as the resolution core needs it: node identity
    /// when both handles come from the same tree, otherwise tag name
    /// plus serialized subtree. The structural fallback lets elements
    /// from two parses of the same markup compare equal.
    pub fn matches(&self, other: &DomElement<'_>) -> bool {
        self.same_node(other)
            || (self.tag_name() == other.tag_name() && self.outer_html() == other.outer_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_html() {
        let document = Document::parse("<div>hi</div>");
        assert_eq!(document.root().tag_name(), "html");
    }

    #[test]
    fn test_fragment_root_is_html() {
        let document = Document::parse_fragment("<div>hi</div>");
        assert_eq!(document.root().tag_name(), "html");
        assert_eq!(document.select("div").unwrap().len(), 1);
    }

    #[test]
    fn test_own_text_excludes_descendants() {
        let document = Document::parse("<p>Hello <b>there</b> now!</p>");
        let paragraphs = document.select("p").unwrap();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].own_text(), "Hello now!");
    }

    #[test]
    fn test_own_text_empty_for_container() {
        let document = Document::parse("<div><span>inner</span></div>");
        let divs = document.select("div").unwrap();
        assert_eq!(divs[0].own_text(), "");
    }

    #[test]
    fn test_children_in_document_order() {
        let document = Document::parse("<ul><li>a</li><li>b</li><li>c</li></ul>");
        let list = &document.select("ul").unwrap()[0];
        let texts: Vec<String> = list.children().iter().map(|c| c.own_text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parent_chain_reaches_root() {
        let document = Document::parse("<div><span>x</span></div>");
        let span = document.select("span").unwrap()[0];
        let mut current = span;
        let mut hops = 0;
        while let Some(parent) = current.parent() {
            current = parent;
            hops += 1;
        }
        assert_eq!(current.tag_name(), "html");
        assert!(hops >= 2); // span -> div -> body -> html
    }

    #[test]
    fn test_matches_identity_and_structural() {
        let document = Document::parse("<div><span>x</span></div>");
        let span = document.select("span").unwrap()[0];
        assert!(span.matches(&span));

        // Same markup parsed twice: identity differs, structure matches.
        let reparsed = Document::parse("<div><span>x</span></div>");
        let other = reparsed.select("span").unwrap()[0];
        assert!(!span.same_node(&other));
        assert!(span.matches(&other));
    }

    #[test]
    fn test_matches_rejects_different_subtrees() {
        let document = Document::parse("<div><span>x</span><span>y</span></div>");
        let spans = document.select("span").unwrap();
        assert!(!spans[0].matches(&spans[1]));
    }

    #[test]
    fn test_select_invalid_selector() {
        let document = Document::parse("<div></div>");
        assert!(matches!(
            document.select("!!!"),
            Err(DomError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_select_document_order() {
        let document =
            Document::parse("<div><input id=\"a\"/></div><div><input id=\"b\"/></div>");
        let inputs = document.select("input").unwrap();
        let ids: Vec<_> = inputs.iter().filter_map(|e| e.attr("id")).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
