//! Live-browser seam
//!
//! The core never talks to a browser directly: it consumes a snapshot
//! of the live document (serialized markup fed back through the HTML
//! parser) and hands synthesized xpath expressions to the driver for
//! the final live query. Anything behind [`DriverBridge`] is an opaque
//! network/IPC round trip owned by the automation driver.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dom_tree::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    api,
    errors::LocatorError,
    select::{apply_index, elements_matching},
    types::ElementQuery,
};

/// Narrow interface onto a browser automation driver.
#[async_trait]
pub trait DriverBridge: Send + Sync {
    /// Serialized markup of the live document root.
    async fn page_source(&self) -> Result<String, LocatorError>;

    /// Query one live element by xpath. Fails when zero or more than
    /// one live element matches.
    async fn query_xpath(&self, xpath: &str) -> Result<RemoteElement, LocatorError>;
}

/// Handle to a live element resolved by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteElement {
    /// Driver-scoped element identifier
    pub element_id: String,

    /// Xpath expression the element was resolved from
    pub xpath: String,
}

/// Snapshot the live document once and parse it.
pub async fn active_document(driver: &dyn DriverBridge) -> Result<Document, LocatorError> {
    let source = driver.page_source().await?;
    Ok(Document::parse(&source))
}

/// Strict live resolution: snapshot, resolve the single closest
/// candidate's xpath, query it against the live page. Anchor and
/// candidate uniqueness policies apply unchanged; `Ok(None)` when the
/// candidate query legitimately matches nothing.
pub async fn find_element(
    driver: &dyn DriverBridge,
    anchor: &ElementQuery,
    search_css: &str,
) -> Result<Option<RemoteElement>, LocatorError> {
    let document = active_document(driver).await?;
    let Some(xpath) = api::xpath_to_closest(&document, anchor, search_css)? else {
        return Ok(None);
    };
    driver.query_xpath(&xpath).await.map(Some)
}

/// Lenient live resolution for possibly non-unique anchors.
///
/// Tolerates multiple anchor matches: the first anchor whose candidate
/// resolution is unambiguous wins. On a miss, retries exactly once
/// with the anchor query loosened to contains-matching, absorbing an
/// `AnchorIndexOutOfBound` raised by the widened retry only. Trades
/// precision for recall; strict callers use [`find_element`].
pub async fn find_element_lenient(
    driver: &dyn DriverBridge,
    anchor: &ElementQuery,
    search_css: &str,
) -> Result<Option<RemoteElement>, LocatorError> {
    let document = active_document(driver).await?;

    if let Some(xpath) = first_unambiguous_xpath(&document, anchor, search_css)? {
        return driver.query_xpath(&xpath).await.map(Some);
    }

    let widened = anchor.clone().containing();
    debug!(pattern = %anchor.own_text, "no strict match; widening anchor to contains matching");
    match first_unambiguous_xpath(&document, &widened, search_css) {
        Ok(Some(xpath)) => driver.query_xpath(&xpath).await.map(Some),
        Ok(None) => Ok(None),
        Err(LocatorError::AnchorIndexOutOfBound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Two-anchor live resolution: the anchor set is pruned to the anchors
/// structurally closest to a parent anchor before the candidate search
/// begins.
pub async fn find_element_with_parent(
    driver: &dyn DriverBridge,
    parent_anchor: &ElementQuery,
    anchor: &ElementQuery,
    search_css: &str,
) -> Result<Option<RemoteElement>, LocatorError> {
    let document = active_document(driver).await?;

    let parent_matches = apply_index(parent_anchor, elements_matching(&document, parent_anchor))?;
    let anchor_matches = apply_index(anchor, elements_matching(&document, anchor))?;

    let mut pruned = Vec::new();
    for parent_element in &parent_matches {
        pruned = api::closest_elements_from(parent_element, &anchor_matches);
        if !pruned.is_empty() {
            break;
        }
    }

    let candidates = document.select(search_css)?;
    for anchor_element in &pruned {
        match api::xpath_from(anchor_element, &candidates) {
            Ok(Some(xpath)) => return driver.query_xpath(&xpath).await.map(Some),
            Ok(None) => {}
            Err(LocatorError::AmbiguousCandidates(n)) => {
                debug!(ties = n, "anchor skipped: candidates tie at the minimal distance");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}

fn first_unambiguous_xpath(
    document: &Document,
    query: &ElementQuery,
    search_css: &str,
) -> Result<Option<String>, LocatorError> {
    let anchors = apply_index(query, elements_matching(document, query))?;
    let candidates = document.select(search_css)?;
    for anchor in &anchors {
        match api::xpath_from(anchor, &candidates) {
            Ok(Some(xpath)) => return Ok(Some(xpath)),
            Ok(None) => {}
            Err(LocatorError::AmbiguousCandidates(n)) => {
                debug!(ties = n, "anchor skipped: candidates tie at the minimal distance");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}

/// Driver over a fixed page snapshot.
///
/// Serves offline resolution and tests: `page_source` returns the
/// held markup, `query_xpath` echoes the xpath as a live handle and
/// records it for inspection.
#[derive(Debug, Default)]
pub struct StaticPageDriver {
    source: String,
    queries: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl StaticPageDriver {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            queries: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(0),
        }
    }

    /// Xpath expressions queried so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock poisoned").clone()
    }
}

#[async_trait]
impl DriverBridge for StaticPageDriver {
    async fn page_source(&self) -> Result<String, LocatorError> {
        Ok(self.source.clone())
    }

    async fn query_xpath(&self, xpath: &str) -> Result<RemoteElement, LocatorError> {
        self.queries
            .lock()
            .expect("queries lock poisoned")
            .push(xpath.to_string());
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(RemoteElement {
            element_id: format!("static-{id}"),
            xpath: xpath.to_string(),
        })
    }
}
