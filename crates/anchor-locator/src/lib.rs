//! Anchor-relative element resolution
//!
//! Locates a unique element inside a parsed HTML document (or a live
//! browser page) by structural proximity to a distinctive anchor
//! element, and synthesizes an xpath string that reproduces the match:
//! - anchor/candidate selection by own text, tag and flags
//! - minimal shared-subtree proximity ranking (the algorithmic core)
//! - xpath synthesis anchored on the anchor's own text
//! - uniqueness policies turned into reportable error conditions
//! - async driver bridge for live documents

pub mod api;
pub mod bridge;
pub mod errors;
pub mod resolver;
pub mod select;
pub mod types;
pub mod xpath;

pub use api::*;
pub use bridge::*;
pub use errors::*;
pub use resolver::*;
pub use select::*;
pub use types::*;
pub use xpath::*;
