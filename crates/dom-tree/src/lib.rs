//! Positional HTML document model
//!
//! Read-only projections over a parsed HTML tree, tailored for
//! anchor-relative element resolution:
//! - `Document`/`DomElement` handles into the parsed tree
//! - depth-first positional tree records (sibling-index addresses)
//! - own-text matching under case/exactness/whitespace flags

pub mod element;
pub mod matcher;
pub mod tree;

pub use element::{Document, DomElement, DomError};
pub use matcher::{matches_own_text, MatchFlags};
pub use tree::{build_tree, find_in_tree, TreePosition, TreeRecord};
