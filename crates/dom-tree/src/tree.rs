//! Depth-first positional flattening of an element subtree
//!
//! Every node is addressed by its sibling-index path from the
//! traversal root; the root is always `[0]`. A position is only
//! meaningful within the traversal that produced it.

use std::fmt;

use serde::Serialize;

use crate::element::DomElement;

/// Immutable sibling-index path addressing one node of a traversal.
///
/// The path doubles as the node's depth (`depth()` = path length) and
/// ancestor chain (every prefix addresses an ancestor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TreePosition(Vec<usize>);

impl TreePosition {
    /// Position of the traversal root, `[0]`.
    pub fn root() -> Self {
        Self(vec![0])
    }

    /// Position of the `index`-th child under this position. Clones
    /// the backing path so sibling branches never alias storage.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// Depth within the traversal; the root has depth 1.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }
}

impl fmt::Display for TreePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|index| index.to_string()).collect();
        write!(f, "[{}]", rendered.join("."))
    }
}

/// One node of a depth-first traversal: its position plus the element.
#[derive(Debug, Clone)]
pub struct TreeRecord<'a> {
    pub position: TreePosition,
    pub element: DomElement<'a>,
}

/// Flatten `root` and all descendants into positional records,
/// depth-first with children in document order. The root is always
/// the first record, at position `[0]`.
pub fn build_tree(root: DomElement<'_>) -> Vec<TreeRecord<'_>> {
    let mut records = Vec::new();
    push_subtree(root, TreePosition::root(), &mut records);
    records
}

fn push_subtree<'a>(
    element: DomElement<'a>,
    position: TreePosition,
    records: &mut Vec<TreeRecord<'a>>,
) {
    records.push(TreeRecord {
        position: position.clone(),
        element,
    });
    for (index, child) in element.children().into_iter().enumerate() {
        push_subtree(child, position.child(index), records);
    }
}

/// First record whose element matches `target` (node identity or
/// structural equality).
pub fn find_in_tree<'t, 'a>(
    tree: &'t [TreeRecord<'a>],
    target: &DomElement<'_>,
) -> Option<&'t TreeRecord<'a>> {
    tree.iter().find(|record| record.element.matches(target))
}
