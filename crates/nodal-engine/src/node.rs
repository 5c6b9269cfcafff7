//! The output tree produced by a comparison.
//!
//! One [`Node`] exists per reachable key or slot that the engine actually
//! compared. The tree mirrors the object graph's shape along the compared
//! paths, is fully constructed before being handed to the caller, and is
//! read-only afterwards.

use nodal_types::{DiffState, NodePath, PathSegment};
use serde::{Deserialize, Serialize};

/// One vertex of a diff tree.
///
/// A node records where it sits in the graph (its [`NodePath`] and the
/// final [`PathSegment`] within its parent), how the value at that position
/// changed, and the child nodes of composite values. Children are attached
/// only when they carry a change, unless the comparison ran with
/// `return_unchanged_nodes` enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    segment: PathSegment,
    path: NodePath,
    state: DiffState,
    children: Vec<Node>,
}

impl Node {
    /// Create a node at the given path, initially `Untouched`.
    pub(crate) fn new(path: NodePath) -> Self {
        Self {
            segment: path.last(),
            path,
            state: DiffState::default(),
            children: Vec::new(),
        }
    }

    /// The change classification of this node.
    pub fn state(&self) -> DiffState {
        self.state
    }

    /// The absolute address of this node.
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// The segment addressing this node within its parent.
    pub fn segment(&self) -> &PathSegment {
        &self.segment
    }

    /// The attached children, in comparison order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Look up an attached child by its segment.
    pub fn child(&self, segment: &PathSegment) -> Option<&Node> {
        self.children.iter().find(|c| &c.segment == segment)
    }

    /// Returns `true` if this node or any descendant carries a change.
    pub fn has_changes(&self) -> bool {
        self.state.is_change() || self.children.iter().any(Node::has_changes)
    }

    pub(crate) fn set_state(&mut self, state: DiffState) {
        self.state = state;
    }

    /// Upgrade to `Changed` while folding child results. Monotonic: child
    /// processing only ever upgrades a parent, never downgrades it, and
    /// ignored nodes never reach the folding step.
    pub(crate) fn mark_changed(&mut self) {
        self.state = DiffState::Changed;
    }

    pub(crate) fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }
}
