//! Visitor-style traversal of diff trees.
//!
//! Consumers walk the tree depth-first and react per node; the provided
//! [`ChangeCollector`] gathers the path and state of every changed node,
//! which is the common consumption pattern.

use nodal_types::{DiffState, NodePath};

use crate::node::Node;

/// A read-only visitor over a diff tree.
pub trait NodeVisitor {
    fn visit(&mut self, node: &Node);
}

impl Node {
    /// Walk this subtree depth-first, parents before children.
    pub fn walk(&self, visitor: &mut dyn NodeVisitor) {
        visitor.visit(self);
        for child in self.children() {
            child.walk(visitor);
        }
    }
}

/// Collects the path and state of every node that carries a change of its
/// own (`Added`, `Removed`, or `Changed`).
#[derive(Debug, Default)]
pub struct ChangeCollector {
    changes: Vec<(NodePath, DiffState)>,
}

impl ChangeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected changes, in visit order.
    pub fn changes(&self) -> &[(NodePath, DiffState)] {
        &self.changes
    }

    /// Consume the collector, yielding the collected changes.
    pub fn into_changes(self) -> Vec<(NodePath, DiffState)> {
        self.changes
    }
}

impl NodeVisitor for ChangeCollector {
    fn visit(&mut self, node: &Node) {
        if node.state().is_change() {
            self.changes.push((node.path().clone(), node.state()));
        }
    }
}
