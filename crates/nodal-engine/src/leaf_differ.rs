//! Terminal value comparison.
//!
//! Leaves have no children; the node state comes directly from presence and
//! the configured sameness check.

use nodal_types::{DiffState, NodePath, Shape};

use crate::dispatch::GraphDiffer;
use crate::error::{EngineError, EngineResult};
use crate::instances::Instances;
use crate::node::Node;

/// Compare two leaf values.
pub(crate) fn compare(
    differ: &GraphDiffer,
    parent_path: &NodePath,
    instances: &Instances<'_>,
) -> EngineResult<Node> {
    let path = instances.path_from(parent_path);
    let mut node = Node::new(path.clone());

    if differ.policy_decision(&path, instances)?.ignore {
        node.set_state(DiffState::Ignored);
        return Ok(node);
    }

    match (instances.working(), instances.base()) {
        (Some(_), None) => node.set_state(DiffState::Added),
        (None, Some(_)) => node.set_state(DiffState::Removed),
        (Some(_), Some(base)) => {
            let base_shape = Shape::of(base);
            if base_shape != Shape::Leaf {
                return Err(EngineError::ShapeMismatch {
                    path,
                    expected: Shape::Leaf,
                    actual: base_shape,
                });
            }
            if instances.are_same(differ.sameness()) {
                node.set_state(DiffState::Untouched);
            } else {
                node.set_state(DiffState::Changed);
            }
        }
        (None, None) => node.set_state(DiffState::Untouched),
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiffConfig, Sameness};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn equal_leaves_are_untouched() {
        let differ = GraphDiffer::new();
        let working = json!(42);
        let base = json!(42);
        let node = differ.compare(&working, &base).unwrap();
        assert_eq!(node.state(), DiffState::Untouched);
        assert!(node.children().is_empty());
    }

    #[test]
    fn different_leaves_are_changed() {
        let differ = GraphDiffer::new();
        let working = json!("new");
        let base = json!("old");
        let node = differ.compare(&working, &base).unwrap();
        assert_eq!(node.state(), DiffState::Changed);
    }

    #[test]
    fn type_change_between_leaves_is_changed() {
        let differ = GraphDiffer::new();
        let working = json!("42");
        let base = json!(42);
        let node = differ.compare(&working, &base).unwrap();
        assert_eq!(node.state(), DiffState::Changed);
    }

    #[test]
    fn leaf_against_container_is_fatal() {
        let differ = GraphDiffer::new();
        let working = json!("scalar");
        let base = json!({"a": 1});
        let err = differ.compare(&working, &base).unwrap_err();
        match err {
            EngineError::ShapeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, Shape::Leaf);
                assert_eq!(actual, Shape::Keyed);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn comparator_overrides_leaf_equality() {
        let config = DiffConfig {
            sameness: Sameness::Comparator(Arc::new(|w, b| {
                // Numbers compare equal regardless of value.
                w.is_number() && b.is_number() || w == b
            })),
            ..Default::default()
        };
        let differ = GraphDiffer::with_config(config);
        let working = json!(1);
        let base = json!(999);
        let node = differ.compare(&working, &base).unwrap();
        assert_eq!(node.state(), DiffState::Untouched);
    }
}
