//! Ordered-sequence comparison.
//!
//! Follows the keyed-container algorithm with positional key discovery:
//! candidate slots are the indices `0..max(len)`, indices beyond the
//! shorter side are added or removed wholesale, and the overlapping prefix
//! is compared position by position.

use nodal_types::{DiffState, NodePath};
use std::ops::Range;

use crate::accessor::IndexAccessor;
use crate::dispatch::GraphDiffer;
use crate::error::EngineResult;
use crate::instances::Instances;
use crate::node::Node;

/// Compare two ordered sequences.
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

    let working = instances.working_array(&path)?;
    let base = instances.base_array(&path)?;

    match (working, base) {
        (Some(items), None) => {
            handle_indices(differ, &mut node, instances, 0..items.len())?;
            node.set_state(DiffState::Added);
        }
        (None, Some(items)) => {
            handle_indices(differ, &mut node, instances, 0..items.len())?;
            node.set_state(DiffState::Removed);
        }
        _ if instances.are_same(differ.sameness()) => {
            node.set_state(DiffState::Untouched);
        }
        (Some(working), Some(base)) => {
            let overlap = working.len().min(base.len());
            // Added, removed, then common: at most one of the first two
            // ranges is non-empty.
            handle_indices(differ, &mut node, instances, overlap..working.len())?;
            handle_indices(differ, &mut node, instances, overlap..base.len())?;
            handle_indices(differ, &mut node, instances, 0..overlap)?;
        }
        (None, None) => {
            node.set_state(DiffState::Untouched);
        }
    }

    Ok(node)
}

fn handle_indices(
    differ: &GraphDiffer,
    node: &mut Node,
    instances: &Instances<'_>,
    indices: Range<usize>,
) -> EngineResult<()> {
    for index in indices {
        let accessor = IndexAccessor::new(index);
        let child_instances = instances.access(&accessor);
        let Some(child) = differ.delegate(node.path(), &child_instances)? else {
            continue;
        };
        if child.has_changes() {
            node.mark_changed();
            node.add_child(child);
        } else if differ.config().return_unchanged_nodes {
            node.add_child(child);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodal_types::PathSegment;
    use serde_json::json;

    #[test]
    fn longer_working_adds_trailing_indices() {
        let differ = GraphDiffer::new();
        let working = json!([1, 2, 3, 4]);
        let base = json!([1, 2]);
        let node = differ.compare(&working, &base).unwrap();

        assert_eq!(node.state(), DiffState::Changed);
        assert_eq!(node.children().len(), 2);
        assert_eq!(
            node.child(&PathSegment::Index(2)).unwrap().state(),
            DiffState::Added
        );
        assert_eq!(
            node.child(&PathSegment::Index(3)).unwrap().state(),
            DiffState::Added
        );
    }

    #[test]
    fn shorter_working_removes_trailing_indices() {
        let differ = GraphDiffer::new();
        let working = json!([1]);
        let base = json!([1, 2, 3]);
        let node = differ.compare(&working, &base).unwrap();

        assert_eq!(node.state(), DiffState::Changed);
        assert_eq!(node.children().len(), 2);
        assert_eq!(
            node.child(&PathSegment::Index(1)).unwrap().state(),
            DiffState::Removed
        );
    }

    #[test]
    fn positional_change_in_overlap() {
        let differ = GraphDiffer::new();
        let working = json!(["a", "X", "c"]);
        let base = json!(["a", "b", "c"]);
        let node = differ.compare(&working, &base).unwrap();

        assert_eq!(node.state(), DiffState::Changed);
        assert_eq!(node.children().len(), 1);
        assert_eq!(
            node.child(&PathSegment::Index(1)).unwrap().state(),
            DiffState::Changed
        );
    }

    #[test]
    fn identical_sequences_short_circuit() {
        let differ = GraphDiffer::new();
        let working = json!([1, [2, 3], {"k": 4}]);
        let base = working.clone();
        let node = differ.compare(&working, &base).unwrap();

        assert_eq!(node.state(), DiffState::Untouched);
        assert!(node.children().is_empty());
    }

    #[test]
    fn wholly_added_sequence() {
        let differ = GraphDiffer::new();
        let working = json!(["a", "b"]);
        let base = json!(null);
        let node = differ.compare(&working, &base).unwrap();

        assert_eq!(node.state(), DiffState::Added);
        assert_eq!(node.children().len(), 2);
        assert!(node
            .children()
            .iter()
            .all(|c| c.state() == DiffState::Added));
    }

    #[test]
    fn nested_sequence_change_addressed_by_index_path() {
        let differ = GraphDiffer::new();
        let working = json!({"items": [{"qty": 1}, {"qty": 5}]});
        let base = json!({"items": [{"qty": 1}, {"qty": 2}]});
        let node = differ.compare(&working, &base).unwrap();

        let items = node
            .child(&PathSegment::Key("items".to_string()))
            .unwrap();
        let slot = items.child(&PathSegment::Index(1)).unwrap();
        let qty = slot.child(&PathSegment::Key("qty".to_string())).unwrap();
        assert_eq!(qty.state(), DiffState::Changed);
        assert_eq!(qty.path().to_string(), "/items/1/qty");
    }

    #[test]
    fn sequence_against_leaf_is_fatal() {
        let differ = GraphDiffer::new();
        let working = json!([1, 2]);
        let base = json!("not a sequence");
        assert!(differ.compare(&working, &base).is_err());
    }

    #[test]
    fn null_slot_in_overlap_is_removed() {
        let differ = GraphDiffer::new();
        let working = json!([null]);
        let base = json!([7]);
        let node = differ.compare(&working, &base).unwrap();

        assert_eq!(node.state(), DiffState::Changed);
        assert_eq!(
            node.child(&PathSegment::Index(0)).unwrap().state(),
            DiffState::Removed
        );
    }
}
