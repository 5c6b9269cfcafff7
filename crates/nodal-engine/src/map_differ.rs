//! Keyed-container comparison: the reference differ.
//!
//! Indexes the keys of both (or all three) sides once, classifies top-level
//! presence, partitions keys into added/removed/common, and recurses
//! through the dispatcher for every key in a processed set.

use nodal_types::{DiffState, NodePath};
use std::collections::BTreeSet;
use tracing::debug;

use crate::accessor::KeyAccessor;
use crate::dispatch::GraphDiffer;
use crate::error::EngineResult;
use crate::instances::Instances;
use crate::node::Node;

/// The set of keys present across working/base/fresh, built once at the
/// start of a map comparison and read-only afterwards. Key iteration never
/// re-derives key sets from the original containers.
pub(crate) struct KeyIndex {
    working: BTreeSet<String>,
    base: BTreeSet<String>,
    fresh: BTreeSet<String>,
}

impl KeyIndex {
    pub(crate) fn build(instances: &Instances<'_>, path: &NodePath) -> EngineResult<Self> {
        Ok(Self {
            working: key_set(instances.working_object(path)?),
            base: key_set(instances.base_object(path)?),
            fresh: key_set(instances.fresh_object(path)?),
        })
    }

    /// Every indexed key, fresh-only keys included. Fresh keys participate
    /// in indexing but are never iterated for comparison.
    pub(crate) fn keys(&self) -> BTreeSet<String> {
        let mut keys = self.working.clone();
        keys.extend(self.base.iter().cloned());
        keys.extend(self.fresh.iter().cloned());
        keys
    }

    pub(crate) fn working_keys(&self) -> Vec<String> {
        self.working.iter().cloned().collect()
    }

    pub(crate) fn base_keys(&self) -> Vec<String> {
        self.base.iter().cloned().collect()
    }

    /// Keys in working but not in base.
    pub(crate) fn added(&self) -> Vec<String> {
        self.working.difference(&self.base).cloned().collect()
    }

    /// Keys in base but not in working.
    pub(crate) fn removed(&self) -> Vec<String> {
        self.base.difference(&self.working).cloned().collect()
    }

    /// Keys present on both sides.
    pub(crate) fn common(&self) -> Vec<String> {
        self.working.intersection(&self.base).cloned().collect()
    }
}

fn key_set(map: Option<&serde_json::Map<String, serde_json::Value>>) -> BTreeSet<String> {
    map.map(|m| m.keys().cloned().collect()).unwrap_or_default()
}

/// Compare two keyed containers.
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

    let index = KeyIndex::build(instances, &path)?;
    debug!(path = %path, keys = index.keys().len(), "indexed map keys");

    match (instances.working(), instances.base()) {
        (Some(_), None) => {
            handle_keys(differ, &mut node, instances, index.working_keys())?;
            node.set_state(DiffState::Added);
        }
        (None, Some(_)) => {
            handle_keys(differ, &mut node, instances, index.base_keys())?;
            node.set_state(DiffState::Removed);
        }
        _ if instances.are_same(differ.sameness()) => {
            node.set_state(DiffState::Untouched);
        }
        _ => {
            handle_keys(differ, &mut node, instances, index.added())?;
            handle_keys(differ, &mut node, instances, index.removed())?;
            handle_keys(differ, &mut node, instances, index.common())?;
        }
    }

    Ok(node)
}

fn handle_keys(
    differ: &GraphDiffer,
    node: &mut Node,
    instances: &Instances<'_>,
    keys: Vec<String>,
) -> EngineResult<()> {
    for key in keys {
        let accessor = KeyAccessor::new(key);
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
