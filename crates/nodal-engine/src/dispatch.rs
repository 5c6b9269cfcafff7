//! The dispatcher: single entry and re-entry point for comparing any two
//! values at any graph position.
//!
//! [`GraphDiffer`] consults the policy hook, selects a specialized differ
//! by the runtime shape of whichever side is present, and hands back the
//! differ's result unmodified. It holds no mutable state across calls:
//! configuration and policy are threaded explicitly, so every call is
//! independent and the engine is reentrant.

use std::sync::Arc;

use nodal_types::{DiffState, NodePath, Shape};
use serde_json::Value;
use tracing::debug;

use crate::config::{DiffConfig, Sameness};
use crate::error::{EngineError, EngineResult};
use crate::instances::Instances;
use crate::node::Node;
use crate::policy::{PathPolicy, PolicyDecision};
use crate::{leaf_differ, map_differ, seq_differ};

/// The comparison engine front door.
///
/// Build one with a [`DiffConfig`] and optionally a [`PathPolicy`], then
/// call [`compare`](Self::compare) with the two graphs. The same differ can
/// be reused across comparisons.
pub struct GraphDiffer {
    config: DiffConfig,
    policy: Option<Arc<dyn PathPolicy>>,
}

impl Default for GraphDiffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphDiffer {
    /// A differ with the default configuration and no policy.
    pub fn new() -> Self {
        Self::with_config(DiffConfig::default())
    }

    /// A differ with the given configuration and no policy.
    pub fn with_config(config: DiffConfig) -> Self {
        Self {
            config,
            policy: None,
        }
    }

    /// Attach a policy hook, consulted before every node is built.
    pub fn policy(mut self, policy: Arc<dyn PathPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub(crate) fn sameness(&self) -> &Sameness {
        &self.config.sameness
    }

    /// Compare two object graphs, producing the root of a diff tree.
    ///
    /// The tree is fully constructed before it is returned and must be
    /// treated as read-only. On any error the whole comparison is aborted;
    /// no partial tree is returned.
    pub fn compare(&self, working: &Value, base: &Value) -> EngineResult<Node> {
        self.compare_root(Instances::of(working, base))
    }

    /// Compare two object graphs with a fresh template value threaded
    /// alongside for key indexing.
    pub fn compare_with_fresh(
        &self,
        working: &Value,
        base: &Value,
        fresh: &Value,
    ) -> EngineResult<Node> {
        self.compare_root(Instances::with_fresh(working, base, fresh))
    }

    fn compare_root(&self, instances: Instances<'_>) -> EngineResult<Node> {
        match self.delegate(&NodePath::root(), &instances)? {
            Some(node) => Ok(node),
            // Both sides absent: the degenerate empty-vs-empty comparison.
            None => Ok(Node::new(NodePath::root())),
        }
    }

    /// Compare the values of one bundle, selecting a differ by runtime
    /// shape. Returns `None` when both sides are absent.
    pub(crate) fn delegate(
        &self,
        parent_path: &NodePath,
        instances: &Instances<'_>,
    ) -> EngineResult<Option<Node>> {
        let path = instances.path_from(parent_path);
        let decision = self.policy_decision(&path, instances)?;
        if decision.ignore {
            let mut node = Node::new(path);
            node.set_state(DiffState::Ignored);
            return Ok(Some(node));
        }
        if decision.force_equal {
            let mut node = Node::new(path);
            node.set_state(DiffState::Untouched);
            return Ok(Some(node));
        }

        let Some(present) = instances.any_present() else {
            return Ok(None);
        };
        let shape = Shape::of(present);
        debug!(path = %path, %shape, "dispatching comparison");

        let node = match shape {
            Shape::Keyed => map_differ::compare(self, parent_path, instances)?,
            Shape::Ordered => seq_differ::compare(self, parent_path, instances)?,
            Shape::Leaf => leaf_differ::compare(self, parent_path, instances)?,
        };
        Ok(Some(node))
    }

    pub(crate) fn policy_decision(
        &self,
        path: &NodePath,
        instances: &Instances<'_>,
    ) -> EngineResult<PolicyDecision> {
        match &self.policy {
            Some(policy) => {
                policy
                    .decide(path, instances)
                    .map_err(|source| EngineError::Policy {
                        path: path.clone(),
                        source,
                    })
            }
            None => Ok(PolicyDecision::include()),
        }
    }
}
