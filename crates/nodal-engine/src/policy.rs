//! The ignore/force-equal policy hook consulted before every node is built.
//!
//! The engine asks the policy once per node, including the root, before any
//! specialized differ runs. Decisions must be deterministic for a given
//! path and configuration; a failing hook aborts the whole comparison,
//! since a wrong ignore or force-equal decision would silently corrupt the
//! diff.

use std::collections::BTreeSet;

use nodal_types::NodePath;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instances::Instances;

/// The outcome of a policy consultation for one node path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyDecision {
    /// Exclude this node entirely: it is reported `Ignored` with no
    /// children and no differ runs beneath it.
    pub ignore: bool,
    /// Treat this node as equal despite any value delta: it is reported
    /// `Untouched` with no descent.
    pub force_equal: bool,
}

impl PolicyDecision {
    /// Compare the node normally.
    pub fn include() -> Self {
        Self::default()
    }

    /// Exclude the node from comparison.
    pub fn ignored() -> Self {
        Self {
            ignore: true,
            ..Self::default()
        }
    }

    /// Report the node as equal without descending.
    pub fn forced_equal() -> Self {
        Self {
            force_equal: true,
            ..Self::default()
        }
    }
}

/// A failure inside a policy hook.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PolicyError {
    message: String,
}

impl PolicyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Decides, per node path, whether to ignore or force-equal.
///
/// Consulted before every node is built. Implementations must be
/// deterministic for a given path; the `instances` bundle is provided for
/// value-dependent policies but most implementations key off the path
/// alone.
pub trait PathPolicy: Send + Sync {
    fn decide(
        &self,
        path: &NodePath,
        instances: &Instances<'_>,
    ) -> Result<PolicyDecision, PolicyError>;
}

/// Path-list policy: exact-match ignore and force-equal sets, plus
/// prefix-based subtree exclusion.
///
/// Rule sets serialize with paths in their string form (`"/config/secret"`),
/// so they can live in configuration files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyRules {
    /// Paths excluded from comparison.
    #[serde(default)]
    ignored: BTreeSet<NodePath>,
    /// Paths whose entire subtree (the path itself included) is excluded.
    #[serde(default)]
    ignored_under: BTreeSet<NodePath>,
    /// Paths reported equal regardless of value divergence.
    #[serde(default)]
    force_equal: BTreeSet<NodePath>,
}

impl PolicyRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude one exact path.
    pub fn ignore(mut self, path: NodePath) -> Self {
        self.ignored.insert(path);
        self
    }

    /// Exclude a path and everything beneath it.
    pub fn ignore_under(mut self, path: NodePath) -> Self {
        self.ignored_under.insert(path);
        self
    }

    /// Report a path equal regardless of value divergence.
    pub fn force_equal(mut self, path: NodePath) -> Self {
        self.force_equal.insert(path);
        self
    }

    fn is_ignored(&self, path: &NodePath) -> bool {
        self.ignored.contains(path)
            || self
                .ignored_under
                .iter()
                .any(|prefix| path.starts_with(prefix))
    }
}

impl PathPolicy for PolicyRules {
    fn decide(
        &self,
        path: &NodePath,
        _instances: &Instances<'_>,
    ) -> Result<PolicyDecision, PolicyError> {
        Ok(PolicyDecision {
            ignore: self.is_ignored(path),
            force_equal: self.force_equal.contains(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decide(rules: &PolicyRules, path: &NodePath) -> PolicyDecision {
        let working = json!({});
        let base = json!({});
        let instances = Instances::of(&working, &base);
        rules.decide(path, &instances).unwrap()
    }

    #[test]
    fn empty_rules_include_everything() {
        let rules = PolicyRules::new();
        let decision = decide(&rules, &NodePath::root().key("anything"));
        assert_eq!(decision, PolicyDecision::include());
    }

    #[test]
    fn exact_ignore_matches_only_that_path() {
        let rules = PolicyRules::new().ignore(NodePath::root().key("secret"));
        assert!(decide(&rules, &NodePath::root().key("secret")).ignore);
        assert!(!decide(&rules, &NodePath::root().key("secret").key("inner")).ignore);
        assert!(!decide(&rules, &NodePath::root().key("other")).ignore);
    }

    #[test]
    fn ignore_under_covers_subtree() {
        let rules = PolicyRules::new().ignore_under(NodePath::root().key("secrets"));
        assert!(decide(&rules, &NodePath::root().key("secrets")).ignore);
        assert!(decide(&rules, &NodePath::root().key("secrets").key("token")).ignore);
        assert!(!decide(&rules, &NodePath::root().key("secretsX")).ignore);
    }

    #[test]
    fn force_equal_is_exact() {
        let rules = PolicyRules::new().force_equal(NodePath::root().key("version"));
        let decision = decide(&rules, &NodePath::root().key("version"));
        assert!(decision.force_equal);
        assert!(!decision.ignore);
    }

    #[test]
    fn rules_serde_roundtrip_uses_path_strings() {
        let rules = PolicyRules::new()
            .ignore(NodePath::root().key("a"))
            .ignore_under(NodePath::root().key("b").index(0))
            .force_equal(NodePath::root().key("c"));
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json["ignored"][0], json!("/a"));
        assert_eq!(json["ignored_under"][0], json!("/b/0"));
        let back: PolicyRules = serde_json::from_value(json).unwrap();
        assert_eq!(back, rules);
    }

    #[test]
    fn decision_constructors() {
        assert!(PolicyDecision::ignored().ignore);
        assert!(PolicyDecision::forced_equal().force_equal);
        assert_eq!(PolicyDecision::include(), PolicyDecision::default());
    }
}
