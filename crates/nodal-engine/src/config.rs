//! Engine configuration: unchanged-node retention and the sameness strategy.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Caller-supplied equality check for [`Sameness::Comparator`].
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// The equality strategy used to short-circuit identical subtrees.
///
/// A container whose working and base sides are "same" is reported
/// `Untouched` without descending into children. This is only safe if the
/// check is at least as strong as structural equality: a looser check
/// (identity, or a permissive comparator) silently misses divergent
/// children beneath a subtree it declares same. That trust boundary is the
/// caller's to uphold when departing from the default.
#[derive(Clone, Default)]
pub enum Sameness {
    /// Pointer identity of the two borrowed values. Same allocation means
    /// same subtree; distinct allocations always descend.
    Identity,
    /// Deep structural equality over the whole value. The default, and the
    /// only strategy for which the short-circuit is safe by construction.
    #[default]
    Structural,
    /// A caller-supplied comparator.
    Comparator(Comparator),
}

impl fmt::Debug for Sameness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "Identity"),
            Self::Structural => write!(f, "Structural"),
            Self::Comparator(_) => write!(f, "Comparator(..)"),
        }
    }
}

/// Configuration threaded through the whole comparison.
///
/// Passed explicitly alongside the policy hook rather than held as ambient
/// state, so the engine stays reentrant and testable in isolation.
#[derive(Clone, Debug, Default)]
pub struct DiffConfig {
    /// When `true`, children that carry no change are still attached to
    /// their parent, giving a full-tree view for inspection and debugging.
    pub return_unchanged_nodes: bool,
    /// The equality strategy for the identical-subtree short-circuit.
    pub sameness: Sameness,
}

impl DiffConfig {
    /// Configuration that retains unchanged children for full-tree
    /// inspection.
    pub fn retain_unchanged() -> Self {
        Self {
            return_unchanged_nodes: true,
            ..Default::default()
        }
    }
}
