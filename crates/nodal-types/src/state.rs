use serde::{Deserialize, Serialize};

/// Change classification of a node in a diff tree.
///
/// States are terminal: once a comparison produces a node, its state is
/// never recomputed. `Ignored` is final and short-circuits all child
/// processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffState {
    /// The node was excluded from comparison by policy.
    Ignored,
    /// The value exists in the working graph but not in the base graph.
    Added,
    /// The value exists in the base graph but not in the working graph.
    Removed,
    /// The value is present on both sides and no difference was found.
    #[default]
    Untouched,
    /// At least one difference was found beneath or at this node.
    Changed,
}

impl DiffState {
    /// Returns `true` if this state represents a difference between the
    /// two graphs (`Added`, `Removed`, or `Changed`).
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Added | Self::Removed | Self::Changed)
    }
}

impl std::fmt::Display for DiffState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignored => write!(f, "Ignored"),
            Self::Added => write!(f, "Added"),
            Self::Removed => write!(f, "Removed"),
            Self::Untouched => write!(f, "Untouched"),
            Self::Changed => write!(f, "Changed"),
        }
    }
}
