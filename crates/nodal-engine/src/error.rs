//! Error types for the comparison engine.

use nodal_types::{NodePath, Shape};

use crate::policy::PolicyError;

/// Errors that abort a comparison.
///
/// There are no recoverable failures: every engine operation is a pure
/// computation over already-resolved values, so an error here signals a
/// dispatch bug or a collaborator contract violation. No partial tree is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A differ was asked to view a value as an incompatible container
    /// shape (e.g. a keyed comparison against an ordered sequence).
    #[error("shape mismatch at {path}: expected {expected}, got {actual}")]
    ShapeMismatch {
        path: NodePath,
        expected: Shape,
        actual: Shape,
    },

    /// The policy hook failed while deciding whether to compare a path.
    #[error("policy decision failed at {path}: {source}")]
    Policy {
        path: NodePath,
        #[source]
        source: PolicyError,
    },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
