//! The [`Accessor`] capability for locating values within containers.
//!
//! Accessors are the engine's only way to reach into a container: given a
//! parent value, an accessor resolves the value at one key or slot and
//! describes that slot as a [`PathSegment`] for node addressing.

use nodal_types::PathSegment;
use serde_json::Value;

/// Locates and reads the value at a specific key or slot of a container.
///
/// Implementations must be pure (no side effects) and total: resolving an
/// absent key yields `None`, never an error. The engine ships accessors for
/// the value model's own shapes; custom implementations must uphold the
/// same contract.
pub trait Accessor {
    /// Resolve the value at this accessor's slot within `container`.
    ///
    /// Returns `None` if the slot is absent or the container is of a shape
    /// this accessor cannot reach into.
    fn resolve<'a>(&self, container: &'a Value) -> Option<&'a Value>;

    /// The path segment identifying this accessor's slot.
    fn segment(&self) -> PathSegment;
}

/// Accessor for the top of an object graph: resolves to the container itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct RootAccessor;

impl Accessor for RootAccessor {
    fn resolve<'a>(&self, container: &'a Value) -> Option<&'a Value> {
        Some(container)
    }

    fn segment(&self) -> PathSegment {
        PathSegment::Root
    }
}

/// Accessor for one key of a keyed container.
#[derive(Clone, Debug)]
pub struct KeyAccessor {
    key: String,
}

impl KeyAccessor {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key this accessor reads.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Accessor for KeyAccessor {
    fn resolve<'a>(&self, container: &'a Value) -> Option<&'a Value> {
        container.as_object().and_then(|map| map.get(&self.key))
    }

    fn segment(&self) -> PathSegment {
        PathSegment::Key(self.key.clone())
    }
}

/// Accessor for one position of an ordered sequence.
#[derive(Clone, Copy, Debug)]
pub struct IndexAccessor {
    index: usize,
}

impl IndexAccessor {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// The position this accessor reads.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Accessor for IndexAccessor {
    fn resolve<'a>(&self, container: &'a Value) -> Option<&'a Value> {
        container.as_array().and_then(|items| items.get(self.index))
    }

    fn segment(&self) -> PathSegment {
        PathSegment::Index(self.index)
    }
}
