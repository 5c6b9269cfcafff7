//! The working/base/fresh value triple under comparison at one graph position.
//!
//! An [`Instances`] bundle is created once per recursion step by drilling
//! the parent bundle through a child [`Accessor`], and is discarded after
//! the corresponding node is produced. Drilling is null-safe: drilling an
//! absent parent yields an absent child, never an error.
//!
//! `Value::Null` is normalized to absence at this boundary, so a key mapped
//! to `null` behaves exactly like an absent key and bottoms out as
//! added/removed on the subordinate node.

use nodal_types::{NodePath, PathSegment, Shape};
use serde_json::{Map, Value};

use crate::accessor::Accessor;
use crate::config::Sameness;
use crate::error::{EngineError, EngineResult};

/// Up to three same-shaped values under comparison, plus the path segment
/// of the accessor that produced them.
///
/// `working` is the new version, `base` the old one. `fresh` is a template
/// value threaded alongside for key indexing; it never influences node
/// states.
#[derive(Clone, Debug)]
pub struct Instances<'a> {
    segment: PathSegment,
    working: Option<&'a Value>,
    base: Option<&'a Value>,
    fresh: Option<&'a Value>,
}

impl<'a> Instances<'a> {
    /// Bundle the two top-level graphs for comparison.
    pub fn of(working: &'a Value, base: &'a Value) -> Self {
        Self {
            segment: PathSegment::Root,
            working: normalize(Some(working)),
            base: normalize(Some(base)),
            fresh: None,
        }
    }

    /// Bundle the two top-level graphs plus a fresh template value.
    pub fn with_fresh(working: &'a Value, base: &'a Value, fresh: &'a Value) -> Self {
        Self {
            fresh: normalize(Some(fresh)),
            ..Self::of(working, base)
        }
    }

    /// Drill this bundle through a child accessor.
    pub fn access(&self, accessor: &dyn Accessor) -> Instances<'a> {
        Instances {
            segment: accessor.segment(),
            working: normalize(self.working.and_then(|v| accessor.resolve(v))),
            base: normalize(self.base.and_then(|v| accessor.resolve(v))),
            fresh: normalize(self.fresh.and_then(|v| accessor.resolve(v))),
        }
    }

    /// The new version of the value, if present.
    pub fn working(&self) -> Option<&'a Value> {
        self.working
    }

    /// The old version of the value, if present.
    pub fn base(&self) -> Option<&'a Value> {
        self.base
    }

    /// The template value, if present.
    pub fn fresh(&self) -> Option<&'a Value> {
        self.fresh
    }

    /// The path segment of the accessor that produced this bundle.
    pub fn segment(&self) -> &PathSegment {
        &self.segment
    }

    /// The node path for this bundle, given its parent's path.
    pub fn path_from(&self, parent: &NodePath) -> NodePath {
        match &self.segment {
            PathSegment::Root => parent.clone(),
            segment => parent.child(segment.clone()),
        }
    }

    /// Whichever of working/base is present, preferring working. Drives
    /// shape dispatch.
    pub fn any_present(&self) -> Option<&'a Value> {
        self.working.or(self.base)
    }

    /// Returns `true` if working and base are the same under the given
    /// sameness strategy. Both-absent counts as same.
    pub fn are_same(&self, sameness: &Sameness) -> bool {
        match sameness {
            Sameness::Structural => self.working == self.base,
            Sameness::Identity => match (self.working, self.base) {
                (Some(w), Some(b)) => std::ptr::eq(w, b),
                (None, None) => true,
                _ => false,
            },
            Sameness::Comparator(same) => match (self.working, self.base) {
                (Some(w), Some(b)) => same(w, b),
                (None, None) => true,
                _ => false,
            },
        }
    }

    /// View the working value as a keyed container.
    ///
    /// Requesting an incompatible shape is a dispatch-bug signal and
    /// returns [`EngineError::ShapeMismatch`], never a normal-path error.
    pub fn working_object(&self, path: &NodePath) -> EngineResult<Option<&'a Map<String, Value>>> {
        object_view(self.working, path)
    }

    /// View the base value as a keyed container.
    pub fn base_object(&self, path: &NodePath) -> EngineResult<Option<&'a Map<String, Value>>> {
        object_view(self.base, path)
    }

    /// View the fresh value as a keyed container.
    pub fn fresh_object(&self, path: &NodePath) -> EngineResult<Option<&'a Map<String, Value>>> {
        object_view(self.fresh, path)
    }

    /// View the working value as an ordered sequence.
    pub fn working_array(&self, path: &NodePath) -> EngineResult<Option<&'a Vec<Value>>> {
        array_view(self.working, path)
    }

    /// View the base value as an ordered sequence.
    pub fn base_array(&self, path: &NodePath) -> EngineResult<Option<&'a Vec<Value>>> {
        array_view(self.base, path)
    }
}

/// Present-but-null collapses to absent.
fn normalize(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn object_view<'a>(
    value: Option<&'a Value>,
    path: &NodePath,
) -> EngineResult<Option<&'a Map<String, Value>>> {
    match value {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(EngineError::ShapeMismatch {
            path: path.clone(),
            expected: Shape::Keyed,
            actual: Shape::of(other),
        }),
    }
}

fn array_view<'a>(
    value: Option<&'a Value>,
    path: &NodePath,
) -> EngineResult<Option<&'a Vec<Value>>> {
    match value {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(EngineError::ShapeMismatch {
            path: path.clone(),
            expected: Shape::Ordered,
            actual: Shape::of(other),
        }),
    }
}
