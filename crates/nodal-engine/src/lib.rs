//! Nodal comparison engine.
//!
//! Computes a structural difference between two versions of an arbitrary,
//! possibly nested object graph, producing a tree that records, for every
//! reachable value, whether it was added, removed, changed, left untouched,
//! or explicitly ignored.
//!
//! Values are represented as [`serde_json::Value`]; the engine dispatches
//! on runtime shape (keyed container, ordered sequence, or leaf) and
//! recurses through the graph, addressing every node by a stable
//! [`NodePath`](nodal_types::NodePath).
//!
//! # Key Types
//!
//! - [`GraphDiffer`] — Engine front door: configure once, compare many times
//! - [`Node`] — One vertex of the output diff tree
//! - [`Instances`] — The working/base/fresh value triple at one graph position
//! - [`DiffConfig`] / [`Sameness`] — Retention flag and sameness strategy
//! - [`PathPolicy`] / [`PolicyRules`] — Ignore and force-equal decisions per path
//! - [`Accessor`] — Capability for locating a value within a container
//! - [`NodeVisitor`] / [`ChangeCollector`] — Traversal over the output tree
//!
//! # Example
//!
//! ```
//! use nodal_engine::GraphDiffer;
//! use nodal_types::{DiffState, PathSegment};
//! use serde_json::json;
//!
//! let differ = GraphDiffer::new();
//! let working = json!({"name": "nodal", "version": 2});
//! let base = json!({"name": "nodal", "version": 1});
//!
//! let root = differ.compare(&working, &base).unwrap();
//! assert_eq!(root.state(), DiffState::Changed);
//!
//! let version = root.child(&PathSegment::Key("version".into())).unwrap();
//! assert_eq!(version.state(), DiffState::Changed);
//! ```

pub mod accessor;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod instances;
mod leaf_differ;
mod map_differ;
pub mod node;
pub mod policy;
mod seq_differ;
pub mod visitor;

pub use accessor::{Accessor, IndexAccessor, KeyAccessor, RootAccessor};
pub use config::{Comparator, DiffConfig, Sameness};
pub use dispatch::GraphDiffer;
pub use error::{EngineError, EngineResult};
pub use instances::Instances;
pub use node::Node;
pub use policy::{PathPolicy, PolicyDecision, PolicyError, PolicyRules};
pub use visitor::{ChangeCollector, NodeVisitor};
