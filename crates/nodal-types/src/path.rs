use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// One step of a node address within its parent container.
///
/// The root of a diff tree is addressed by [`PathSegment::Root`]; every
/// other node is addressed by the map key or sequence index it was reached
/// through.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathSegment {
    /// The top of the object graph.
    Root,
    /// A key within a keyed container.
    Key(String),
    /// A position within an ordered sequence.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "/"),
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The absolute address of a node, from the root of the object graph down.
///
/// Paths render as `/`-separated strings: the root is `/`, the value at key
/// `a` inside the sequence element `0` is `/0/a`. Nodes carry their full
/// path instead of a parent pointer, so trees can be serialized and compared
/// without aliasing concerns.
///
/// A path holds only [`PathSegment::Key`] and [`PathSegment::Index`]
/// segments; the root is the empty path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    /// The root path (`/`).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments of this path, root excluded.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Number of segments (0 for the root).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The final segment, or [`PathSegment::Root`] for the root path.
    pub fn last(&self) -> PathSegment {
        self.0.last().cloned().unwrap_or(PathSegment::Root)
    }

    /// Extend this path by one segment.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Extend this path by a map key. Convenience for building policy rules.
    pub fn key(self, key: impl Into<String>) -> Self {
        self.child(PathSegment::Key(key.into()))
    }

    /// Extend this path by a sequence index.
    pub fn index(self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Returns `true` if `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = TypeError;

    /// Parse a rendered path.
    ///
    /// `/` parses to the root. All-digit segments parse as indices, anything
    /// else as keys; keys containing `/` or consisting only of digits do not
    /// round-trip through the string form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix('/') else {
            return Err(TypeError::InvalidPath(s.to_string()));
        };
        if rest.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for part in rest.split('/') {
            if part.is_empty() {
                return Err(TypeError::InvalidPath(s.to_string()));
            }
            if part.chars().all(|c| c.is_ascii_digit()) {
                let index = part
                    .parse::<usize>()
                    .map_err(|_| TypeError::InvalidPath(s.to_string()))?;
                segments.push(PathSegment::Index(index));
            } else {
                segments.push(PathSegment::Key(part.to_string()));
            }
        }
        Ok(Self(segments))
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_as_slash() {
        assert_eq!(NodePath::root().to_string(), "/");
        assert!(NodePath::root().is_root());
    }

    #[test]
    fn nested_path_renders_segments() {
        let path = NodePath::root().key("items").index(3).key("name");
        assert_eq!(path.to_string(), "/items/3/name");
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn last_segment_of_root_is_root() {
        assert_eq!(NodePath::root().last(), PathSegment::Root);
        let path = NodePath::root().key("a");
        assert_eq!(path.last(), PathSegment::Key("a".to_string()));
    }

    #[test]
    fn parent_walks_up_one_level() {
        let path = NodePath::root().key("a").index(0);
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "/a");
        assert_eq!(parent.parent().unwrap(), NodePath::root());
        assert!(NodePath::root().parent().is_none());
    }

    #[test]
    fn starts_with_matches_self_and_ancestors() {
        let prefix = NodePath::root().key("config");
        let path = prefix.clone().key("secret");
        assert!(path.starts_with(&prefix));
        assert!(path.starts_with(&path));
        assert!(path.starts_with(&NodePath::root()));
        assert!(!prefix.starts_with(&path));
    }

    #[test]
    fn sibling_is_not_a_prefix() {
        let path = NodePath::root().key("a").key("b");
        let sibling = NodePath::root().key("a").key("c");
        assert!(!path.starts_with(&sibling));
    }

    #[test]
    fn parse_roundtrip() {
        let path = NodePath::root().key("items").index(7);
        let parsed: NodePath = path.to_string().parse().unwrap();
        assert_eq!(parsed, path);
    }

    #[test]
    fn parse_root() {
        let parsed: NodePath = "/".parse().unwrap();
        assert!(parsed.is_root());
    }

    #[test]
    fn parse_numeric_segment_as_index() {
        let parsed: NodePath = "/0/name".parse().unwrap();
        assert_eq!(
            parsed.segments(),
            &[PathSegment::Index(0), PathSegment::Key("name".to_string())]
        );
    }

    #[test]
    fn parse_rejects_missing_leading_slash() {
        assert!("a/b".parse::<NodePath>().is_err());
    }

    #[test]
    fn parse_rejects_empty_segment() {
        assert!("/a//b".parse::<NodePath>().is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let path = NodePath::root().key("a").index(1);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/a/1\"");
        let parsed: NodePath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, path);
    }

    #[test]
    fn ordering_is_consistent() {
        let a = NodePath::root().key("a");
        let b = NodePath::root().key("b");
        assert!(a < b);
    }
}
