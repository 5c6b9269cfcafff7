use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime container shape of a value, used to select a comparison strategy.
///
/// The shape set is closed: every value is exactly one of keyed, ordered,
/// or leaf. Composite records enter the engine serialized to the value
/// model, where they present as keyed containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// A keyed container (JSON object).
    Keyed,
    /// An ordered sequence (JSON array).
    Ordered,
    /// A terminal value with no children.
    Leaf,
}

impl Shape {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Keyed,
            Value::Array(_) => Self::Ordered,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Leaf,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyed => write!(f, "keyed"),
            Self::Ordered => write!(f, "ordered"),
            Self::Leaf => write!(f, "leaf"),
        }
    }
}
