use serde::{Deserialize, Serialize};

/// How two matched items are compared to decide whether their content changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityPolicy {
    /// Same instance, or [`Diffable::equals`](crate::Diffable::equals) returns `true`.
    #[default]
    Value,
    /// Only the very same instance counts as unchanged. Useful for forcing
    /// updates of every matched item that was rebuilt.
    Instance,
}
