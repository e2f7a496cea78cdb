use serde::{Deserialize, Serialize};

use listdiff_types::EqualityPolicy;

/// Configuration for a single diff run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// How matched items are compared to detect updates.
    pub equality: EqualityPolicy,
}

impl DiffOptions {
    /// Options that report every matched item that is not the very same
    /// instance as updated.
    pub fn instance_equality() -> Self {
        Self {
            equality: EqualityPolicy::Instance,
        }
    }
}
