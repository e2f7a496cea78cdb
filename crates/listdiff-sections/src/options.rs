use serde::{Deserialize, Serialize};

/// Cleaning rules applied when a [`SectionDiffPlan`](crate::SectionDiffPlan)
/// is flattened into a [`BatchUpdatePlan`](crate::BatchUpdatePlan).
///
/// The defaults keep every operation native. Hosts whose batch API cannot
/// combine certain operations turn the matching rule on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// A moved section that also has item changes is deleted and re-inserted
    /// instead, and its item operations are dropped.
    pub collapse_moved_sections: bool,
    /// Item updates become a delete at the old path plus an insert at the
    /// new path. A move of the same item is dropped.
    pub reload_updates: bool,
    /// Section reloads become a section delete plus insert, and item
    /// operations inside that section are dropped.
    pub collapse_section_updates: bool,
}

impl PlanOptions {
    /// Every cleaning rule enabled, for the most restrictive hosts.
    pub fn conservative() -> Self {
        Self {
            collapse_moved_sections: true,
            reload_updates: true,
            collapse_section_updates: true,
        }
    }
}
