//! Section orchestration for listdiff.
//!
//! Diffs grouped data at two levels: the set of sections first, then the
//! items of every section present in both the old and the new data. The
//! combined result can be flattened into one ordered batch of
//! section-qualified operations.
//!
//! # Key Types
//!
//! - [`diff_sections`] / [`diff_grouped`] -- Two-level diff entry points
//! - [`SectionDiffPlan`] / [`SectionItemsDiff`] -- Section diff plus nested item diffs
//! - [`BatchUpdatePlan`] / [`Operation`] -- Cleaned, ordered operations for a host
//! - [`PlanOptions`] -- Cleaning rules for hosts with limited batch support

pub mod batch;
pub mod concurrency;
pub mod error;
pub mod options;
pub mod plan;
pub mod section;

pub use batch::{BatchUpdatePlan, Operation};
pub use error::{Result, SectionError};
pub use options::PlanOptions;
pub use plan::{diff_grouped, diff_sections, SectionDiffPlan, SectionItemsDiff};
pub use section::Section;
