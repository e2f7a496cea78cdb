//! Error types for section orchestration.

use listdiff_diff::DiffError;
use listdiff_types::Side;

/// Errors that can occur while building or replaying a section plan.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SectionError {
    /// A section present in both collections has no entry in the items map.
    #[error("no items supplied for {side} section at index {index}")]
    MissingItems { side: Side, index: usize },

    /// A flat diff or replay failed.
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Convenience alias for section results.
pub type Result<T> = std::result::Result<T, SectionError>;
