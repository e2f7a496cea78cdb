//! Error types for the diff crate.

use listdiff_types::Side;

/// Errors reported by the checked entry points of the diff crate.
///
/// [`diff`](crate::diff) and [`diff_with`](crate::diff_with) never fail; these
/// errors come from [`diff_checked`](crate::diff_checked),
/// [`check_unique`](crate::check_unique) and replaying an edit script.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// Two items of the same collection share an identity.
    #[error("duplicate identity in {side} collection at index {index} (first seen at {first})")]
    DuplicateIdentity {
        side: Side,
        index: usize,
        first: usize,
    },

    /// An edit script referenced an index outside the collection it was
    /// replayed against, so the collection no longer matches the diffed
    /// snapshot.
    #[error("stale snapshot: {side} index {index} out of range for length {len}")]
    StaleSnapshot {
        side: Side,
        index: usize,
        len: usize,
    },
}

/// Convenience alias for fallible diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;
