//! Diff engine for listdiff.
//!
//! Computes the structural edits (deletes, inserts, moves, updates) that turn
//! an old ordered collection into a new one, using Paul Heckel's linear-time
//! technique over any [`Diffable`](listdiff_types::Diffable) items.
//!
//! # Key Types
//!
//! - [`diff`] / [`diff_with`] / [`diff_checked`] -- Flat collection diff
//! - [`DiffResult`] / [`Correspondence`] -- Flat result with O(1) lookups
//! - [`BatchUpdates`] / [`Reloads`] -- Consumption views (native moves vs. delete+insert)
//! - [`translate`] / [`diff_paths`] / [`IndexPathResult`] -- Section-qualified results

pub mod error;
pub mod heckel;
pub mod index_path;
pub mod options;
pub mod projection;
pub mod result;

pub use error::{DiffError, Result};
pub use heckel::{check_unique, diff, diff_checked, diff_with};
pub use index_path::{diff_paths, translate, IndexPathResult};
pub use options::DiffOptions;
pub use projection::{BatchUpdates, Reloads};
pub use result::{Correspondence, DiffResult};
