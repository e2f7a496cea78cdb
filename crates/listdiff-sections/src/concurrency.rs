//! Nested item diffs, sequential or on the rayon pool.
//!
//! With the `parallel` feature the items of every surviving section are
//! diffed concurrently. Results are collected in job order, so the plan is
//! identical to the sequential one.

use listdiff_diff::{diff_with, DiffOptions, DiffResult};
use listdiff_types::Diffable;

/// `Sync` when the `parallel` feature is enabled, otherwise implemented by
/// every type.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// `Sync` when the `parallel` feature is enabled, otherwise implemented by
/// every type.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

/// `Send` when the `parallel` feature is enabled, otherwise implemented by
/// every type.
#[cfg(feature = "parallel")]
pub trait MaybeSend: Send {}
#[cfg(feature = "parallel")]
impl<T: Send + ?Sized> MaybeSend for T {}

/// `Send` when the `parallel` feature is enabled, otherwise implemented by
/// every type.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSend {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSend for T {}

/// The item collections of one surviving section.
pub(crate) struct Job<'a, T> {
    pub old_section: usize,
    pub new_section: usize,
    pub old: &'a [T],
    pub new: &'a [T],
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn run<T>(jobs: &[Job<'_, T>], options: &DiffOptions) -> Vec<DiffResult<T::Identifier>>
where
    T: Diffable + MaybeSync,
    T::Identifier: MaybeSend,
{
    jobs.iter()
        .map(|job| diff_with(job.old, job.new, options))
        .collect()
}

#[cfg(feature = "parallel")]
pub(crate) fn run<T>(jobs: &[Job<'_, T>], options: &DiffOptions) -> Vec<DiffResult<T::Identifier>>
where
    T: Diffable + MaybeSync,
    T::Identifier: MaybeSend,
{
    use rayon::prelude::*;

    jobs.par_iter()
        .map(|job| diff_with(job.old, job.new, options))
        .collect()
}
