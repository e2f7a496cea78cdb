//! Foundation types for listdiff.
//!
//! This crate provides the identity/equality contract and the small value
//! types shared by the diff engine and the section orchestration layer.
//! Every other listdiff crate depends on `listdiff-types`.
//!
//! # Key Types
//!
//! - [`Diffable`] -- Stable identity plus value equality for one item
//! - [`DynDiffable`] -- Object-safe variant for heterogeneous collections
//! - [`EqualityPolicy`] -- How matched items are compared for updates
//! - [`DiffStep`] -- One classified edit (delete, insert, move, update)
//! - [`Move`] / [`Update`] -- Index pairs, generic over flat or path addressing
//! - [`IndexPath`] -- A (section, item) address

pub mod diffable;
pub mod dynamic;
pub mod path;
pub mod policy;
pub mod step;

pub use diffable::Diffable;
pub use dynamic::DynDiffable;
pub use path::IndexPath;
pub use policy::EqualityPolicy;
pub use step::{DiffStep, Move, Side, Update};
