use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two collections of a diff an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => f.write_str("old"),
            Side::New => f.write_str("new"),
        }
    }
}

/// A position change: the item at `from` (old collection) lands at `to`
/// (new collection).
///
/// `P` is `usize` for flat diffs and [`IndexPath`](crate::IndexPath) for
/// sectioned ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move<P> {
    pub from: P,
    pub to: P,
}

impl<P> Move<P> {
    pub const fn new(from: P, to: P) -> Self {
        Self { from, to }
    }

    /// Re-address both ends of the move.
    pub fn map<Q>(self, mut f: impl FnMut(P, Side) -> Q) -> Move<Q> {
        Move {
            from: f(self.from, Side::Old),
            to: f(self.to, Side::New),
        }
    }
}

/// A content change of a matched item: `old` in the old collection, `new` in
/// the new collection.
///
/// Hosts that reload rows in place use `old`; hosts that rebind after
/// structural changes use `new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Update<P> {
    pub old: P,
    pub new: P,
}

impl<P> Update<P> {
    pub const fn new(old: P, new: P) -> Self {
        Self { old, new }
    }

    /// Re-address both ends of the update.
    pub fn map<Q>(self, mut f: impl FnMut(P, Side) -> Q) -> Update<Q> {
        Update {
            old: f(self.old, Side::Old),
            new: f(self.new, Side::New),
        }
    }
}

/// One classified edit of a flat diff.
///
/// Each identity maps to at most one step. A matched item that both moved
/// and changed is reported once, as an [`Update`](DiffStep::Update) whose
/// indices differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffStep {
    /// Remove the item at `old`.
    Delete { old: usize },
    /// Insert the new item at `new`.
    Insert { new: usize },
    /// Relocate an unchanged item.
    Move { from: usize, to: usize },
    /// Refresh a changed item.
    Update { old: usize, new: usize },
}

impl DiffStep {
    /// The old-collection index this step touches, if any.
    pub fn old_index(&self) -> Option<usize> {
        match *self {
            DiffStep::Delete { old } | DiffStep::Update { old, .. } => Some(old),
            DiffStep::Move { from, .. } => Some(from),
            DiffStep::Insert { .. } => None,
        }
    }

    /// The new-collection index this step touches, if any.
    pub fn new_index(&self) -> Option<usize> {
        match *self {
            DiffStep::Insert { new } | DiffStep::Update { new, .. } => Some(new),
            DiffStep::Move { to, .. } => Some(to),
            DiffStep::Delete { .. } => None,
        }
    }
}
