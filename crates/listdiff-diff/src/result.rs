//! The flat diff result.
//!
//! A [`DiffResult`] is built once per diff call and is immutable afterwards.
//! All indices refer to positions in the original old and new collections.

use std::collections::HashMap;
use std::hash::Hash;

use listdiff_types::{DiffStep, Move, Update};

use crate::projection::{BatchUpdates, Reloads};

/// A pairing of one old index with one new index sharing an identity.
///
/// `moved` and `updated` are independent: an item can change position,
/// content, both, or neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Correspondence {
    pub old: usize,
    pub new: usize,
    pub moved: bool,
    pub updated: bool,
}

impl Correspondence {
    /// Returns `true` if the item neither moved nor changed.
    pub fn is_unchanged(&self) -> bool {
        !self.moved && !self.updated
    }
}

/// The result of diffing two flat collections.
///
/// - `deletes` are old indices in descending order
/// - `inserts` are new indices in ascending order
/// - `updates` are ordered by old index
/// - `moves` are ordered by destination
#[derive(Clone, Debug)]
pub struct DiffResult<I> {
    pub(crate) deletes: Vec<usize>,
    pub(crate) inserts: Vec<usize>,
    pub(crate) updates: Vec<Update<usize>>,
    pub(crate) moves: Vec<Move<usize>>,
    /// Every matched pair, ordered by new index.
    pub(crate) matches: Vec<Correspondence>,
    pub(crate) old_to_new: Vec<Option<usize>>,
    pub(crate) new_to_old: Vec<Option<usize>>,
    pub(crate) old_ids: HashMap<I, usize>,
    pub(crate) new_ids: HashMap<I, usize>,
}

impl<I> Default for DiffResult<I> {
    fn default() -> Self {
        Self {
            deletes: Vec::new(),
            inserts: Vec::new(),
            updates: Vec::new(),
            moves: Vec::new(),
            matches: Vec::new(),
            old_to_new: Vec::new(),
            new_to_old: Vec::new(),
            old_ids: HashMap::new(),
            new_ids: HashMap::new(),
        }
    }
}

impl<I> DiffResult<I> {
    /// Old indices of removed items, descending.
    pub fn deletes(&self) -> &[usize] {
        &self.deletes
    }

    /// New indices of added items, ascending.
    pub fn inserts(&self) -> &[usize] {
        &self.inserts
    }

    /// Matched items whose content changed.
    pub fn updates(&self) -> &[Update<usize>] {
        &self.updates
    }

    /// Matched items whose position changed beyond the shift caused by
    /// deletes and inserts.
    pub fn moves(&self) -> &[Move<usize>] {
        &self.moves
    }

    /// Every matched pair with its move/update flags, ordered by new index.
    pub fn correspondences(&self) -> &[Correspondence] {
        &self.matches
    }

    /// Length of the old collection.
    pub fn old_len(&self) -> usize {
        self.old_to_new.len()
    }

    /// Length of the new collection.
    pub fn new_len(&self) -> usize {
        self.new_to_old.len()
    }

    /// Where the item at old index `old` ended up, or `None` if it was deleted.
    pub fn new_index_for(&self, old: usize) -> Option<usize> {
        self.old_to_new.get(old).copied().flatten()
    }

    /// Where the item at new index `new` came from, or `None` if it was inserted.
    pub fn old_index_for(&self, new: usize) -> Option<usize> {
        self.new_to_old.get(new).copied().flatten()
    }

    /// Returns `true` if applying the result would change anything.
    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }

    /// Total number of deletes, inserts, moves and updates.
    pub fn change_count(&self) -> usize {
        self.deletes.len() + self.inserts.len() + self.moves.len() + self.updates.len()
    }

    /// The result as one step per affected identity: deletes (descending),
    /// inserts (ascending), then matched items in new order. A matched item
    /// that both moved and changed yields a single [`DiffStep::Update`].
    pub fn steps(&self) -> Vec<DiffStep> {
        let deletes = self.deletes.iter().map(|&old| DiffStep::Delete { old });
        let inserts = self.inserts.iter().map(|&new| DiffStep::Insert { new });
        let matched = self.matches.iter().filter_map(|m| {
            if m.updated {
                Some(DiffStep::Update {
                    old: m.old,
                    new: m.new,
                })
            } else if m.moved {
                Some(DiffStep::Move {
                    from: m.old,
                    to: m.new,
                })
            } else {
                None
            }
        });
        deletes.chain(inserts).chain(matched).collect()
    }

    /// Projection that keeps moves native, for hosts that can animate
    /// incremental updates.
    pub fn for_batch_updates(&self) -> BatchUpdates<usize> {
        BatchUpdates {
            deletes: self.deletes.clone(),
            inserts: self.inserts.clone(),
            moves: self.moves.clone(),
            updates: self.updates.clone(),
        }
    }

    /// Projection that expresses every move as a delete plus an insert, for
    /// hosts that cannot move rows.
    pub fn for_reloads(&self) -> Reloads<usize> {
        self.for_batch_updates().into()
    }
}

impl<I: Eq + Hash> DiffResult<I> {
    /// Index of `identity` in the old collection.
    pub fn old_index(&self, identity: &I) -> Option<usize> {
        self.old_ids.get(identity).copied()
    }

    /// Index of `identity` in the new collection.
    pub fn new_index(&self, identity: &I) -> Option<usize> {
        self.new_ids.get(identity).copied()
    }

    /// Identities of the old collection, with their old indices.
    pub fn old_identities(&self) -> impl Iterator<Item = (&I, usize)> {
        self.old_ids.iter().map(|(id, &index)| (id, index))
    }

    /// Identities of the new collection, with their new indices.
    pub fn new_identities(&self) -> impl Iterator<Item = (&I, usize)> {
        self.new_ids.iter().map(|(id, &index)| (id, index))
    }
}

#[cfg(test)]
mod tests {
    use crate::diff;
    use listdiff_types::DiffStep;

    #[test]
    fn default_result_is_empty() {
        let result = super::DiffResult::<u32>::default();
        assert!(!result.has_changes());
        assert_eq!(result.old_len(), 0);
        assert_eq!(result.new_len(), 0);
        assert!(result.steps().is_empty());
    }

    #[test]
    fn position_maps_cover_every_index() {
        let result = diff(&["a", "b", "c"], &["c", "x", "a"]);
        assert_eq!(result.new_index_for(0), Some(2));
        assert_eq!(result.new_index_for(1), None);
        assert_eq!(result.new_index_for(2), Some(0));
        assert_eq!(result.old_index_for(1), None);
        assert_eq!(result.old_index_for(2), Some(0));
        assert_eq!(result.new_index_for(99), None);
    }

    #[test]
    fn identity_lookups() {
        let result = diff(&["a", "b"], &["b", "c"]);
        assert_eq!(result.old_index(&"a".to_string()), Some(0));
        assert_eq!(result.new_index(&"a".to_string()), None);
        assert_eq!(result.new_index(&"c".to_string()), Some(1));
        assert_eq!(result.old_identities().count(), 2);
        assert_eq!(result.new_identities().count(), 2);
    }

    #[test]
    fn steps_classify_each_identity_once() {
        let result = diff(&["a", "b", "c"], &["c", "a", "d"]);
        let steps = result.steps();
        assert!(steps.contains(&DiffStep::Delete { old: 1 }));
        assert!(steps.contains(&DiffStep::Insert { new: 2 }));
        let old_touched: Vec<usize> = steps.iter().filter_map(|s| s.old_index()).collect();
        let mut deduped = old_touched.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(old_touched.len(), deduped.len());
    }
}
