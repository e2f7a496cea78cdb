//! Consumption views of a diff.
//!
//! [`BatchUpdates`] keeps moves native; [`Reloads`] expresses them as a
//! delete plus an insert. Both are generic over the index type so the same
//! views serve flat (`usize`) and sectioned ([`IndexPath`]) results.
//!
//! [`IndexPath`]: listdiff_types::IndexPath

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use listdiff_types::{Move, Side, Update};

use crate::error::{DiffError, Result};

/// An edit script for hosts that support native moves.
///
/// `deletes` are descending and `inserts` ascending, so either list can be
/// applied one element at a time against a live collection. `updates` carry
/// the old index for in-place reloads before structural changes and the new
/// index for rebinding afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdates<P> {
    pub deletes: Vec<P>,
    pub inserts: Vec<P>,
    pub moves: Vec<Move<P>>,
    pub updates: Vec<Update<P>>,
}

/// An edit script for hosts that cannot move rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reloads<P> {
    pub deletes: Vec<P>,
    pub inserts: Vec<P>,
    pub updates: Vec<Update<P>>,
}

impl<P> BatchUpdates<P> {
    /// Returns `true` if the script changes nothing.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
            && self.inserts.is_empty()
            && self.moves.is_empty()
            && self.updates.is_empty()
    }

    /// Re-address every index. `Side::Old` positions are deletes, move
    /// sources and update sources; the rest are `Side::New`.
    pub fn map<Q>(self, mut f: impl FnMut(P, Side) -> Q) -> BatchUpdates<Q> {
        BatchUpdates {
            deletes: self.deletes.into_iter().map(|p| f(p, Side::Old)).collect(),
            inserts: self.inserts.into_iter().map(|p| f(p, Side::New)).collect(),
            moves: self.moves.into_iter().map(|m| m.map(&mut f)).collect(),
            updates: self.updates.into_iter().map(|u| u.map(&mut f)).collect(),
        }
    }
}

impl<P> Reloads<P> {
    /// Returns `true` if the script changes nothing.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.inserts.is_empty() && self.updates.is_empty()
    }
}

impl<P: Ord + Copy> Reloads<P> {
    /// Fold updates into the delete and insert lists, for hosts that cannot
    /// patch a row in place either.
    pub fn collapse_updates(mut self) -> Self {
        for update in self.updates.drain(..) {
            self.deletes.push(update.old);
            self.inserts.push(update.new);
        }
        normalize(&mut self.deletes, &mut self.inserts);
        self
    }
}

impl<P: Ord + Copy> From<BatchUpdates<P>> for Reloads<P> {
    /// A moved item is deleted at its source and inserted at its destination,
    /// which also refreshes it, so its update (if any) is dropped.
    fn from(batch: BatchUpdates<P>) -> Self {
        let mut deletes = batch.deletes;
        let mut inserts = batch.inserts;
        let mut relocated = BTreeSet::new();
        for mv in batch.moves {
            deletes.push(mv.from);
            inserts.push(mv.to);
            relocated.insert(mv.from);
        }
        let updates = batch
            .updates
            .into_iter()
            .filter(|u| !relocated.contains(&u.old))
            .collect();
        normalize(&mut deletes, &mut inserts);
        Reloads {
            deletes,
            inserts,
            updates,
        }
    }
}

fn normalize<P: Ord>(deletes: &mut Vec<P>, inserts: &mut Vec<P>) {
    deletes.sort_unstable_by(|a, b| b.cmp(a));
    deletes.dedup();
    inserts.sort_unstable();
    inserts.dedup();
}

fn stale(side: Side, index: usize, len: usize) -> DiffError {
    DiffError::StaleSnapshot { side, index, len }
}

fn refresh<T: Clone>(items: &mut [T], new: &[T], updates: &[Update<usize>]) -> Result<()> {
    let len = items.len();
    for update in updates {
        let value = new
            .get(update.new)
            .ok_or_else(|| stale(Side::New, update.new, new.len()))?;
        let slot = items
            .get_mut(update.old)
            .ok_or_else(|| stale(Side::Old, update.old, len))?;
        *slot = value.clone();
    }
    Ok(())
}

impl BatchUpdates<usize> {
    /// Replay the script on a copy of `old`, the way a table view applies a
    /// batch: updates in place at their old index, then removals (deletes and
    /// move sources) descending, then placements (inserts and move
    /// destinations) ascending. Inserted values are taken from `new`.
    ///
    /// For a script produced by diffing `old` against `new`, the output has
    /// the identities of `new` in order.
    pub fn apply<T: Clone>(&self, old: &[T], new: &[T]) -> Result<Vec<T>> {
        let mut items = old.to_vec();
        refresh(&mut items, new, &self.updates)?;

        let mut removals: Vec<(usize, Option<usize>)> = self
            .deletes
            .iter()
            .map(|&index| (index, None))
            .chain(self.moves.iter().map(|mv| (mv.from, Some(mv.to))))
            .collect();
        removals.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        let mut carried = HashMap::with_capacity(self.moves.len());
        for (index, destination) in removals {
            if index >= items.len() {
                return Err(stale(Side::Old, index, items.len()));
            }
            let item = items.remove(index);
            if let Some(to) = destination {
                carried.insert(to, item);
            }
        }

        let mut placements: Vec<usize> = self
            .inserts
            .iter()
            .copied()
            .chain(self.moves.iter().map(|mv| mv.to))
            .collect();
        placements.sort_unstable();

        for index in placements {
            let item = match carried.remove(&index) {
                Some(item) => item,
                None => new
                    .get(index)
                    .cloned()
                    .ok_or_else(|| stale(Side::New, index, new.len()))?,
            };
            if index > items.len() {
                return Err(stale(Side::New, index, items.len()));
            }
            items.insert(index, item);
        }

        Ok(items)
    }
}

impl Reloads<usize> {
    /// Replay the script on a copy of `old`: updates in place, deletes
    /// descending, then inserts ascending with values from `new`.
    pub fn apply<T: Clone>(&self, old: &[T], new: &[T]) -> Result<Vec<T>> {
        let mut items = old.to_vec();
        refresh(&mut items, new, &self.updates)?;

        for &index in &self.deletes {
            if index >= items.len() {
                return Err(stale(Side::Old, index, items.len()));
            }
            items.remove(index);
        }

        for &index in &self.inserts {
            let value = new
                .get(index)
                .ok_or_else(|| stale(Side::New, index, new.len()))?;
            if index > items.len() {
                return Err(stale(Side::New, index, items.len()));
            }
            items.insert(index, value.clone());
        }

        Ok(items)
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::diff;
    use listdiff_types::Diffable;

    #[derive(Clone, Debug, PartialEq)]
    struct Cell {
        id: u8,
        rev: u8,
    }

    impl Diffable for Cell {
        type Identifier = u8;

        fn identity(&self) -> u8 {
            self.id
        }

        fn equals(&self, other: &Self) -> bool {
            self.rev == other.rev
        }
    }

    /// Unique ids drawn from a small alphabet so old and new overlap heavily.
    fn cells() -> impl Strategy<Value = Vec<Cell>> {
        proptest::collection::vec((0u8..24, 0u8..3), 0..20).prop_map(|raw| {
            let mut seen = HashSet::new();
            raw.into_iter()
                .filter(|(id, _)| seen.insert(*id))
                .map(|(id, rev)| Cell { id, rev })
                .collect()
        })
    }

    fn ids(cells: &[Cell]) -> Vec<u8> {
        cells.iter().map(|c| c.id).collect()
    }

    proptest! {
        /// Replaying the batch script on `old` yields `new`.
        #[test]
        fn batch_round_trip(old in cells(), new in cells()) {
            let result = diff(&old, &new);
            let applied = result.for_batch_updates().apply(&old, &new).unwrap();
            prop_assert_eq!(ids(&applied), ids(&new));
            prop_assert_eq!(applied, new);
        }

        /// Replaying the reload script on `old` yields `new`.
        #[test]
        fn reload_round_trip(old in cells(), new in cells()) {
            let result = diff(&old, &new);
            let applied = result.for_reloads().apply(&old, &new).unwrap();
            prop_assert_eq!(applied, new.clone());
            let collapsed = result.for_reloads().collapse_updates().apply(&old, &new).unwrap();
            prop_assert_eq!(collapsed, new);
        }

        /// Every index is accounted for exactly once on each side.
        #[test]
        fn completeness(old in cells(), new in cells()) {
            let result = diff(&old, &new);
            let matched = result.correspondences().len();
            prop_assert_eq!(matched + result.deletes().len(), old.len());
            prop_assert_eq!(matched + result.inserts().len(), new.len());
            for index in 0..old.len() {
                let deleted = result.deletes().contains(&index);
                prop_assert_eq!(deleted, result.new_index_for(index).is_none());
            }
        }

        /// An identity present on both sides is never deleted and inserted.
        #[test]
        fn identity_conservation(old in cells(), new in cells()) {
            let result = diff(&old, &new);
            for cell in &old {
                if let Some(n) = result.new_index(&cell.id) {
                    let o = result.old_index(&cell.id).unwrap();
                    prop_assert!(!result.deletes().contains(&o));
                    prop_assert!(!result.inserts().contains(&n));
                    prop_assert_eq!(result.new_index_for(o), Some(n));
                }
            }
        }

        /// Diffing a collection against itself is a no-op.
        #[test]
        fn no_op(items in cells()) {
            prop_assert!(!diff(&items, &items.clone()).has_changes());
        }

        /// Batch and reload projections agree on net additions and removals.
        #[test]
        fn projections_agree(old in cells(), new in cells()) {
            let result = diff(&old, &new);
            let batch = result.for_batch_updates();
            let reloads = result.for_reloads();

            let removed = |deletes: &[usize], inserts: &[usize]| -> HashSet<u8> {
                let gone: HashSet<u8> = deletes.iter().map(|&i| old[i].id).collect();
                let came: HashSet<u8> = inserts.iter().map(|&i| new[i].id).collect();
                gone.difference(&came).copied().collect()
            };
            let added = |deletes: &[usize], inserts: &[usize]| -> HashSet<u8> {
                let gone: HashSet<u8> = deletes.iter().map(|&i| old[i].id).collect();
                let came: HashSet<u8> = inserts.iter().map(|&i| new[i].id).collect();
                came.difference(&gone).copied().collect()
            };

            prop_assert_eq!(
                removed(&batch.deletes, &batch.inserts),
                removed(&reloads.deletes, &reloads.inserts)
            );
            prop_assert_eq!(
                added(&batch.deletes, &batch.inserts),
                added(&reloads.deletes, &reloads.inserts)
            );

            let relocated: HashSet<usize> = reloads.deletes.iter().copied().collect();
            for update in &batch.updates {
                let kept = reloads.updates.contains(update);
                prop_assert!(kept || relocated.contains(&update.old));
            }
        }
    }
}
