//! Translation of flat results into (section, item) addressing.
//!
//! A flat diff of one section's items becomes an [`IndexPathResult`] by
//! prefixing every old-side index with the section's old index and every
//! new-side index with its new index. The two may differ when the section
//! itself moved.
//!
//! Hosts applying the translated operations sequentially should follow the
//! order: item deletes (descending), section deletes, section inserts, item
//! inserts (ascending), moves, updates.

use std::collections::HashMap;
use std::hash::Hash;

use listdiff_types::{Diffable, IndexPath, Move, Side, Update};

use crate::heckel::diff_with;
use crate::options::DiffOptions;
use crate::projection::{BatchUpdates, Reloads};
use crate::result::DiffResult;

/// A diff expressed in index paths.
#[derive(Clone, Debug)]
pub struct IndexPathResult<I> {
    deletes: Vec<IndexPath>,
    inserts: Vec<IndexPath>,
    updates: Vec<Update<IndexPath>>,
    moves: Vec<Move<IndexPath>>,
    old_paths: HashMap<I, IndexPath>,
    new_paths: HashMap<I, IndexPath>,
}

/// Translate a flat result for one section.
///
/// `from_section` addresses deletes, move sources and update sources;
/// `to_section` addresses inserts, move destinations and update destinations.
pub fn translate<I: Eq + Hash + Clone>(
    from_section: usize,
    to_section: usize,
    result: &DiffResult<I>,
) -> IndexPathResult<I> {
    let address = |item: usize, side: Side| match side {
        Side::Old => IndexPath::new(from_section, item),
        Side::New => IndexPath::new(to_section, item),
    };

    let batch = result.for_batch_updates().map(address);
    let old_paths = result
        .old_identities()
        .map(|(id, index)| (id.clone(), address(index, Side::Old)))
        .collect();
    let new_paths = result
        .new_identities()
        .map(|(id, index)| (id.clone(), address(index, Side::New)))
        .collect();

    IndexPathResult {
        deletes: batch.deletes,
        inserts: batch.inserts,
        updates: batch.updates,
        moves: batch.moves,
        old_paths,
        new_paths,
    }
}

/// Diff two item collections of a section and translate the result.
pub fn diff_paths<T: Diffable>(
    from_section: usize,
    to_section: usize,
    old: &[T],
    new: &[T],
    options: &DiffOptions,
) -> IndexPathResult<T::Identifier> {
    translate(from_section, to_section, &diff_with(old, new, options))
}

impl<I> IndexPathResult<I> {
    /// Deleted paths in the old section, descending.
    pub fn deletes(&self) -> &[IndexPath] {
        &self.deletes
    }

    /// Inserted paths in the new section, ascending.
    pub fn inserts(&self) -> &[IndexPath] {
        &self.inserts
    }

    pub fn updates(&self) -> &[Update<IndexPath>] {
        &self.updates
    }

    pub fn moves(&self) -> &[Move<IndexPath>] {
        &self.moves
    }

    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }

    pub fn change_count(&self) -> usize {
        self.deletes.len() + self.inserts.len() + self.updates.len() + self.moves.len()
    }

    /// Projection that keeps moves native.
    pub fn for_batch_updates(&self) -> BatchUpdates<IndexPath> {
        BatchUpdates {
            deletes: self.deletes.clone(),
            inserts: self.inserts.clone(),
            moves: self.moves.clone(),
            updates: self.updates.clone(),
        }
    }

    /// Projection that expresses every move as a delete plus an insert.
    pub fn for_reloads(&self) -> Reloads<IndexPath> {
        self.for_batch_updates().into()
    }
}

impl<I: Eq + Hash> IndexPathResult<I> {
    /// Path of `identity` in the old section.
    pub fn old_index_path(&self, identity: &I) -> Option<IndexPath> {
        self.old_paths.get(identity).copied()
    }

    /// Path of `identity` in the new section.
    pub fn new_index_path(&self, identity: &I) -> Option<IndexPath> {
        self.new_paths.get(identity).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff;

    #[test]
    fn same_section_prefixes_every_index() {
        let result = diff_paths(2, 2, &["a", "b", "c"], &["b", "c", "d"], &DiffOptions::default());
        assert_eq!(result.deletes(), &[IndexPath::new(2, 0)]);
        assert_eq!(result.inserts(), &[IndexPath::new(2, 2)]);
        assert!(result.moves().is_empty());
    }

    #[test]
    fn moved_section_splits_old_and_new_addressing() {
        let result = diff_paths(0, 3, &["a", "b", "c"], &["c", "b", "x"], &DiffOptions::default());

        assert!(result.deletes().iter().all(|p| p.section == 0));
        assert!(result.inserts().iter().all(|p| p.section == 3));
        for mv in result.moves() {
            assert_eq!(mv.from.section, 0);
            assert_eq!(mv.to.section, 3);
        }
        assert_eq!(result.old_index_path(&"c".to_string()), Some(IndexPath::new(0, 2)));
        assert_eq!(result.new_index_path(&"c".to_string()), Some(IndexPath::new(3, 0)));
        assert_eq!(result.new_index_path(&"a".to_string()), None);
    }

    #[test]
    fn updates_carry_both_sections() {
        #[derive(Clone)]
        struct Row(u8, u8);

        impl Diffable for Row {
            type Identifier = u8;

            fn identity(&self) -> u8 {
                self.0
            }

            fn equals(&self, other: &Self) -> bool {
                self.1 == other.1
            }
        }

        let result = diff_paths(1, 0, &[Row(7, 0)], &[Row(7, 1)], &DiffOptions::default());
        assert_eq!(
            result.updates(),
            &[Update::new(IndexPath::new(1, 0), IndexPath::new(0, 0))]
        );
    }

    #[test]
    fn reload_projection_flattens_moves() {
        let flat = diff(&["a", "b"], &["b", "a"]);
        let paths = translate(5, 5, &flat);
        assert_eq!(paths.moves().len(), 2);

        let reloads = paths.for_reloads();
        assert_eq!(reloads.deletes, vec![IndexPath::new(5, 1), IndexPath::new(5, 0)]);
        assert_eq!(reloads.inserts, vec![IndexPath::new(5, 0), IndexPath::new(5, 1)]);
        assert!(!paths.for_batch_updates().is_empty());
    }

    #[test]
    fn empty_sections_translate_to_nothing() {
        let result = diff_paths::<&str>(0, 0, &[], &[], &DiffOptions::default());
        assert!(!result.has_changes());
        assert_eq!(result.change_count(), 0);
    }
}
