//! Flattened, cleaned batch of section and item operations.
//!
//! A [`BatchUpdatePlan`] lists every section-level and item-level operation
//! of a [`SectionDiffPlan`] with section-qualified addressing, after applying
//! the cleaning rules selected in [`PlanOptions`]. [`BatchUpdatePlan::operations`]
//! yields them in an order that is safe for sequential application.

use std::collections::BTreeSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use listdiff_types::{IndexPath, Move, Update};

use crate::options::PlanOptions;
use crate::plan::SectionDiffPlan;

/// One section-qualified operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    DeleteItem { path: IndexPath },
    DeleteSection { section: usize },
    InsertSection { section: usize },
    InsertItem { path: IndexPath },
    MoveSection { from: usize, to: usize },
    MoveItem { from: IndexPath, to: IndexPath },
    ReloadSection { old: usize, new: usize },
    UpdateItem { old: IndexPath, new: IndexPath },
}

/// All operations of a section plan, grouped by kind.
///
/// Deletes are descending and inserts ascending at both levels. Item deletes
/// are addressed in old sections; item inserts, move destinations and update
/// destinations in new sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdatePlan {
    pub section_deletes: Vec<usize>,
    pub section_inserts: Vec<usize>,
    pub section_moves: Vec<Move<usize>>,
    pub section_reloads: Vec<Update<usize>>,
    pub item_deletes: Vec<IndexPath>,
    pub item_inserts: Vec<IndexPath>,
    pub item_moves: Vec<Move<IndexPath>>,
    pub item_updates: Vec<Update<IndexPath>>,
}

impl BatchUpdatePlan {
    pub(crate) fn build<SI, II>(plan: &SectionDiffPlan<SI, II>, options: &PlanOptions) -> Self
    where
        II: Eq + Hash + Clone,
    {
        let sections = plan.sections().for_batch_updates();
        let mut out = BatchUpdatePlan {
            section_deletes: sections.deletes,
            section_inserts: sections.inserts,
            section_moves: sections.moves,
            section_reloads: sections.updates,
            ..Default::default()
        };

        // Old indices of sections that are deleted and re-inserted as a whole.
        let mut rebuilt = BTreeSet::new();

        if options.collapse_section_updates {
            for reload in std::mem::take(&mut out.section_reloads) {
                out.section_moves.retain(|mv| mv.from != reload.old);
                out.section_deletes.push(reload.old);
                out.section_inserts.push(reload.new);
                rebuilt.insert(reload.old);
            }
        }

        for nested in plan.items() {
            if rebuilt.contains(&nested.old_section) || !nested.diff.has_changes() {
                continue;
            }

            if options.collapse_moved_sections {
                let moved = out
                    .section_moves
                    .iter()
                    .position(|mv| mv.from == nested.old_section);
                if let Some(pos) = moved {
                    let mv = out.section_moves.remove(pos);
                    out.section_reloads.retain(|reload| reload.old != mv.from);
                    out.section_deletes.push(mv.from);
                    out.section_inserts.push(mv.to);
                    rebuilt.insert(mv.from);
                    continue;
                }
            }

            let mut paths = nested.index_paths().for_batch_updates();
            if options.reload_updates {
                for update in std::mem::take(&mut paths.updates) {
                    paths.moves.retain(|mv| mv.from != update.old);
                    paths.deletes.push(update.old);
                    paths.inserts.push(update.new);
                }
            }

            out.item_deletes.extend(paths.deletes);
            out.item_inserts.extend(paths.inserts);
            out.item_moves.extend(paths.moves);
            out.item_updates.extend(paths.updates);
        }

        out.normalize();

        debug!(
            operations = out.len(),
            rebuilt_sections = rebuilt.len(),
            "batch update plan built"
        );
        out
    }

    fn normalize(&mut self) {
        self.section_deletes.sort_unstable_by(|a, b| b.cmp(a));
        self.section_deletes.dedup();
        self.section_inserts.sort_unstable();
        self.section_inserts.dedup();
        self.item_deletes.sort_unstable_by(|a, b| b.cmp(a));
        self.item_deletes.dedup();
        self.item_inserts.sort_unstable();
        self.item_inserts.dedup();
        self.item_moves.sort_unstable_by_key(|mv| mv.to);
        self.item_updates.sort_unstable_by_key(|u| u.old);
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.section_deletes.len()
            + self.section_inserts.len()
            + self.section_moves.len()
            + self.section_reloads.len()
            + self.item_deletes.len()
            + self.item_inserts.len()
            + self.item_moves.len()
            + self.item_updates.len()
    }

    /// Returns `true` if there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every operation, ordered for sequential application: item deletes,
    /// section deletes, section inserts, item inserts, moves (sections, then
    /// items), then reloads and updates.
    pub fn operations(&self) -> Vec<Operation> {
        let mut ops = Vec::with_capacity(self.len());
        ops.extend(self.item_deletes.iter().map(|&path| Operation::DeleteItem { path }));
        ops.extend(
            self.section_deletes
                .iter()
                .map(|&section| Operation::DeleteSection { section }),
        );
        ops.extend(
            self.section_inserts
                .iter()
                .map(|&section| Operation::InsertSection { section }),
        );
        ops.extend(self.item_inserts.iter().map(|&path| Operation::InsertItem { path }));
        ops.extend(
            self.section_moves
                .iter()
                .map(|mv| Operation::MoveSection { from: mv.from, to: mv.to }),
        );
        ops.extend(
            self.item_moves
                .iter()
                .map(|mv| Operation::MoveItem { from: mv.from, to: mv.to }),
        );
        ops.extend(
            self.section_reloads
                .iter()
                .map(|u| Operation::ReloadSection { old: u.old, new: u.new }),
        );
        ops.extend(
            self.item_updates
                .iter()
                .map(|u| Operation::UpdateItem { old: u.old, new: u.new }),
        );
        ops
    }
}
