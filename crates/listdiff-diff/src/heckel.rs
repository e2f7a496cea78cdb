//! Heckel's linear-time list diff.
//!
//! Items are matched by identity through a symbol table, then classified:
//!
//! 1. identities occurring exactly once on each side are matched;
//! 2. every match is extended forward, then backward, to adjacent unmatched
//!    positions with the same identity;
//! 3. any position still unmatched whose identity has unmatched occurrences
//!    on the other side takes the earliest of them;
//! 4. unmatched old positions are deletes, unmatched new positions inserts;
//! 5. a matched pair is a move when its position differs from where deletes
//!    and inserts alone would shift it, and an update when the equality
//!    policy reports different content.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use listdiff_types::{Diffable, EqualityPolicy, Move, Side, Update};

use crate::error::{DiffError, Result};
use crate::options::DiffOptions;
use crate::result::{Correspondence, DiffResult};

/// Diff two collections using value equality.
pub fn diff<T: Diffable>(old: &[T], new: &[T]) -> DiffResult<T::Identifier> {
    diff_with(old, new, &DiffOptions::default())
}

/// Diff two collections with explicit options.
///
/// Never fails and never panics. When a collection contains duplicate
/// identities the result is still a valid edit script, but which duplicate
/// is paired with which is unspecified.
pub fn diff_with<T: Diffable>(
    old: &[T],
    new: &[T],
    options: &DiffOptions,
) -> DiffResult<T::Identifier> {
    let old_ids: Vec<T::Identifier> = old.iter().map(Diffable::identity).collect();
    let new_ids: Vec<T::Identifier> = new.iter().map(Diffable::identity).collect();

    let table = SymbolTable::build(&old_ids, &new_ids);
    let matching = table.matching();

    let mut deletes = Vec::new();
    let mut delete_offsets = Vec::with_capacity(old.len());
    for (index, matched) in matching.old_to_new.iter().enumerate() {
        delete_offsets.push(deletes.len());
        if matched.is_none() {
            deletes.push(index);
        }
    }

    let mut inserts = Vec::new();
    let mut insert_offsets = Vec::with_capacity(new.len());
    for (index, matched) in matching.new_to_old.iter().enumerate() {
        insert_offsets.push(inserts.len());
        if matched.is_none() {
            inserts.push(index);
        }
    }

    let mut matches = Vec::new();
    let mut moves = Vec::new();
    let mut updates = Vec::new();
    for (new_index, matched) in matching.new_to_old.iter().enumerate() {
        let Some(old_index) = *matched else {
            continue;
        };

        let updated = content_changed(&old[old_index], &new[new_index], options.equality);
        let shifted = old_index - delete_offsets[old_index] + insert_offsets[new_index];
        let moved = shifted != new_index;

        if updated {
            updates.push(Update::new(old_index, new_index));
        }
        if moved {
            moves.push(Move::new(old_index, new_index));
        }
        matches.push(Correspondence {
            old: old_index,
            new: new_index,
            moved,
            updated,
        });
    }

    deletes.reverse();
    updates.sort_unstable_by_key(|u| u.old);

    debug!(
        old = old.len(),
        new = new.len(),
        deletes = deletes.len(),
        inserts = inserts.len(),
        moves = moves.len(),
        updates = updates.len(),
        "list diff computed"
    );

    DiffResult {
        deletes,
        inserts,
        updates,
        moves,
        matches,
        old_to_new: matching.old_to_new,
        new_to_old: matching.new_to_old,
        old_ids: index_identities(old_ids),
        new_ids: index_identities(new_ids),
    }
}

/// Diff two collections after verifying neither contains duplicate identities.
pub fn diff_checked<T: Diffable>(
    old: &[T],
    new: &[T],
    options: &DiffOptions,
) -> Result<DiffResult<T::Identifier>> {
    check_unique(Side::Old, old)?;
    check_unique(Side::New, new)?;
    Ok(diff_with(old, new, options))
}

/// Verify that no two items of `items` share an identity.
///
/// `side` only labels the error.
pub fn check_unique<T: Diffable>(side: Side, items: &[T]) -> Result<()> {
    let mut seen: HashMap<T::Identifier, usize> = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match seen.entry(item.identity()) {
            Entry::Occupied(first) => {
                return Err(DiffError::DuplicateIdentity {
                    side,
                    index,
                    first: *first.get(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }
    }
    Ok(())
}

fn content_changed<T: Diffable>(old: &T, new: &T, policy: EqualityPolicy) -> bool {
    match policy {
        EqualityPolicy::Value => !(old.same_instance(new) || old.equals(new)),
        EqualityPolicy::Instance => !old.same_instance(new),
    }
}

/// First occurrence wins for duplicated identities.
fn index_identities<I: Eq + Hash>(ids: Vec<I>) -> HashMap<I, usize> {
    let mut map = HashMap::with_capacity(ids.len());
    for (index, id) in ids.into_iter().enumerate() {
        map.entry(id).or_insert(index);
    }
    map
}

#[derive(Default)]
struct Symbol {
    old_count: usize,
    new_count: usize,
    /// Ascending.
    old_positions: Vec<usize>,
}

/// Occurrence table: one symbol per distinct identity, and the symbol of
/// every position on each side.
struct SymbolTable {
    symbols: Vec<Symbol>,
    old_symbols: Vec<usize>,
    new_symbols: Vec<usize>,
}

struct Matching {
    old_to_new: Vec<Option<usize>>,
    new_to_old: Vec<Option<usize>>,
}

impl Matching {
    fn link(&mut self, old: usize, new: usize) {
        self.old_to_new[old] = Some(new);
        self.new_to_old[new] = Some(old);
    }

    fn is_free(&self, old: usize, new: usize) -> bool {
        self.old_to_new[old].is_none() && self.new_to_old[new].is_none()
    }
}

impl SymbolTable {
    fn build<I: Eq + Hash>(old: &[I], new: &[I]) -> Self {
        let mut lookup: HashMap<&I, usize> = HashMap::with_capacity(old.len().max(new.len()));
        let mut symbols: Vec<Symbol> = Vec::new();

        let mut new_symbols = Vec::with_capacity(new.len());
        for (index, id) in new.iter().enumerate() {
            let symbol = *lookup.entry(id).or_insert_with(|| {
                symbols.push(Symbol::default());
                symbols.len() - 1
            });
            symbols[symbol].new_count += 1;
            if symbols[symbol].new_count == 2 {
                warn!(side = %Side::New, index, "duplicate identity; its matching is unspecified");
            }
            new_symbols.push(symbol);
        }

        let mut old_symbols = Vec::with_capacity(old.len());
        for (index, id) in old.iter().enumerate() {
            let symbol = *lookup.entry(id).or_insert_with(|| {
                symbols.push(Symbol::default());
                symbols.len() - 1
            });
            let entry = &mut symbols[symbol];
            entry.old_count += 1;
            entry.old_positions.push(index);
            if entry.old_count == 2 {
                warn!(side = %Side::Old, index, "duplicate identity; its matching is unspecified");
            }
            old_symbols.push(symbol);
        }

        Self {
            symbols,
            old_symbols,
            new_symbols,
        }
    }

    fn matching(&self) -> Matching {
        let old_len = self.old_symbols.len();
        let new_len = self.new_symbols.len();
        let mut matching = Matching {
            old_to_new: vec![None; old_len],
            new_to_old: vec![None; new_len],
        };

        for (new, &symbol) in self.new_symbols.iter().enumerate() {
            let entry = &self.symbols[symbol];
            if entry.old_count == 1 && entry.new_count == 1 {
                matching.link(entry.old_positions[0], new);
            }
        }

        for new in 0..new_len.saturating_sub(1) {
            let Some(old) = matching.new_to_old[new] else {
                continue;
            };
            let (old_next, new_next) = (old + 1, new + 1);
            if old_next < old_len
                && matching.is_free(old_next, new_next)
                && self.old_symbols[old_next] == self.new_symbols[new_next]
            {
                matching.link(old_next, new_next);
            }
        }

        for new in (1..new_len).rev() {
            let Some(old) = matching.new_to_old[new] else {
                continue;
            };
            if old == 0 {
                continue;
            }
            let (old_prev, new_prev) = (old - 1, new - 1);
            if matching.is_free(old_prev, new_prev)
                && self.old_symbols[old_prev] == self.new_symbols[new_prev]
            {
                matching.link(old_prev, new_prev);
            }
        }

        let mut cursors = vec![0usize; self.symbols.len()];
        for new in 0..new_len {
            if matching.new_to_old[new].is_some() {
                continue;
            }
            let symbol = self.new_symbols[new];
            let positions = &self.symbols[symbol].old_positions;
            while let Some(&old) = positions.get(cursors[symbol]) {
                cursors[symbol] += 1;
                if matching.old_to_new[old].is_none() {
                    trace!(old, new, "paired repeated identity by occurrence");
                    matching.link(old, new);
                    break;
                }
            }
        }

        matching
    }
}
