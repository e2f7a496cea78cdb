//! Two-level section/item diffing.
//!
//! The sections are diffed by identity first. Only sections present in both
//! the old and the new data get a nested item diff: a deleted or inserted
//! section carries its whole content implicitly.

use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;

use tracing::debug;

use listdiff_diff::{diff_with, translate, DiffError, DiffOptions, DiffResult, IndexPathResult};
use listdiff_types::{Diffable, Side};

use crate::batch::BatchUpdatePlan;
use crate::concurrency::{self, Job, MaybeSend, MaybeSync};
use crate::error::{Result, SectionError};
use crate::options::PlanOptions;
use crate::section::Section;

/// The item diff of one section present on both sides.
#[derive(Clone, Debug)]
pub struct SectionItemsDiff<SI, II> {
    /// Identity of the section.
    pub identity: SI,
    /// Index of the section in the old data.
    pub old_section: usize,
    /// Index of the section in the new data.
    pub new_section: usize,
    /// Diff of the section's items.
    pub diff: DiffResult<II>,
}

impl<SI, II: Eq + Hash + Clone> SectionItemsDiff<SI, II> {
    /// The item diff in index paths: old-side indices use `old_section`,
    /// new-side indices use `new_section`.
    pub fn index_paths(&self) -> IndexPathResult<II> {
        translate(self.old_section, self.new_section, &self.diff)
    }
}

/// A section-level diff plus the item diffs of surviving sections.
#[derive(Clone, Debug)]
pub struct SectionDiffPlan<SI, II> {
    sections: DiffResult<SI>,
    /// Ordered by `new_section`.
    items: Vec<SectionItemsDiff<SI, II>>,
}

/// Diff sectioned data whose items are supplied per section identity.
///
/// Sections only in `old_sections` become section deletes and sections only
/// in `new_sections` become section inserts; neither needs an entry in the
/// items maps. Every section present on both sides must have one in both,
/// otherwise [`SectionError::MissingItems`] is returned.
pub fn diff_sections<S, T>(
    old_sections: &[S],
    new_sections: &[S],
    old_items: &HashMap<S::Identifier, Vec<T>>,
    new_items: &HashMap<S::Identifier, Vec<T>>,
    options: &DiffOptions,
) -> Result<SectionDiffPlan<S::Identifier, T::Identifier>>
where
    S: Diffable,
    T: Diffable + MaybeSync,
    T::Identifier: MaybeSend,
{
    build_plan(
        old_sections,
        new_sections,
        options,
        |index| {
            old_items
                .get(&old_sections[index].identity())
                .map(Vec::as_slice)
                .ok_or(SectionError::MissingItems {
                    side: Side::Old,
                    index,
                })
        },
        |index| {
            new_items
                .get(&new_sections[index].identity())
                .map(Vec::as_slice)
                .ok_or(SectionError::MissingItems {
                    side: Side::New,
                    index,
                })
        },
    )
}

/// Diff data that is already grouped into [`Section`]s.
pub fn diff_grouped<S, T>(
    old: &[Section<S, T>],
    new: &[Section<S, T>],
    options: &DiffOptions,
) -> SectionDiffPlan<S::Identifier, T::Identifier>
where
    S: Diffable,
    T: Diffable + MaybeSync,
    T::Identifier: MaybeSend,
{
    let plan = build_plan(
        old,
        new,
        options,
        |index| Ok::<_, Infallible>(old[index].items.as_slice()),
        |index| Ok::<_, Infallible>(new[index].items.as_slice()),
    );
    match plan {
        Ok(plan) => plan,
        Err(never) => match never {},
    }
}

fn build_plan<'a, S, T, E>(
    old_sections: &[S],
    new_sections: &[S],
    options: &DiffOptions,
    old_items: impl Fn(usize) -> std::result::Result<&'a [T], E>,
    new_items: impl Fn(usize) -> std::result::Result<&'a [T], E>,
) -> std::result::Result<SectionDiffPlan<S::Identifier, T::Identifier>, E>
where
    S: Diffable,
    T: Diffable + MaybeSync + 'a,
    T::Identifier: MaybeSend,
{
    let sections = diff_with(old_sections, new_sections, options);

    let jobs = sections
        .correspondences()
        .iter()
        .map(|c| {
            Ok(Job {
                old_section: c.old,
                new_section: c.new,
                old: old_items(c.old)?,
                new: new_items(c.new)?,
            })
        })
        .collect::<std::result::Result<Vec<_>, E>>()?;

    let diffs = concurrency::run(&jobs, options);

    let items: Vec<_> = jobs
        .iter()
        .zip(diffs)
        .map(|(job, diff)| SectionItemsDiff {
            identity: new_sections[job.new_section].identity(),
            old_section: job.old_section,
            new_section: job.new_section,
            diff,
        })
        .collect();

    debug!(
        old_sections = old_sections.len(),
        new_sections = new_sections.len(),
        surviving = items.len(),
        item_changes = items.iter().map(|i| i.diff.change_count()).sum::<usize>(),
        "section plan computed"
    );

    Ok(SectionDiffPlan { sections, items })
}

impl<SI, II> SectionDiffPlan<SI, II> {
    /// The section-level diff.
    pub fn sections(&self) -> &DiffResult<SI> {
        &self.sections
    }

    /// Item diffs of surviving sections, ordered by new section index.
    pub fn items(&self) -> &[SectionItemsDiff<SI, II>] {
        &self.items
    }

    /// The item diff of the section at `new_section` in the new data, if
    /// that section survived.
    pub fn items_at(&self, new_section: usize) -> Option<&SectionItemsDiff<SI, II>> {
        self.items
            .binary_search_by_key(&new_section, |i| i.new_section)
            .ok()
            .map(|pos| &self.items[pos])
    }

    /// Returns `true` if anything changed at either level.
    pub fn has_changes(&self) -> bool {
        self.sections.has_changes() || self.items.iter().any(|i| i.diff.has_changes())
    }

    /// Flatten the plan into one ordered set of operations.
    pub fn batch_updates(&self, options: &PlanOptions) -> BatchUpdatePlan
    where
        II: Eq + Hash + Clone,
    {
        BatchUpdatePlan::build(self, options)
    }

    /// Replay the plan against grouped data.
    ///
    /// Inserted sections are copied from `new`; surviving sections get their
    /// old items with the nested batch script applied. For a plan computed
    /// from `old` and `new`, the output equals `new`.
    pub fn apply<S, T>(&self, old: &[Section<S, T>], new: &[Section<S, T>]) -> Result<Vec<Section<S, T>>>
    where
        S: Clone,
        T: Clone,
    {
        if new.len() != self.sections.new_len() {
            return Err(DiffError::StaleSnapshot {
                side: Side::New,
                index: self.sections.new_len(),
                len: new.len(),
            }
            .into());
        }

        let mut out = Vec::with_capacity(new.len());
        for (index, section) in new.iter().enumerate() {
            let Some(old_index) = self.sections.old_index_for(index) else {
                out.push(section.clone());
                continue;
            };
            let source = old.get(old_index).ok_or(DiffError::StaleSnapshot {
                side: Side::Old,
                index: old_index,
                len: old.len(),
            })?;
            let nested = self
                .items_at(index)
                .ok_or(SectionError::MissingItems { side: Side::New, index })?;
            let items = nested
                .diff
                .for_batch_updates()
                .apply(&source.items, &section.items)?;
            out.push(Section::new(section.model.clone(), items));
        }
        Ok(out)
    }
}

impl<SI: Eq + Hash, II> SectionDiffPlan<SI, II> {
    /// The item diff of the section with `identity`, if it survived.
    pub fn item_diff(&self, identity: &SI) -> Option<&SectionItemsDiff<SI, II>> {
        self.sections
            .new_index(identity)
            .and_then(|index| self.items_at(index))
    }
}

impl<SI, II: Eq + Hash + Clone> SectionDiffPlan<SI, II> {
    /// Index-path results of every surviving section, ordered by new index.
    pub fn index_paths(&self) -> Vec<IndexPathResult<II>> {
        self.items.iter().map(SectionItemsDiff::index_paths).collect()
    }
}
