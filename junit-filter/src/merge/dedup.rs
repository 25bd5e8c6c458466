use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

use crate::merge::filter::TestFilter;
use crate::report::{Case, ReportDocument, Result, Suite};

/// Counters for one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MergeStats {
    pub files: usize,
    pub cases_seen: usize,
    pub cases_matched: usize,
    /// Matched records that did not make it into the output.
    pub duplicates_dropped: usize,
    /// Skip records replaced by a later real execution of the same test.
    pub skips_superseded: usize,
}

/// Folds matching cases into at most one record per name.
///
/// An executed case replaces a skipped one with the same name. In every other
/// collision the record seen first is kept.
#[derive(Debug)]
pub struct DedupMerger {
    filter: TestFilter,
    cases: IndexMap<String, Case>,
    stats: MergeStats,
}

impl DedupMerger {
    pub fn new(filter: TestFilter) -> Self {
        DedupMerger {
            filter,
            cases: IndexMap::new(),
            stats: MergeStats::default(),
        }
    }

    pub fn add_document(&mut self, document: ReportDocument) -> Result<()> {
        self.stats.files += 1;
        document
            .into_cases()
            .try_for_each(|case| self.add_case(case))
    }

    pub fn add_case(&mut self, case: Case) -> Result<()> {
        self.stats.cases_seen += 1;
        if !self.filter.matches(&case.name)? {
            return Ok(());
        }
        self.stats.cases_matched += 1;

        match self.cases.entry(case.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(case);
            }
            Entry::Occupied(mut slot) => {
                self.stats.duplicates_dropped += 1;
                if slot.get().is_skipped() && !case.is_skipped() {
                    self.stats.skips_superseded += 1;
                    slot.insert(case);
                }
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.cases.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&Case> {
        self.cases.get(name)
    }

    /// The chosen cases as one unnamed suite, sorted by name unless
    /// `keep_encounter_order` is set.
    pub fn into_suite(mut self, keep_encounter_order: bool) -> (Suite, MergeStats) {
        if !keep_encounter_order {
            self.cases.sort_keys();
        }
        let suite = Suite {
            name: None,
            cases: self.cases.into_iter().map(|(_, case)| case).collect(),
        };
        (suite, self.stats)
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod dedup_tests;
