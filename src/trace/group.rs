//! Retry grouping.
//!
//! Folds an original run and its retries into one logical test entry, keyed
//! by [`TraceInfo::group_key`].

use std::collections::HashMap;

use serde::Serialize;

use super::parser::{TraceInfo, parse};
use crate::core::schema::ArtifactRecord;

/// One logical test: the original run plus its retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactGroup {
    /// The original (non-retry) run, or the first-seen record when no
    /// original exists
    pub primary: ArtifactRecord,

    /// Ascending by retry number; never contains the primary
    pub retries: Vec<ArtifactRecord>,

    /// Parsed metadata of the primary
    pub info: TraceInfo,
}

impl ArtifactGroup {
    /// Number of runs in the group, primary included.
    pub fn attempts(&self) -> usize {
        1 + self.retries.len()
    }

    /// Primary followed by retries.
    pub fn records(&self) -> impl Iterator<Item = &ArtifactRecord> {
        std::iter::once(&self.primary).chain(self.retries.iter())
    }
}

struct GroupBuilder {
    primary: ArtifactRecord,
    info: TraceInfo,
    retries: Vec<(u32, ArtifactRecord)>,
}

impl GroupBuilder {
    fn new(record: ArtifactRecord, info: TraceInfo) -> Self {
        GroupBuilder {
            primary: record,
            info,
            retries: Vec::new(),
        }
    }

    fn add(&mut self, record: ArtifactRecord, info: TraceInfo) {
        if info.is_retry() || !self.info.is_retry() {
            // a second original is kept as a retry rather than overwriting
            self.retries.push((info.retry_number, record));
            return;
        }
        let demoted = std::mem::replace(&mut self.primary, record);
        let demoted_info = std::mem::replace(&mut self.info, info);
        self.retries.push((demoted_info.retry_number, demoted));
    }

    fn finish(mut self) -> ArtifactGroup {
        // stable: equal retry numbers keep input order
        self.retries.sort_by_key(|(number, _)| *number);
        ArtifactGroup {
            primary: self.primary,
            retries: self.retries.into_iter().map(|(_, r)| r).collect(),
            info: self.info,
        }
    }
}

/// Group artifact records by test, in first-encounter order of each group key.
///
/// Every input record lands in exactly one group, as primary or retry.
pub fn group(records: &[ArtifactRecord]) -> Vec<ArtifactGroup> {
    let mut builders: Vec<GroupBuilder> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for record in records {
        let info = parse(&record.path);
        match by_key.get(&info.group_key) {
            Some(&idx) => builders[idx].add(record.clone(), info),
            None => {
                by_key.insert(info.group_key.clone(), builders.len());
                builders.push(GroupBuilder::new(record.clone(), info));
            }
        }
    }

    builders.into_iter().map(GroupBuilder::finish).collect()
}
