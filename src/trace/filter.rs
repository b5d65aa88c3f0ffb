//! Free-text filtering over parsed trace metadata.

use super::parser::{TraceInfo, parse};
use crate::core::schema::ArtifactRecord;

/// Lower-cased text a query is matched against.
///
/// Joins test name, suite, type, `S<severity>`, retry label and the raw path,
/// skipping absent fields.
pub fn search_blob(record: &ArtifactRecord, info: &TraceInfo) -> String {
    let severity = info.severity.as_ref().map(|s| format!("S{s}"));
    let parts: [Option<&str>; 6] = [
        Some(info.test_name.as_str()),
        info.test_suite.as_deref(),
        info.test_type.as_ref().map(|t| t.as_str()),
        severity.as_deref(),
        info.retry_label.as_deref(),
        Some(record.path.as_str()),
    ];
    parts
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Keep the records whose search blob contains `query`, case-insensitively.
///
/// Plain substring containment: no tokenization and no fuzzy matching. An
/// empty or whitespace-only query returns the input unchanged.
pub fn filter(records: &[ArtifactRecord], query: &str) -> Vec<ArtifactRecord> {
    if query.trim().is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| search_blob(record, &parse(&record.path)).contains(&needle))
        .cloned()
        .collect()
}
