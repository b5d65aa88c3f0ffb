//! Listing report: grouped traces as a stable, serializable structure.

use serde::{Deserialize, Serialize};

use crate::core::schema::ArtifactRecord;
use crate::trace::{ArtifactGroup, TestType, parse};

/// Schema version for ListingReport
pub const LISTING_REPORT_VERSION: u32 = 1;

/// One run of a test (original or retry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub path: String,
    pub url: String,
    pub node_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_label: Option<String>,
    pub retry_number: u32,
}

impl AttemptSummary {
    fn from_record(record: &ArtifactRecord) -> Self {
        let info = parse(&record.path);
        AttemptSummary {
            path: record.path.clone(),
            url: record.url.clone(),
            node_index: record.node_index,
            retry_label: info.retry_label,
            retry_number: info.retry_number,
        }
    }
}

/// Display summary of one logical test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub test_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_suite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_type: Option<TestType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub group_key: String,
    pub primary: AttemptSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retries: Vec<AttemptSummary>,
    pub attempts: usize,
}

impl From<&ArtifactGroup> for GroupSummary {
    fn from(group: &ArtifactGroup) -> Self {
        GroupSummary {
            test_name: group.info.test_name.clone(),
            test_suite: group.info.test_suite.clone(),
            test_type: group.info.test_type,
            severity: group.info.severity.clone(),
            group_key: group.info.group_key.clone(),
            primary: AttemptSummary::from_record(&group.primary),
            retries: group.retries.iter().map(AttemptSummary::from_record).collect(),
            attempts: group.attempts(),
        }
    }
}

/// Grouped, optionally filtered, traces of one artifact list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingReport {
    /// Schema version for forward compatibility
    pub version: u32,
    /// Artifacts considered before filtering
    pub total_artifacts: usize,
    /// Artifacts left after filtering
    pub matched_artifacts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub groups: Vec<GroupSummary>,
}

impl ListingReport {
    pub fn new(
        total_artifacts: usize,
        matched_artifacts: usize,
        query: Option<String>,
        groups: &[ArtifactGroup],
    ) -> Self {
        ListingReport {
            version: LISTING_REPORT_VERSION,
            total_artifacts,
            matched_artifacts,
            query,
            groups: groups.iter().map(GroupSummary::from).collect(),
        }
    }
}

fn tags(group: &GroupSummary) -> String {
    let mut tags = Vec::new();
    if let Some(t) = group.test_type {
        tags.push(t.to_string());
    }
    if let Some(s) = &group.severity {
        tags.push(format!("S{s}"));
    }
    tags.join(", ")
}

/// Render for terminals: one block per test, retries indented below.
pub fn render_text(report: &ListingReport) -> String {
    let mut out = String::new();

    for group in &report.groups {
        out.push_str(&group.test_name);
        if let Some(suite) = &group.test_suite {
            out.push_str(&format!(" [{suite}]"));
        }
        let tags = tags(group);
        if !tags.is_empty() {
            out.push_str(&format!(" ({tags})"));
        }
        out.push('\n');
        out.push_str(&format!("  {}\n", group.primary.url));
        for retry in &group.retries {
            out.push_str(&format!(
                "    {}: {}\n",
                retry.retry_label.as_deref().unwrap_or("retry"),
                retry.url
            ));
        }
    }

    let filtered = match &report.query {
        Some(q) => format!(" matching \"{q}\""),
        None => String::new(),
    };
    out.push_str(&format!(
        "{} test(s), {} of {} trace(s){}\n",
        report.groups.len(),
        report.matched_artifacts,
        report.total_artifacts,
        filtered
    ));
    out
}

/// Escape `|` so a cell cannot split a table row.
fn md_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Render as a Markdown table for PR comments.
pub fn render_markdown(report: &ListingReport) -> String {
    let mut out = String::new();

    out.push_str("## Playwright Traces\n\n");
    if let Some(q) = &report.query {
        out.push_str(&format!("Filter: `{q}`\n\n"));
    }
    out.push_str(&format!(
        "{} test(s), {} of {} trace(s)\n\n",
        report.groups.len(),
        report.matched_artifacts,
        report.total_artifacts
    ));

    if report.groups.is_empty() {
        return out;
    }

    out.push_str("| Test | Suite | Tags | Trace | Retries |\n");
    out.push_str("|------|-------|------|-------|---------|\n");
    for group in &report.groups {
        let retries = group
            .retries
            .iter()
            .map(|r| format!("[{}]({})", r.retry_label.as_deref().unwrap_or("retry"), r.url))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "| {} | {} | {} | [trace]({}) | {} |\n",
            md_cell(&group.test_name),
            md_cell(group.test_suite.as_deref().unwrap_or("-")),
            match tags(group) {
                t if t.is_empty() => "-".to_string(),
                t => t,
            },
            group.primary.url,
            if retries.is_empty() { "-".to_string() } else { retries }
        ));
    }
    out
}
