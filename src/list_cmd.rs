//! CLI command handler for `list`.
//!
//! Loads an artifact list, keeps the Playwright traces, applies the optional
//! free-text filter and prints the traces grouped by test.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::circleci::select_traces;
use crate::core::schema::ArtifactRecord;
use crate::report::{ListingReport, render_markdown, render_text};
use crate::storage::{load_artifacts, write_json};
use crate::trace::{filter, group};
use crate::TraceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

/// Select, filter and group `records`.
///
/// With `all_artifacts` the trace selection is skipped and every record is
/// grouped.
pub fn build_report(
    records: &[ArtifactRecord],
    query: Option<&str>,
    all_artifacts: bool,
) -> ListingReport {
    let candidates = if all_artifacts {
        records.to_vec()
    } else {
        select_traces(records)
    };
    debug!(total = records.len(), candidates = candidates.len(), "selected traces");

    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let matched = match query {
        Some(q) => filter(&candidates, q),
        None => candidates.clone(),
    };
    let groups = group(&matched);
    debug!(matched = matched.len(), groups = groups.len(), "grouped traces");

    ListingReport::new(
        candidates.len(),
        matched.len(),
        query.map(str::to_string),
        &groups,
    )
}

pub fn render(report: &ListingReport, format: OutputFormat) -> TraceResult<String> {
    Ok(match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Markdown => render_markdown(report),
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(report)?;
            s.push('\n');
            s
        }
    })
}

/// Run the `list` command.
///
/// # Arguments
/// * `input` - Artifact list file, or `-` for stdin
/// * `query` - Optional free-text filter
/// * `all_artifacts` - Group every artifact, not only trace archives
/// * `format` - Rendering written to stdout
/// * `json_out` - Also write the report as JSON to this file
pub fn run(
    input: PathBuf,
    query: Option<String>,
    all_artifacts: bool,
    format: OutputFormat,
    json_out: Option<PathBuf>,
) -> TraceResult<()> {
    info!(input = %input.display(), "loading artifacts");
    let records = load_artifacts(&input)?;
    info!(count = records.len(), "loaded artifacts");

    let report = build_report(&records, query.as_deref(), all_artifacts);

    let rendered = render(&report, format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if let Some(path) = json_out {
        write_report(&path, &report)?;
    }
    Ok(())
}

fn write_report(path: &Path, report: &ListingReport) -> TraceResult<()> {
    write_json(path, report)?;
    info!(path = %path.display(), "wrote listing report");
    Ok(())
}
