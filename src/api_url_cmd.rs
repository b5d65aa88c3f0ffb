//! CLI command handler for `api-url`.

use std::path::PathBuf;

use tracing::info;

use crate::TraceResult;
use crate::circleci::artifacts_api_url;
use crate::config::ViewerConfig;

/// Print the CircleCI artifacts API URL for a project and job.
pub fn run(project: String, job: String, config_path: Option<PathBuf>) -> TraceResult<()> {
    let config = ViewerConfig::load_or_default(config_path.as_deref())?;
    let url = artifacts_api_url(&config.api_base, &project, &job)?;
    info!(%project, %job, "resolved artifacts endpoint");
    println!("{url}");
    Ok(())
}
