//! CLI command handler for `link`: turn an artifact URL into a trace viewer URL.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::TraceResult;
use crate::circleci::viewer_url;
use crate::config::ViewerConfig;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct LinkOverrides {
    pub proxy_origin: Option<String>,
    pub viewer_url: Option<String>,
}

pub fn resolve(config: &ViewerConfig, overrides: &LinkOverrides, trace_url: &str) -> TraceResult<String> {
    let mut config = config.clone();
    if let Some(origin) = &overrides.proxy_origin {
        config.proxy_origin = Some(origin.clone());
    }
    if let Some(viewer) = &overrides.viewer_url {
        config.viewer_url = viewer.clone();
    }
    debug!(?config, "resolved viewer config");
    viewer_url(&config, trace_url.trim())
}

/// Run the `link` command: validate the artifact host and print the viewer URL.
pub fn run(trace_url: String, config_path: Option<PathBuf>, overrides: LinkOverrides) -> TraceResult<()> {
    let config = ViewerConfig::load_or_default(config_path.as_deref())?;
    let link = resolve(&config, &overrides, &trace_url)?;
    info!("trace viewer link ready");
    println!("{link}");
    Ok(())
}
