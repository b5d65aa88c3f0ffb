use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::TraceResult;

pub const DEFAULT_VIEWER_URL: &str = "https://trace.playwright.dev/";
pub const DEFAULT_API_BASE: &str = "https://circleci.com/api/v2";
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &["output.circle-artifacts.com", "circleci.com"];

/// Where trace links point, and which artifact hosts they may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub viewer_url: String,
    pub proxy_origin: Option<String>,
    pub allowed_hosts: Vec<String>,
    pub api_base: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            viewer_url: DEFAULT_VIEWER_URL.to_string(),
            proxy_origin: None,
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(s: &str) -> TraceResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> TraceResult<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> TraceResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
