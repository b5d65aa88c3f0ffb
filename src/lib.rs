pub mod core;
pub mod trace;
pub mod circleci;
pub mod config;
pub mod storage;
pub mod report;

pub mod list_cmd;
pub mod link_cmd;
pub mod api_url_cmd;

use thiserror::Error;

pub use crate::core::schema::{ArtifactRecord, ArtifactsPage, TraceListing};
pub use crate::trace::{ArtifactGroup, TestType, TraceInfo, filter, group, parse};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("{0}")]
    Message(String),
    #[error("invalid project format '{0}': expected gh/org/repo or github/org/repo")]
    InvalidProject(String),
    #[error("invalid job number '{0}': expected a numeric value")]
    InvalidJobNumber(String),
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
    #[error("host '{host}' is not allowed (allowed: {})", .allowed.join(", "))]
    HostNotAllowed { host: String, allowed: Vec<String> },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] toml::de::Error),
}

pub type TraceResult<T> = Result<T, TraceError>;
