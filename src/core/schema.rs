//! Artifact records as returned by the CircleCI v2 artifacts API.

use serde::{Deserialize, Serialize};

use crate::circleci::is_trace_artifact;

/// A single artifact produced by a CI job.
///
/// Records are immutable inputs: nothing in this crate rewrites a path or URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Slash-separated artifact path, arbitrary depth
    pub path: String,

    /// Download URL, opaque to the parser
    pub url: String,

    /// Parallel shard that produced the artifact
    #[serde(default, alias = "nodeIndex")]
    pub node_index: u32,
}

impl ArtifactRecord {
    pub fn new(path: impl Into<String>, url: impl Into<String>, node_index: u32) -> Self {
        ArtifactRecord {
            path: path.into(),
            url: url.into(),
            node_index,
        }
    }
}

/// One page of the `project/{slug}/{job}/artifacts` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactsPage {
    pub items: Vec<ArtifactRecord>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Artifact listing for one job, with the Playwright traces pulled out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceListing {
    pub traces: Vec<ArtifactRecord>,
    pub all: Vec<ArtifactRecord>,
    pub job: String,
    pub project: String,
}

impl TraceListing {
    /// Build the listing envelope from a fetched page.
    pub fn from_page(page: ArtifactsPage, job: impl Into<String>, project: impl Into<String>) -> Self {
        let traces = page
            .items
            .iter()
            .filter(|a| is_trace_artifact(&a.path))
            .cloned()
            .collect();
        TraceListing {
            traces,
            all: page.items,
            job: job.into(),
            project: project.into(),
        }
    }
}
