//! Core types for trace-locator.
//!
//! This module contains the artifact records handed over by CircleCI and the
//! envelopes they travel in.

pub mod schema;

// Re-export key types for convenience
pub use schema::{ArtifactRecord, ArtifactsPage, TraceListing};
