//! Loading artifact lists from disk.
//!
//! Accepts the shapes artifact lists are usually saved in: a raw CircleCI
//! artifacts page, a trace listing envelope, a bare JSON array, or JSONL.

pub mod artifacts;

// Re-export key functions
pub use artifacts::{load_artifacts, parse_artifacts_json, parse_artifacts_jsonl, write_json};
