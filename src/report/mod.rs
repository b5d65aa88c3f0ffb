//! Reporting for grouped traces.
//!
//! This module provides:
//! - `ListingReport`: serializable summary of grouped traces for JSON output
//! - Plain-text rendering for terminals
//! - Markdown rendering for CI comments

pub mod listing;

// Re-export key types
pub use listing::{
    AttemptSummary, GroupSummary, LISTING_REPORT_VERSION, ListingReport, render_markdown,
    render_text,
};
