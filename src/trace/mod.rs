//! Trace metadata extraction, retry grouping and free-text filtering.
//!
//! Everything in here is pure: functions take in-memory artifact lists and
//! return new values, never errors. Unconventional paths degrade to generic
//! labels instead of failing.

pub mod filter;
pub mod group;
pub mod parser;

pub use filter::{filter, search_blob};
pub use group::{ArtifactGroup, group};
pub use parser::{TestType, TraceInfo, parse, title_case};
