//! # photonsim IO
//!
//! Reading recorded engine streams and writing labelled output.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON helpers
//! - The JSON-lines replay format
//! - Per-event output records and the category forest export

/// Error types and result aliases for I/O operations
pub mod error;
/// Category forest of one event and its DOT export
pub mod lineage;
/// Labelled output records
pub mod output;
/// JSON-lines engine streams
pub mod replay;
pub mod serialization;

pub use error::{IoError, Result};
pub use lineage::CategoryForest;
pub use output::{EventRecord, EventSummary, LabelOutput, PhotonOutput, RunOutput, TrackOutput};
pub use replay::{parse_events, read_event_file, write_event_file, EventStream};
pub use serialization::{from_json, read_json_file, to_json, to_json_pretty, write_json_file};
