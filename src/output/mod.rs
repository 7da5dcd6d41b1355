//! Output writers for trace archives and batch statistics.
//!
//! This module handles writing data to disk:
//! - Verbatim per-trace archives
//! - The timestamped batch statistics file

pub mod json;
pub mod sink;

// Re-export main functions
pub use json::{read_batch_stats, stats_file_path, validate_path, write_batch_stats, write_trace_archive};
pub use sink::{FileSink, ResultSink};
