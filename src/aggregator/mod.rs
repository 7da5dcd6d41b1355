//! Aggregation of span intervals into latency statistics.
//!
//! This module turns intervals into:
//! - Per-trace statistics (count, sum, mean, min, max)
//! - Batch statistics with a span-weighted mean

pub mod batch_stats;
pub mod trace_stats;

// Re-export main types and functions
pub use batch_stats::{aggregate_batch, BatchStats};
pub use trace_stats::{compute_trace_stats, TraceStats};
