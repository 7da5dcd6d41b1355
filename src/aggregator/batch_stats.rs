//! Batch-level statistics folded from per-trace statistics.
//!
//! The batch mean is weighted by span count: `total_time / total_spans`.
//! Averaging the per-trace means would over-weight traces with few spans.

use super::trace_stats::TraceStats;
use log::debug;
use serde::{Deserialize, Serialize};

/// Statistics across every trace in a run, in milliseconds
///
/// This is the record written to `stats_<timestamp>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_traces: usize,
    pub total_spans: usize,
    pub total_time: f64,
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
}

impl BatchStats {
    /// Batch made of a single trace
    pub fn from_trace(stats: &TraceStats) -> Self {
        Self {
            total_traces: 1,
            total_spans: stats.total_spans,
            total_time: stats.total_time,
            avg_time: stats.avg_time,
            min_time: stats.min_time,
            max_time: stats.max_time,
        }
    }

    /// Combine two partial batches
    ///
    /// Commutative and associative, so partial batches may be merged in
    /// any order.
    pub fn merge(self, other: Self) -> Self {
        let total_spans = self.total_spans + other.total_spans;
        let total_time = self.total_time + other.total_time;

        Self {
            total_traces: self.total_traces + other.total_traces,
            total_spans,
            total_time,
            avg_time: weighted_mean(total_time, total_spans),
            min_time: self.min_time.min(other.min_time),
            max_time: self.max_time.max(other.max_time),
        }
    }

    /// Human-readable one-liner for logs
    pub fn summary(&self) -> String {
        format!(
            "Traces: {} | Spans: {} | Total: {:.3} ms | Avg: {:.3} ms | Min: {:.3} ms | Max: {:.3} ms",
            self.total_traces,
            self.total_spans,
            self.total_time,
            self.avg_time,
            self.min_time,
            self.max_time
        )
    }
}

/// Fold all per-trace statistics into one batch record
///
/// **Public** - returns `None` when no trace produced statistics.
pub fn aggregate_batch(traces: &[TraceStats]) -> Option<BatchStats> {
    debug!("Aggregating statistics from {} traces", traces.len());

    traces
        .iter()
        .map(BatchStats::from_trace)
        .reduce(BatchStats::merge)
}

// Every contributing trace has at least one span, so the divisor is non-zero.
fn weighted_mean(total_time: f64, total_spans: usize) -> f64 {
    total_time / total_spans as f64
}
