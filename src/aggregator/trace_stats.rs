//! Per-trace duration statistics.

use crate::parser::SpanInterval;
use serde::{Deserialize, Serialize};

/// Duration statistics for one trace, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStats {
    /// Number of valid spans (always at least 1)
    pub total_spans: usize,

    /// Sum of span durations
    pub total_time: f64,

    /// Mean span duration
    pub avg_time: f64,

    /// Shortest span duration
    pub min_time: f64,

    /// Longest span duration
    pub max_time: f64,
}

/// Reduce a trace's intervals to its statistics
///
/// **Public** - returns `None` for an empty trace; callers skip it rather
/// than substituting zeros.
pub fn compute_trace_stats(intervals: &[SpanInterval]) -> Option<TraceStats> {
    let (first, rest) = intervals.split_first()?;
    let first = first.duration_ms();

    let (total_time, min_time, max_time) = rest.iter().map(SpanInterval::duration_ms).fold(
        (first, first, first),
        |(sum, min, max), d| (sum + d, min.min(d), max.max(d)),
    );

    let total_spans = intervals.len();

    Some(TraceStats {
        total_spans,
        total_time,
        avg_time: total_time / total_spans as f64,
        min_time,
        max_time,
    })
}
