//! Input parsing for the pipeline.
//!
//! This module handles:
//! - Extracting trace ids from tracing-UI URLs
//! - Splitting backend responses into span records
//! - Converting spans to millisecond intervals

pub mod spans;
pub mod trace_id;

// Re-export main types
pub use spans::{build_intervals, parse_raw_spans, RawSpan, SpanInterval};
pub use trace_id::extract_trace_id;
