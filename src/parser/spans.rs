//! Span records from the tracing backend and their millisecond intervals.
//!
//! The backend reports `timestamp` (start offset) and `duration` as integer
//! microseconds. Everything downstream works in milliseconds.

use crate::rpc::RawTraceData;
use crate::utils::config::MICROS_PER_MILLI;
use crate::utils::error::ParseError;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One span object as returned by the backend
///
/// Fields are kept loosely typed so that a malformed span is dropped by
/// [`build_intervals`] instead of failing the whole trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Span id, only used to label log messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Operation name, only used to label log messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// Start offset in microseconds
    #[serde(default)]
    pub timestamp: Option<Value>,

    /// Duration in microseconds
    #[serde(default)]
    pub duration: Option<Value>,
}

impl RawSpan {
    pub fn new(timestamp: u64, duration: u64) -> Self {
        Self {
            timestamp: Some(Value::from(timestamp)),
            duration: Some(Value::from(duration)),
            ..Default::default()
        }
    }

    /// `id (name)` for log messages, falling back to the list position
    pub fn label(&self, index: usize) -> String {
        let text = |v: &Option<Value>| match v {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        match (text(&self.id), text(&self.name)) {
            (Some(id), Some(name)) => format!("{} ({})", id, name),
            (Some(id), None) => id,
            (None, Some(name)) => format!("#{} ({})", index, name),
            (None, None) => format!("#{}", index),
        }
    }

    /// Both fields as non-negative integers, if they are
    fn micros(&self) -> Option<(u64, u64)> {
        let timestamp = self.timestamp.as_ref()?.as_u64()?;
        let duration = self.duration.as_ref()?.as_u64()?;
        Some((timestamp, duration))
    }
}

/// Absolute span interval in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanInterval {
    pub start_ms: f64,
    pub end_ms: f64,
}

impl SpanInterval {
    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }
}

/// Split a backend response into span records
///
/// **Public** - used by the run command after a successful fetch
///
/// # Errors
/// * `ParseError::NotAnArray` - body is not a JSON array
///
/// Array elements that are not objects are dropped.
pub fn parse_raw_spans(raw: &RawTraceData) -> Result<Vec<RawSpan>, ParseError> {
    let items = raw.as_array().ok_or(ParseError::NotAnArray(json_kind(raw)))?;

    let spans = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match RawSpan::deserialize(item) {
            Ok(span) => Some(span),
            Err(e) => {
                debug!("Dropping span #{}: {}", i, e);
                None
            }
        })
        .collect();

    Ok(spans)
}

/// Convert span records into millisecond intervals
///
/// **Public** - never fails; spans without integer, non-negative
/// `timestamp` and `duration` are left out of the result.
pub fn build_intervals(spans: &[RawSpan]) -> Vec<SpanInterval> {
    spans
        .iter()
        .enumerate()
        .filter_map(|(i, span)| {
            let Some((timestamp, duration)) = span.micros() else {
                debug!(
                    "Dropping span {}: missing or invalid timestamp/duration",
                    span.label(i)
                );
                return None;
            };

            let start_ms = timestamp as f64 / MICROS_PER_MILLI;
            let duration_ms = duration as f64 / MICROS_PER_MILLI;

            Some(SpanInterval {
                start_ms,
                end_ms: start_ms + duration_ms,
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
