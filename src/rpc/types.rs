//! Types shared by backend clients.

use crate::utils::error::RpcError;

/// Raw trace body from the backend (a JSON array of spans)
///
/// Kept as `serde_json::Value` so it can be archived verbatim. The parser
/// picks out the fields it needs.
pub type RawTraceData = serde_json::Value;

/// Anything that can return the raw spans of a trace
///
/// The run command only depends on this, so tests can swap the HTTP
/// client for an in-memory fake.
pub trait TraceSource {
    fn fetch_trace(&self, trace_id: &str) -> Result<RawTraceData, RpcError>;
}
