//! Trace identifier extraction from tracing-UI URLs.

use regex::Regex;
use std::sync::OnceLock;

/// `/traces/<id>` where the whole path segment is lowercase hex
const TRACE_SEGMENT_PATTERN: &str = r"/traces/([a-f0-9]+)(?:[/?#\s]|$)";

fn trace_segment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TRACE_SEGMENT_PATTERN).expect("trace segment pattern is valid"))
}

/// Extract the trace id embedded in a tracing-UI URL
///
/// **Public** - first stage of the pipeline
///
/// Returns the first `/traces/<id>` segment whose id is lowercase hex.
/// Query strings, fragments and trailing path segments are ignored.
/// Anything else (blank lines, uppercase ids, stray characters) yields `None`.
pub fn extract_trace_id(url: &str) -> Option<String> {
    trace_segment_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
