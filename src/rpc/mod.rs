//! Tracing backend access.

pub mod client;
pub mod types;

pub use client::{trace_url, ZipkinClient};
pub use types::{RawTraceData, TraceSource};
