//! Zipkin Trace Stats
//!
//! Fetches Zipkin traces referenced by a list of tracing-UI URLs and
//! aggregates their span latencies into per-trace and batch statistics.
//!
//! Pipeline:
//!
//! ```text
//! URL -> trace id -> raw spans -> intervals -> TraceStats -> BatchStats -> file
//! ```
//!
//! Most users should use the CLI:
//!
//! ```bash
//! zipkin-stats run --zipkin-base-url http://localhost:9411 --urls-file urls.txt
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod rpc;
pub mod utils;
