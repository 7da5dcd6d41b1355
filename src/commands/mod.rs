//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod run;
pub mod utils;

// Re-export main command functions
pub use run::{execute_run, process_url, read_urls, run_batch, RunArgs, RunReport, TraceOutcome};
pub use utils::{display_version, inspect_stats_file};
