use crate::output::read_batch_stats;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate and print a batch statistics file
pub fn inspect_stats_file(file_path: &Path) -> Result<()> {
    println!("Inspecting statistics: {}", file_path.display());

    let stats = read_batch_stats(file_path)
        .with_context(|| format!("Not a valid statistics file: {}", file_path.display()))?;

    println!("✓ Valid statistics JSON");
    println!("  Traces:     {}", stats.total_traces);
    println!("  Spans:      {}", stats.total_spans);
    println!("  Total time: {:.3} ms", stats.total_time);
    println!("  Avg time:   {:.3} ms", stats.avg_time);
    println!("  Min time:   {:.3} ms", stats.min_time);
    println!("  Max time:   {:.3} ms", stats.max_time);

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Zipkin Trace Stats v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Batch latency statistics for Zipkin traces.");
}
