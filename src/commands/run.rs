//! Run command implementation.
//!
//! The run command:
//! 1. Reads the URL list
//! 2. Extracts a trace id from each URL
//! 3. Fetches and archives each trace
//! 4. Computes per-trace statistics
//! 5. Folds them into batch statistics
//! 6. Writes the statistics file
//!
//! Traces are processed one at a time. A bad URL, a failed fetch or an
//! empty trace only removes that trace from the batch.

use crate::aggregator::{aggregate_batch, compute_trace_stats, BatchStats, TraceStats};
use crate::output::{FileSink, ResultSink};
use crate::parser::{build_intervals, extract_trace_id, parse_raw_spans};
use crate::rpc::{TraceSource, ZipkinClient};
use crate::utils::config::Settings;
use crate::utils::error::RpcError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the run command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// Resolved settings (backend, input list, output dir)
    pub settings: Settings,

    /// Save each fetched trace under `{output_dir}/traces/`
    pub archive_traces: bool,

    /// Print the batch statistics to stdout when done
    pub print_summary: bool,
}

/// What happened to one input line
#[derive(Debug)]
pub enum TraceOutcome {
    /// Statistics computed for the trace
    Processed { trace_id: String, stats: TraceStats },

    /// No trace id in the line
    InvalidUrl { url: String },

    /// Backend call failed or returned something unusable
    FetchFailed { trace_id: String, error: RpcError },

    /// Trace fetched but none of its spans were usable
    Empty { trace_id: String },
}

/// Result of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Batch statistics, if any trace produced statistics
    pub batch: Option<BatchStats>,

    /// Statistics file, if one was written
    pub output_path: Option<PathBuf>,

    pub processed: usize,
    pub invalid_urls: usize,
    pub fetch_failures: usize,
    pub empty_traces: usize,
}

impl RunReport {
    fn record(&mut self, outcome: &TraceOutcome) {
        match outcome {
            TraceOutcome::Processed { .. } => self.processed += 1,
            TraceOutcome::InvalidUrl { .. } => self.invalid_urls += 1,
            TraceOutcome::FetchFailed { .. } => self.fetch_failures += 1,
            TraceOutcome::Empty { .. } => self.empty_traces += 1,
        }
    }

    /// Human-readable one-liner for logs
    pub fn summary(&self) -> String {
        format!(
            "Processed: {} | Invalid URLs: {} | Fetch failures: {} | Empty traces: {}",
            self.processed, self.invalid_urls, self.fetch_failures, self.empty_traces
        )
    }
}

/// Execute the run command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * URL list cannot be read (fatal, nothing is written)
/// * HTTP client cannot be built
/// * Statistics file cannot be written
pub fn execute_run(args: RunArgs) -> Result<RunReport> {
    let start_time = Instant::now();
    let settings = &args.settings;

    info!("Using Zipkin base URL: {}", settings.zipkin_base_url);
    info!("Reading URLs from: {}", settings.urls_file_path.display());
    info!("Writing output to: {}", settings.output_dir.display());

    let urls = read_urls(&settings.urls_file_path)?;
    info!("Loaded {} URLs", urls.len());

    let client = ZipkinClient::new(settings.zipkin_base_url.as_str())
        .context("Failed to create Zipkin client")?;
    let sink = FileSink::new(&settings.output_dir).with_archiving(args.archive_traces);

    let report = run_batch(&urls, &client, &sink)?;

    info!("{}", report.summary());

    if args.print_summary {
        if let Some(batch) = &report.batch {
            println!("\nOverall statistics:");
            println!(
                "{}",
                serde_json::to_string_pretty(batch).context("Failed to format statistics")?
            );
        }
    }

    let elapsed = start_time.elapsed();
    info!("Run completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Process every URL and persist the batch statistics
///
/// **Public** - the pipeline without settings or HTTP, for reuse and tests
///
/// Writes nothing when no trace produced statistics.
pub fn run_batch<S, K>(urls: &[String], source: &S, sink: &K) -> Result<RunReport>
where
    S: TraceSource + ?Sized,
    K: ResultSink + ?Sized,
{
    let mut report = RunReport::default();
    let mut all_stats: Vec<TraceStats> = Vec::new();

    for url in urls {
        let outcome = process_url(url, source, sink);
        report.record(&outcome);

        match outcome {
            TraceOutcome::Processed { trace_id, stats } => {
                info!(
                    "Trace {}: {} spans, total {:.3} ms, avg {:.3} ms, min {:.3} ms, max {:.3} ms",
                    trace_id,
                    stats.total_spans,
                    stats.total_time,
                    stats.avg_time,
                    stats.min_time,
                    stats.max_time
                );
                all_stats.push(stats);
            }
            TraceOutcome::InvalidUrl { url } => {
                warn!("Invalid URL, skipping: {}", url);
            }
            TraceOutcome::FetchFailed { trace_id, error } => match error.status() {
                Some(status) => warn!("Failed to fetch trace {} (HTTP {}): {}", trace_id, status, error),
                None => warn!("Failed to fetch trace {}: {}", trace_id, error),
            },
            TraceOutcome::Empty { trace_id } => {
                warn!("Trace {} has no usable spans, skipping", trace_id);
            }
        }
    }

    let Some(batch) = aggregate_batch(&all_stats) else {
        info!("No trace produced statistics, nothing to write");
        return Ok(report);
    };

    info!("Batch statistics: {}", batch.summary());

    let output_path = sink
        .write_stats(&batch)
        .context("Failed to write batch statistics")?;
    info!("✓ Statistics written to: {}", output_path.display());

    report.batch = Some(batch);
    report.output_path = Some(output_path);

    Ok(report)
}

/// Take one input line through extraction, fetch and per-trace statistics
///
/// **Public** - lets callers and tests inspect per-item results
pub fn process_url<S, K>(url: &str, source: &S, sink: &K) -> TraceOutcome
where
    S: TraceSource + ?Sized,
    K: ResultSink + ?Sized,
{
    let Some(trace_id) = extract_trace_id(url) else {
        return TraceOutcome::InvalidUrl {
            url: url.to_string(),
        };
    };

    debug!("Processing trace id: {}", trace_id);

    let raw = match source.fetch_trace(&trace_id) {
        Ok(raw) => raw,
        Err(error) => return TraceOutcome::FetchFailed { trace_id, error },
    };

    // A failed archive does not invalidate the data already in memory
    if let Err(e) = sink.archive_trace(&trace_id, &raw) {
        warn!("Could not archive trace {}: {}", trace_id, e);
    }

    let spans = match parse_raw_spans(&raw) {
        Ok(spans) => spans,
        Err(e) => {
            return TraceOutcome::FetchFailed {
                trace_id,
                error: RpcError::InvalidResponse(e.to_string()),
            }
        }
    };

    let intervals = build_intervals(&spans);
    debug!(
        "Trace {}: {} of {} spans usable",
        trace_id,
        intervals.len(),
        spans.len()
    );

    match compute_trace_stats(&intervals) {
        Some(stats) => TraceOutcome::Processed { trace_id, stats },
        None => TraceOutcome::Empty { trace_id },
    }
}

/// Read the newline-delimited URL list
///
/// **Public** - a missing file is the one fatal input error. Lines are
/// trimmed and decoded lossily, so a stray non-UTF-8 byte only spoils its
/// own line, which the extractor then rejects.
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("URLs file not found or unreadable: {}", path.display()))?;

    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(&bytes[..]);

    let urls = body
        .split(|b| *b == b'\n')
        .enumerate()
        .map(|(i, line)| {
            let text = String::from_utf8_lossy(line);
            if matches!(text, Cow::Owned(_)) {
                warn!("Line {} of {} is not valid UTF-8", i + 1, path.display());
            }
            text.trim().to_string()
        })
        .collect::<Vec<_>>();

    Ok(urls)
}
