//! Where the pipeline sends its durable output.

use super::json::{stats_file_path, write_batch_stats, write_trace_archive};
use crate::aggregator::BatchStats;
use crate::rpc::RawTraceData;
use crate::utils::config::TRACE_ARCHIVE_DIR;
use crate::utils::error::OutputError;
use chrono::Local;
use log::debug;
use std::path::PathBuf;

/// Destination for trace archives and the final batch statistics
pub trait ResultSink {
    /// Keep a verbatim copy of a fetched trace
    fn archive_trace(&self, trace_id: &str, raw: &RawTraceData) -> Result<(), OutputError>;

    /// Persist the batch statistics, returning where they went
    fn write_stats(&self, stats: &BatchStats) -> Result<PathBuf, OutputError>;
}

/// Writes everything under one output directory
///
/// Layout:
/// - `{output_dir}/traces/{trace_id}.json`
/// - `{output_dir}/stats_YYYYMMDD_HHMMSS.json`
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
    archive_traces: bool,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            archive_traces: true,
        }
    }

    /// Turn per-trace archiving on or off
    pub fn with_archiving(mut self, enabled: bool) -> Self {
        self.archive_traces = enabled;
        self
    }

    pub fn archive_path(&self, trace_id: &str) -> PathBuf {
        self.output_dir
            .join(TRACE_ARCHIVE_DIR)
            .join(format!("{}.json", trace_id))
    }
}

impl ResultSink for FileSink {
    fn archive_trace(&self, trace_id: &str, raw: &RawTraceData) -> Result<(), OutputError> {
        if !self.archive_traces {
            debug!("Archiving disabled, not saving trace {}", trace_id);
            return Ok(());
        }

        let path = self.archive_path(trace_id);
        write_trace_archive(raw, &path)?;
        debug!("Trace {} saved to {}", trace_id, path.display());

        Ok(())
    }

    fn write_stats(&self, stats: &BatchStats) -> Result<PathBuf, OutputError> {
        let path = stats_file_path(&self.output_dir, Local::now());
        write_batch_stats(stats, &path)?;
        Ok(path)
    }
}
