//! JSON output writers.
//!
//! Writes batch statistics and verbatim trace archives as pretty-printed JSON.

use crate::aggregator::BatchStats;
use crate::rpc::RawTraceData;
use crate::utils::config::STATS_TIMESTAMP_FORMAT;
use crate::utils::error::OutputError;
use chrono::{DateTime, Local};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write batch statistics to a JSON file
///
/// **Public** - main entry point for the statistics file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_batch_stats(
    stats: &BatchStats,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing batch statistics to: {}", output_path.display());
    write_json_pretty(stats, output_path)?;
    info!(
        "Statistics written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Archive a backend response exactly as received
///
/// **Public** - called once per successfully fetched trace
pub fn write_trace_archive(
    raw: &RawTraceData,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    debug!("Archiving trace to: {}", output_path.display());
    write_json_pretty(raw, output_path)
}

/// Read batch statistics back from a JSON file
///
/// **Public** - used by the inspect command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_batch_stats(input_path: impl AsRef<Path>) -> Result<BatchStats, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading batch statistics from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let stats: BatchStats =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(stats)
}

/// `{output_dir}/stats_YYYYMMDD_HHMMSS.json` for the given local time
pub fn stats_file_path(output_dir: impl AsRef<Path>, at: DateTime<Local>) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("stats_{}.json", at.format(STATS_TIMESTAMP_FORMAT)))
}

/// Validate that output path is writable
///
/// **Public** - shared by every writer in this module
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn write_json_pretty<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
