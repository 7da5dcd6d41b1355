//! Configuration and constants for the CLI.
//!
//! Settings are resolved in three layers: built-in defaults, an optional
//! INI config file, then CLI flags (which clap also fills from the
//! environment variables of the same name).

use super::error::ConfigError;
use ini::Ini;
use log::debug;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for backend requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "settings.conf";

/// Output directory used when OUTPUT_DIR is not set anywhere
pub const DEFAULT_OUTPUT_DIR: &str = "/data";

/// Trace retrieval endpoint, relative to the backend root
pub const TRACE_API_PATH: &str = "/api/v2/trace";

/// Backend reports timestamps and durations in microseconds
pub const MICROS_PER_MILLI: f64 = 1000.0;

/// chrono format for the batch statistics file name
pub const STATS_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Sub-directory of the output dir holding verbatim trace archives
pub const TRACE_ARCHIVE_DIR: &str = "traces";

/// Section holding the settings in INI config files
pub const CONFIG_SECTION: &str = "DEFAULT";

pub const KEY_BASE_URL: &str = "ZIPKIN_BASE_URL";
pub const KEY_URLS_FILE: &str = "URLS_FILE_PATH";
pub const KEY_OUTPUT_DIR: &str = "OUTPUT_DIR";

/// Fully resolved settings handed to the run command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Backend root, without trailing slash
    pub zipkin_base_url: String,

    /// Newline-delimited list of tracing-UI URLs
    pub urls_file_path: PathBuf,

    /// Where archives and the statistics file are written
    pub output_dir: PathBuf,
}

/// Values supplied on the command line (or through the environment)
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub zipkin_base_url: Option<String>,
    pub urls_file_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Keys as they appear in the config file
#[derive(Debug, Clone, Default)]
pub struct FileSettings {
    pub zipkin_base_url: Option<String>,
    pub urls_file_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from an optional config file plus overrides
    ///
    /// When `config_path` is `None` the default file is read if it exists.
    /// An explicitly given path must exist.
    pub fn load(
        config_path: Option<&Path>,
        overrides: SettingsOverrides,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => read_config_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    read_config_file(default_path)?
                } else {
                    debug!("No {} found, using flags and environment only", DEFAULT_CONFIG_FILE);
                    FileSettings::default()
                }
            }
        };

        Self::from_layers(file, overrides)
    }

    /// Merge file values with overrides and validate the result
    pub fn from_layers(
        file: FileSettings,
        overrides: SettingsOverrides,
    ) -> Result<Self, ConfigError> {
        let base_url = overrides
            .zipkin_base_url
            .or(file.zipkin_base_url)
            .ok_or(ConfigError::MissingKey(KEY_BASE_URL))?;

        let urls_file_path = overrides
            .urls_file_path
            .or(file.urls_file_path)
            .ok_or(ConfigError::MissingKey(KEY_URLS_FILE))?;

        let output_dir = overrides
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            zipkin_base_url: normalize_base_url(&base_url)?,
            urls_file_path,
            output_dir,
        })
    }
}

/// Parse INI config contents
///
/// Keys may sit before any section header or under `[DEFAULT]`; the
/// former wins when both are present.
pub fn parse_config_str(contents: &str) -> Result<FileSettings, ConfigError> {
    let ini = Ini::load_from_str(contents)?;
    let lookup = |key: &str| {
        ini.general_section()
            .get(key)
            .or_else(|| ini.section(Some(CONFIG_SECTION)).and_then(|s| s.get(key)))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Ok(FileSettings {
        zipkin_base_url: lookup(KEY_BASE_URL),
        urls_file_path: lookup(KEY_URLS_FILE).map(PathBuf::from),
        output_dir: lookup(KEY_OUTPUT_DIR).map(PathBuf::from),
    })
}

fn read_config_file(path: &Path) -> Result<FileSettings, ConfigError> {
    debug!("Reading config file: {}", path.display());

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents)
}

/// Check the scheme and drop trailing slashes
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: KEY_BASE_URL,
            reason: "cannot be empty".to_string(),
        });
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            key: KEY_BASE_URL,
            reason: "must start with http:// or https://".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
