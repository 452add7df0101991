//! Log sink selection and global initialization.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::Settings;

/// Error type for log sink initialization.
#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("failed to open log file {path:?}: {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Log to standard output.
    Stdout,
    /// Append to a file; standard output stays silent.
    File(PathBuf),
}

impl LogDestination {
    /// Map a configured log path to a destination. `""` and `"-"` mean
    /// standard output.
    pub fn from_path(path: &str) -> Self {
        if path.is_empty() || path == "-" {
            LogDestination::Stdout
        } else {
            LogDestination::File(PathBuf::from(path))
        }
    }
}

/// Process-wide logging configuration, constructed once at startup and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub threshold: u64,
}

impl LogConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            destination: LogDestination::from_path(&settings.log_path),
            threshold: settings.log_level,
        }
    }
}

/// Map the verbosity threshold to a level (2+ = Trace, 1 = Debug,
/// 0 = Info). Monotonic: every threshold above 1 is Trace.
pub fn level_for(threshold: u64) -> Level {
    if threshold > 1 {
        Level::TRACE
    } else if threshold == 1 {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Open the log file for appending, creating it if absent.
pub fn open_log_file(path: &Path) -> Result<File, LogInitError> {
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|source| LogInitError::OpenLogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global log sink.
///
/// Debug and Trace carry microsecond-precision timestamps; Info keeps
/// second precision. The file destination is opened before the subscriber
/// is installed, so an unopenable path is always an error. A second call
/// keeps the subscriber from the first one (only reachable from tests).
pub fn init(config: &LogConfig) -> Result<(), LogInitError> {
    let level = level_for(config.threshold);
    let timer = if config.threshold >= 1 {
        ChronoLocal::new("%Y-%m-%d %H:%M:%S%.6f".to_string())
    } else {
        ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string())
    };

    let (writer, ansi) = match &config.destination {
        LogDestination::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        LogDestination::File(path) => {
            let file = open_log_file(path)?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_timer(timer)
        .with_writer(writer)
        .with_ansi(ansi)
        .try_init();

    tracing::info!("log level set to: {}", level);
    Ok(())
}
