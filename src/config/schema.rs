//! Configuration schema definitions.
//!
//! The set of recognized keys is fixed at compile time. Each key can be
//! supplied by a config file entry, a `REMOTE_SYNC_*` environment variable,
//! or a command-line flag; the loader merges all sources into [`Settings`].

use clap::Parser;
use serde::Deserialize;

/// Log destination path; `""` or `"-"` selects standard output.
pub const LOG_PATH_KEY: &str = "log_path";

/// Log verbosity threshold (2+ = Trace, 1 = Debug, 0 = Info).
pub const LOG_LEVEL_KEY: &str = "log_level";

/// Path to the signed TLS certificate file.
pub const SIGNED_CERT_PATH_KEY: &str = "signed_cert_path";

/// Path to the signed TLS private key file.
pub const SIGNED_KEY_PATH_KEY: &str = "signed_key_path";

/// Local server port.
pub const PORT_KEY: &str = "port";

/// Command-line flags.
///
/// Flag values take final precedence over every other source. `--config`
/// itself only exists as a flag: it names the optional configuration file.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "remote-sync-server",
    version,
    about = "Starts a secure remote sync server"
)]
pub struct Cli {
    /// File path to a custom configuration.
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// File path to save the log file to.
    #[arg(short = 'l', long = "logPath", value_name = "PATH")]
    pub log_path: Option<String>,

    /// Verbosity level for log printing (2+ = Trace, 1 = Debug, 0 = Info).
    #[arg(short = 'v', long = "logLevel", value_name = "LEVEL")]
    pub log_level: Option<u64>,

    /// Path to the signed certificate file.
    #[arg(long = "signedCertPath", value_name = "PATH")]
    pub signed_cert_path: Option<String>,

    /// Path to the signed key file.
    #[arg(long = "signedKeyPath", value_name = "PATH")]
    pub signed_key_path: Option<String>,

    /// Local server port.
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<String>,
}

/// Resolved configuration, produced once per process start and immutable
/// afterwards.
///
/// Absent values keep their documented defaults: empty strings and a zero
/// verbosity threshold. The port stays a string until
/// [`resolve_port`](crate::config::validation::resolve_port) turns it into
/// a bind port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub log_path: String,
    pub log_level: u64,
    pub signed_cert_path: String,
    pub signed_key_path: String,
    pub port: String,
}

/// On-disk configuration file schema (TOML).
///
/// Every field is optional; absent fields fall through to the environment,
/// flags, or defaults. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub log_path: Option<String>,
    pub log_level: Option<u64>,
    pub signed_cert_path: Option<String>,
    pub signed_key_path: Option<String>,
    pub port: Option<PortValue>,
}

/// A port entry may be written as an integer or a string in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(u16),
    Text(String),
}

impl PortValue {
    pub fn into_string(self) -> String {
        match self {
            PortValue::Number(port) => port.to_string(),
            PortValue::Text(port) => port,
        }
    }
}
