//! Settings resolution from defaults, config file, environment, and flags.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::{
    Cli, FileConfig, Settings, LOG_LEVEL_KEY, LOG_PATH_KEY, PORT_KEY, SIGNED_CERT_PATH_KEY,
    SIGNED_KEY_PATH_KEY,
};

/// Prefix for environment variables recognized during resolution.
pub const ENV_PREFIX: &str = "REMOTE_SYNC_";

/// Error type for settings resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config file path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Resolve settings from every source, lowest to highest precedence:
/// built-in defaults, config file, environment variables, command-line
/// flags.
pub fn resolve(cli: &Cli) -> Result<Settings, ConfigError> {
    resolve_with(cli, |name| env::var(name).ok())
}

/// Same as [`resolve`], but reads the environment through `env_lookup`.
pub fn resolve_with<F>(cli: &Cli, env_lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    // An absent or empty --config skips file loading entirely.
    if let Some(path) = cli.config.as_deref().filter(|path| !path.is_empty()) {
        apply_file(&mut settings, load_file(path)?);
    }
    apply_env(&mut settings, &env_lookup)?;
    apply_flags(&mut settings, cli);

    Ok(settings)
}

/// Environment variable name for a recognized key, e.g. `log_path` →
/// `REMOTE_SYNC_LOG_PATH`.
pub fn env_var(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.to_ascii_uppercase())
}

/// Expand a user-supplied path to an absolute one, resolving a leading
/// tilde against `$HOME`. The path must exist.
pub fn expand_path(path: &str) -> Result<PathBuf, ConfigError> {
    let expanded = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = env::var("HOME").map_err(|_| ConfigError::InvalidPath {
                path: path.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "HOME is not set"),
            })?;
            PathBuf::from(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    };

    fs::canonicalize(&expanded).map_err(|source| ConfigError::InvalidPath {
        path: path.to_string(),
        source,
    })
}

fn load_file(path: &str) -> Result<FileConfig, ConfigError> {
    let path = expand_path(path)?;
    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

fn apply_file(settings: &mut Settings, file: FileConfig) {
    if let Some(log_path) = file.log_path {
        settings.log_path = log_path;
    }
    if let Some(log_level) = file.log_level {
        settings.log_level = log_level;
    }
    if let Some(cert_path) = file.signed_cert_path {
        settings.signed_cert_path = cert_path;
    }
    if let Some(key_path) = file.signed_key_path {
        settings.signed_key_path = key_path;
    }
    if let Some(port) = file.port {
        settings.port = port.into_string();
    }
}

fn apply_env<F>(settings: &mut Settings, env_lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(log_path) = env_lookup(&env_var(LOG_PATH_KEY)) {
        settings.log_path = log_path;
    }
    if let Some(log_level) = env_lookup(&env_var(LOG_LEVEL_KEY)) {
        settings.log_level = log_level
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: LOG_LEVEL_KEY,
                value: log_level,
                reason: "expected an unsigned integer",
            })?;
    }
    if let Some(cert_path) = env_lookup(&env_var(SIGNED_CERT_PATH_KEY)) {
        settings.signed_cert_path = cert_path;
    }
    if let Some(key_path) = env_lookup(&env_var(SIGNED_KEY_PATH_KEY)) {
        settings.signed_key_path = key_path;
    }
    if let Some(port) = env_lookup(&env_var(PORT_KEY)) {
        settings.port = port;
    }
    Ok(())
}

fn apply_flags(settings: &mut Settings, cli: &Cli) {
    if let Some(log_path) = &cli.log_path {
        settings.log_path = log_path.clone();
    }
    if let Some(log_level) = cli.log_level {
        settings.log_level = log_level;
    }
    if let Some(cert_path) = &cli.signed_cert_path {
        settings.signed_cert_path = cert_path.clone();
    }
    if let Some(key_path) = &cli.signed_key_path {
        settings.signed_key_path = key_path.clone();
    }
    if let Some(port) = &cli.port {
        settings.port = port.clone();
    }
}
