//! Semantic validation of resolved settings.
//!
//! Serde and the loader handle syntax; this module checks that resolved
//! values are usable before the server touches the network.

use crate::config::loader::ConfigError;
use crate::config::schema::{Settings, PORT_KEY};

/// Resolve the configured port into a bind port.
///
/// An absent, unparsable, or zero port is an explicit configuration error;
/// the server never falls through to an ephemeral port.
pub fn resolve_port(settings: &Settings) -> Result<u16, ConfigError> {
    let raw = settings.port.trim();
    if raw.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: PORT_KEY,
            value: settings.port.clone(),
            reason: "no port configured",
        });
    }

    let port: u16 = raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: PORT_KEY,
        value: settings.port.clone(),
        reason: "expected a port number between 1 and 65535",
    })?;

    if port == 0 {
        return Err(ConfigError::InvalidValue {
            key: PORT_KEY,
            value: settings.port.clone(),
            reason: "port 0 is not a valid listen port",
        });
    }

    Ok(port)
}
