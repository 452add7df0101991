//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve settings from defaults, file, environment, and flags
//! - Initialize the log sink from the resolved settings
//! - Load and validate TLS credentials
//! - Start the transport on `0.0.0.0:<port>` and block serving traffic
//!
//! # Design Decisions
//! - Strictly sequential: each step completes before the next begins
//! - Fail fast: the first error aborts the sequence, nothing retries
//! - The sequence returns a result; process termination belongs to main.rs

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::config::{self, validation, Cli};
use crate::net::tls::{self, CredentialError};
use crate::net::transport::{ServeError, ServiceIdentity, SyncTransport};
use crate::observability::logging::{self, LogConfig, LogInitError};

/// Any failure along the startup sequence. Every variant is terminal.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Log(#[from] LogInitError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Serve(#[from] ServeError),
}

/// The server always listens on all interfaces; only the port is
/// configurable.
const LISTEN_HOST: [u8; 4] = [0, 0, 0, 0];

/// Run the bootstrap sequence, then block serving traffic until the serve
/// loop terminates.
///
/// Walks `Unconfigured → ConfigLoaded → LogReady → CredentialsReady →
/// Serving`; the first failure short-circuits to the caller, which decides
/// what a fatal error does to the process.
pub async fn run<T: SyncTransport>(cli: &Cli, transport: &T) -> Result<(), BootstrapError> {
    let settings = config::resolve(cli)?;

    logging::init(&LogConfig::from_settings(&settings))?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "remote-sync-server starting"
    );

    let credentials = tls::load_credentials(
        Path::new(&settings.signed_cert_path),
        Path::new(&settings.signed_key_path),
    )?;
    tracing::debug!(
        cert_path = %settings.signed_cert_path,
        key_path = %settings.signed_key_path,
        "credentials loaded"
    );

    let port = validation::resolve_port(&settings)?;
    let address = SocketAddr::from((LISTEN_HOST, port));
    let identity = ServiceIdentity::anonymous();

    let handle = transport
        .start(&identity, address, &credentials.cert_pem, &credentials.key_pem)
        .await?;
    tracing::info!(%address, "serving TLS traffic");

    match transport.serve(handle, credentials.key_pair).await {
        Ok(()) => {
            tracing::info!("server terminated gracefully");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "serve loop failed");
            Err(err.into())
        }
    }
}
