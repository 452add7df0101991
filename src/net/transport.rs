//! Server-start boundary.
//!
//! The sync server proper is an external collaborator reached through a
//! narrow contract: start a listener with an identity, a bind address,
//! and the raw credential bytes, then serve TLS traffic with the
//! validated key pair until shutdown or failure.

use std::io;
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use thiserror::Error;

use crate::lifecycle::Shutdown;
use crate::net::tls::TlsKeyPair;

/// Error type for the server-start boundary.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("transport failure while serving: {source}")]
    Transport {
        #[source]
        source: io::Error,
    },
}

/// Identity presented to the server-start call.
///
/// The bootstrap serves under an anonymous default identity; real
/// identities belong to the sync protocol layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    label: String,
}

impl ServiceIdentity {
    pub fn anonymous() -> Self {
        Self {
            label: "anonymous".to_string(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Capability the bootstrapper uses to start and run the server.
///
/// Satisfied by [`HttpsTransport`] in production and by a recording double
/// in the test suite.
#[allow(async_fn_in_trait)]
pub trait SyncTransport {
    /// Opaque handle representing a bound listener.
    type Handle;

    /// Bind a listener for `identity` on `address`. The raw credential
    /// bytes travel with the start call; serving uses the validated pair.
    async fn start(
        &self,
        identity: &ServiceIdentity,
        address: SocketAddr,
        cert: &[u8],
        key: &[u8],
    ) -> Result<Self::Handle, ServeError>;

    /// Serve TLS traffic on `handle`, blocking until shutdown or failure.
    async fn serve(&self, handle: Self::Handle, key_pair: TlsKeyPair) -> Result<(), ServeError>;
}

/// Handle to a bound, not-yet-serving listener.
pub struct ServerHandle {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl ServerHandle {
    /// The address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

/// Production transport: serves the service router over TLS via
/// axum-server, draining connections when the shutdown coordinator fires.
pub struct HttpsTransport {
    router: Router,
    shutdown: Shutdown,
}

impl HttpsTransport {
    pub fn new(router: Router, shutdown: Shutdown) -> Self {
        Self { router, shutdown }
    }
}

impl SyncTransport for HttpsTransport {
    type Handle = ServerHandle;

    async fn start(
        &self,
        identity: &ServiceIdentity,
        address: SocketAddr,
        _cert: &[u8],
        _key: &[u8],
    ) -> Result<ServerHandle, ServeError> {
        let listener = TcpListener::bind(address).map_err(|source| ServeError::Bind {
            address,
            source,
        })?;
        listener
            .set_nonblocking(true)
            .map_err(|source| ServeError::Bind { address, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServeError::Bind { address, source })?;

        tracing::info!(
            address = %local_addr,
            identity = %identity.label(),
            "listener bound"
        );

        Ok(ServerHandle {
            listener,
            local_addr,
        })
    }

    async fn serve(&self, handle: ServerHandle, key_pair: TlsKeyPair) -> Result<(), ServeError> {
        let server_handle = axum_server::Handle::new();

        let mut shutdown_rx = self.shutdown.subscribe();
        let drain = server_handle.clone();
        tokio::spawn(async move {
            let _ = shutdown_rx.recv().await;
            tracing::info!("draining connections before shutdown");
            drain.graceful_shutdown(Some(Duration::from_secs(30)));
        });

        axum_server::from_tcp_rustls(handle.listener, key_pair.rustls_config())
            .handle(server_handle)
            .serve(self.router.clone().into_make_service())
            .await
            .map_err(|source| ServeError::Transport { source })
    }
}

/// Router exposed by the production transport.
///
/// Protocol endpoints belong to the sync layer; only the health probe
/// lives here.
pub fn service_router() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
