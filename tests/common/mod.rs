//! Shared utilities for the integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use remote_sync_server::net::tls::TlsKeyPair;
use remote_sync_server::net::transport::{ServeError, ServiceIdentity, SyncTransport};

/// Path to a PEM fixture under `tests/fixtures/`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Arguments captured from a start call.
#[allow(dead_code)]
pub struct StartCall {
    pub identity: String,
    pub address: SocketAddr,
    pub cert: Vec<u8>,
    pub key: Vec<u8>,
}

/// Transport double that records boundary calls instead of binding
/// sockets.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingTransport {
    pub starts: Mutex<Vec<StartCall>>,
    pub serve_calls: AtomicUsize,
    pub fail_serve: bool,
}

#[allow(dead_code)]
impl RecordingTransport {
    /// A transport whose serve call fails with an injected transport error.
    pub fn failing() -> Self {
        Self {
            fail_serve: true,
            ..Self::default()
        }
    }

    pub fn start_count(&self) -> usize {
        self.starts.lock().unwrap().len()
    }

    pub fn serve_count(&self) -> usize {
        self.serve_calls.load(Ordering::SeqCst)
    }
}

impl SyncTransport for RecordingTransport {
    type Handle = SocketAddr;

    async fn start(
        &self,
        identity: &ServiceIdentity,
        address: SocketAddr,
        cert: &[u8],
        key: &[u8],
    ) -> Result<SocketAddr, ServeError> {
        self.starts.lock().unwrap().push(StartCall {
            identity: identity.label().to_string(),
            address,
            cert: cert.to_vec(),
            key: key.to_vec(),
        });
        Ok(address)
    }

    async fn serve(
        &self,
        _handle: SocketAddr,
        _key_pair: TlsKeyPair,
    ) -> Result<(), ServeError> {
        self.serve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_serve {
            return Err(ServeError::Transport {
                source: std::io::Error::other("injected transport failure"),
            });
        }
        Ok(())
    }
}
