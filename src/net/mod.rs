//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Settings (cert/key paths)
//!     → tls.rs (read PEM material, pair into a TlsKeyPair)
//!     → transport.rs (SyncTransport boundary: start listener, serve TLS)
//!
//! The sync protocol itself lives behind the SyncTransport boundary and
//! is not part of this crate.
//! ```
//!
//! # Design Decisions
//! - Credential loading is one-shot at startup; no reload or rotation
//! - The key pair is validated at load time, not at first handshake
//! - The transport is a trait so the bootstrap sequence can be exercised
//!   against a test double

pub mod tls;
pub mod transport;

pub use tls::{load_credentials, CredentialError, Credentials, TlsKeyPair};
pub use transport::{HttpsTransport, ServeError, ServiceIdentity, SyncTransport};
