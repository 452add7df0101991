//! Remote sync server bootstrap.
//!
//! Resolves configuration, materializes TLS credentials, initializes the
//! log sink, and hands control to the serve loop.
//!
//! # Architecture Overview
//!
//! ```text
//! flags / environment / config file
//!     → config (Settings, precedence merge)
//!     → observability (log sink: stdout or file, one threshold)
//!     → net::tls (credential loading, key-pair validation)
//!     → lifecycle::startup (sequential fail-fast state machine)
//!     → net::transport (blocking TLS serve loop)
//! ```
//!
//! The sync protocol itself sits behind the [`net::transport::SyncTransport`]
//! boundary and is not part of this crate.

pub mod config;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::{Cli, Settings};
pub use lifecycle::startup::BootstrapError;
pub use lifecycle::Shutdown;
pub use net::transport::{HttpsTransport, SyncTransport};
