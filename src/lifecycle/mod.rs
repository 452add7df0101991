//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve settings → Init log sink → Load credentials
//!     → Start transport → Blocking TLS serve loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast trigger → transport drains → serve
//!     returns Ok → process exits 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//! ```
//!
//! # Design Decisions
//! - Fail fast: every startup error is terminal, nothing retries
//! - Steps run in order, never concurrently; each completes before the next
//! - The state machine returns errors instead of exiting, so main.rs is
//!   the only place that terminates the process

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, BootstrapError};
