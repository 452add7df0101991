//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Settings (log_path, log_level)
//!     → logging.rs (LogConfig: destination + threshold)
//!     → global tracing subscriber, installed once at startup
//!
//! Destinations:
//!     "" or "-" → standard output
//!     anything else → append-only file, stdout silent
//! ```
//!
//! # Design Decisions
//! - One sink, one threshold: no independent stdout/file verbosity
//! - The log file is opened once and held for the process lifetime
//! - Logging is fire-and-forget; write failures never affect control flow

pub mod logging;

pub use logging::{init, LogConfig, LogDestination, LogInitError};
