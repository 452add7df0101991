//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → schema.rs (Settings, FileConfig, flag definitions)
//!     → loader.rs (merge: defaults < config file < environment < flags)
//!     → validation.rs (semantic checks, e.g. port resolution)
//!     → Settings (resolved, immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Settings are resolved exactly once at startup; there is no reload
//! - Flags always win; environment beats the file; the file beats defaults
//! - Syntactic checks live in the loader, semantic checks in validation
//! - The environment is read through an injectable lookup so precedence
//!   stays testable without mutating the process environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve, resolve_with, ConfigError};
pub use schema::{Cli, Settings};
