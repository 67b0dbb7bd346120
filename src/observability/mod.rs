//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rule adapter, config watcher, CLI:
//!     → tracing events (structured fields: selector, method, path)
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stderr
//! ```
//!
//! The parser itself emits nothing; it is a pure function.

pub mod logging;

pub use logging::{init_logging, LoggingError};
