//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! rules file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (selectors, path templates)
//!     → ToolConfig (validated, immutable)
//!
//! With --watch:
//!     watcher.rs detects change
//!     → loader.rs reads the new file
//!     → sent over a channel to be checked again
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{HttpConfig, LogFormat, ObservabilityConfig, ToolConfig};
pub use validation::{validate_config, ValidationError};
