//! HTTP rule adapter.
//!
//! # Data Flow
//! ```text
//! HttpRule (selector + one of get/post/put/patch/delete/custom)
//!     → http_rule.rs (pick the populated pattern)
//!     → verb.rs (split off trailing `:verb`)
//!     → template::parse
//!     → Option<PathTemplate> (None when no pattern is set)
//! ```
//!
//! # Design Decisions
//! - At most one pattern per rule, enforced at deserialization
//! - Verb handling lives here, never in the parser

pub mod http_rule;
pub mod verb;

pub use http_rule::{CustomPattern, HttpPattern, HttpRule, RuleError};
pub use verb::split_verb;
