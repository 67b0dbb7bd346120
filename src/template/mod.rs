//! Path template subsystem.
//!
//! # Data Flow
//! ```text
//! "/v1/{name=messages/*}"
//!     → parser.rs (scan segments left to right)
//!         → `{...}` value pattern → parser.rs (same routine, recursive)
//!     → PathTemplate (ordered Segment tree, immutable)
//!     → handed unmodified to route/code generation
//! ```
//!
//! # Design Decisions
//! - Parsing is a pure function: no I/O, no logging, no shared state
//! - Errors are values; malformed input never panics
//! - `raw` text is kept on every segment so the input can be rebuilt exactly

pub mod parser;
pub mod segment;

pub use parser::{parse, ParseError, ParseErrorKind};
pub use segment::{PathTemplate, Segment, SegmentKind, Variable};
