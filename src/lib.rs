//! HTTP path template parsing for RPC method bindings.
//!
//! ```
//! use http_path_template::template::parse;
//!
//! let template = parse("/v1/messages/{message_id}/{sub.subfield}").unwrap();
//! let fields: Vec<String> = template.variables().map(|v| v.field_name()).collect();
//! assert_eq!(fields, ["message_id", "sub.subfield"]);
//! ```

pub mod check;
pub mod config;
pub mod observability;
pub mod rule;
pub mod template;

pub use rule::{HttpPattern, HttpRule};
pub use template::{parse, ParseError, PathTemplate, Segment, SegmentKind, Variable};
