//! Shared utilities for integration tests.

use std::io::Write;

use http_path_template::{Segment, Variable};

/// Write `content` to a fresh temporary rules file.
#[allow(dead_code)]
pub fn rules_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Build a variable segment from its raw text, field path and value template.
#[allow(dead_code)]
pub fn var(raw: &str, field_path: &[&str], value: Vec<Segment>) -> Segment {
    Segment::variable(
        raw,
        Variable::new(field_path.iter().map(|s| s.to_string()).collect(), value),
    )
}

#[allow(dead_code)]
pub fn lit(text: &str) -> Segment {
    Segment::literal(text)
}
