//! Path template tree types.
//!
//! A parsed template is a flat, ordered list of [`Segment`]s. Variable
//! segments own a nested value template, so the tree only ever grows
//! downwards and carries no back-references.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::parser::{parse, ParseError};

/// The parse result for one path string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Segments in path-matching order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Top-level variable bindings, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.segments.iter().filter_map(Segment::as_variable)
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Renders the template back from the raw text of each segment.
impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment.raw)?;
        }
        Ok(())
    }
}

impl FromStr for PathTemplate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// One slash-delimited unit of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    /// Exact input text that produced this segment.
    raw: String,
    #[serde(flatten)]
    kind: SegmentKind,
}

/// What a segment matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentKind {
    /// Matches its raw text exactly.
    Literal,
    /// `*`: exactly one path element.
    SingleWildcard,
    /// `**`: one or more remaining path elements, greedy.
    DoubleWildcard,
    /// `{field.path=value}`: binds the matched text to a request field.
    Variable(Variable),
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            raw: text.into(),
            kind: SegmentKind::Literal,
        }
    }

    pub fn single_wildcard() -> Self {
        Self {
            raw: "*".to_string(),
            kind: SegmentKind::SingleWildcard,
        }
    }

    pub fn double_wildcard() -> Self {
        Self {
            raw: "**".to_string(),
            kind: SegmentKind::DoubleWildcard,
        }
    }

    /// Create a variable segment. `raw` is the whole `{...}` text.
    pub fn variable(raw: impl Into<String>, variable: Variable) -> Self {
        Self {
            raw: raw.into(),
            kind: SegmentKind::Variable(variable),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    /// The binding metadata, present only on variable segments.
    pub fn as_variable(&self) -> Option<&Variable> {
        match &self.kind {
            SegmentKind::Variable(variable) => Some(variable),
            _ => None,
        }
    }
}

/// Binding metadata attached to a variable segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Variable {
    field_path: Vec<String>,
    value_template: Vec<Segment>,
}

impl Variable {
    pub fn new(field_path: Vec<String>, value_template: Vec<Segment>) -> Self {
        Self {
            field_path,
            value_template,
        }
    }

    /// Dotted field access path into the request message. Never empty.
    pub fn field_path(&self) -> &[String] {
        &self.field_path
    }

    /// The field path joined back with `.`.
    pub fn field_name(&self) -> String {
        self.field_path.join(".")
    }

    /// What the variable may match; `[*]` when the source gave no pattern.
    pub fn value_template(&self) -> &[Segment] {
        &self.value_template
    }
}
