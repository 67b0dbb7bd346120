//! HTTP rule bindings for RPC methods.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::verb::split_verb;
use crate::template::{parse, ParseError, PathTemplate};

/// Errors raised while building an [`HttpRule`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// More than one of get/post/put/patch/delete/custom is set.
    #[error("rule `{selector}` sets more than one pattern: {}", .methods.join(", "))]
    MultiplePatterns {
        selector: String,
        methods: Vec<String>,
    },
}

/// A custom HTTP method and its path, for verbs outside the standard set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomPattern {
    /// HTTP method name, e.g. `HEAD`.
    pub kind: String,
    /// Path template, possibly with a trailing `:verb`.
    pub path: String,
}

/// The HTTP method and path a rule binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpPattern {
    Get(String),
    Post(String),
    Put(String),
    Patch(String),
    Delete(String),
    Custom(CustomPattern),
}

impl HttpPattern {
    /// The HTTP method name.
    pub fn method(&self) -> &str {
        match self {
            HttpPattern::Get(_) => "GET",
            HttpPattern::Post(_) => "POST",
            HttpPattern::Put(_) => "PUT",
            HttpPattern::Patch(_) => "PATCH",
            HttpPattern::Delete(_) => "DELETE",
            HttpPattern::Custom(custom) => &custom.kind,
        }
    }

    /// The raw path, verb included.
    pub fn path(&self) -> &str {
        match self {
            HttpPattern::Get(path)
            | HttpPattern::Post(path)
            | HttpPattern::Put(path)
            | HttpPattern::Patch(path)
            | HttpPattern::Delete(path) => path,
            HttpPattern::Custom(custom) => &custom.path,
        }
    }

    /// The path with any trailing `:verb` removed.
    pub fn template_path(&self) -> &str {
        split_verb(self.path()).0
    }

    /// The trailing `:verb`, if any.
    pub fn verb(&self) -> Option<&str> {
        split_verb(self.path()).1
    }
}

/// Maps an RPC method onto an HTTP method and path template.
///
/// Deserializes from the flattened service-config form:
///
/// ```toml
/// selector = "example.Messaging.GetMessage"
/// get = "/v1/{name=messages/*}"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawHttpRule", into = "RawHttpRule")]
pub struct HttpRule {
    /// Fully-qualified method name this rule applies to.
    pub selector: String,

    /// `None` when the rule binds no HTTP pattern.
    pub pattern: Option<HttpPattern>,

    /// Request field mapped to the HTTP body (`*` for the whole message).
    pub body: Option<String>,

    /// Response field mapped to the HTTP body.
    pub response_body: Option<String>,

    /// Extra bindings for the same method.
    pub additional_bindings: Vec<HttpRule>,
}

impl HttpRule {
    pub fn new(selector: impl Into<String>, pattern: HttpPattern) -> Self {
        Self {
            selector: selector.into(),
            pattern: Some(pattern),
            body: None,
            response_body: None,
            additional_bindings: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_additional_binding(mut self, binding: HttpRule) -> Self {
        self.additional_bindings.push(binding);
        self
    }

    /// Parse the rule's path into a template.
    ///
    /// Returns `Ok(None)` when the rule has no pattern. A trailing verb is
    /// removed before parsing.
    pub fn path_template(&self) -> Result<Option<PathTemplate>, ParseError> {
        let Some(pattern) = &self.pattern else {
            tracing::trace!(selector = %self.selector, "Rule has no HTTP pattern");
            return Ok(None);
        };

        tracing::debug!(
            selector = %self.selector,
            method = pattern.method(),
            path = pattern.path(),
            "Parsing path template"
        );

        parse(pattern.template_path()).map(Some)
    }

    /// This rule followed by its additional bindings.
    pub fn bindings(&self) -> impl Iterator<Item = &HttpRule> {
        std::iter::once(self).chain(self.additional_bindings.iter())
    }
}

/// Wire form of [`HttpRule`], with one optional field per HTTP method.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawHttpRule {
    #[serde(default)]
    selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    get: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    put: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    patch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom: Option<CustomPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    additional_bindings: Vec<HttpRule>,
}

impl TryFrom<RawHttpRule> for HttpRule {
    type Error = RuleError;

    fn try_from(raw: RawHttpRule) -> Result<Self, Self::Error> {
        let mut patterns: Vec<HttpPattern> = [
            raw.get.map(HttpPattern::Get),
            raw.post.map(HttpPattern::Post),
            raw.put.map(HttpPattern::Put),
            raw.patch.map(HttpPattern::Patch),
            raw.delete.map(HttpPattern::Delete),
            raw.custom.map(HttpPattern::Custom),
        ]
        .into_iter()
        .flatten()
        .collect();

        if patterns.len() > 1 {
            return Err(RuleError::MultiplePatterns {
                selector: raw.selector,
                methods: patterns.iter().map(|p| p.method().to_string()).collect(),
            });
        }

        Ok(Self {
            selector: raw.selector,
            pattern: patterns.pop(),
            body: raw.body,
            response_body: raw.response_body,
            additional_bindings: raw.additional_bindings,
        })
    }
}

impl From<HttpRule> for RawHttpRule {
    fn from(rule: HttpRule) -> Self {
        let mut raw = RawHttpRule {
            selector: rule.selector,
            body: rule.body,
            response_body: rule.response_body,
            additional_bindings: rule.additional_bindings,
            ..Default::default()
        };

        match rule.pattern {
            Some(HttpPattern::Get(path)) => raw.get = Some(path),
            Some(HttpPattern::Post(path)) => raw.post = Some(path),
            Some(HttpPattern::Put(path)) => raw.put = Some(path),
            Some(HttpPattern::Patch(path)) => raw.patch = Some(path),
            Some(HttpPattern::Delete(path)) => raw.delete = Some(path),
            Some(HttpPattern::Custom(custom)) => raw.custom = Some(custom),
            None => {}
        }

        raw
    }
}
