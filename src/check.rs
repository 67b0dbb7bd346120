//! Rules file and pattern checking.
//!
//! # Responsibilities
//! - Parse every binding of every rule, continuing past failures
//! - Parse a list of bare patterns the same way
//! - Collect config-level problems (selectors, nesting)
//! - Produce serializable reports for the CLI
//!
//! # Design Decisions
//! - A failed binding is recorded, never fatal to the run
//! - Report order follows rule order, then binding order

use serde::Serialize;

use crate::config::{validate_config, ToolConfig};
use crate::rule::HttpRule;
use crate::template::{parse, PathTemplate, Segment};

/// Outcome for one binding of one rule.
#[derive(Debug, Clone, Serialize)]
pub struct BindingReport {
    pub selector: String,
    pub method: Option<String>,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BindingReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome for a whole rules file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub bindings: Vec<BindingReport>,
    /// Every validation problem, including template errors.
    pub problems: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn failed_bindings(&self) -> usize {
        self.bindings.iter().filter(|b| !b.is_ok()).count()
    }
}

/// Check every rule in `config`.
pub fn check_config(config: &ToolConfig) -> CheckReport {
    let bindings = config
        .http
        .rules
        .iter()
        .flat_map(|rule| rule.bindings().map(move |binding| check_binding(&rule.selector, binding)))
        .collect();

    let problems = match validate_config(config) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    };

    CheckReport { bindings, problems }
}

/// Outcome for one pattern given on the command line.
#[derive(Debug, Clone, Serialize)]
pub struct PatternReport {
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PatternReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome for a list of patterns; serializes as a JSON array.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ParseReport {
    pub patterns: Vec<PatternReport>,
}

impl ParseReport {
    pub fn is_ok(&self) -> bool {
        self.patterns.iter().all(PatternReport::is_ok)
    }

    pub fn failed(&self) -> usize {
        self.patterns.iter().filter(|p| !p.is_ok()).count()
    }
}

/// Parse every pattern, recording failures instead of stopping at them.
pub fn parse_patterns<S: AsRef<str>>(patterns: &[S]) -> ParseReport {
    let patterns = patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            match parse(pattern) {
                Ok(template) => PatternReport {
                    pattern: pattern.to_string(),
                    segments: Some(template.into_segments()),
                    error: None,
                },
                Err(e) => {
                    tracing::error!(pattern, error = %e, "Failed to parse path template");
                    PatternReport {
                        pattern: pattern.to_string(),
                        segments: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    ParseReport { patterns }
}

fn check_binding(selector: &str, binding: &HttpRule) -> BindingReport {
    let pattern = binding.pattern.as_ref();
    let mut report = BindingReport {
        selector: selector.to_string(),
        method: pattern.map(|p| p.method().to_string()),
        path: pattern.map(|p| p.path().to_string()),
        verb: pattern.and_then(|p| p.verb()).map(str::to_string),
        template: None,
        error: None,
    };

    match binding.path_template() {
        Ok(template) => report.template = template,
        Err(e) => {
            tracing::warn!(selector, error = %e, "Invalid path template");
            report.error = Some(e.to_string());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::HttpPattern;

    #[test]
    fn test_check_continues_past_failures() {
        let mut config = ToolConfig::default();
        config.http.rules = vec![
            HttpRule::new("a.S.Broken", HttpPattern::Get("/v1/{name".into())),
            HttpRule::new("a.S.Get", HttpPattern::Get("/v1/{name=things/*}:view".into()))
                .with_additional_binding(HttpRule::new("", HttpPattern::Get("/v2/{name=things/*}".into()))),
        ];

        let report = check_config(&config);
        assert!(!report.is_ok());
        assert_eq!(report.bindings.len(), 3);
        assert_eq!(report.failed_bindings(), 1);
        assert_eq!(report.problems.len(), 1);

        let first = &report.bindings[0];
        assert!(first.template.is_none());
        assert!(first.error.as_deref().unwrap().contains("unterminated variable"));

        let second = &report.bindings[1];
        assert_eq!(second.verb.as_deref(), Some("view"));
        assert_eq!(second.template.as_ref().unwrap().to_string(), "/v1/{name=things/*}");

        let third = &report.bindings[2];
        assert_eq!(third.selector, "a.S.Get");
        assert_eq!(third.method.as_deref(), Some("GET"));
    }

    #[test]
    fn test_check_clean_config() {
        let mut config = ToolConfig::default();
        config.http.rules = vec![HttpRule::new("a.S.List", HttpPattern::Get("/v1/things".into()))];

        let report = check_config(&config);
        assert!(report.is_ok());
        assert_eq!(report.failed_bindings(), 0);
    }

    #[test]
    fn test_parse_patterns_reports_every_entry() {
        let report = parse_patterns(&["/v1/{id}", "/v1/{name"]);
        assert!(!report.is_ok());
        assert_eq!(report.patterns.len(), 2);
        assert_eq!(report.failed(), 1);

        let good = &report.patterns[0];
        assert_eq!(good.pattern, "/v1/{id}");
        assert_eq!(good.segments.as_ref().unwrap().len(), 2);
        assert!(good.error.is_none());

        let bad = &report.patterns[1];
        assert_eq!(bad.pattern, "/v1/{name");
        assert!(bad.segments.is_none());
        assert!(bad.error.as_deref().unwrap().contains("unterminated variable"));

        let json = serde_json::to_value(&report).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].get("segments").is_some());
        assert!(entries[0].get("error").is_none());
        assert!(entries[1].get("error").is_some());
        assert!(entries[1].get("segments").is_none());
    }

    #[test]
    fn test_parse_patterns_all_valid() {
        let report = parse_patterns(&["/v1/things", "/v1/{name=things/*}"]);
        assert!(report.is_ok());
        assert_eq!(report.failed(), 0);
    }
}
