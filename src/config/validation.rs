//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check selectors are present and unique
//! - Parse every binding's path template
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ToolConfig → Result<(), Vec<ValidationError>>
//! - A bad template in one rule does not stop the others from being checked

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::ToolConfig;
use crate::rule::HttpRule;
use crate::template::ParseError;

/// A single semantic problem in a rules file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Rule at `index` has no selector.
    #[error("rule #{index} has an empty selector")]
    EmptySelector { index: usize },

    /// Two rules share a selector.
    #[error("duplicate selector `{selector}`")]
    DuplicateSelector { selector: String },

    /// An additional binding has bindings of its own.
    #[error("additional binding of `{selector}` must not contain additional bindings")]
    NestedAdditionalBindings { selector: String },

    /// A binding's path does not parse.
    #[error("rule `{selector}`: {source}")]
    InvalidTemplate {
        selector: String,
        #[source]
        source: ParseError,
    },
}

/// Validate the whole configuration.
pub fn validate_config(config: &ToolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, rule) in config.http.rules.iter().enumerate() {
        if rule.selector.is_empty() {
            errors.push(ValidationError::EmptySelector { index });
        } else if !seen.insert(rule.selector.as_str()) {
            errors.push(ValidationError::DuplicateSelector {
                selector: rule.selector.clone(),
            });
        }

        errors.extend(validate_rule(rule));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate one rule and its additional bindings.
pub fn validate_rule(rule: &HttpRule) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if rule
        .additional_bindings
        .iter()
        .any(|binding| !binding.additional_bindings.is_empty())
    {
        errors.push(ValidationError::NestedAdditionalBindings {
            selector: rule.selector.clone(),
        });
    }

    for binding in rule.bindings() {
        if let Err(source) = binding.path_template() {
            errors.push(ValidationError::InvalidTemplate {
                selector: rule.selector.clone(),
                source,
            });
        }
    }

    errors
}
