//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (passes > 0, timeouts > 0)
//! - Check relay templates and endpoint paths are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FetchConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::client::relay::{ENCODED_PLACEHOLDER, RAW_PLACEHOLDER};
use crate::config::schema::FetchConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("retries.passes must be at least 1")]
    NoPasses,

    #[error("timeouts.attempt_secs must be greater than 0")]
    ZeroTimeout,

    #[error("ladder has no strategies (direct disabled and no relays)")]
    EmptyLadder,

    #[error("relay '{0}' template has no {{url}} or {{raw_url}} placeholder")]
    RelayWithoutPlaceholder(String),

    #[error("relay names must be unique, '{0}' is repeated")]
    DuplicateRelay(String),

    #[error("api.{0} must start with '/'")]
    EndpointNotAbsolute(&'static str),

    #[error("api.assignments_endpoint must contain {{course_id}}")]
    AssignmentsWithoutCourseId,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FetchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.retries.passes == 0 {
        errors.push(ValidationError::NoPasses);
    }
    if config.timeouts.attempt_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !config.ladder.direct && config.ladder.relays.is_empty() {
        errors.push(ValidationError::EmptyLadder);
    }
    let mut seen = std::collections::HashSet::new();
    for relay in &config.ladder.relays {
        if !relay.template.contains(ENCODED_PLACEHOLDER)
            && !relay.template.contains(RAW_PLACEHOLDER)
        {
            errors.push(ValidationError::RelayWithoutPlaceholder(relay.name.clone()));
        }
        if !seen.insert(relay.name.as_str()) || relay.name == "direct" {
            errors.push(ValidationError::DuplicateRelay(relay.name.clone()));
        }
    }

    let endpoints = [
        ("identity_endpoint", &config.api.identity_endpoint),
        ("courses_endpoint", &config.api.courses_endpoint),
        ("assignments_endpoint", &config.api.assignments_endpoint),
    ];
    for (field, path) in endpoints {
        if !path.starts_with('/') {
            errors.push(ValidationError::EndpointNotAbsolute(field));
        }
    }
    if !config.api.assignments_endpoint.contains("{course_id}") {
        errors.push(ValidationError::AssignmentsWithoutCourseId);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RelayConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FetchConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = FetchConfig::default();
        config.retries.passes = 0;
        config.timeouts.attempt_secs = 0;
        config.ladder.relays.push(RelayConfig {
            name: "corsproxy".into(),
            template: "https://relay.example/".into(),
        });
        config.api.courses_endpoint = "api/v1/courses".into();
        config.api.assignments_endpoint = "/api/v1/assignments".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NoPasses));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::RelayWithoutPlaceholder("corsproxy".into())));
        assert!(errors.contains(&ValidationError::DuplicateRelay("corsproxy".into())));
        assert!(errors.contains(&ValidationError::EndpointNotAbsolute("courses_endpoint")));
        assert!(errors.contains(&ValidationError::AssignmentsWithoutCourseId));
    }

    #[test]
    fn test_empty_ladder_rejected() {
        let mut config = FetchConfig::default();
        config.ladder.direct = false;
        config.ladder.relays.clear();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::EmptyLadder]
        );
    }
}
