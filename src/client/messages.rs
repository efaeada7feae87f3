//! Human-readable error messages.
//!
//! Kept apart from [`FetchError`] so a front end can swap the wording without
//! touching classification.

use crate::client::error::FetchError;

/// Message category; each error variant maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    BadToken,
    Forbidden,
    BadUrl,
    ConnectivityExhausted,
    Connectivity,
    Generic,
}

impl ErrorCategory {
    pub fn of(error: &FetchError) -> Self {
        match error {
            FetchError::InvalidCredential => ErrorCategory::BadToken,
            FetchError::AccessDenied => ErrorCategory::Forbidden,
            FetchError::NotFound | FetchError::InvalidBaseUrl(_) => ErrorCategory::BadUrl,
            FetchError::ConnectivityExhausted { .. } => ErrorCategory::ConnectivityExhausted,
            FetchError::Timeout(_) | FetchError::Transport(_) => ErrorCategory::Connectivity,
            FetchError::Api { .. } | FetchError::UnexpectedPayload(_) => ErrorCategory::Generic,
        }
    }
}

/// Turns an error into text for a person.
pub trait MessageCatalog {
    fn message(&self, category: ErrorCategory, error: &FetchError) -> String;
}

/// English messages naming the likely cause.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMessages;

impl MessageCatalog for DefaultMessages {
    fn message(&self, category: ErrorCategory, error: &FetchError) -> String {
        match category {
            ErrorCategory::BadToken => {
                "Invalid access token. Generate a new token in your account settings and try again."
                    .to_string()
            }
            ErrorCategory::Forbidden => {
                "Access denied. The token does not have permission for this resource.".to_string()
            }
            ErrorCategory::BadUrl => {
                "Instance not found. Check the base URL (for example school.instructure.com)."
                    .to_string()
            }
            ErrorCategory::ConnectivityExhausted => {
                "Could not reach the server after several retries through every relay. Check your connection and try again later."
                    .to_string()
            }
            ErrorCategory::Connectivity => format!("Could not reach the server: {}", error),
            ErrorCategory::Generic => format!("Request failed: {}", error),
        }
    }
}

/// Describe an error with the default catalog.
pub fn describe(error: &FetchError) -> String {
    DefaultMessages.message(ErrorCategory::of(error), error)
}
