//! Fetch error taxonomy.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by the fetch client and the aggregator.
///
/// Only [`FetchError::Timeout`] and [`FetchError::Transport`] are recoverable;
/// they advance the strategy ladder. Everything else is returned to the caller
/// as soon as it is observed.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// HTTP 401 from the target API.
    #[error("invalid credential (HTTP 401)")]
    InvalidCredential,

    /// HTTP 403 from the target API.
    #[error("access denied (HTTP 403)")]
    AccessDenied,

    /// HTTP 404, usually a wrong base URL.
    #[error("not found (HTTP 404)")]
    NotFound,

    /// Any other non-success status.
    #[error("API error: HTTP {status}")]
    Api { status: u16 },

    /// A single attempt produced no response before its deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not complete at the transport level.
    #[error("transport error: {0}")]
    Transport(String),

    /// Every strategy failed with a recoverable error on every pass.
    #[error("connectivity exhausted after {attempts} attempts over {passes} passes (last error: {last})")]
    ConnectivityExhausted {
        passes: u32,
        attempts: u32,
        last: Box<FetchError>,
    },

    /// The base URL could not be normalized.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A payload did not have the shape the caller needs.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => FetchError::InvalidCredential,
            403 => FetchError::AccessDenied,
            404 => FetchError::NotFound,
            _ => FetchError::Api { status },
        }
    }

    /// True when the ladder should move on to the next strategy.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::Timeout(_) | FetchError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(FetchError::from_status(401), FetchError::InvalidCredential));
        assert!(matches!(FetchError::from_status(403), FetchError::AccessDenied));
        assert!(matches!(FetchError::from_status(404), FetchError::NotFound));
        assert!(matches!(
            FetchError::from_status(502),
            FetchError::Api { status: 502 }
        ));
    }

    #[test]
    fn test_only_transport_failures_recover() {
        assert!(FetchError::Timeout(Duration::from_secs(30)).is_recoverable());
        assert!(FetchError::Transport("refused".into()).is_recoverable());
        assert!(!FetchError::InvalidCredential.is_recoverable());
        assert!(!FetchError::Api { status: 500 }.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::Api { status: 418 };
        assert_eq!(err.to_string(), "API error: HTTP 418");

        let err = FetchError::ConnectivityExhausted {
            passes: 3,
            attempts: 12,
            last: Box::new(FetchError::Transport("connection refused".into())),
        };
        assert!(err.to_string().contains("12 attempts"));
        assert!(err.to_string().contains("connection refused"));
    }
}
