//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the fetch client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FetchConfig {
    /// Target instance and credential (usually supplied on the command line).
    pub target: TargetConfig,

    /// Response cache settings.
    pub cache: CacheConfig,

    /// Retry pass settings.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Transport strategy ladder.
    pub ladder: LadderConfig,

    /// Remote API endpoint paths.
    pub api: ApiConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Target instance.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL of the instance, e.g. "school.instructure.com".
    pub base_url: Option<String>,

    /// Bearer token. Prefer the CANVAS_TOKEN environment variable.
    pub token: Option<String>,
}

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Freshness window in seconds.
    pub freshness_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_secs: 300,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total passes over the whole ladder.
    pub passes: u32,

    /// Pause before restarting the ladder, in milliseconds.
    pub pass_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            passes: 3,
            pass_delay_ms: 1000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for a single attempt in seconds.
    pub attempt_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { attempt_secs: 30 }
    }
}

/// Transport strategy ladder.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LadderConfig {
    /// Try the target directly before any relay.
    pub direct: bool,

    /// Relays, tried in order after the direct attempt.
    pub relays: Vec<RelayConfig>,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            direct: true,
            relays: vec![
                RelayConfig {
                    name: "corsproxy".to_string(),
                    template: "https://corsproxy.io/?{url}".to_string(),
                },
                RelayConfig {
                    name: "allorigins".to_string(),
                    template: "https://api.allorigins.win/raw?url={url}".to_string(),
                },
                RelayConfig {
                    name: "cors-anywhere".to_string(),
                    template: "https://cors-anywhere.herokuapp.com/{raw_url}".to_string(),
                },
            ],
        }
    }
}

/// A passthrough relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Identifier for logging/metrics.
    pub name: String,

    /// Request URL template; `{url}` is the percent-encoded target,
    /// `{raw_url}` the unencoded one.
    pub template: String,
}

/// Remote API endpoint paths, relative to the normalized base URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Cheap identity endpoint used to validate a credential.
    pub identity_endpoint: String,

    /// Active course listing.
    pub courses_endpoint: String,

    /// Per-course assignment listing; `{course_id}` is substituted.
    pub assignments_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            identity_endpoint: "/api/v1/users/self".to_string(),
            courses_endpoint: "/api/v1/courses?enrollment_state=active&per_page=100".to_string(),
            assignments_endpoint:
                "/api/v1/courses/{course_id}/assignments?order_by=due_at&per_page=100"
                    .to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus exporter bind address; no exporter when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
