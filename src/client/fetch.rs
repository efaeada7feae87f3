//! The resilient fetch client.
//!
//! # Data Flow
//! ```text
//! fetch(endpoint, base_url, credential)
//!     → url.rs (normalize base, build target = cache key)
//!     → cache.rs (fresh hit → return, no I/O)
//!     → ladder loop:
//!         strategy.request_url(target)
//!         → timeouts.rs (per-attempt deadline)
//!         → transport.rs (GET with bearer credential)
//!         → 2xx: parse JSON, write cache, return
//!         → non-2xx: terminal, return
//!         → transport failure: ladder.rs advance (pause between passes)
//! ```

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::client::cache::ResponseCache;
use crate::client::clock::Clock;
use crate::client::error::{FetchError, FetchResult};
use crate::client::relay::{build_ladder, Ladder, TransportStrategy};
use crate::client::transport::{HttpSend, ReqwestSender};
use crate::client::url::{normalize_base_url, target_url};
use crate::config::schema::FetchConfig;
use crate::observability::metrics;
use crate::resilience::ladder::{LadderState, Step};
use crate::resilience::timeouts::with_deadline;

/// Pass count, pause and per-attempt deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub passes: u32,
    pub pass_delay: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            passes: 3,
            pass_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            passes: config.retries.passes,
            pass_delay: Duration::from_millis(config.retries.pass_delay_ms),
            attempt_timeout: Duration::from_secs(config.timeouts.attempt_secs),
        }
    }
}

/// JSON fetch client with a strategy ladder and a response cache.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct FetchClient {
    sender: Arc<dyn HttpSend>,
    ladder: Ladder,
    cache: ResponseCache,
    policy: RetryPolicy,
    identity_endpoint: String,
}

impl FetchClient {
    pub fn new(
        sender: Arc<dyn HttpSend>,
        ladder: Ladder,
        cache: ResponseCache,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            sender,
            ladder,
            cache,
            policy,
            identity_endpoint: crate::config::ApiConfig::default().identity_endpoint,
        }
    }

    /// Build a `reqwest`-backed client from configuration.
    pub fn from_config(config: &FetchConfig) -> FetchResult<Self> {
        let sender = Arc::new(ReqwestSender::new()?);
        let cache = ResponseCache::new(Duration::from_secs(config.cache.freshness_secs));
        Ok(Self::from_parts(config, sender, cache))
    }

    /// Build from configuration with an explicit sender and clock.
    pub fn with_sender(config: &FetchConfig, sender: Arc<dyn HttpSend>, clock: Arc<dyn Clock>) -> Self {
        let cache =
            ResponseCache::with_clock(Duration::from_secs(config.cache.freshness_secs), clock);
        Self::from_parts(config, sender, cache)
    }

    fn from_parts(config: &FetchConfig, sender: Arc<dyn HttpSend>, cache: ResponseCache) -> Self {
        Self::new(sender, build_ladder(&config.ladder), cache, RetryPolicy::from(config))
            .with_identity_endpoint(config.api.identity_endpoint.clone())
    }

    /// Override the endpoint used by [`validate_credential`](Self::validate_credential).
    pub fn with_identity_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.identity_endpoint = endpoint.into();
        self
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn ladder(&self) -> &[Arc<dyn TransportStrategy>] {
        &self.ladder
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch `endpoint` under `base_url`, serving fresh cached payloads without I/O.
    pub async fn fetch(&self, endpoint: &str, base_url: &str, credential: &str) -> FetchResult<Value> {
        let base = normalize_base_url(base_url)?;
        let target = target_url(&base, endpoint);

        if let Some(payload) = self.cache.get_fresh(&target) {
            tracing::debug!(url = %target, "Serving cached response");
            return Ok(payload);
        }

        let payload = self.run_ladder(&target, credential).await?;
        self.cache.insert(target, payload.clone());
        Ok(payload)
    }

    /// Exercise the credential once against the identity endpoint.
    ///
    /// Always goes to the network. Returns the normalized base URL.
    pub async fn validate_credential(&self, base_url: &str, credential: &str) -> FetchResult<String> {
        let base = normalize_base_url(base_url)?;
        self.run_ladder(&target_url(&base, &self.identity_endpoint), credential)
            .await?;
        tracing::info!(base_url = %base, "Credential validated");
        Ok(base)
    }

    async fn run_ladder(&self, target: &str, credential: &str) -> FetchResult<Value> {
        let mut state = LadderState::new(self.ladder.len(), self.policy.passes);
        let Some(mut position) = state.first() else {
            return Err(FetchError::ConnectivityExhausted {
                passes: 0,
                attempts: 0,
                last: Box::new(FetchError::Transport(
                    "no transport strategies configured".to_string(),
                )),
            });
        };
        let mut attempts = 0u32;

        loop {
            let strategy = self.ladder[position.strategy].as_ref();
            attempts += 1;

            let error = match self.attempt(strategy, target, credential).await {
                Ok(payload) => {
                    metrics::record_attempt(strategy.name(), "success");
                    tracing::debug!(
                        strategy = strategy.name(),
                        pass = position.pass + 1,
                        attempts,
                        "Fetch succeeded"
                    );
                    return Ok(payload);
                }
                Err(e) if !e.is_recoverable() => {
                    metrics::record_attempt(strategy.name(), "terminal");
                    tracing::warn!(strategy = strategy.name(), url = %target, error = %e, "Terminal API error");
                    return Err(e);
                }
                Err(e) => e,
            };

            let outcome = match &error {
                FetchError::Timeout(_) => "timeout",
                _ => "transport",
            };
            metrics::record_attempt(strategy.name(), outcome);
            tracing::warn!(
                strategy = strategy.name(),
                pass = position.pass + 1,
                error = %error,
                "Attempt failed, trying next strategy"
            );

            match state.advance() {
                Step::Next(next) => position = next,
                Step::NextPass(next) => {
                    tracing::info!(
                        next_pass = next.pass + 1,
                        delay_ms = self.policy.pass_delay.as_millis() as u64,
                        "Ladder exhausted, restarting after pause"
                    );
                    tokio::time::sleep(self.policy.pass_delay).await;
                    position = next;
                }
                Step::Exhausted => {
                    metrics::record_exhausted();
                    tracing::error!(url = %target, attempts, "All strategies failed on every pass");
                    return Err(FetchError::ConnectivityExhausted {
                        passes: position.pass + 1,
                        attempts,
                        last: Box::new(error),
                    });
                }
            }
        }
    }

    async fn attempt(
        &self,
        strategy: &dyn TransportStrategy,
        target: &str,
        credential: &str,
    ) -> FetchResult<Value> {
        let url = strategy.request_url(target);
        let reply = with_deadline(self.policy.attempt_timeout, self.sender.get(&url, credential)).await?;

        if !reply.is_success() {
            return Err(FetchError::from_status(reply.status));
        }

        serde_json::from_str(&reply.body)
            .map_err(|e| FetchError::Transport(format!("response body is not JSON: {}", e)))
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.ladder.iter().map(|s| s.name()).collect();
        f.debug_struct("FetchClient")
            .field("ladder", &names)
            .field("policy", &self.policy)
            .field("cache", &self.cache)
            .finish()
    }
}
