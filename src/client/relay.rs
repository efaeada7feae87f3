//! Transport strategies: ways of reaching a target URL.
//!
//! # Design Decisions
//! - A strategy only rewrites the URL; sending is done by [`HttpSend`](crate::client::transport::HttpSend)
//! - Relays are described by templates so the ladder can be configured in TOML
//! - Order in the ladder is the order of attempts

use std::sync::Arc;

use crate::config::schema::{LadderConfig, RelayConfig};

/// Placeholder replaced by the percent-encoded target URL.
pub const ENCODED_PLACEHOLDER: &str = "{url}";
/// Placeholder replaced by the target URL as-is.
pub const RAW_PLACEHOLDER: &str = "{raw_url}";

/// Maps a target URL to the URL actually requested.
pub trait TransportStrategy: Send + Sync + std::fmt::Debug {
    /// Name used in logs and metrics.
    fn name(&self) -> &str;

    fn request_url(&self, target: &str) -> String;
}

/// Request the target directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct Direct;

impl TransportStrategy for Direct {
    fn name(&self) -> &str {
        "direct"
    }

    fn request_url(&self, target: &str) -> String {
        target.to_string()
    }
}

/// A third-party passthrough relay described by a URL template.
#[derive(Debug, Clone)]
pub struct Relay {
    name: String,
    template: String,
}

impl Relay {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }
}

impl TransportStrategy for Relay {
    fn name(&self) -> &str {
        &self.name
    }

    fn request_url(&self, target: &str) -> String {
        self.template
            .replace(ENCODED_PLACEHOLDER, &urlencoding::encode(target))
            .replace(RAW_PLACEHOLDER, target)
    }
}

impl From<&RelayConfig> for Relay {
    fn from(config: &RelayConfig) -> Self {
        Relay::new(config.name.clone(), config.template.clone())
    }
}

/// Shared, ordered list of strategies.
pub type Ladder = Vec<Arc<dyn TransportStrategy>>;

/// Build the ladder described by configuration.
pub fn build_ladder(config: &LadderConfig) -> Ladder {
    let mut ladder: Ladder = Vec::with_capacity(config.relays.len() + 1);
    if config.direct {
        ladder.push(Arc::new(Direct));
    }
    for relay in &config.relays {
        ladder.push(Arc::new(Relay::from(relay)));
    }
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "https://school.instructure.com/api/v1/courses?per_page=100";

    #[test]
    fn test_direct_is_identity() {
        assert_eq!(Direct.request_url(TARGET), TARGET);
    }

    #[test]
    fn test_relay_encodes_target() {
        let relay = Relay::new("allorigins", "https://api.allorigins.win/raw?url={url}");
        assert_eq!(
            relay.request_url(TARGET),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fschool.instructure.com%2Fapi%2Fv1%2Fcourses%3Fper_page%3D100"
        );
    }

    #[test]
    fn test_relay_raw_placeholder() {
        let relay = Relay::new("anywhere", "https://cors-anywhere.herokuapp.com/{raw_url}");
        assert_eq!(
            relay.request_url(TARGET),
            format!("https://cors-anywhere.herokuapp.com/{}", TARGET)
        );
    }

    #[test]
    fn test_default_ladder_order() {
        let ladder = build_ladder(&LadderConfig::default());
        let names: Vec<&str> = ladder.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["direct", "corsproxy", "allorigins", "cors-anywhere"]);
    }

    #[test]
    fn test_ladder_without_direct() {
        let config = LadderConfig {
            direct: false,
            ..LadderConfig::default()
        };
        let ladder = build_ladder(&config);
        assert_eq!(ladder.len(), 3);
        assert_eq!(ladder[0].name(), "corsproxy");
    }
}
