//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP rate limiting via tower_governor. The Generic Cell Rate
//! Algorithm enforces quotas without background bookkeeping; requires the
//! service to be built with `into_make_service_with_connect_info` so the
//! peer IP is available.

use governor::middleware::StateInformationMiddleware;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config with X-RateLimit-* response headers enabled
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Seconds per replenished request
    pub per_second: u64,
    /// Requests that may be made immediately
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst_size: 10,
        }
    }
}

impl RateLimitConfig {
    /// Tighter quota for the lead submission endpoint
    pub fn strict() -> Self {
        Self {
            per_second: 10,
            burst_size: 2,
        }
    }
}

/// Build a shareable governor config for [`tower_governor::GovernorLayer`].
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.per_second)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_allows_a_browse_burst() {
        let config = RateLimitConfig::default();
        assert_eq!(config.per_second, 1);
        assert_eq!(config.burst_size, 10);
    }

    #[test]
    fn strict_config_is_tighter_than_default() {
        let strict = RateLimitConfig::strict();
        let default = RateLimitConfig::default();
        assert!(strict.burst_size < default.burst_size);
        assert!(strict.per_second > default.per_second);
    }

    #[test]
    fn governor_config_builds() {
        let governor = create_governor_config(&RateLimitConfig::default());
        assert!(Arc::strong_count(&governor) > 0);
    }
}
