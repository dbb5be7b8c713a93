//! Server Configuration
//!
//! Defaults layered under `DTCLENS__*` environment overrides, e.g.
//! `DTCLENS__KNOWLEDGE__API_KEY` or `DTCLENS__BIND_ADDR`.

use crate::rate_limit::RateLimitConfig;
use knowledge::KnowledgeConfig;
use resolver::ResolverConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to serve on
    pub bind_addr: String,
    pub knowledge: KnowledgeConfig,
    pub resolver: ResolverConfig,
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            knowledge: KnowledgeConfig::default(),
            resolver: ResolverConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults plus environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::Environment::with_prefix("DTCLENS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
