//! Resolution Pipeline
//!
//! The four-step path from raw input to a well-formed record: normalize,
//! validate format, consult the cache, then the external source. Every
//! failure mode degrades to the fallback record; `resolve` never fails.

use crate::store::SessionStore;
use dtc_model::{normalize, DiagnosticRecord, DtcCode};
use knowledge::{KnowledgeSource, LookupRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

/// Pause before returning a cache hit, for frontend pacing
const DEFAULT_CACHE_HIT_DELAY_MS: u64 = 400;

/// Deadline for a single external lookup
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 8_000;

/// Tunables for the resolution pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Delay applied to cache hits so instant answers don't look broken
    /// in the UI. Purely cosmetic.
    pub cache_hit_delay_ms: u64,
    /// Bound on the external lookup; expiry degrades to the fallback
    pub lookup_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_hit_delay_ms: DEFAULT_CACHE_HIT_DELAY_MS,
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl ResolverConfig {
    /// No pacing delay; used by tests and batch callers
    pub fn immediate() -> Self {
        Self {
            cache_hit_delay_ms: 0,
            ..Default::default()
        }
    }
}

/// Resolves raw user-entered codes into diagnostic records.
///
/// Holds the session's store and the knowledge source seam. All failure
/// modes produce the sentinel-categorized fallback record; callers never
/// see an error.
pub struct Resolver {
    store: Arc<SessionStore>,
    source: Arc<dyn KnowledgeSource>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(
        store: Arc<SessionStore>,
        source: Arc<dyn KnowledgeSource>,
        config: ResolverConfig,
    ) -> Self {
        Self { store, source, config }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Resolve a raw code string to a diagnostic record.
    pub async fn resolve(
        &self,
        raw_code: &str,
        vehicle_context: Option<&str>,
    ) -> DiagnosticRecord {
        let code = match DtcCode::parse(raw_code) {
            Ok(code) => code,
            Err(err) => {
                debug!(raw = raw_code, %err, "rejected malformed code");
                return DiagnosticRecord::unknown(&normalize(raw_code));
            }
        };

        if let Some(record) = self.store.get(code.as_str()) {
            debug!(code = %code, "cache hit");
            if self.config.cache_hit_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.cache_hit_delay_ms)).await;
            }
            self.store.record_lookup(&record.code, &record.title);
            return record;
        }

        let request = LookupRequest {
            code: code.as_str().to_string(),
            vehicle_context: vehicle_context.map(str::to_string),
        };

        let deadline = Duration::from_millis(self.config.lookup_timeout_ms);
        match timeout(deadline, self.source.lookup(&request)).await {
            Ok(Ok(mut record)) => {
                // Key the record by the code we looked up, whatever the
                // source echoed back.
                record.code = code.into_string();
                if record.is_unknown() {
                    debug!(code = %record.code, "source classified code as unknown");
                    return record;
                }
                info!(code = %record.code, "resolved externally");
                self.store.insert(record.clone());
                self.store.record_lookup(&record.code, &record.title);
                record
            }
            Ok(Err(err)) => {
                warn!(code = %code, %err, "external lookup failed");
                DiagnosticRecord::unknown(code.as_str())
            }
            Err(_) => {
                warn!(
                    code = %code,
                    timeout_ms = self.config.lookup_timeout_ms,
                    "external lookup timed out"
                );
                DiagnosticRecord::unknown(code.as_str())
            }
        }
    }
}
