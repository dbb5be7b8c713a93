//! Client Session Management
//!
//! Each frontend session owns a seeded store, a resolver bound to it, and
//! at most one advisor conversation. Sessions live in memory and are
//! swept once they sit idle past the TTL.

use assistant::AdvisorSession;
use dtc_model::DiagnosticRecord;
use knowledge::{ChatModel, KnowledgeSource};
use resolver::{Resolver, ResolverConfig, SessionStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Sessions idle longer than this are dropped on sweep
const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(1800);

/// State owned by one frontend session
pub struct ClientSession {
    store: Arc<SessionStore>,
    resolver: Resolver,
    chat_model: Arc<dyn ChatModel>,
    advisor: tokio::sync::Mutex<Option<AdvisorSession>>,
    last_vehicle: Mutex<Option<String>>,
    last_seen: Mutex<Instant>,
}

impl ClientSession {
    fn new(
        source: Arc<dyn KnowledgeSource>,
        chat_model: Arc<dyn ChatModel>,
        config: ResolverConfig,
    ) -> Self {
        let store = Arc::new(SessionStore::seeded());
        Self {
            resolver: Resolver::new(Arc::clone(&store), source, config),
            store,
            chat_model,
            advisor: tokio::sync::Mutex::new(None),
            last_vehicle: Mutex::new(None),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Resolve a code through this session's pipeline.
    pub async fn resolve(
        &self,
        raw_code: &str,
        vehicle_context: Option<&str>,
    ) -> DiagnosticRecord {
        if let Some(vehicle) = vehicle_context {
            let mut last = self.last_vehicle.lock().unwrap_or_else(|e| e.into_inner());
            *last = Some(vehicle.to_string());
        }
        self.resolver.resolve(raw_code, vehicle_context).await
    }

    /// Route a chat message to the advisor, re-seeding the conversation
    /// whenever the most recently resolved code has changed.
    pub async fn chat(&self, message: &str) -> String {
        let current_code = self.store.history().first().map(|e| e.code.clone());
        let vehicle = self
            .last_vehicle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let mut advisor = self.advisor.lock().await;
        let stale = match (advisor.as_ref(), current_code.as_deref()) {
            (Some(session), Some(code)) => session.code() != Some(code),
            (None, Some(_)) => true,
            _ => false,
        };
        if stale {
            debug!(code = ?current_code, "seeding advisor session");
            *advisor = Some(AdvisorSession::new(
                Arc::clone(&self.chat_model),
                current_code.as_deref(),
                vehicle.as_deref(),
            ));
        }
        let session = advisor.get_or_insert_with(|| {
            AdvisorSession::new(Arc::clone(&self.chat_model), None, None)
        });
        session.send(message).await
    }

    fn touch(&self) {
        let mut last_seen = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        *last_seen = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        let last_seen = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        last_seen.elapsed()
    }
}

/// Registry of live sessions, keyed by UUID.
pub struct SessionManager {
    sessions: Mutex<HashMap<Uuid, Arc<ClientSession>>>,
    source: Arc<dyn KnowledgeSource>,
    chat_model: Arc<dyn ChatModel>,
    resolver_config: ResolverConfig,
    idle_ttl: Duration,
}

impl SessionManager {
    pub fn new(
        source: Arc<dyn KnowledgeSource>,
        chat_model: Arc<dyn ChatModel>,
        resolver_config: ResolverConfig,
    ) -> Self {
        Self::with_idle_ttl(source, chat_model, resolver_config, DEFAULT_IDLE_TTL)
    }

    pub fn with_idle_ttl(
        source: Arc<dyn KnowledgeSource>,
        chat_model: Arc<dyn ChatModel>,
        resolver_config: ResolverConfig,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            source,
            chat_model,
            resolver_config,
            idle_ttl,
        }
    }

    /// Create a new session, sweeping expired ones first.
    pub fn create(&self) -> Uuid {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let ttl = self.idle_ttl;
        sessions.retain(|_, session| session.idle_for() <= ttl);

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            Arc::new(ClientSession::new(
                Arc::clone(&self.source),
                Arc::clone(&self.chat_model),
                self.resolver_config.clone(),
            )),
        );
        info!(session_id = %id, active = sessions.len(), "session created");
        id
    }

    /// Fetch a live session, refreshing its idle clock.
    pub fn get(&self, id: &Uuid) -> Option<Arc<ClientSession>> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match sessions.get(id) {
            Some(session) if session.idle_for() <= self.idle_ttl => {
                session.touch();
                return Some(Arc::clone(session));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            debug!(session_id = %id, "dropping expired session");
            sessions.remove(id);
        }
        None
    }

    pub fn count(&self) -> usize {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge::{MockChatModel, MockKnowledgeSource};

    fn manager_with_ttl(ttl: Duration) -> SessionManager {
        SessionManager::with_idle_ttl(
            Arc::new(MockKnowledgeSource::empty()),
            Arc::new(MockChatModel::replying("ok")),
            ResolverConfig::immediate(),
            ttl,
        )
    }

    #[tokio::test]
    async fn created_sessions_are_retrievable() {
        let manager = manager_with_ttl(DEFAULT_IDLE_TTL);
        let id = manager.create();

        assert_eq!(manager.count(), 1);
        let session = manager.get(&id).unwrap();
        assert!(session.store().contains("P0420"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let manager = manager_with_ttl(DEFAULT_IDLE_TTL);
        assert!(manager.get(&Uuid::new_v4()).is_none());
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let manager = manager_with_ttl(Duration::from_millis(10));
        let id = manager.create();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(manager.get(&id).is_none());
        assert_eq!(manager.count(), 0);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let manager = manager_with_ttl(DEFAULT_IDLE_TTL);
        let first = manager.get(&manager.create()).unwrap();
        let second = manager.get(&manager.create()).unwrap();

        first.resolve("P0420", None).await;

        assert_eq!(first.store().history_len(), 1);
        assert_eq!(second.store().history_len(), 0);
    }

    #[tokio::test]
    async fn advisor_reseeds_when_the_code_changes() {
        let manager = manager_with_ttl(DEFAULT_IDLE_TTL);
        let session = manager.get(&manager.create()).unwrap();

        session.resolve("P0420", Some("2014 Honda Accord")).await;
        session.chat("what does this mean?").await;
        {
            let advisor = session.advisor.lock().await;
            assert_eq!(advisor.as_ref().unwrap().code(), Some("P0420"));
        }

        session.resolve("P0300", None).await;
        session.chat("and this one?").await;
        {
            let advisor = session.advisor.lock().await;
            assert_eq!(advisor.as_ref().unwrap().code(), Some("P0300"));
        }
    }

    #[tokio::test]
    async fn chat_works_before_any_resolution() {
        let manager = manager_with_ttl(DEFAULT_IDLE_TTL);
        let session = manager.get(&manager.create()).unwrap();

        let reply = session.chat("hello?").await;
        assert_eq!(reply, "ok");
    }
}
