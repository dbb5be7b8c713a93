//! DTC Lookup API Server
//!
//! REST surface for the code lookup frontend: session management, the
//! resolution pipeline, lookup history, advisory chat, lead intake, and a
//! browsable catalog.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod rate_limit;
mod routes;
mod session;

pub use config::ServerConfig;
pub use error::ApiError;
pub use rate_limit::RateLimitConfig;
pub use session::{ClientSession, SessionManager};

use knowledge::{ChatModel, GenerativeClient, KnowledgeSource};
use lead_capture::LeadIntake;
use resolver::ResolverConfig;

/// Application state shared across handlers
pub struct AppState {
    /// Live client sessions
    pub sessions: SessionManager,
    /// Lead intake boundary
    pub leads: LeadIntake,
    /// Size of the built-in catalog
    pub catalog_codes: usize,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state over the given collaborators
    pub fn new(
        source: Arc<dyn KnowledgeSource>,
        chat_model: Arc<dyn ChatModel>,
        resolver_config: ResolverConfig,
    ) -> Self {
        Self {
            sessions: SessionManager::new(source, chat_model, resolver_config),
            leads: LeadIntake::new(),
            catalog_codes: code_catalog::seed_records().len(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub metrics: SystemMetrics,
}

/// System metrics
#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub active_sessions: usize,
    pub catalog_codes: usize,
    pub pending_leads: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, rate_limit: &RateLimitConfig) -> Router {
    let governor = rate_limit::create_governor_config(rate_limit);
    let lead_governor = rate_limit::create_governor_config(&RateLimitConfig::strict());

    let leads = Router::new()
        .route("/api/v1/leads", post(routes::leads::submit_lead))
        .layer(GovernorLayer {
            config: lead_governor,
        });

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/codes", get(routes::catalog::list_codes))
        .route("/api/v1/sessions", post(routes::sessions::create_session))
        .route(
            "/api/v1/sessions/:id/resolve",
            post(routes::diagnose::resolve_code),
        )
        .route(
            "/api/v1/sessions/:id/history",
            get(routes::diagnose::get_history),
        )
        .route("/api/v1/sessions/:id/chat", post(routes::chat::send_message))
        .merge(leads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(GovernorLayer { config: governor }),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        metrics: SystemMetrics {
            active_sessions: state.sessions.count(),
            catalog_codes: state.catalog_codes,
            pending_leads: state.leads.pending(),
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let client = Arc::new(GenerativeClient::new(config.knowledge.clone())?);
    let state = Arc::new(AppState::new(
        Arc::clone(&client) as Arc<dyn KnowledgeSource>,
        client as Arc<dyn ChatModel>,
        config.resolver.clone(),
    ));
    let app = create_router(state, &config.rate_limit);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use knowledge::{MockChatModel, MockKnowledgeSource};
    use routes::diagnose::ResolveRequest;
    use uuid::Uuid;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(MockKnowledgeSource::empty()),
            Arc::new(MockChatModel::replying("Happy to help.")),
            ResolverConfig::immediate(),
        ))
    }

    #[tokio::test]
    async fn resolve_round_trips_through_the_handlers() {
        let state = test_state();
        let (_, Json(created)) = routes::sessions::create_session(State(Arc::clone(&state))).await;

        let Json(record) = routes::diagnose::resolve_code(
            State(Arc::clone(&state)),
            Path(created.session_id),
            Json(ResolveRequest {
                code: "p0420".to_string(),
                vehicle_context: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(record.code, "P0420");

        let Json(history) =
            routes::diagnose::get_history(State(state), Path(created.session_id))
                .await
                .unwrap();
        assert_eq!(history.count, 1);
        assert_eq!(history.data[0].code, "P0420");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let state = test_state();
        let result = routes::diagnose::get_history(State(state), Path(Uuid::new_v4())).await;
        assert!(matches!(result, Err(ApiError::SessionNotFound)));
    }

    #[tokio::test]
    async fn chat_handler_replies_for_a_live_session() {
        let state = test_state();
        let (_, Json(created)) = routes::sessions::create_session(State(Arc::clone(&state))).await;

        let Json(reply) = routes::chat::send_message(
            State(state),
            Path(created.session_id),
            Json(routes::chat::ChatRequest {
                message: "what does P0420 mean?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(reply.reply, "Happy to help.");
    }

    #[tokio::test]
    async fn lead_handler_accepts_and_counts() {
        let state = test_state();
        let request = lead_capture::LeadRequest {
            name: "Jordan Avery".to_string(),
            phone: "555-867-5309".to_string(),
            email: None,
            zip: None,
            code: "P0420".to_string(),
            vehicle_name: "2014 Honda Accord".to_string(),
        };

        let (status, _) = routes::leads::submit_lead(State(Arc::clone(&state)), Json(request))
            .await
            .unwrap();
        assert_eq!(status, axum::http::StatusCode::CREATED);
        assert_eq!(state.leads.pending(), 1);
    }

    #[tokio::test]
    async fn health_reports_counters() {
        let state = test_state();
        state.sessions.create();

        let Json(health) = health_handler(State(state)).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.metrics.active_sessions, 1);
        assert!(health.metrics.catalog_codes > 0);
    }
}
