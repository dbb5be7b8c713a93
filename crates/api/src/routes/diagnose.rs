//! Resolution and History Routes

use axum::extract::{Path, State};
use axum::Json;
use dtc_model::DiagnosticRecord;
use resolver::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Body for the resolve endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// Raw user-entered code, normalized server-side
    pub code: String,
    #[serde(default)]
    pub vehicle_context: Option<String>,
}

/// Resolve a trouble code within a session.
///
/// Always 200 for a live session; the pipeline degrades internally.
pub async fn resolve_code(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<DiagnosticRecord>, ApiError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound)?;

    let record = session
        .resolve(&request.code, request.vehicle_context.as_deref())
        .await;

    Ok(Json(record))
}

/// Response for the history endpoint
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub data: Vec<HistoryEntry>,
    pub count: usize,
}

/// Recent lookups for a session, most recent first
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound)?;

    let data = session.store().history();
    Ok(Json(HistoryResponse {
        count: data.len(),
        data,
    }))
}
