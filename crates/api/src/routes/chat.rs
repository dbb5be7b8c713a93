//! Advisory Chat Routes

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Body for the chat endpoint
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response for the chat endpoint
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Send a message to the session's advisor.
///
/// Model failures fail open inside the assistant, so this is always 200
/// for a live session.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound)?;

    let reply = session.chat(&request.message).await;
    Ok(Json(ChatReply { reply }))
}
