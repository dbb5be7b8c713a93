//! Lead Intake Routes

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use lead_capture::LeadRequest;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Response for an accepted lead
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAccepted {
    pub lead_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// Submit a repair-quote lead
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LeadRequest>,
) -> Result<(StatusCode, Json<LeadAccepted>), ApiError> {
    let record = state.leads.submit(request)?;
    Ok((
        StatusCode::CREATED,
        Json(LeadAccepted {
            lead_id: record.lead_id,
            submitted_at: record.submitted_at,
        }),
    ))
}
