//! Repair Quote Lead Intake
//!
//! Packages contact info plus the resolved code and vehicle into a lead
//! record intended for downstream CRM ingestion. The hand-off itself is
//! simulated: accepted leads are logged and parked in an in-memory outbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Minimum digits for a phone number to be worth forwarding
const MIN_PHONE_DIGITS: usize = 7;

/// Lead intake errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("phone number must contain at least {MIN_PHONE_DIGITS} digits")]
    InvalidPhone,
}

/// Contact details submitted from the quote form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    /// Trouble code the quote concerns
    pub code: String,
    /// Display name of the vehicle, e.g. "2014 Honda Accord"
    pub vehicle_name: String,
}

/// An accepted lead, stamped for downstream ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub lead_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: LeadRequest,
}

/// In-memory intake standing in for the CRM boundary
pub struct LeadIntake {
    outbox: Mutex<Vec<LeadRecord>>,
}

impl LeadIntake {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Validate and accept a lead.
    pub fn submit(&self, request: LeadRequest) -> Result<LeadRecord, LeadError> {
        if request.name.trim().is_empty() {
            return Err(LeadError::MissingField("name"));
        }
        if request.phone.trim().is_empty() {
            return Err(LeadError::MissingField("phone"));
        }
        if request.vehicle_name.trim().is_empty() {
            return Err(LeadError::MissingField("vehicleName"));
        }
        let digits = request.phone.chars().filter(char::is_ascii_digit).count();
        if digits < MIN_PHONE_DIGITS {
            return Err(LeadError::InvalidPhone);
        }

        let record = LeadRecord {
            lead_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            request,
        };

        info!(
            lead_id = %record.lead_id,
            code = %record.request.code,
            vehicle = %record.request.vehicle_name,
            "lead captured"
        );

        let mut outbox = self.outbox.lock().unwrap_or_else(|e| e.into_inner());
        outbox.push(record.clone());
        Ok(record)
    }

    /// Leads awaiting (simulated) downstream pickup
    pub fn pending(&self) -> usize {
        let outbox = self.outbox.lock().unwrap_or_else(|e| e.into_inner());
        outbox.len()
    }
}

impl Default for LeadIntake {
    fn default() -> Self {
        Self::new()
    }
}
