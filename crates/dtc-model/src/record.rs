//! Diagnostic Record Model
//!
//! The canonical unit of output from the resolution pipeline, in the
//! camelCase wire shape consumed by the web frontend and produced by the
//! external knowledge source.

use serde::{Deserialize, Serialize};

/// Category label marking a synthetic fallback record.
///
/// This string is the single source of truth for unknown-ness: records
/// carrying it are never persisted into the session cache.
pub const UNKNOWN_CATEGORY: &str = "Unknown / Invalid";

/// Qualitative urgency of a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Driving-safety recommendation tied to a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyStatus {
    Safe,
    Caution,
    StopImmediately,
}

/// Estimated repair complexity for a non-professional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiyDifficulty {
    Easy,
    Moderate,
    Hard,
}

/// A resolved diagnosis for a single trouble code.
///
/// External responses must match this shape exactly: all fields are
/// required except `similarCodes`, and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiagnosticRecord {
    /// Normalized uppercase code, unique key in the session cache
    pub code: String,
    pub title: String,
    pub description: String,
    pub plain_english_summary: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub severity: Severity,
    /// Free-text classification label
    pub category: String,
    pub safety_status: SafetyStatus,
    /// Opaque display text, not a structured numeric range
    pub repair_cost_estimate_range: String,
    pub diy_difficulty: DiyDifficulty,
    #[serde(default)]
    pub similar_codes: Vec<String>,
}

impl DiagnosticRecord {
    /// Synthetic fallback record for a code that could not be resolved.
    pub fn unknown(code: &str) -> Self {
        Self {
            code: code.to_string(),
            title: format!("Unrecognized Code: {code}"),
            description: "This code was not recognized. It may be manufacturer-specific, \
                          mistyped, or outside the standard OBD-II set."
                .to_string(),
            plain_english_summary: "We couldn't identify this code. Double-check the \
                                    characters on your scanner and try again."
                .to_string(),
            symptoms: Vec::new(),
            causes: Vec::new(),
            severity: Severity::Low,
            category: UNKNOWN_CATEGORY.to_string(),
            safety_status: SafetyStatus::Caution,
            repair_cost_estimate_range: "Unknown".to_string(),
            diy_difficulty: DiyDifficulty::Hard,
            similar_codes: Vec::new(),
        }
    }

    /// Whether this record is the synthetic fallback shape.
    pub fn is_unknown(&self) -> bool {
        self.category == UNKNOWN_CATEGORY
    }
}
