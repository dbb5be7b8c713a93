//! JSON Schema for Structured Lookup Responses

use serde_json::{json, Value};

/// Strict schema the generative API must constrain lookup responses to.
///
/// Mirrors [`dtc_model::DiagnosticRecord`]: every field required except
/// `similarCodes`, no additional properties, enums spelled exactly.
pub fn diagnostic_record_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "code",
            "title",
            "description",
            "plainEnglishSummary",
            "symptoms",
            "causes",
            "severity",
            "category",
            "safetyStatus",
            "repairCostEstimateRange",
            "diyDifficulty"
        ],
        "properties": {
            "code": { "type": "string" },
            "title": { "type": "string" },
            "description": { "type": "string" },
            "plainEnglishSummary": { "type": "string" },
            "symptoms": { "type": "array", "items": { "type": "string" } },
            "causes": { "type": "array", "items": { "type": "string" } },
            "severity": { "type": "string", "enum": ["Low", "Medium", "High", "Critical"] },
            "category": { "type": "string" },
            "safetyStatus": { "type": "string", "enum": ["Safe", "Caution", "StopImmediately"] },
            "repairCostEstimateRange": { "type": "string" },
            "diyDifficulty": { "type": "string", "enum": ["Easy", "Moderate", "Hard"] },
            "similarCodes": { "type": "array", "items": { "type": "string" } }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_all_fields_except_similar_codes() {
        let schema = diagnostic_record_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 11);
        assert!(!required.iter().any(|v| v == "similarCodes"));
        assert_eq!(schema["properties"].as_object().unwrap().len(), 12);
    }

    #[test]
    fn schema_enums_match_the_record_model() {
        let schema = diagnostic_record_schema();
        let severities = schema["properties"]["severity"]["enum"].as_array().unwrap();
        assert_eq!(severities.len(), 4);
        let safety = schema["properties"]["safetyStatus"]["enum"].as_array().unwrap();
        assert!(safety.iter().any(|v| v == "StopImmediately"));
    }
}
