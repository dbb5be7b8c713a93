//! Generative Lookup Client
//!
//! Speaks an OpenAI-compatible chat-completions API. Lookups request a
//! strict `json_schema` response format and make exactly one attempt per
//! user-triggered action; the pipeline degrades on any failure, and the
//! user retriggers to retry.

use crate::chat::{ChatMessage, ChatModel};
use crate::error::KnowledgeError;
use crate::schema::diagnostic_record_schema;
use async_trait::async_trait;
use dtc_model::DiagnosticRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default bound on a single API request
const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Generous cap for a single record or chat reply
const DEFAULT_MAX_TOKENS: u32 = 1_024;

/// Characters of upstream error text worth keeping in our own errors
const MAX_ERROR_LEN: usize = 200;

const LOOKUP_SYSTEM_PROMPT: &str = "You are an automotive diagnostics expert. \
Given an OBD-II trouble code, respond with a single JSON object describing the \
fault for a non-mechanic audience. Use the code exactly as given. If the code \
is not a real fault code, set the category field to \"Unknown / Invalid\".";

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Request to the external knowledge source
#[derive(Debug, Clone)]
pub struct LookupRequest {
    /// Normalized trouble code
    pub code: String,
    /// Free-text vehicle description, e.g. "2014 Honda Accord 2.4L"
    pub vehicle_context: Option<String>,
}

/// Knowledge source seam consumed by the resolution pipeline
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn lookup(&self, request: &LookupRequest) -> Result<DiagnosticRecord, KnowledgeError>;
}

/// Configuration for the generative client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Chat-completions endpoint URL
    pub api_url: String,
    /// Bearer token for the API
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout (transport-level)
    pub request_timeout_ms: u64,
    /// Completion token cap
    pub max_tokens: u32,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "openai/gpt-4o-mini".to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    json_schema: Option<JsonSchemaWrapper>,
}

#[derive(Serialize)]
struct JsonSchemaWrapper {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    /// Null when the provider errors or blocks the request
    #[serde(default)]
    content: Option<String>,
    /// Set when content moderation rejects the request
    #[serde(default)]
    refusal: Option<String>,
}

/// HTTP client for the generative knowledge source.
///
/// Implements both [`KnowledgeSource`] (schema-constrained lookups) and
/// [`ChatModel`] (free-form advisory replies) against the same endpoint.
pub struct GenerativeClient {
    config: KnowledgeConfig,
    http: reqwest::Client,
}

impl GenerativeClient {
    pub fn new(config: KnowledgeConfig) -> Result<Self, KnowledgeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| KnowledgeError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, KnowledgeError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(KnowledgeError::Api {
                status: status.as_u16(),
                message: truncate(&text, MAX_ERROR_LEN).to_string(),
            });
        }

        extract_content(&text)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> KnowledgeError {
        if err.is_timeout() {
            KnowledgeError::Timeout(self.config.request_timeout_ms)
        } else {
            KnowledgeError::Transport(err.to_string())
        }
    }
}

/// Pull the assistant content out of a raw chat-completions body.
fn extract_content(text: &str) -> Result<String, KnowledgeError> {
    let parsed: ChatResponse =
        serde_json::from_str(text).map_err(|e| KnowledgeError::Malformed(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(KnowledgeError::EmptyResponse)?;

    if let Some(refusal) = choice.message.refusal {
        return Err(KnowledgeError::Refused(
            truncate(&refusal, MAX_ERROR_LEN).to_string(),
        ));
    }

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(KnowledgeError::EmptyResponse),
    }
}

/// Some providers fence JSON content in markdown despite structured mode.
fn strip_markdown_fences(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    let without_open = trimmed.strip_prefix("```")?;
    let after_header = match without_open.find('\n') {
        Some(idx) => &without_open[idx + 1..],
        None => without_open,
    };
    let end = after_header.rfind("```")?;
    Some(after_header[..end].trim())
}

/// Parse assistant content as a diagnostic record, strictly.
fn parse_record(content: &str) -> Result<DiagnosticRecord, KnowledgeError> {
    let direct = serde_json::from_str(content);
    match direct {
        Ok(record) => Ok(record),
        Err(err) => match strip_markdown_fences(content) {
            Some(inner) => serde_json::from_str(inner)
                .map_err(|e| KnowledgeError::Malformed(e.to_string())),
            None => Err(KnowledgeError::Malformed(err.to_string())),
        },
    }
}

fn lookup_user_prompt(request: &LookupRequest) -> String {
    match &request.vehicle_context {
        Some(vehicle) => format!(
            "Diagnostic trouble code: {}\nVehicle: {}",
            request.code, vehicle
        ),
        None => format!("Diagnostic trouble code: {}", request.code),
    }
}

#[async_trait]
impl KnowledgeSource for GenerativeClient {
    async fn lookup(&self, request: &LookupRequest) -> Result<DiagnosticRecord, KnowledgeError> {
        debug!(code = %request.code, "querying knowledge source");

        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(LOOKUP_SYSTEM_PROMPT),
                ChatMessage::user(lookup_user_prompt(request)),
            ],
            max_tokens: self.config.max_tokens,
            response_format: Some(ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: Some(JsonSchemaWrapper {
                    name: "diagnostic_record".to_string(),
                    strict: true,
                    schema: diagnostic_record_schema(),
                }),
            }),
        };

        let content = self.send(&body).await?;
        parse_record(&content)
    }
}

#[async_trait]
impl ChatModel for GenerativeClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, KnowledgeError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            max_tokens: self.config.max_tokens,
            response_format: None,
        };

        self.send(&body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json() -> String {
        serde_json::json!({
            "code": "P1604",
            "title": "Startability Malfunction",
            "description": "The engine required longer than expected cranking to start.",
            "plainEnglishSummary": "Your car is struggling to start.",
            "symptoms": ["Long cranking"],
            "causes": ["Weak battery"],
            "severity": "Medium",
            "category": "Manufacturer Specific",
            "safetyStatus": "Caution",
            "repairCostEstimateRange": "$100 - $600",
            "diyDifficulty": "Moderate"
        })
        .to_string()
    }

    fn wrap_in_chat_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{ "message": { "content": content } }]
        })
        .to_string()
    }

    #[test]
    fn extracts_content_from_chat_body() {
        let body = wrap_in_chat_body("hello");
        assert_eq!(extract_content(&body).unwrap(), "hello");
    }

    #[test]
    fn empty_choices_is_empty_response() {
        let body = r#"{"choices": []}"#;
        assert!(matches!(
            extract_content(body),
            Err(KnowledgeError::EmptyResponse)
        ));
    }

    #[test]
    fn null_content_is_empty_response() {
        let body = r#"{"choices": [{"message": {"content": null}}]}"#;
        assert!(matches!(
            extract_content(body),
            Err(KnowledgeError::EmptyResponse)
        ));
    }

    #[test]
    fn refusal_is_surfaced() {
        let body = r#"{"choices": [{"message": {"refusal": "nope"}}]}"#;
        assert!(matches!(
            extract_content(body),
            Err(KnowledgeError::Refused(_))
        ));
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(matches!(
            extract_content("<html>bad gateway</html>"),
            Err(KnowledgeError::Malformed(_))
        ));
    }

    #[test]
    fn parses_a_bare_record() {
        let record = parse_record(&record_json()).unwrap();
        assert_eq!(record.code, "P1604");
    }

    #[test]
    fn parses_a_fenced_record() {
        let fenced = format!("```json\n{}\n```", record_json());
        let record = parse_record(&fenced).unwrap();
        assert_eq!(record.code, "P1604");
    }

    #[test]
    fn schema_violation_is_malformed() {
        let err = parse_record(r#"{"code": "P0420"}"#).unwrap_err();
        assert!(matches!(err, KnowledgeError::Malformed(_)));
    }

    #[test]
    fn user_prompt_includes_vehicle_context_when_present() {
        let request = LookupRequest {
            code: "P0420".to_string(),
            vehicle_context: Some("2014 Honda Accord".to_string()),
        };
        let prompt = lookup_user_prompt(&request);
        assert!(prompt.contains("P0420"));
        assert!(prompt.contains("2014 Honda Accord"));
    }
}
