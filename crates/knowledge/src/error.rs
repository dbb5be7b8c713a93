//! Knowledge Source Error Types

use thiserror::Error;

/// Errors that can occur while consulting the external knowledge source
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Network-level failure reaching the API
    #[error("transport error: {0}")]
    Transport(String),

    /// Request exceeded its deadline
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// API returned a non-success status
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// Model produced no usable content
    #[error("model returned no content")]
    EmptyResponse,

    /// Content was blocked by the provider
    #[error("model refused the request: {0}")]
    Refused(String),

    /// Content did not parse as the required shape
    #[error("malformed model response: {0}")]
    Malformed(String),
}
