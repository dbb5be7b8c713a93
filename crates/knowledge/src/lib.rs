//! External Knowledge Source
//!
//! HTTP client for the generative lookup used on cache misses, plus the
//! chat model seam consumed by the advisory assistant. Responses to
//! lookups are constrained to the exact diagnostic record schema; anything
//! that does not validate is a failure the caller degrades from.

mod chat;
mod client;
mod error;
mod mock;
mod schema;

pub use chat::{ChatMessage, ChatModel, Role};
pub use client::{GenerativeClient, KnowledgeConfig, KnowledgeSource, LookupRequest};
pub use error::KnowledgeError;
pub use mock::{MockChatModel, MockKnowledgeSource};
pub use schema::diagnostic_record_schema;
