//! Advisory Chat Assistant
//!
//! A multi-turn conversation surface seeded with context about the code
//! the user just resolved. Independent of the resolution pipeline, and
//! fails open: if the model is unreachable the session answers with a
//! fixed apology and stays usable.

use knowledge::{ChatMessage, ChatModel};
use std::sync::Arc;
use tracing::warn;

/// Reply used whenever the model cannot be reached
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting right now. \
Please try sending your question again in a moment.";

/// Turns retained beyond the system instruction; older turns are dropped
/// from the front to keep prompts bounded.
const MAX_TRANSCRIPT_TURNS: usize = 40;

fn system_instruction(code: Option<&str>, vehicle: Option<&str>) -> String {
    let focus = match code {
        Some(code) => format!("diagnostic trouble code {code}"),
        None => "a check-engine concern".to_string(),
    };
    let vehicle_line = match vehicle {
        Some(vehicle) => format!(" Their vehicle is a {vehicle}."),
        None => String::new(),
    };
    format!(
        "You are a friendly automotive advisor helping a non-mechanic understand \
         {focus}.{vehicle_line} Answer plainly, keep replies short, and recommend \
         a professional inspection for anything safety-related."
    )
}

/// One advisory conversation, seeded for the code currently on screen.
pub struct AdvisorSession {
    model: Arc<dyn ChatModel>,
    code: Option<String>,
    transcript: Vec<ChatMessage>,
}

impl AdvisorSession {
    pub fn new(model: Arc<dyn ChatModel>, code: Option<&str>, vehicle: Option<&str>) -> Self {
        Self {
            model,
            code: code.map(str::to_string),
            transcript: vec![ChatMessage::system(system_instruction(code, vehicle))],
        }
    }

    /// Code this session was seeded for, if any
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send a user message and return the assistant reply.
    ///
    /// Model failures surface as [`FALLBACK_REPLY`]; the failed turn stays
    /// in the transcript so the user can simply re-send.
    pub async fn send(&mut self, user_message: &str) -> String {
        self.transcript.push(ChatMessage::user(user_message));
        self.trim();

        let reply = match self.model.complete(&self.transcript).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(code = ?self.code, %err, "assistant model unavailable");
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript.push(ChatMessage::assistant(reply.clone()));
        reply
    }

    fn trim(&mut self) {
        let turns = self.transcript.len().saturating_sub(1);
        if turns > MAX_TRANSCRIPT_TURNS {
            let excess = turns - MAX_TRANSCRIPT_TURNS;
            self.transcript.drain(1..1 + excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge::{MockChatModel, Role};

    fn is_user(message: &ChatMessage) -> bool {
        message.role == Role::User
    }

    #[tokio::test]
    async fn replies_come_from_the_model() {
        let model = Arc::new(MockChatModel::replying("Check the gas cap first."));
        let mut session = AdvisorSession::new(model, Some("P0455"), Some("2014 Honda Accord"));

        let reply = session.send("Is this serious?").await;

        assert_eq!(reply, "Check the gas cap first.");
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[0].role, Role::System);
    }

    #[tokio::test]
    async fn system_instruction_references_the_code_and_vehicle() {
        let model = Arc::new(MockChatModel::replying("ok"));
        let session = AdvisorSession::new(model, Some("P0420"), Some("2016 Subaru Outback"));

        let system = &session.transcript()[0].content;
        assert!(system.contains("P0420"));
        assert!(system.contains("2016 Subaru Outback"));
        assert_eq!(session.code(), Some("P0420"));
    }

    #[tokio::test]
    async fn sessions_without_a_code_still_seed() {
        let model = Arc::new(MockChatModel::replying("ok"));
        let session = AdvisorSession::new(model, None, None);

        assert_eq!(session.code(), None);
        assert!(session.transcript()[0].content.contains("check-engine"));
    }

    #[tokio::test]
    async fn model_failure_fails_open() {
        let model = Arc::new(MockChatModel::failing());
        let mut session = AdvisorSession::new(model, Some("P0300"), None);

        let reply = session.send("What now?").await;

        assert_eq!(reply, FALLBACK_REPLY);
        // The user turn is retained so a re-send just works.
        assert!(session.transcript().iter().any(is_user));
    }

    #[tokio::test]
    async fn session_stays_usable_after_a_failure() {
        let failing = Arc::new(MockChatModel::failing());
        let mut session = AdvisorSession::new(failing, Some("P0300"), None);
        let first = session.send("hello?").await;
        assert_eq!(first, FALLBACK_REPLY);

        // Swap in a healthy model behind the same session shape.
        session.model = Arc::new(MockChatModel::replying("Back online."));
        let second = session.send("still there?").await;
        assert_eq!(second, "Back online.");
    }

    #[tokio::test]
    async fn transcript_is_bounded() {
        let model = Arc::new(MockChatModel::replying("ok"));
        let mut session = AdvisorSession::new(model, Some("P0300"), None);

        for i in 0..60 {
            session.send(&format!("question {i}")).await;
        }

        assert!(session.transcript().len() <= MAX_TRANSCRIPT_TURNS + 2);
        assert_eq!(session.transcript()[0].role, Role::System);
    }
}
