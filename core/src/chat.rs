//! Chat responders and caller-owned chat sessions.
//!
//! # Design
//! The chat widget either talks to the live endpoint or to a stub that
//! answers after a fixed delay. Both sit behind `ChatResponder`, so the
//! typed client stays a plain contract layer and the choice is made by
//! configuration. The session identifier belongs to the caller; the client
//! never stores it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::brain::Brain;
use crate::config::{ChatConfig, ChatMode};
use crate::error::ApiError;
use crate::types::{ChatRequest, ChatResponse};

const GENERIC_FALLBACK: &str =
    "Failed to connect to the chatbot. Please check your connection or try again later.";
const QUOTA_FALLBACK: &str =
    "Chatbot is temporarily unavailable due to high demand (quota exceeded). Please try again later.";

#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn respond(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;
}

#[async_trait]
impl ChatResponder for Brain {
    async fn respond(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.handle_chat_message(request).await
    }
}

/// Offline responder: waits `delay`, then returns a canned answer.
#[derive(Debug, Clone)]
pub struct StubChat {
    delay: Duration,
}

impl StubChat {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StubChat {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl ChatResponder for StubChat {
    async fn respond(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        tokio::time::sleep(self.delay).await;
        Ok(ChatResponse {
            answer: format!(
                "This is a mock response to your question: \"{}\". The real chatbot API is temporarily unavailable.",
                request.question
            ),
            session_id: request.session_id.clone(),
        })
    }
}

/// Pick the responder named by `config.mode`.
pub fn responder(config: &ChatConfig, brain: Brain) -> Arc<dyn ChatResponder> {
    match config.mode {
        ChatMode::Live => Arc::new(brain),
        ChatMode::Stub => Arc::new(StubChat::new(config.stub_delay())),
    }
}

/// A conversation from the caller's side: owns the session id and stamps it
/// on every request.
#[derive(Debug, Clone)]
pub struct ChatSession {
    session_id: String,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: format!("session_{}", Uuid::new_v4().simple()),
        }
    }

    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Build the request for `question`. Blank input is refused.
    pub fn request(&self, question: &str) -> Result<ChatRequest, ApiError> {
        if question.trim().is_empty() {
            return Err(ApiError::EmptyQuestion);
        }
        Ok(ChatRequest::new(question).with_session_id(self.session_id.clone()))
    }

    pub async fn ask(
        &mut self,
        responder: &dyn ChatResponder,
        question: &str,
    ) -> Result<ChatResponse, ApiError> {
        let request = self.request(question)?;
        let response = responder.respond(&request).await?;
        if let Some(id) = &response.session_id {
            if *id != self.session_id {
                debug!(old = %self.session_id, new = %id, "server assigned session id");
                self.session_id = id.clone();
            }
        }
        Ok(response)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown to the user when a chat call fails.
pub fn fallback_message(err: &ApiError) -> &'static str {
    if err.to_string().to_lowercase().contains("quota") {
        QUOTA_FALLBACK
    } else {
        GENERIC_FALLBACK
    }
}
