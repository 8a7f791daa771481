//! Error types for the brain client.
//!
//! # Design
//! Nothing is translated or recovered here: each variant carries what the
//! caller needs to decide what the user sees. A structured validation body
//! gets its own variant so it is never confused with a transport failure or
//! with an opaque non-2xx status.

use thiserror::Error;

use crate::types::HttpValidationError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure or timeout before a response was read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The server rejected the request with a structured validation body.
    #[error("validation failed: {}", summarize(.0))]
    Validation(HttpValidationError),

    /// Non-2xx status without a structured body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("question must not be empty")]
    EmptyQuestion,
}

impl ApiError {
    /// True for failures below the JSON contract layer: network, timeout or
    /// an undecodable payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Deserialization(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn validation(&self) -> Option<&HttpValidationError> {
        match self {
            ApiError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

fn summarize(err: &HttpValidationError) -> String {
    let msgs: Vec<&str> = err.errors().iter().map(|e| e.msg.as_str()).collect();
    if msgs.is_empty() {
        "no detail".to_string()
    } else {
        msgs.join("; ")
    }
}
