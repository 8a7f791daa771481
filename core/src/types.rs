//! Request/response contracts for the portfolio backend.
//!
//! # Design
//! These mirror the backend schema but are defined independently of the
//! mock backend crate; integration tests catch drift between the two.
//! Optional fields accept both an absent key and an explicit `null`, and are
//! omitted when encoding `None`.

use serde::{Deserialize, Serialize};

/// Body of `POST /routes/chatbot/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Answer returned by the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// One stored testimonial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub company: String,
    pub role: String,
}

/// Result of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateTestimonialsResponse {
    pub message: String,
    pub testimonial_count: i64,
    pub storage_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// One element of a validation error location: a field name or a list index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LocSegment {
    Index(i64),
    Field(String),
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Aggregate validation error body returned alongside a 4xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<ValidationError>>,
}

impl HttpValidationError {
    pub fn errors(&self) -> &[ValidationError] {
        self.detail.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_roundtrips_with_session_id() {
        let req = ChatRequest::new("What stack do you use?").with_session_id("session_1");
        let json = serde_json::to_string(&req).unwrap();
        let back: ChatRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn chat_request_roundtrips_without_session_id() {
        let req = ChatRequest::new("Hello");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("session_id").is_none());
        let back: ChatRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn chat_request_accepts_null_session_id() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"question":"Hi","session_id":null}"#).unwrap();
        assert_eq!(req.session_id, None);
    }

    #[test]
    fn chat_request_rejects_missing_question() {
        let result: Result<ChatRequest, _> = serde_json::from_str(r#"{"session_id":"s"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn chat_response_accepts_absent_session_id() {
        let resp: ChatResponse = serde_json::from_str(r#"{"answer":"Sure."}"#).unwrap();
        assert_eq!(resp.answer, "Sure.");
        assert!(resp.session_id.is_none());
    }

    #[test]
    fn validation_error_uses_type_on_the_wire() {
        let raw = r#"{"loc":["body","question"],"msg":"Field required","type":"missing"}"#;
        let err: ValidationError = serde_json::from_str(raw).unwrap();
        assert_eq!(err.kind, "missing");
        assert_eq!(
            err.loc,
            vec![
                LocSegment::Field("body".to_string()),
                LocSegment::Field("question".to_string())
            ]
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "missing");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn validation_error_loc_mixes_strings_and_indices() {
        let raw = r#"{"loc":["body","items",2,"quote"],"msg":"bad","type":"value_error"}"#;
        let err: ValidationError = serde_json::from_str(raw).unwrap();
        assert_eq!(err.loc[2], LocSegment::Index(2));
        assert_eq!(err.loc[3], LocSegment::Field("quote".to_string()));
    }

    #[test]
    fn http_validation_error_detail_is_optional() {
        let empty: HttpValidationError = serde_json::from_str("{}").unwrap();
        assert!(empty.detail.is_none());
        assert!(empty.errors().is_empty());
    }

    #[test]
    fn testimonial_array_keeps_order() {
        let raw = r#"[
            {"quote":"a","author":"A","company":"Ca","role":"Ra"},
            {"quote":"b","author":"B","company":"Cb","role":"Rb"}
        ]"#;
        let list: Vec<Testimonial> = serde_json::from_str(raw).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].author, "A");
        assert_eq!(list[1].author, "B");
    }
}
