//! Stateless HTTP request builder and response parser for the backend API.
//!
//! # Design
//! `BrainClient` holds only a base URL and the caller's default headers.
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Both sides go through one generic helper, so the four operations differ
//! only in their route and their declared types.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::routes::{self, Route};
use crate::types::{
    ChatRequest, ChatResponse, GenerateTestimonialsResponse, HealthResponse,
    HttpValidationError, Testimonial,
};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the backend API.
#[derive(Debug, Clone)]
pub struct BrainClient {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl BrainClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
        }
    }

    /// Attach a header to every request this client builds, e.g. an
    /// `authorization` value supplied by the environment.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn build_check_health(&self) -> HttpRequest {
        self.request(&routes::CHECK_HEALTH, None)
    }

    pub fn build_generate_and_store_testimonials(&self) -> HttpRequest {
        self.request(&routes::GENERATE_AND_STORE_TESTIMONIALS, None)
    }

    pub fn build_get_testimonials(&self) -> HttpRequest {
        self.request(&routes::GET_TESTIMONIALS, None)
    }

    pub fn build_handle_chat_message(&self, input: &ChatRequest) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(&routes::HANDLE_CHAT_MESSAGE, Some(body)))
    }

    pub fn parse_check_health(&self, response: HttpResponse) -> Result<HealthResponse, ApiError> {
        decode(response)
    }

    pub fn parse_generate_and_store_testimonials(
        &self,
        response: HttpResponse,
    ) -> Result<GenerateTestimonialsResponse, ApiError> {
        decode(response)
    }

    pub fn parse_get_testimonials(&self, response: HttpResponse) -> Result<Vec<Testimonial>, ApiError> {
        decode(response)
    }

    pub fn parse_handle_chat_message(&self, response: HttpResponse) -> Result<ChatResponse, ApiError> {
        decode(response)
    }

    fn request(&self, route: &Route, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), JSON.to_string())];
        if body.is_some() {
            headers.push(("content-type".to_string(), JSON.to_string()));
        }
        headers.extend(self.headers.iter().cloned());
        HttpRequest {
            method: route.method,
            path: format!("{}{}", self.base_url, route.path),
            headers,
            body,
        }
    }
}

fn encode<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Decode a 2xx body into `T`, otherwise classify the failure.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if response.is_success() {
        return serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()));
    }
    if response.is_client_error() {
        if let Ok(validation) = serde_json::from_str::<HttpValidationError>(&response.body) {
            if validation.detail.is_some() {
                return Err(ApiError::Validation(validation));
            }
        }
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body,
    })
}
