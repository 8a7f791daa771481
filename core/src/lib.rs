//! Typed API client for the portfolio backend.
//!
//! # Overview
//! Four operations: health check, testimonial generation, testimonial
//! retrieval and chat. `BrainClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network; `Brain` runs them
//! over reqwest and exposes one async method per operation.
//!
//! # Design
//! - Contracts in `types` are plain serde records, defined independently
//!   from the mock backend so integration tests catch schema drift.
//! - Routes are a fixed table in `routes`; no reflection, no dispatch.
//! - Failures are returned verbatim as `ApiError`. One attempt per call.
//! - The chat path is a `ChatResponder` strategy: live endpoint or stub.

pub mod brain;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod routes;
pub mod types;

pub use brain::Brain;
pub use chat::{fallback_message, ChatResponder, ChatSession, StubChat};
pub use client::BrainClient;
pub use config::{BrainConfig, ChatMode, ConfigError, ConfigLoader};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use routes::Route;
pub use types::{
    ChatRequest, ChatResponse, GenerateTestimonialsResponse, HealthResponse, HttpValidationError,
    LocSegment, Testimonial, ValidationError,
};
