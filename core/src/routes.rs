//! Static route table for the backend API.
//!
//! One `Route` per operation, fixed at build time.

use crate::http::HttpMethod;

/// Method and path of one backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: HttpMethod,
    pub path: &'static str,
}

/// Returns 200 when the backend is up, 500 when not.
pub const CHECK_HEALTH: Route = Route {
    method: HttpMethod::Get,
    path: "/_healthz",
};

/// Generates a fresh batch of testimonials and stores them server-side.
pub const GENERATE_AND_STORE_TESTIMONIALS: Route = Route {
    method: HttpMethod::Post,
    path: "/routes/testimonials/generate-testimonials",
};

pub const GET_TESTIMONIALS: Route = Route {
    method: HttpMethod::Get,
    path: "/routes/testimonials/view-testimonials",
};

pub const HANDLE_CHAT_MESSAGE: Route = Route {
    method: HttpMethod::Post,
    path: "/routes/chatbot/chat",
};
