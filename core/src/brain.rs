//! Async executor that runs `BrainClient` requests over reqwest.
//!
//! Every call is one request, one response. There are no retries and no
//! local recovery: whatever fails is returned to the caller as-is.

use tracing::{debug, warn};

use crate::client::BrainClient;
use crate::config::BrainConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ChatRequest, ChatResponse, GenerateTestimonialsResponse, HealthResponse, Testimonial};

/// Typed async client for the backend. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct Brain {
    client: BrainClient,
    http: reqwest::Client,
}

impl Brain {
    pub fn new(client: BrainClient, http: reqwest::Client) -> Self {
        Self { client, http }
    }

    pub fn from_config(config: &BrainConfig) -> Result<Self, ApiError> {
        let client = config
            .headers
            .iter()
            .fold(BrainClient::new(&config.base_url), |c, (k, v)| c.with_header(k, v));
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::new(client, http))
    }

    pub fn client(&self) -> &BrainClient {
        &self.client
    }

    pub async fn check_health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.execute(self.client.build_check_health()).await?;
        self.client.parse_check_health(response)
    }

    /// Asks the backend to generate and persist a new batch of testimonials.
    pub async fn generate_and_store_testimonials(&self) -> Result<GenerateTestimonialsResponse, ApiError> {
        let response = self
            .execute(self.client.build_generate_and_store_testimonials())
            .await?;
        self.client.parse_generate_and_store_testimonials(response)
    }

    pub async fn get_testimonials(&self) -> Result<Vec<Testimonial>, ApiError> {
        let response = self.execute(self.client.build_get_testimonials()).await?;
        self.client.parse_get_testimonials(response)
    }

    pub async fn handle_chat_message(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let req = self.client.build_handle_chat_message(request)?;
        let response = self.execute(req).await?;
        self.client.parse_handle_chat_message(response)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.path, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.path),
            HttpMethod::Post => self.http.post(&request.path),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.inspect_err(|e| {
            warn!(url = %request.path, error = %e, "request failed");
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            warn!(url = %request.path, status, "non-success response");
        } else {
            debug!(url = %request.path, status, bytes = body.len(), "response received");
        }

        Ok(HttpResponse { status, headers, body })
    }
}
