use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use axum::{body::Bytes, extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub const STORAGE_KEY: &str = "testimonials.json";
pub const DEVELOPER_NAME: &str = "Mwenda_Dipark";
pub const DEVELOPER_ROLE: &str = "Full-Stack Developer";

/// How many scenarios one generation run turns into testimonials.
pub const GENERATED_PER_RUN: usize = 5;

/// (project type, client industry)
const SCENARIOS: [(&str, &str); 6] = [
    ("AI-Powered E-commerce Platform", "Retail Tech"),
    ("Real-time Data Analytics Dashboard", "Financial Services"),
    ("Collaborative Project Management Tool", "SaaS / Technology"),
    ("Mobile Health & Wellness App", "Healthcare"),
    ("Custom CRM Integration", "B2B Services"),
    ("Educational Platform Development", "EdTech"),
];

const AUTHORS: [(&str, &str); 6] = [
    ("Amina Otieno", "Head of Product"),
    ("Daniel Kim", "CTO"),
    ("Sofia Rossi", "Engineering Manager"),
    ("James Mwangi", "Founder"),
    ("Priya Nair", "Operations Director"),
    ("Lukas Becker", "Project Lead"),
];

const CORE_SKILLS: &str =
    "Python, React, MongoDB, PostgreSQL, FastAPI, TypeScript, Tailwind CSS, Node.js, Docker, AWS";

const PROJECTS: &str = "DevFolio AI, IntelliShop AI Platform, LiveInsights Analytics Dashboard \
and TaskFlow Pro Manager";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub company: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTestimonialsResponse {
    pub message: String,
    pub testimonial_count: usize,
    pub storage_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationError {
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HttpValidationError {
    pub detail: Vec<ValidationError>,
}

/// In-memory stand-in for the backend's key/value storage plus a health flag.
#[derive(Debug)]
pub struct AppState {
    storage: RwLock<HashMap<String, Vec<Testimonial>>>,
    healthy: AtomicBool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(HashMap::new()),
            healthy: AtomicBool::new(true),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    pub async fn store(&self, key: &str, testimonials: Vec<Testimonial>) {
        self.storage.write().await.insert(key.to_string(), testimonials);
    }

    pub async fn load(&self, key: &str) -> Option<Vec<Testimonial>> {
        self.storage.read().await.get(key).cloned()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedState = Arc<AppState>;

pub fn app() -> Router {
    app_with_state(Arc::new(AppState::new()))
}

pub fn app_with_state(state: SharedState) -> Router {
    Router::new()
        .route("/_healthz", get(check_health))
        .route(
            "/routes/testimonials/generate-testimonials",
            post(generate_and_store_testimonials),
        )
        .route("/routes/testimonials/view-testimonials", get(get_testimonials))
        .route("/routes/chatbot/chat", post(handle_chat_message))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, state: SharedState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn check_health(State(state): State<SharedState>) -> (StatusCode, Json<HealthResponse>) {
    if state.is_healthy() {
        (StatusCode::OK, Json(HealthResponse { status: "ok".to_string() }))
    } else {
        warn!("health check requested while unhealthy");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
            }),
        )
    }
}

/// Build the testimonial for scenario `index`.
pub fn compose_testimonial(index: usize) -> Testimonial {
    let (project_type, industry) = SCENARIOS[index % SCENARIOS.len()];
    let (author, role) = AUTHORS[index % AUTHORS.len()];
    Testimonial {
        quote: format!(
            "Working with {DEVELOPER_NAME} on our {project_type} was a genuine pleasure. \
Clear communication throughout, and the result had a real impact on our {industry} business."
        ),
        author: author.to_string(),
        company: format!("{industry} Co."),
        role: role.to_string(),
    }
}

async fn generate_and_store_testimonials(
    State(state): State<SharedState>,
) -> Json<GenerateTestimonialsResponse> {
    let testimonials: Vec<Testimonial> = (0..GENERATED_PER_RUN)
        .map(|i| {
            info!(n = i + 1, project = SCENARIOS[i].0, industry = SCENARIOS[i].1, "generating testimonial");
            compose_testimonial(i)
        })
        .collect();
    let count = testimonials.len();
    state.store(STORAGE_KEY, testimonials).await;
    info!(count, key = STORAGE_KEY, "stored testimonials");

    Json(GenerateTestimonialsResponse {
        message: "Testimonials generated and stored successfully.".to_string(),
        testimonial_count: count,
        storage_key: STORAGE_KEY.to_string(),
    })
}

async fn get_testimonials(State(state): State<SharedState>) -> Json<Vec<Testimonial>> {
    Json(state.load(STORAGE_KEY).await.unwrap_or_default())
}

type Rejection = (StatusCode, Json<HttpValidationError>);

/// Single-entry validation body for a failure at `loc`.
fn invalid(loc: Vec<Value>, msg: &str, kind: &str) -> HttpValidationError {
    HttpValidationError {
        detail: vec![ValidationError {
            loc,
            msg: msg.to_string(),
            kind: kind.to_string(),
        }],
    }
}

fn optional_string(value: &Value, field: &str) -> Result<Option<String>, HttpValidationError> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(
            vec![json!("body"), json!(field)],
            "Input should be a valid string",
            "string_type",
        )),
    }
}

/// Validate the raw chat body, producing FastAPI-shaped errors on failure.
///
/// An empty body or a JSON `null` is a missing body; any other non-object
/// value fails at `["body"]` before fields are looked at.
pub fn validate_chat(body: &[u8]) -> Result<(String, Option<String>), HttpValidationError> {
    if body.is_empty() {
        return Err(invalid(vec![json!("body")], "Field required", "missing"));
    }
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        invalid(
            vec![json!("body"), json!(e.column())],
            "JSON decode error",
            "json_invalid",
        )
    })?;

    match value {
        Value::Object(_) => {}
        Value::Null => return Err(invalid(vec![json!("body")], "Field required", "missing")),
        _ => {
            return Err(invalid(
                vec![json!("body")],
                "Input should be a valid dictionary or object to extract fields from",
                "model_attributes_type",
            ))
        }
    }

    let question = match optional_string(&value, "question")? {
        Some(q) => q,
        None => {
            return Err(invalid(
                vec![json!("body"), json!("question")],
                "Field required",
                "missing",
            ))
        }
    };
    let session_id = optional_string(&value, "session_id")?;

    Ok((question, session_id))
}

/// Canned answer keyed on what the question is about.
pub fn answer_for(question: &str) -> String {
    let q = question.to_lowercase();
    if q.contains("skill") || q.contains("stack") || q.contains("technolog") {
        format!("{DEVELOPER_NAME} works mainly with {CORE_SKILLS}.")
    } else if q.contains("project") || q.contains("portfolio") {
        format!("Highlighted projects by {DEVELOPER_NAME} include {PROJECTS}.")
    } else {
        format!(
            "{DEVELOPER_NAME} is a {DEVELOPER_ROLE} building AI-integrated web platforms, \
data dashboards and collaborative tools. Ask about skills or projects for details."
        )
    }
}

async fn handle_chat_message(body: Bytes) -> Result<Json<ChatResponse>, Rejection> {
    let (question, session_id) = validate_chat(&body)
        .map_err(|err| (StatusCode::UNPROCESSABLE_ENTITY, Json(err)))?;
    info!(session = session_id.as_deref().unwrap_or("N/A"), "received chat question");
    Ok(Json(ChatResponse {
        answer: answer_for(&question),
        session_id,
    }))
}
