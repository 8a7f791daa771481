//! Drives the IO-free `BrainClient` over real HTTP.
//!
//! # Design
//! Starts the mock backend on a random port, then executes every built
//! request with ureq and feeds the raw response back to the matching
//! parser. No reqwest involved: this checks the builder/parser pair on its
//! own.

use folio_brain::{ApiError, BrainClient, ChatRequest, HttpMethod, HttpRequest, HttpResponse};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_backend() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_backend::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn testimonial_lifecycle() {
    let client = BrainClient::new(&start_backend());

    // health
    let health = client
        .parse_check_health(execute(client.build_check_health()))
        .unwrap();
    assert_eq!(health.status, "ok");

    // nothing stored yet
    let list = client
        .parse_get_testimonials(execute(client.build_get_testimonials()))
        .unwrap();
    assert!(list.is_empty(), "expected empty list");

    // generate
    let generated = client
        .parse_generate_and_store_testimonials(execute(
            client.build_generate_and_store_testimonials(),
        ))
        .unwrap();
    assert_eq!(generated.testimonial_count, 5);

    // stored list matches the count
    let list = client
        .parse_get_testimonials(execute(client.build_get_testimonials()))
        .unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[0].company, "Retail Tech Co.");

    // regenerating replaces rather than appends
    client
        .parse_generate_and_store_testimonials(execute(
            client.build_generate_and_store_testimonials(),
        ))
        .unwrap();
    let list = client
        .parse_get_testimonials(execute(client.build_get_testimonials()))
        .unwrap();
    assert_eq!(list.len(), 5);
}

#[test]
fn chat_roundtrip() {
    let client = BrainClient::new(&start_backend());

    let req = client
        .build_handle_chat_message(&ChatRequest::new("What skills do you have?").with_session_id("s-1"))
        .unwrap();
    let chat = client.parse_handle_chat_message(execute(req)).unwrap();
    assert!(chat.answer.contains("TypeScript"));
    assert_eq!(chat.session_id.as_deref(), Some("s-1"));
}

#[test]
fn chat_missing_question_is_validation_error() {
    let client = BrainClient::new(&start_backend());

    // Hand-built body: the typed request cannot omit `question`.
    let mut req = client
        .build_handle_chat_message(&ChatRequest::new("placeholder"))
        .unwrap();
    req.body = Some(r#"{"session_id":"s-2"}"#.to_string());

    let err = client.parse_handle_chat_message(execute(req)).unwrap_err();
    match err {
        ApiError::Validation(v) => {
            assert_eq!(v.errors().len(), 1);
            assert_eq!(v.errors()[0].kind, "missing");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
