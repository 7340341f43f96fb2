//! Integration tests for the brief-web server.
//!
//! These tests start a real axum server on a random port, plus a second
//! axum router standing in for the submission endpoint, and drive the REST
//! API with reqwest.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing;
use brief_rs::config::EndpointConfig;
use brief_rs::form::ScalarField;
use brief_rs::submit::HttpEndpoint;
use brief_rs::ui::UiState;
use brief_web::{MissingResponse, WebConfig, spawn_web};
use serde_json::{Value, json};

/// Spawn a mock submission endpoint that answers with `status` after
/// `delay`, counting requests and keeping the last body.
async fn spawn_mock_endpoint(
    status: StatusCode,
    delay: Duration,
) -> (String, Arc<AtomicUsize>, Arc<Mutex<Option<Value>>>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let last_body = Arc::new(Mutex::new(None));

    let router = {
        let hits = hits.clone();
        let last_body = last_body.clone();
        Router::new().route(
            "/f",
            routing::post(move |axum::Json(body): axum::Json<Value>| {
                let hits = hits.clone();
                let last_body = last_body.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    *last_body.lock().unwrap() = Some(body);
                    tokio::time::sleep(delay).await;
                    (status, "{}")
                }
            }),
        )
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}/f"), hits, last_body)
}

/// Helper: spawn the form server on port 0, posting to `endpoint_url`.
async fn spawn_test_server(endpoint_url: &str) -> (Arc<Mutex<UiState>>, String) {
    let state = Arc::new(Mutex::new(UiState::default()));
    let endpoint = HttpEndpoint::new(&EndpointConfig::default().with_url(endpoint_url)).unwrap();

    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(state.clone(), Arc::new(endpoint), config)
        .await
        .unwrap();
    (state, format!("http://{addr}"))
}

async fn post(base: &str, path: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

/// Fill every required answer through the API.
async fn fill_minimal(base: &str) {
    for (field, value) in [
        ("fullName", "A"),
        ("email", "a@b.com"),
        ("targetAudience", "x"),
        ("callToAction", "y"),
    ] {
        let resp = post(base, "/api/scalar", json!({"field": field, "value": value})).await;
        assert_eq!(resp.status(), 204);
    }
    for (field, option) in [
        ("videoPurpose", "Aumentar seguidores y alcance"),
        ("editingStyle", "portfolio"),
        ("finalVideoDuration", "15-30s"),
        ("budgetType", "per-video"),
        ("budget", "<100"),
    ] {
        let resp = post(base, "/api/choice", json!({"field": field, "option": option})).await;
        assert_eq!(resp.status(), 204, "{field}={option}");
    }
    let resp = post(base, "/api/distribution", json!({"platform": "TikTok"})).await;
    assert_eq!(resp.status(), 204);
}

// ── State and mutations ──────────────────────────────────────────────

#[tokio::test]
async fn get_state_returns_snapshot() {
    let (url, _, _) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (_state, base) = spawn_test_server(&url).await;

    post(&base, "/api/scalar", json!({"field": "niche", "value": "fitness"})).await;

    let resp = reqwest::get(format!("{base}/api/state")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["answers"]["niche"], "fitness");
    assert_eq!(json["lifecycle"]["state"], "editing");
    assert_eq!(json["submitLabel"], "Enviar Solicitud");
}

#[tokio::test]
async fn unknown_field_and_option_are_rejected() {
    let (url, _, _) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (state, base) = spawn_test_server(&url).await;

    let resp = post(&base, "/api/scalar", json!({"field": "nickname", "value": "x"})).await;
    assert_eq!(resp.status(), 400);

    let resp = post(&base, "/api/choice", json!({"field": "editingStyle", "option": "custom"})).await;
    assert_eq!(resp.status(), 400);

    let resp = post(&base, "/api/distribution", json!({"platform": "Facebook"})).await;
    assert_eq!(resp.status(), 400);

    // A monthly tier is not offered under the per-video budget type.
    post(&base, "/api/choice", json!({"field": "budgetType", "option": "per-video"})).await;
    let resp = post(&base, "/api/choice", json!({"field": "budget", "option": "1500+"})).await;
    assert_eq!(resp.status(), 400);
    assert!(state.lock().unwrap().form.answers().budget().is_none());
}

#[tokio::test]
async fn budget_type_change_resets_tier() {
    let (url, _, _) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (_state, base) = spawn_test_server(&url).await;

    post(&base, "/api/choice", json!({"field": "budgetType", "option": "per-video"})).await;
    post(&base, "/api/choice", json!({"field": "budget", "option": "unsure"})).await;
    post(&base, "/api/choice", json!({"field": "budgetType", "option": "monthly-package"})).await;

    let json: Value = reqwest::get(format!("{base}/api/state"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(json["answers"]["budget"].is_null());
    assert_eq!(json["visibility"]["budgetSubsection"], "monthly-package");
}

#[tokio::test]
async fn distribution_toggles() {
    let (url, _, _) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (state, base) = spawn_test_server(&url).await;

    for _ in 0..3 {
        post(&base, "/api/distribution", json!({"platform": "YouTube Shorts"})).await;
    }
    let s = state.lock().unwrap();
    assert_eq!(s.form.answers().distribution().len(), 1);
}

// ── Submission ───────────────────────────────────────────────────────

#[tokio::test]
async fn submit_with_missing_answers_returns_422() {
    let (url, hits, _) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (_state, base) = spawn_test_server(&url).await;

    post(&base, "/api/scalar", json!({"field": "fullName", "value": "A"})).await;
    let resp = post(&base, "/api/submit", json!({})).await;
    assert_eq!(resp.status(), 422);

    let body: MissingResponse = resp.json().await.unwrap();
    assert!(!body.missing.contains(&"fullName".to_string()));
    assert!(body.missing.contains(&"email".to_string()));
    assert!(body.missing.contains(&"distribution".to_string()));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn accepted_submission_reaches_submitted() {
    let (url, hits, last_body) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (state, base) = spawn_test_server(&url).await;
    fill_minimal(&base).await;

    let resp = post(&base, "/api/submit", json!({})).await;
    assert_eq!(resp.status(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["lifecycle"]["state"], "submitted");
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let sent = last_body.lock().unwrap().clone().unwrap();
    assert_eq!(sent["fullName"], "A");
    assert_eq!(sent["distribution"], "TikTok");
    assert_eq!(sent["budget"], "<100");
    assert_eq!(sent["socialHandle"], "");

    // The form is closed for edits after success.
    let resp = post(&base, "/api/scalar", json!({"field": "niche", "value": "late"})).await;
    assert_eq!(resp.status(), 409);
    let resp = post(&base, "/api/submit", json!({})).await;
    assert_eq!(resp.status(), 409);
    assert!(state.lock().unwrap().form.is_submitted());
}

#[tokio::test]
async fn rejected_submission_keeps_answers_and_shows_notice() {
    let (url, _, _) = spawn_mock_endpoint(StatusCode::INTERNAL_SERVER_ERROR, Duration::ZERO).await;
    let (state, base) = spawn_test_server(&url).await;
    fill_minimal(&base).await;

    let resp = post(&base, "/api/submit", json!({})).await;
    assert_eq!(resp.status(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["lifecycle"]["state"], "editing_with_error");
    assert_eq!(
        json["notice"],
        "Hubo un error al enviar tu solicitud. Por favor, intenta de nuevo."
    );
    assert_eq!(json["interactive"], true);
    assert_eq!(json["answers"]["email"], "a@b.com");

    let s = state.lock().unwrap();
    assert_eq!(s.form.answers().scalar(ScalarField::CallToAction), "y");
}

#[tokio::test]
async fn second_submit_while_in_flight_sends_nothing() {
    let (url, hits, _) = spawn_mock_endpoint(StatusCode::OK, Duration::from_millis(500)).await;
    let (_state, base) = spawn_test_server(&url).await;
    fill_minimal(&base).await;

    let first = {
        let base = base.clone();
        tokio::spawn(async move { post(&base, "/api/submit", json!({})).await.status() })
    };

    // Wait for the first request to reach the endpoint.
    while hits.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let state: Value = reqwest::get(format!("{base}/api/state"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state["lifecycle"]["state"], "submitting");
    assert_eq!(state["submitLabel"], "Enviando...");

    let resp = post(&base, "/api/submit", json!({})).await;
    assert_eq!(resp.status(), 409);
    let resp = post(&base, "/api/scalar", json!({"field": "niche", "value": "x"})).await;
    assert_eq!(resp.status(), 409);

    assert_eq!(first.await.unwrap(), 200);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn client_timeout_does_not_leave_form_submitting() {
    let (url, hits, _) = spawn_mock_endpoint(StatusCode::OK, Duration::from_millis(400)).await;
    let (state, base) = spawn_test_server(&url).await;
    fill_minimal(&base).await;

    let impatient = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let result = impatient
        .post(format!("{base}/api/submit"))
        .json(&json!({}))
        .send()
        .await;
    assert!(result.is_err());

    // The endpoint still finishes and its outcome lands on the form.
    for _ in 0..150 {
        if !state.lock().unwrap().form.is_submitting() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    {
        let s = state.lock().unwrap();
        assert!(s.form.is_submitted(), "{:?}", s.form.lifecycle());
        assert!(s.pending_submission.is_none());
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_email_returns_422_with_format_reason() {
    let (url, hits, _) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (_state, base) = spawn_test_server(&url).await;
    fill_minimal(&base).await;
    post(&base, "/api/scalar", json!({"field": "email", "value": "ana"})).await;

    let resp = post(&base, "/api/submit", json!({})).await;
    assert_eq!(resp.status(), 422);
    let body: MissingResponse = resp.json().await.unwrap();
    assert_eq!(body.missing, vec!["emailFormat".to_string()]);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn post_control_quit() {
    let (url, _, _) = spawn_mock_endpoint(StatusCode::OK, Duration::ZERO).await;
    let (state, base) = spawn_test_server(&url).await;

    assert!(!state.lock().unwrap().quit_requested);
    let resp = post(&base, "/api/control", json!({"action": "quit"})).await;
    assert_eq!(resp.status(), 204);
    assert!(state.lock().unwrap().quit_requested);
}
