// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route-level tests driving the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use complai_core::UpstreamReply;
use complai_gateway::{router, GatewayState};
use complai_test_utils::{
    PlainTextRenderer, TestHarness, TestHarnessBuilder, PLAIN_TEXT_CONTENT_TYPE,
};
use serde_json::Value;
use tower::ServiceExt;

const LETTER: &str = "Dear City Hall,\n\nThe street lights on Carrer Major are out.";

fn app(builder: TestHarnessBuilder) -> (Router, TestHarness) {
    let harness = builder.build();
    let app = router(GatewayState::new(harness.orchestrator.clone()));
    (app, harness)
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn home_returns_welcome_message() {
    let (app, _) = app(TestHarness::builder());
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, json) = send_json(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Welcome to the Complai Home Page!");
}

#[tokio::test]
async fn health_reports_ok_and_version() {
    let (app, _) = app(TestHarness::builder());
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send_json(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["uptime_secs"].is_u64());
}

#[tokio::test]
async fn ask_success_is_200_with_envelope() {
    let (app, _) = app(TestHarness::builder().with_mock_texts(["The pool opens in June."]));
    let (status, json) = send_json(
        app,
        post("/complai/ask", r#"{"text":"When does the El Prat pool open?"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "The pool opens in June.");
    assert!(json["error"].is_null());
    assert_eq!(json["errorCode"], 0);
}

#[tokio::test]
async fn blank_question_is_400() {
    let (app, harness) = app(TestHarness::builder());
    let (status, json) = send_json(app, post("/complai/ask", r#"{"text":"  "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errorCode"], 1);
    assert_eq!(harness.mock_upstream.call_count().await, 0);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let (app, _) = app(TestHarness::builder());
    let (status, json) = send_json(app, post("/complai/ask", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["errorCode"], 1);
}

#[tokio::test]
async fn refusal_is_422() {
    let (app, _) = app(
        TestHarness::builder().with_mock_texts(["I'm sorry, I can't help with that request."]),
    );
    let (status, json) = send_json(app, post("/complai/ask", r#"{"text":"Weather in Paris?"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errorCode"], 2);
    assert_eq!(json["error"], "Request is not about El Prat de Llobregat.");
}

#[tokio::test]
async fn upstream_failure_is_502() {
    let (app, _) = app(TestHarness::builder().with_mock_replies(vec![UpstreamReply::failed(
        "OpenRouter non-2xx response: 500",
        Some(500),
    )]));
    let (status, json) = send_json(app, post("/complai/redact", r#"{"text":"noise"}"#)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["errorCode"], 3);
    assert_eq!(json["error"], "OpenRouter non-2xx response: 500");
}

#[tokio::test(start_paused = true)]
async fn upstream_timeout_is_504() {
    let (app, _) = app(
        TestHarness::builder()
            .with_mock_texts([LETTER])
            .with_upstream_delay(Duration::from_secs(60)),
    );
    let (status, json) = send_json(app, post("/complai/ask", r#"{"text":"noise"}"#)).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["errorCode"], 4);
}

#[tokio::test]
async fn render_failure_is_500() {
    let (app, _) = app(
        TestHarness::builder()
            .with_mock_texts([format!("{{\"format\":\"pdf\"}}\n\n{LETTER}")])
            .with_failing_renderer(),
    );
    let (status, json) = send_json(
        app,
        post("/complai/redact", r#"{"text":"lights out","format":"pdf"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["errorCode"], 5);
}

#[tokio::test]
async fn redact_pdf_returns_document_with_length() {
    let (app, _) = app(
        TestHarness::builder().with_mock_texts([format!("{{\"format\":\"pdf\"}}\n\n{LETTER}")]),
    );
    let (status, headers, body) = send(
        app,
        post("/complai/redact", r#"{"text":"lights out","format":"pdf"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_LENGTH].to_str().unwrap(),
        body.len().to_string()
    );
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn redact_document_uses_renderer_content_type() {
    let (app, _) = app(
        TestHarness::builder()
            .with_mock_texts([format!("{{\"format\":\"pdf\"}}\n\n{LETTER}")])
            .with_renderer(Arc::new(PlainTextRenderer)),
    );
    let (status, headers, body) = send(
        app,
        post("/complai/redact", r#"{"text":"lights out","format":"pdf"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], PLAIN_TEXT_CONTENT_TYPE);
    assert!(String::from_utf8(body).unwrap().contains("Carrer Major"));
}

#[tokio::test]
async fn redact_without_format_degrades_to_json_text() {
    let (app, _) = app(TestHarness::builder().with_mock_texts([LETTER]));
    let (status, json) = send_json(app, post("/complai/redact", r#"{"text":"lights out"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], LETTER);
}

#[tokio::test]
async fn unsupported_format_is_rejected_before_upstream() {
    let (app, harness) = app(TestHarness::builder());
    let (status, json) = send_json(
        app,
        post("/complai/redact", r#"{"text":"lights out","format":"xml"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errorCode"], 1);
    assert!(json["error"].as_str().unwrap().contains("PDF"));
    assert_eq!(harness.mock_upstream.call_count().await, 0);
}

#[tokio::test]
async fn conversation_id_carries_history_across_requests() {
    let harness = TestHarness::builder()
        .with_mock_texts(["First.", "Second."])
        .build();
    let state = GatewayState::new(harness.orchestrator.clone());

    let body = r#"{"text":"About El Prat","conversationId":"web-42"}"#;
    send(router(state.clone()), post("/complai/ask", body)).await;
    send(router(state), post("/complai/ask", body)).await;

    let calls = harness.mock_upstream.calls().await;
    assert_eq!(calls[1].len(), 4);
}
