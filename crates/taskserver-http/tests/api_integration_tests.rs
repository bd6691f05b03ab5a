//! Integration tests for the task API.
//!
//! These tests verify that:
//! - The full create/fetch/query/delete lifecycle works end to end
//! - Malformed bodies and paths are rejected before the store is touched
//! - Wrong content types and undefined verbs get their own error codes

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;
use taskserver_core::{CredentialGate, StoredSecret};
use taskserver_http::runtime::HttpTaskRuntime;
use tower::ServiceExt; // for `oneshot` method

const USERNAME: &str = "alice";
const SECRET: &str = "spiral-sunset";

/// Helper to create test app
fn test_app() -> axum::Router {
    let gate = CredentialGate::new([(USERNAME.to_string(), StoredSecret::derive(SECRET))]);
    HttpTaskRuntime::new(gate).router()
}

fn basic_auth() -> String {
    format!("Basic {}", STANDARD.encode(format!("{USERNAME}:{SECRET}")))
}

fn create_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/task/")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, basic_auth())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn full_task_lifecycle() {
    let app = test_app();

    // Create: the response carries only the assigned id.
    let response = app
        .clone()
        .oneshot(create_request(
            r#"{"text":"buy milk","tags":["errand"],"due":"2024-05-01T00:00:00Z"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(read_json(response).await, json!({"id": 0}));

    // Fetch by id returns the full task.
    let response = app.clone().oneshot(get("/task/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let expected = json!({
        "id": 0,
        "text": "buy milk",
        "tags": ["errand"],
        "due": "2024-05-01T00:00:00Z",
    });
    assert_eq!(read_json(response).await, expected);

    // The tag index finds it.
    let response = app.clone().oneshot(get("/tag/errand")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([expected]));

    // The due-date index finds it too, time of day notwithstanding.
    let response = app.clone().oneshot(get("/due/2024/5/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([expected]));

    // Delete, then fetch: gone.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/task/0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/task/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], "task_not_found");
}

#[tokio::test]
async fn list_all_starts_empty() {
    let app = test_app();

    let response = app.oneshot(get("/task/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn create_ids_are_sequential() {
    let app = test_app();

    for expected in 0..3 {
        let response = app
            .clone()
            .oneshot(create_request(
                r#"{"text":"t","tags":[],"due":"2024-05-01T00:00:00Z"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(read_json(response).await, json!({ "id": expected }));
    }
}

#[tokio::test]
async fn unknown_field_is_rejected_without_mutating_the_store() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(create_request(r#"{"text":"x","bogus":1}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "bad_request");

    // The store was never touched.
    let response = app.oneshot(get("/task/")).await.unwrap();
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = test_app();

    let response = app
        .oneshot(create_request("{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_required_field_is_bad_request() {
    let app = test_app();

    let response = app
        .oneshot(create_request(r#"{"text":"x","tags":[]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_content_type_is_unsupported_format() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/task/")
                .header(header::CONTENT_TYPE, "text/plain")
                .header(header::AUTHORIZATION, basic_auth())
                .body(Body::from(
                    r#"{"text":"t","tags":[],"due":"2024-05-01T00:00:00Z"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(read_json(response).await["error"], "unsupported_format");
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
    let app = test_app();

    let response = app.clone().oneshot(get("/task/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative ids do not parse either.
    let response = app.oneshot(get("/task/-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_month_is_bad_request() {
    let app = test_app();

    let response = app.clone().oneshot(get("/due/2024/13/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/due/2024/abc/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undefined_verb_is_method_not_allowed() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/task/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(read_json(response).await["error"], "method_not_allowed");

    // Query routes define GET only.
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/tag/errand")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn due_date_query_matches_any_time_of_day() {
    let app = test_app();

    for due in ["2024-05-01T08:00:00Z", "2024-05-01T22:30:00Z"] {
        let body = json!({"text": "t", "tags": [], "due": due}).to_string();
        app.clone().oneshot(create_request(&body)).await.unwrap();
    }

    let response = app.oneshot(get("/due/2024/5/1")).await.unwrap();
    let tasks = read_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_all_empties_the_store_but_not_the_counter() {
    let app = test_app();

    app.clone()
        .oneshot(create_request(
            r#"{"text":"t","tags":[],"due":"2024-05-01T00:00:00Z"}"#,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/task/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get("/task/")).await.unwrap();
    assert_eq!(read_json(response).await, json!([]));

    // Ids stay monotonic across the bulk delete.
    let response = app
        .oneshot(create_request(
            r#"{"text":"t","tags":[],"due":"2024-05-01T00:00:00Z"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await, json!({"id": 1}));
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_app();

    let response = app.oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn create_with_attachments_round_trips() {
    let app = test_app();

    let body = json!({
        "text": "send report",
        "tags": ["work"],
        "due": "2024-06-01T00:00:00Z",
        "attachments": [
            {"name": "report.pdf", "date": "2024-05-20T12:00:00Z", "contents": "ZGF0YQ=="}
        ]
    })
    .to_string();

    let response = app.clone().oneshot(create_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/task/0")).await.unwrap();
    let task = read_json(response).await;
    assert_eq!(task["attachments"][0]["name"], "report.pdf");
}
