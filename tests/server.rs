//! Worker behaviour through the Axum stack and over a real socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use blt_worker::{HttpServer, WorkerConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    HttpServer::new(WorkerConfig::default()).app()
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let resp = app()
        .oneshot(Request::builder().uri("/api/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let id = resp.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_client_request_id_is_kept() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/bugs")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn test_login_over_axum() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::from(r#"{"email":"a@b.com","password":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    let json = body_json(resp).await;
    assert_eq!(json["user"]["username"], "a");
}

#[tokio::test]
async fn test_oversized_body_is_413_with_cors() {
    let mut config = WorkerConfig::default();
    config.limits.max_body_bytes = 16;
    let app = HttpServer::new(config).app();

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::ORIGIN, "https://foo.github.io")
                .body(Body::from(r#"{"email":"someone@example.com","password":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://foo.github.io"
    );
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Payload too large");
    assert_eq!(json["limit"], 16);
}

#[tokio::test]
async fn test_preflight_over_axum() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/auth/login")
                .header(header::ORIGIN, "https://owasp-blt.github.io")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_over_socket() {
    let worker = common::start_worker(WorkerConfig::default()).await;
    let client = common::client();

    let res = client
        .get(worker.url("/api/stats?cache=no"))
        .header("Origin", "https://owasp-blt.github.io")
        .send()
        .await
        .expect("worker unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "https://owasp-blt.github.io"
    );
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["projects_protected"], 892);

    let res = client.get(worker.url("/api/unknown")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    worker.shutdown.trigger();
}
