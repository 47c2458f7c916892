//! End-to-end dispatch behaviour, without a network.

use blt_worker::{ApiRequest, Dispatcher, Envelope};
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE,
};
use http::{Method, StatusCode};
use serde_json::{json, Value};

fn body(env: &Envelope) -> Value {
    serde_json::from_slice(&env.body).unwrap()
}

async fn get(path: &str) -> Envelope {
    Dispatcher::with_default_routes()
        .dispatch(ApiRequest::new(Method::GET, path))
        .await
}

async fn post(path: &str, payload: &str) -> Envelope {
    Dispatcher::with_default_routes()
        .dispatch(ApiRequest::new(Method::POST, path).body(payload.to_string()))
        .await
}

#[tokio::test]
async fn test_stats() {
    let env = get("/api/stats").await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(env.headers[CONTENT_TYPE], "application/json");
    assert_eq!(
        body(&env),
        json!({
            "bugs_reported": 15234,
            "active_researchers": 3421,
            "rewards_distributed": "$248,500",
            "projects_protected": 892,
        })
    );
}

#[tokio::test]
async fn test_bugs_and_leaderboard_shapes() {
    let bugs = body(&get("/api/bugs").await);
    assert_eq!(bugs["total"], 2);
    assert_eq!(bugs["bugs"].as_array().unwrap().len(), 2);
    assert_eq!(bugs["bugs"][0]["title"], "SQL Injection in login form");

    let board = body(&get("/api/leaderboard").await);
    assert_eq!(board["leaderboard"][2]["username"], "charlie");
}

#[tokio::test]
async fn test_leaderboard_is_idempotent() {
    let first = get("/api/leaderboard").await;
    let second = get("/api/leaderboard").await;
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_absolute_url_target() {
    let env = get("https://api.owaspblt.org/api/stats?x=1#frag").await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(body(&env), body(&get("/api/stats").await));
}

#[tokio::test]
async fn test_unknown_route() {
    let env = get("/api/unknown").await;
    assert_eq!(env.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&env), json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let env = post("/api/stats", "{}").await;
    assert_eq!(env.status, StatusCode::NOT_FOUND);

    let env = Dispatcher::with_default_routes()
        .dispatch(ApiRequest::new(Method::DELETE, "/api/bugs"))
        .await;
    assert_eq!(env.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_flow() {
    let env = post("/api/auth/login", r#"{"email":"a@b.com","password":"x"}"#).await;
    assert_eq!(env.status, StatusCode::OK);

    let json = body(&env);
    assert_eq!(json["success"], true);
    let token = json["token"].as_str().unwrap();
    assert!(!token.is_empty());
    assert_eq!(json["user"]["email"], "a@b.com");

    let me = Dispatcher::with_default_routes()
        .dispatch(
            ApiRequest::new(Method::GET, "/api/auth/me")
                .header("Authorization", &format!("Bearer {token}")),
        )
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(body(&me)["user"]["username"], "demo_user");
}

#[tokio::test]
async fn test_login_rejected() {
    let env = post("/api/auth/login", r#"{"email":""}"#).await;
    assert_eq!(env.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body(&env),
        json!({ "success": false, "error": "Invalid credentials" })
    );
}

#[tokio::test]
async fn test_login_parse_error() {
    let env = post("/api/auth/login", "{not json").await;
    assert_eq!(env.status, StatusCode::BAD_REQUEST);

    let json = body(&env);
    assert_eq!(json["success"], false);
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_validation() {
    let env = post("/api/auth/signup", r#"{"email":"a@b.com","password":"x"}"#).await;
    assert_eq!(env.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&env),
        json!({ "success": false, "error": "Invalid signup data" })
    );

    let env = post(
        "/api/auth/signup",
        r#"{"username":"dee","email":"d@e.io","password":"x"}"#,
    )
    .await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(body(&env)["user"]["username"], "dee");
}

#[tokio::test]
async fn test_me_without_token() {
    let env = get("/api/auth/me").await;
    assert_eq!(env.status, StatusCode::UNAUTHORIZED);
    assert_eq!(body(&env), json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_logout() {
    let env = post("/api/auth/logout", "").await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(body(&env), json!({ "success": true }));
}

#[tokio::test]
async fn test_cors_on_every_outcome() {
    let origin = "https://owasp-blt.github.io";
    let d = Dispatcher::with_default_routes();
    let requests = [
        ApiRequest::new(Method::GET, "/api/stats"),
        ApiRequest::new(Method::GET, "/api/nope"),
        ApiRequest::new(Method::GET, "/api/auth/me"),
        ApiRequest::new(Method::POST, "/api/auth/login").body("oops"),
        ApiRequest::new(Method::OPTIONS, "/api/auth/login"),
    ];

    for req in requests {
        let env = d.dispatch(req.header("Origin", origin)).await;
        assert_eq!(env.headers[ACCESS_CONTROL_ALLOW_ORIGIN], origin);
        assert_eq!(
            env.headers[ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            env.headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
        assert_eq!(env.headers[ACCESS_CONTROL_MAX_AGE], "86400");
    }
}

#[tokio::test]
async fn test_disallowed_origin_gets_no_cors() {
    let d = Dispatcher::with_default_routes();
    for origin in ["https://evil.example", "https://notgithub.io.evil.com"] {
        let env = d
            .dispatch(ApiRequest::new(Method::GET, "/api/stats").header("Origin", origin))
            .await;
        assert_eq!(env.status, StatusCode::OK);
        assert!(env.headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(env.headers.len(), 1);
    }
}

#[tokio::test]
async fn test_preflight_without_origin() {
    let env = Dispatcher::with_default_routes()
        .dispatch(ApiRequest::new(Method::OPTIONS, "/whatever"))
        .await;
    assert_eq!(env.status, StatusCode::NO_CONTENT);
    assert!(env.body.is_empty());
    assert!(env.headers.is_empty());
}
