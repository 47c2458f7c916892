//! Authentication endpoints: login, signup, current user, logout.
//!
//! Credential checks are placeholders. Login accepts any non-empty
//! email/password pair, signup any non-empty username/email/password, and
//! `me` accepts any token carrying the mock prefix.

use futures_util::future::{self, FutureExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::handlers::{Handler, HandlerFuture};
use crate::http::{ApiRequest, Reply};
use crate::security::token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSuccess {
    pub success: bool,
    pub token: String,
    pub user: User,
}

impl AuthSuccess {
    fn issue(user: User) -> Self {
        Self {
            success: true,
            token: token::issue(&user.email),
            user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// Decode the body as a JSON object.
fn object_body(req: &ApiRequest) -> ApiResult<Map<String, Value>> {
    req.json()
}

/// A string field; `null` and missing both read as absent, empty as absent.
fn text_field<'a>(body: &'a Map<String, Value>, name: &str) -> ApiResult<Option<&'a str>> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ApiError::bad_request(format!("field `{name}` must be a string"))),
    }
}

fn login(req: &ApiRequest) -> ApiResult<Reply> {
    let body = object_body(req)?;
    let email = text_field(&body, "email")?;
    let password = text_field(&body, "password")?;

    let (Some(email), Some(_password)) = (email, password) else {
        return Err(ApiError::InvalidCredentials);
    };

    let username = email.split('@').next().unwrap_or(email);
    let user = User {
        id: 1,
        username: username.to_string(),
        email: email.to_string(),
    };
    tracing::info!(username = %user.username, "Login accepted");
    Reply::ok(&AuthSuccess::issue(user))
}

fn signup(req: &ApiRequest) -> ApiResult<Reply> {
    let body = object_body(req)?;
    let username = text_field(&body, "username")?;
    let email = text_field(&body, "email")?;
    let password = text_field(&body, "password")?;

    let (Some(username), Some(email), Some(_password)) = (username, email, password) else {
        return Err(ApiError::bad_request("Invalid signup data"));
    };

    let user = User {
        id: 1,
        username: username.to_string(),
        email: email.to_string(),
    };
    tracing::info!(username = %user.username, "Signup accepted");
    Reply::ok(&AuthSuccess::issue(user))
}

fn current_user(req: &ApiRequest) -> ApiResult<Reply> {
    let bearer = req
        .authorization()
        .and_then(token::bearer)
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    if !token::is_well_formed(bearer) {
        return Err(ApiError::unauthorized("Invalid token"));
    }

    Reply::ok(&CurrentUser {
        user: User {
            id: 1,
            username: "demo_user".to_string(),
            email: "demo@example.com".to_string(),
        },
    })
}

/// `POST /api/auth/login`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginHandler;

impl Handler for LoginHandler {
    fn name(&self) -> &'static str {
        "auth_login"
    }

    fn handle<'a>(&'a self, req: &'a ApiRequest) -> HandlerFuture<'a> {
        async move { login(req) }.boxed()
    }
}

/// `POST /api/auth/signup`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignupHandler;

impl Handler for SignupHandler {
    fn name(&self) -> &'static str {
        "auth_signup"
    }

    fn handle<'a>(&'a self, req: &'a ApiRequest) -> HandlerFuture<'a> {
        async move { signup(req) }.boxed()
    }
}

/// `GET /api/auth/me`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeHandler;

impl Handler for MeHandler {
    fn name(&self) -> &'static str {
        "auth_me"
    }

    fn handle<'a>(&'a self, req: &'a ApiRequest) -> HandlerFuture<'a> {
        future::ready(current_user(req)).boxed()
    }
}

/// `POST /api/auth/logout`. Nothing to invalidate yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutHandler;

impl Handler for LogoutHandler {
    fn name(&self) -> &'static str {
        "auth_logout"
    }

    fn handle<'a>(&'a self, _req: &'a ApiRequest) -> HandlerFuture<'a> {
        future::ready(Reply::ok(&Ack { success: true })).boxed()
    }
}
