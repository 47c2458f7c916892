//! Endpoint handlers.
//!
//! # Data Flow
//! ```text
//! Dispatcher
//!     → Handler::handle(&ApiRequest)
//!     → Ok(Reply)          (status + JSON body)
//!     → Err(ApiError)      (expected failure, mapped to 400/401/...)
//! ```
//!
//! # Design Decisions
//! - One trait for every endpoint; the dispatcher never knows which one runs
//! - Handlers are async so a real implementation can await storage
//! - Business rules here are placeholders (mock data, mock tokens)

pub mod auth;
pub mod bugs;
pub mod leaderboard;
pub mod stats;

use std::fmt;

use futures_util::future::BoxFuture;
use http::Method;

use crate::error::ApiResult;
use crate::http::{ApiRequest, Reply};
use crate::routing::Router;

/// Future returned by a handler.
pub type HandlerFuture<'a> = BoxFuture<'a, ApiResult<Reply>>;

/// A unit that turns a request into a reply or a failure.
pub trait Handler: Send + Sync + fmt::Debug {
    /// Short name used in logs and metrics labels.
    fn name(&self) -> &'static str;

    fn handle<'a>(&'a self, req: &'a ApiRequest) -> HandlerFuture<'a>;
}

/// The worker's route table.
pub fn default_routes() -> Router {
    Router::builder()
        .route(Method::GET, "/api/stats", stats::StatsHandler)
        .route(Method::GET, "/api/auth/me", auth::MeHandler)
        .route(Method::GET, "/api/bugs", bugs::BugsHandler)
        .route(Method::GET, "/api/leaderboard", leaderboard::LeaderboardHandler)
        .route(Method::POST, "/api/auth/login", auth::LoginHandler)
        .route(Method::POST, "/api/auth/signup", auth::SignupHandler)
        .route(Method::POST, "/api/auth/logout", auth::LogoutHandler)
        .build()
}
