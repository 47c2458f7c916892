//! OWASP BLT edge API worker.
//!
//! Routes requests by method and exact path to endpoint handlers and
//! decorates every response with CORS headers derived from the request's
//! `Origin`.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use crate::config::WorkerConfig;
pub use crate::dispatch::Dispatcher;
pub use crate::error::ApiError;
pub use crate::http::{ApiRequest, Envelope, HttpServer, Reply};
pub use crate::lifecycle::Shutdown;
