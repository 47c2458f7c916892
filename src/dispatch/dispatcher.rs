//! Request dispatch.
//!
//! # Responsibilities
//! - Answer preflight (`OPTIONS`) requests directly
//! - Resolve (method, path) and run the matching handler
//! - Convert every failure, including handler panics, into an envelope
//! - Attach the origin policy's CORS headers to every envelope
//!
//! # Design Decisions
//! - `dispatch` is infallible: the caller always gets an HTTP response
//! - Exactly one handler runs per request; nothing is retried
//! - Stateless per request; the route table is shared read-only

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use http::Method;

use crate::error::ApiError;
use crate::handlers::{self, Handler};
use crate::http::{ApiRequest, Envelope};
use crate::observability::metrics;
use crate::routing::{path, Router};
use crate::security::OriginPolicy;

/// Route label for requests that matched nothing.
const UNMATCHED: &str = "none";
const PREFLIGHT: &str = "preflight";

/// Dispatches requests against an immutable route table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
    policy: OriginPolicy,
}

impl Dispatcher {
    pub fn new(router: Arc<Router>, policy: OriginPolicy) -> Self {
        Self { router, policy }
    }

    /// Dispatcher over the worker's own endpoints and default origin policy.
    pub fn with_default_routes() -> Self {
        Self::new(Arc::new(handlers::default_routes()), OriginPolicy::default())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }

    /// Handle one request end to end.
    pub async fn dispatch(&self, req: ApiRequest) -> Envelope {
        let start = Instant::now();
        let origin = req.origin();

        let (route, envelope) = if req.method() == Method::OPTIONS {
            (PREFLIGHT, Envelope::preflight())
        } else {
            match self.router.resolve(req.method(), req.target()) {
                Some(handler) => (handler.name(), self.invoke(handler.as_ref(), &req).await),
                None => {
                    tracing::debug!(
                        request_id = req.request_id().unwrap_or("-"),
                        method = %req.method(),
                        path = path::normalize(req.target()),
                        "No route matched"
                    );
                    (UNMATCHED, Envelope::from_error(&ApiError::NotFound))
                }
            }
        };

        let envelope = envelope.with_headers(self.policy.headers_for(origin));

        tracing::info!(
            request_id = req.request_id().unwrap_or("-"),
            method = %req.method(),
            path = path::normalize(req.target()),
            route,
            status = envelope.status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request dispatched"
        );
        metrics::record_request(req.method().as_str(), envelope.status.as_u16(), route, start);

        envelope
    }

    /// Envelope for a request rejected before dispatch (for example, a body
    /// over the size limit), with CORS headers for `origin`.
    pub fn reject(&self, origin: Option<&str>, err: &ApiError) -> Envelope {
        tracing::warn!(error = %err, status = err.status().as_u16(), "Request rejected");
        Envelope::from_error(err).with_headers(self.policy.headers_for(origin))
    }

    async fn invoke(&self, handler: &dyn Handler, req: &ApiRequest) -> Envelope {
        let outcome = AssertUnwindSafe(async { handler.handle(req).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(reply)) => Envelope::from_reply(reply),
            Ok(Err(err)) => {
                if matches!(err, ApiError::Internal(_)) {
                    tracing::error!(handler = handler.name(), error = %err, "Handler failed");
                } else {
                    tracing::debug!(handler = handler.name(), error = %err, "Handler declined request");
                }
                Envelope::from_error(&err)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(handler = handler.name(), panic = %message, "Handler panicked");
                Envelope::from_error(&ApiError::Internal(message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
