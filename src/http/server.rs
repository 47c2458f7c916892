//! HTTP server setup.
//!
//! # Responsibilities
//! - Host the dispatcher behind an Axum router (single fallback handler)
//! - Wire up middleware (request ID, tracing)
//! - Buffer request bodies up to the configured limit
//! - Bind to a listener and shut down gracefully
//!
//! # Design Decisions
//! - No Axum routes: every method and path reaches the dispatcher, which
//!   owns routing, CORS and error shaping
//! - No middleware may answer on its own, or CORS headers would be lost
//!   (hence no timeout or body-limit layers; the limit is enforced here)

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::ORIGIN,
    Router,
};
use http_body_util::LengthLimitError;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::WorkerConfig;
use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::http::request::{ApiRequest, UuidRequestId};
use crate::http::response::Envelope;

/// Application state injected into the fallback handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_bytes: usize,
}

/// HTTP server hosting the dispatcher.
pub struct HttpServer {
    router: Router,
    config: WorkerConfig,
    route_count: usize,
}

impl HttpServer {
    /// Server over the worker's default routes.
    pub fn new(config: WorkerConfig) -> Self {
        Self::with_dispatcher(config, Dispatcher::with_default_routes())
    }

    pub fn with_dispatcher(config: WorkerConfig, dispatcher: Dispatcher) -> Self {
        let route_count = dispatcher.router().len();
        let state = AppState {
            dispatcher: Arc::new(dispatcher),
            max_body_bytes: config.limits.max_body_bytes,
        };
        let router = Self::build_router(state);
        Self {
            router,
            config,
            route_count,
        }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The Axum router, for in-process use (tests, embedding).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.route_count,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Adapts an Axum request to the dispatcher.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Envelope {
    let (parts, body) = request.into_parts();

    match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => {
            state
                .dispatcher
                .dispatch(ApiRequest::from_parts(parts, bytes))
                .await
        }
        Err(err) => {
            let origin = parts.headers.get(ORIGIN).and_then(|v| v.to_str().ok());
            let err = body_error(err, state.max_body_bytes);
            state.dispatcher.reject(origin, &err)
        }
    }
}

fn body_error(err: axum::Error, limit: usize) -> ApiError {
    let inner = err.into_inner();
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&*inner);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return ApiError::PayloadTooLarge(limit);
        }
        source = e.source();
    }
    ApiError::bad_request(format!("failed to read request body: {inner}"))
}

/// Wait for the shutdown broadcast or Ctrl+C.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = shutdown.recv() => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                let _ = shutdown.recv().await;
            }
        }
    }
    tracing::info!("Shutdown signal received");
}
