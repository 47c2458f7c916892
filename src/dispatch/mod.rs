//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! ApiRequest
//!     → OPTIONS?  → 204 preflight envelope
//!     → routing::Router::resolve(method, target)
//!         → no match → 404 envelope
//!         → handler  → Reply | ApiError | panic
//!     → Envelope (+ CORS headers from security::origin)
//! ```
//!
//! # Design Decisions
//! - Single catch-all boundary: nothing escapes `dispatch`
//! - Expected failures are values; only the unexpected becomes a 500
//! - The dispatcher is runtime-agnostic; http::server adapts axum to it

pub mod dispatcher;

pub use dispatcher::Dispatcher;
