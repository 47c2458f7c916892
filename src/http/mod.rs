//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, body buffering)
//!     → request.rs (ApiRequest: method, target, headers, body)
//!     → [dispatch decides handler and CORS]
//!     → response.rs (Envelope → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{ApiRequest, UuidRequestId, X_REQUEST_ID};
pub use response::{Envelope, Reply};
pub use server::HttpServer;
