//! Request abstraction handed to the dispatcher.
//!
//! # Responsibilities
//! - Carry method, raw target, headers and the buffered body
//! - Expose the few headers the dispatcher and handlers read
//! - Decode JSON bodies into typed payloads
//! - Generate unique request IDs (UUID v4) at the server edge
//!
//! # Design Decisions
//! - Immutable once built; handlers only borrow it
//! - Independent of axum so any host runtime can construct one
//! - Body parse failures are client errors, not internal ones

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, AUTHORIZATION, ORIGIN};
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Stamps requests with a random UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// An inbound request as seen by the dispatcher.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    target: String,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiRequest {
    /// Start a request with no headers and an empty body.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Build from the parts of an `http` request and its collected body.
    pub fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            target: parts.uri.to_string(),
            headers: parts.headers,
            body,
        }
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path or absolute URL exactly as received.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn raw_body(&self) -> &Bytes {
        &self.body
    }

    /// Value of a header, if present and valid UTF-8.
    pub fn header_str(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The declared `Origin`, if any.
    pub fn origin(&self) -> Option<&str> {
        self.header_str(ORIGIN)
    }

    pub fn authorization(&self) -> Option<&str> {
        self.header_str(AUTHORIZATION)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.header_str(X_REQUEST_ID)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_slice(&self.body).map_err(ApiError::from)
    }
}
