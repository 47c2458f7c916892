//! Response envelopes.
//!
//! # Responsibilities
//! - `Reply`: what a handler produces on success (status + JSON bytes)
//! - `Envelope`: the complete outbound response (status, headers, body)
//! - Map `ApiError` to its JSON error envelope
//!
//! # Design Decisions
//! - Bodies are serialized once, in struct field order, so identical
//!   payloads give identical bytes
//! - CORS headers are merged in by the dispatcher, never by handlers

use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

const APPLICATION_JSON: &str = "application/json";

/// Successful handler output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl Reply {
    /// 200 with `payload` as JSON.
    pub fn ok<T: Serialize + ?Sized>(payload: &T) -> ApiResult<Self> {
        Self::with_status(StatusCode::OK, payload)
    }

    pub fn with_status<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> ApiResult<Self> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| ApiError::internal(format!("failed to serialize response: {e}")))?;
        Ok(Self {
            status,
            body: Bytes::from(body),
        })
    }
}

/// A fully formed response.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Envelope {
    /// JSON envelope with `Content-Type: application/json`.
    pub fn json(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Empty 204 answer to a CORS preflight.
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn from_reply(reply: Reply) -> Self {
        Self::json(reply.status, reply.body)
    }

    pub fn from_error(err: &ApiError) -> Self {
        Self::json(err.status(), err.body().to_string())
    }

    /// Merge extra headers, replacing any with the same name.
    pub fn with_headers(mut self, extra: HeaderMap) -> Self {
        for (name, value) in extra {
            if let Some(name) = name {
                self.headers.insert(name, value);
            }
        }
        self
    }

    /// Body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_http(self) -> http::Response<Bytes> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let (parts, body) = self.into_http().into_parts();
        Response::from_parts(parts, axum::body::Body::from(body))
    }
}
