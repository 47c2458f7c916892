//! CORS origin policy.
//!
//! Decides whether a declared `Origin` is allowed and, if so, which CORS
//! headers go on the response. Rejected or absent origins get no headers at
//! all; the browser enforces the rest.

use http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use http::HeaderMap;
use url::Url;

/// Origins allowed by exact match.
pub const ALLOWED_ORIGINS: &[&str] = &[
    "https://owasp-blt.github.io",
    "http://localhost:3000",
    "http://localhost:8000",
];

/// Any host under this domain is allowed.
pub const ALLOWED_HOST_SUFFIX: &str = ".github.io";

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const MAX_AGE_SECS: u32 = 86_400;

/// Origin allow-list plus a trusted host suffix.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<String>,
    host_suffix: String,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::new(ALLOWED_ORIGINS.iter().copied(), ALLOWED_HOST_SUFFIX)
    }
}

impl OriginPolicy {
    pub fn new<I, S>(allowed: I, host_suffix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            host_suffix: host_suffix.into().to_ascii_lowercase(),
        }
    }

    /// True if `origin` may read responses.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.iter().any(|o| o == origin) || self.matches_host_suffix(origin)
    }

    /// The suffix test runs on the parsed host, and the origin must be a bare
    /// `scheme://host[:port]` so that strings such as
    /// `https://evil.com/.github.io` never qualify.
    fn matches_host_suffix(&self, origin: &str) -> bool {
        let Ok(url) = Url::parse(origin) else {
            return false;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        if url.origin().ascii_serialization() != origin {
            return false;
        }
        match url.host_str() {
            Some(host) => host
                .strip_suffix(self.host_suffix.as_str())
                .is_some_and(|label| !label.is_empty() && !label.ends_with('.')),
            None => false,
        }
    }

    /// CORS headers for `origin`; empty when absent or not allowed.
    pub fn headers_for(&self, origin: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let Some(origin) = origin else {
            return headers;
        };
        if !self.is_allowed(origin) {
            tracing::debug!(origin = %origin, "Origin not allowed");
            return headers;
        }
        let Ok(value) = HeaderValue::from_str(origin) else {
            return headers;
        };
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from(MAX_AGE_SECS));
        headers
    }
}
