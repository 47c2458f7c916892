//! Placeholder session tokens.
//!
//! These are NOT credentials: a token is a hash of the email and the issue
//! time with a `mock_` prefix, and validation only checks the prefix. Real
//! signed tokens belong behind the same handler interface.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

pub const TOKEN_PREFIX: &str = "mock_";
pub const BEARER_PREFIX: &str = "Bearer ";

/// Issue a token for `email`.
pub fn issue(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(Utc::now().to_rfc3339().as_bytes());
    let digest = hasher.finalize();

    let mut token = String::with_capacity(TOKEN_PREFIX.len() + digest.len() * 2);
    token.push_str(TOKEN_PREFIX);
    for byte in digest {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

pub fn is_well_formed(token: &str) -> bool {
    token.starts_with(TOKEN_PREFIX)
}

/// Token from an `Authorization: Bearer <token>` header value.
pub fn bearer(header: &str) -> Option<&str> {
    header.strip_prefix(BEARER_PREFIX)
}
