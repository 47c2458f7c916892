//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Every response:
//!     → origin.rs (allow-list / host suffix → CORS headers)
//!
//! Auth endpoints:
//!     → token.rs (issue placeholder tokens, parse bearer headers)
//! ```
//!
//! # Design Decisions
//! - Fail closed: unknown origins get no CORS headers, not an error
//! - Suffix matching is done on the parsed host, never the raw string
//! - Tokens are placeholders; no real authentication lives here

pub mod origin;
pub mod token;

pub use origin::OriginPolicy;
