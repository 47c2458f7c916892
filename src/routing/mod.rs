//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request target (path or absolute URL) + method
//!     → path.rs (drop scheme/host, query, fragment)
//!     → router.rs (exact lookup in method → path → handler table)
//!     → Return: handler or no-match
//!
//! Route table construction (at startup):
//!     RouterBuilder::route(...) calls
//!     → build()
//!     → Freeze as immutable Router, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Routes registered once at startup, immutable at runtime
//! - No regex, no patterns: exact string match only
//! - Deterministic: same input always resolves to the same handler

pub mod path;
pub mod router;

pub use router::{Router, RouterBuilder};
