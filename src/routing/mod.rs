//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request URI (path, query)
//!     → router.rs (route lookup)
//!     → matcher.rs (prefix check)
//!     → RoutingDecision: upstream + rewritten path + destination URI
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - One prefix route (`/server1`) and a catch-all; no other patterns
//! - Deterministic: same input always yields the same decision

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{
    PathRewrite, Route, RouteTable, RoutingDecision, RoutingError, Upstream, SERVER1_PREFIX,
};
