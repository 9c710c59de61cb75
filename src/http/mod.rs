//! Edge router HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (Axum fallback handler)
//!     → routing (classify, rewrite, destination)
//!     → request.rs (buffer body unless GET/HEAD, copy method + headers)
//!     → hyper-util client (no redirect following)
//!     → response.rs (relay as-is, or generated 4xx/5xx)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use response::ProxyError;
pub use server::{forward, AppState, EdgeServer};
