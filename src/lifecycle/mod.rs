//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → bind origins → bind edge router → serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → every server stops accepting → in-flight drain → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: origins before the router that depends on them
//! - Fail fast: a bind error aborts startup, a server error stops the rest

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{launch, start, Component, Running, StartupError};
