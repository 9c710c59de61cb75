//! Static file origins.
//!
//! Server1 and Server2 are the same server with a different label, port and
//! document root. File resolution, content types, index files and traversal
//! protection belong to `tower_http::services::ServeDir`.

pub mod access_log;
pub mod server;

pub use access_log::{AccessEntry, AccessLog, MemoryAccessLog, TracingAccessLog};
pub use server::OriginServer;
