//! Observability subsystem.
//!
//! Structured logging via `tracing`. Per-request origin access lines go
//! through the same subscriber on the `access` target (see `origin::access_log`).

pub mod logging;
