//! Network layer subsystem.
//!
//! Binds the TCP listeners for the edge router and both origins; the
//! listeners are then handed to `axum::serve`.

pub mod listener;

pub use listener::{bind, ListenerError};
