//! Response relay and router-generated errors.
//!
//! # Design Decisions
//! - Origin responses are streamed back untouched: status, headers, body
//! - The router only generates a response for its own failures
//! - Unreachable origin → 502, slow origin → 504

use std::time::Duration;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hyper::body::Incoming;

use crate::routing::RoutingError;

/// Failures the router turns into a response of its own.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("request body of {declared} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { declared: u64, limit: usize },

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("upstream {upstream} request failed: {source}")]
    Upstream {
        upstream: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    #[error("upstream {upstream} did not respond within {timeout:?}")]
    Timeout { upstream: String, timeout: Duration },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Body(_) => StatusCode::BAD_REQUEST,
            ProxyError::Routing(_) | ProxyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ProxyError::PayloadTooLarge { .. } => "Request body too large",
            ProxyError::Body(_) => "Failed to read request body",
            ProxyError::Routing(_) | ProxyError::Upstream { .. } => "Upstream request failed",
            ProxyError::Timeout { .. } => "Upstream request timed out",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

/// Hand the origin's response back to the caller as-is, body still streaming.
pub fn relay(response: hyper::Response<Incoming>) -> Response {
    let (parts, body) = response.into_parts();
    Response::from_parts(parts, Body::new(body))
}
