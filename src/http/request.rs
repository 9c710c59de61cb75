//! Outbound request construction.
//!
//! # Responsibilities
//! - Decide whether a method forwards a body (everything except GET/HEAD)
//! - Buffer the inbound body, bounded by the configured limit
//! - Copy method and headers verbatim onto the destination URI
//!
//! # Design Decisions
//! - No header is added, removed or renamed, `Host` included. The origin
//!   sees the Host the client sent, not its own address.
//! - Exception: when a GET/HEAD body is dropped, the framing headers that
//!   describe it go too, otherwise the origin would wait for bytes that
//!   never arrive.

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Request, Uri};

use crate::http::response::ProxyError;

/// GET and HEAD never carry a forwarded body.
pub fn carries_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

/// Read the whole inbound body into memory.
///
/// A declared `Content-Length` above `limit` is rejected before reading.
pub async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    if let Some(declared) = declared_length(headers) {
        if declared > limit as u64 {
            return Err(ProxyError::PayloadTooLarge { declared, limit });
        }
    }

    axum::body::to_bytes(body, limit)
        .await
        .map_err(ProxyError::Body)
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Build the outbound request: same method, same headers, new URI.
pub fn build_outbound(parts: Parts, destination: Uri, body: Body) -> Request<Body> {
    let mut headers = parts.headers;
    if !carries_body(&parts.method) {
        strip_discarded_framing(&mut headers);
    }

    let mut request = Request::new(body);
    *request.method_mut() = parts.method;
    *request.uri_mut() = destination;
    *request.headers_mut() = headers;
    request
}

fn strip_discarded_framing(headers: &mut HeaderMap) {
    headers.remove(TRANSFER_ENCODING);
    if headers
        .get(CONTENT_LENGTH)
        .is_some_and(|v| v.as_bytes() != b"0")
    {
        headers.remove(CONTENT_LENGTH);
    }
}
