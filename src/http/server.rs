//! Edge router HTTP server.
//!
//! # Responsibilities
//! - Create the Axum router: every path, every method goes to one handler
//! - Classify, rewrite and forward each request to its origin
//! - Relay the origin response, or answer with a generated error
//! - Bounded outbound calls (connect timeout + response timeout)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{LimitsConfig, ProxyConfig, TimeoutConfig};
use crate::http::request::{build_outbound, carries_body, read_body};
use crate::http::response::{relay, ProxyError};
use crate::routing::{RouteTable, RoutingError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub client: Client<HttpConnector, Body>,
    pub request_timeout: Duration,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(table: RouteTable, timeouts: &TimeoutConfig, limits: &LimitsConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        // The legacy client never follows redirects, so 3xx responses reach
        // the caller as-is. `set_host(false)` keeps it from inventing a Host
        // header when the inbound request had none.
        let client = Client::builder(TokioExecutor::new())
            .set_host(false)
            .build(connector);

        Self {
            table: Arc::new(table),
            client,
            request_timeout: Duration::from_secs(timeouts.request_secs),
            max_body_size: limits.max_body_size,
        }
    }
}

/// HTTP server for the edge router.
pub struct EdgeServer {
    router: Router,
    state: AppState,
}

impl EdgeServer {
    /// Create the edge router against the configured origins.
    pub fn new(config: &ProxyConfig) -> Result<Self, RoutingError> {
        let table = RouteTable::from_config(config)?;
        Ok(Self::with_table(table, &config.timeouts, &config.limits))
    }

    /// Create the edge router with an explicit routing table.
    pub fn with_table(table: RouteTable, timeouts: &TimeoutConfig, limits: &LimitsConfig) -> Self {
        let state = AppState::new(table, timeouts, limits);
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The Axum router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let table = &self.state.table;
        for route in table.routes() {
            tracing::info!(
                prefix = %route.matcher.prefix(),
                upstream = %route.upstream.name(),
                target = %route.upstream.base_url(),
                "Route registered"
            );
        }
        tracing::info!(
            upstream = %table.fallback().name(),
            target = %table.fallback().base_url(),
            "Default route registered"
        );
        tracing::info!(address = %addr, "Edge router listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Edge router stopped");
        Ok(())
    }
}

async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match forward(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(method = %method, uri = %uri, status = %status, error = %err, "Proxy request failed");
            } else {
                tracing::warn!(method = %method, uri = %uri, status = %status, error = %err, "Request rejected");
            }
            err.into_response()
        }
    }
}

/// Forward one request: classify → rewrite → forward → relay.
pub async fn forward(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let decision = state.table.route(request.uri())?;
    let upstream = decision.upstream.name().to_string();

    tracing::debug!(
        method = %request.method(),
        path = %request.uri(),
        upstream = %upstream,
        destination = %decision.destination,
        "Forwarding request"
    );

    let (parts, body) = request.into_parts();
    let body = if carries_body(&parts.method) {
        Body::from(read_body(&parts.headers, body, state.max_body_size).await?)
    } else {
        Body::empty()
    };
    let outbound = build_outbound(parts, decision.destination, body);

    let response = tokio::time::timeout(state.request_timeout, state.client.request(outbound))
        .await
        .map_err(|_| ProxyError::Timeout {
            upstream: upstream.clone(),
            timeout: state.request_timeout,
        })?
        .map_err(|source| ProxyError::Upstream {
            upstream: upstream.clone(),
            source,
        })?;

    tracing::debug!(upstream = %upstream, status = %response.status(), "Upstream responded");
    Ok(relay(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Upstream;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn unreachable_table() -> RouteTable {
        let closed = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let url = format!("http://{closed}");
        RouteTable::standard(
            Upstream::new("Server1", &url).unwrap(),
            Upstream::new("Server2", &url).unwrap(),
        )
    }

    #[tokio::test]
    async fn unreachable_origin_is_bad_gateway() {
        let server = EdgeServer::with_table(
            unreachable_table(),
            &TimeoutConfig::default(),
            &LimitsConfig::default(),
        );

        let response = server
            .router()
            .oneshot(Request::get("/server1/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn oversize_body_is_rejected_before_forwarding() {
        let limits = LimitsConfig { max_body_size: 4 };
        let server = EdgeServer::with_table(unreachable_table(), &TimeoutConfig::default(), &limits);

        let response = server
            .router()
            .oneshot(
                Request::post("/upload")
                    .header("content-length", "10")
                    .body(Body::from("0123456789"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
