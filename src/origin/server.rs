//! Static file origin server.
//!
//! # Responsibilities
//! - Log every request (label, method, raw URL) before answering it
//! - Resolve the path against the document root via `ServeDir`
//! - Answer misses and non-GET/HEAD methods with a plain 404

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    handler::HandlerWithoutStateExt,
    http::{Method, StatusCode, Uri},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::OriginConfig;
use crate::origin::access_log::{AccessEntry, AccessLog};

#[derive(Clone)]
struct LogState {
    label: Arc<str>,
    log: Arc<dyn AccessLog>,
}

/// One static origin (Server1 or Server2).
pub struct OriginServer {
    label: Arc<str>,
    router: Router,
}

impl OriginServer {
    pub fn new(config: &OriginConfig, log: Arc<dyn AccessLog>) -> Self {
        let label: Arc<str> = config.label.as_str().into();

        let files = ServeDir::new(&config.root)
            .append_index_html_on_directories(true)
            .call_fallback_on_method_not_allowed(true)
            .fallback(not_found.into_service());

        let state = LogState {
            label: label.clone(),
            log,
        };

        let router = Router::new()
            .fallback_service(files)
            .layer(middleware::from_fn_with_state(state, log_request))
            .layer(TraceLayer::new_for_http());

        Self { label, router }
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
        tracing::info!(label = %self.label, "{} is running on http://{}", self.label, addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(label = %self.label, "Origin stopped");
        Ok(())
    }
}

async fn log_request(State(state): State<LogState>, request: Request, next: Next) -> Response {
    let entry = AccessEntry::now(
        state.label.clone(),
        request.method().clone(),
        request.uri().clone(),
    );
    state.log.record(&entry);
    next.run(request).await
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Cannot {} {}", method, uri.path()))
}
