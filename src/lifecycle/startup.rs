//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind origins first, then the edge router
//! - Point the router at the addresses the origins actually bound
//! - Run every server until shutdown, failing fast on the first error

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::{OriginConfig, ProxyConfig};
use crate::http::EdgeServer;
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};
use crate::origin::{AccessLog, OriginServer};
use crate::routing::RoutingError;

/// Which part of the system this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Both origins and the edge router.
    All,
    Server1,
    Server2,
    Router,
}

impl Component {
    fn includes(self, other: Component) -> bool {
        self == Component::All || self == other
    }
}

/// Error type for startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("server failed: {0}")]
    Serve(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Servers that are bound and accepting connections.
pub struct Running {
    addresses: Vec<(Component, SocketAddr)>,
    tasks: JoinSet<Result<(), std::io::Error>>,
    shutdown: Shutdown,
}

impl Running {
    /// Bound address of `component`, if this process runs it.
    pub fn address(&self, component: Component) -> Option<SocketAddr> {
        self.addresses
            .iter()
            .find(|(c, _)| *c == component)
            .map(|(_, addr)| *addr)
    }

    /// Wait until every server has stopped.
    ///
    /// The first server error triggers shutdown for the rest.
    pub async fn wait(mut self) -> Result<(), StartupError> {
        while let Some(joined) = self.tasks.join_next().await {
            let outcome = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => StartupError::Serve(e),
                Err(e) => StartupError::Task(e),
            };
            tracing::error!(error = %outcome, "Server exited with error, shutting down");
            self.shutdown.trigger();
            return Err(outcome);
        }
        Ok(())
    }
}

/// Bind and spawn the servers selected by `component`.
pub async fn start(
    config: &ProxyConfig,
    component: Component,
    access_log: Arc<dyn AccessLog>,
    shutdown: &Shutdown,
) -> Result<Running, StartupError> {
    let mut effective = config.clone();
    let mut addresses = Vec::new();
    let mut tasks = JoinSet::new();

    let origins = [
        (Component::Server1, &mut effective.origins.server1),
        (Component::Server2, &mut effective.origins.server2),
    ];
    for (which, origin) in origins {
        if !component.includes(which) {
            continue;
        }
        let addr = spawn_origin(origin, access_log.clone(), shutdown, &mut tasks).await?;
        // Port 0 resolves at bind time; the router must dial the real port.
        origin.bind_address = addr.to_string();
        addresses.push((which, addr));
    }

    if component.includes(Component::Router) {
        let server = EdgeServer::new(&effective)?;
        let listener = net::bind(&effective.listener.bind_address).await?;
        addresses.push((Component::Router, listener.local_addr()?));
        tasks.spawn(server.run(listener, shutdown.subscribe()));
    }

    Ok(Running {
        addresses,
        tasks,
        shutdown: shutdown.clone(),
    })
}

async fn spawn_origin(
    origin: &OriginConfig,
    access_log: Arc<dyn AccessLog>,
    shutdown: &Shutdown,
    tasks: &mut JoinSet<Result<(), std::io::Error>>,
) -> Result<SocketAddr, StartupError> {
    let listener = net::bind(&origin.bind_address).await?;
    let addr = listener.local_addr()?;
    if !std::path::Path::new(&origin.root).is_dir() {
        tracing::warn!(label = %origin.label, root = %origin.root, "Document root does not exist, every request will 404");
    }
    let server = OriginServer::new(origin, access_log);
    tasks.spawn(server.run(listener, shutdown.subscribe()));
    Ok(addr)
}

/// Start the selected servers and run them until shutdown.
pub async fn launch(
    config: &ProxyConfig,
    component: Component,
    access_log: Arc<dyn AccessLog>,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    start(config, component, access_log, shutdown).await?.wait().await
}
