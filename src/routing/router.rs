//! Route lookup and path rewriting.
//!
//! # Responsibilities
//! - Hold the routing table: prefix routes plus one fallback upstream
//! - Classify a request path, rewrite it, build the destination URI
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First matching prefix wins; anything unmatched goes to the fallback
//! - Query strings are carried over byte-for-byte

use std::borrow::Cow;

use axum::http::uri::{Authority, Scheme};
use axum::http::Uri;

use crate::config::ProxyConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// Prefix owned by Server1.
pub const SERVER1_PREFIX: &str = "/server1";

/// Error type for routing table construction and destination building.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("invalid upstream '{url}': {reason}")]
    InvalidUpstream { url: String, reason: String },

    #[error("failed to build destination URI: {0}")]
    Destination(#[from] axum::http::Error),
}

/// An origin the router forwards to, identified by its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    name: String,
    scheme: Scheme,
    authority: Authority,
}

impl Upstream {
    /// Parse a base URL of the form `http://host:port`.
    pub fn new(name: impl Into<String>, base_url: &str) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidUpstream {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = base_url.parse().map_err(|_| invalid("not a URI"))?;
        let parts = uri.into_parts();
        let scheme = parts.scheme.ok_or_else(|| invalid("missing scheme"))?;
        let authority = parts.authority.ok_or_else(|| invalid("missing host"))?;
        if let Some(pq) = parts.path_and_query {
            if pq.as_str() != "/" && !pq.as_str().is_empty() {
                return Err(invalid("base URL must not carry a path or query"));
            }
        }

        Ok(Self {
            name: name.into(),
            scheme,
            authority,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `scheme://authority` without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }
}

/// How a matched path is transformed before forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRewrite {
    /// Forward the path unchanged.
    Preserve,
    /// Remove the route prefix; an empty remainder becomes `/`.
    StripPrefix,
}

/// A prefix route.
#[derive(Debug, Clone)]
pub struct Route {
    pub matcher: PathPrefixMatcher,
    pub upstream: Upstream,
    pub rewrite: PathRewrite,
}

impl Route {
    fn rewrite_path<'a>(&self, path: &'a str) -> Cow<'a, str> {
        match self.rewrite {
            PathRewrite::Preserve => Cow::Borrowed(path),
            PathRewrite::StripPrefix => {
                let rest = self.matcher.strip(path).unwrap_or(path);
                if rest.is_empty() {
                    Cow::Borrowed("/")
                } else if rest.starts_with('/') {
                    Cow::Borrowed(rest)
                } else {
                    // "/server1abc" leaves "abc", which is not an origin-form path.
                    Cow::Owned(format!("/{rest}"))
                }
            }
        }
    }
}

/// Outcome of classifying one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision<'a> {
    pub upstream: &'a Upstream,
    /// Rewritten path plus the inbound query string.
    pub path_and_query: String,
    /// Absolute URI the request is forwarded to.
    pub destination: Uri,
}

/// Immutable routing table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Upstream,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, fallback: Upstream) -> Self {
        Self { routes, fallback }
    }

    /// The fixed table: `/server1*` goes to `server1` with the prefix
    /// stripped, everything else goes to `server2` untouched.
    pub fn standard(server1: Upstream, server2: Upstream) -> Self {
        Self::new(
            vec![Route {
                matcher: PathPrefixMatcher::new(SERVER1_PREFIX),
                upstream: server1,
                rewrite: PathRewrite::StripPrefix,
            }],
            server2,
        )
    }

    /// Build the standard table against the configured origin addresses.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, RoutingError> {
        let upstream = |origin: &crate::config::OriginConfig| {
            let url = origin
                .upstream_url()
                .map_err(|e| RoutingError::InvalidUpstream {
                    url: origin.bind_address.clone(),
                    reason: e.to_string(),
                })?;
            Upstream::new(origin.label.clone(), &url)
        };

        Ok(Self::standard(
            upstream(&config.origins.server1)?,
            upstream(&config.origins.server2)?,
        ))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn fallback(&self) -> &Upstream {
        &self.fallback
    }

    /// Classify `uri`, rewrite its path and build the destination.
    pub fn route(&self, uri: &Uri) -> Result<RoutingDecision<'_>, RoutingError> {
        let path = uri.path();

        let (upstream, path) = match self.routes.iter().find(|r| r.matcher.matches(path)) {
            Some(route) => (&route.upstream, route.rewrite_path(path)),
            None => (&self.fallback, Cow::Borrowed(path)),
        };

        let path_and_query = match uri.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.into_owned(),
        };

        let destination = Uri::builder()
            .scheme(upstream.scheme.clone())
            .authority(upstream.authority.clone())
            .path_and_query(path_and_query.as_str())
            .build()?;

        Ok(RoutingDecision {
            upstream,
            path_and_query,
            destination,
        })
    }
}
