//! Configuration schema definitions.
//!
//! Every section has defaults, and the defaults are the deployment contract:
//! Server1 on port 6000 serving `public`, Server2 on port 4000 serving
//! `public2`, the edge router in front of both.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router and its two origins.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Edge router listener.
    pub listener: ListenerConfig,

    /// The two static origins.
    pub origins: OriginsConfig,

    /// Outbound call bounds.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Both origins. `server1` receives `/server1*`, `server2` everything else.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OriginsConfig {
    pub server1: OriginConfig,
    pub server2: OriginConfig,
}

impl Default for OriginsConfig {
    fn default() -> Self {
        Self {
            server1: OriginConfig::new("Server1", "127.0.0.1:6000", "public"),
            server2: OriginConfig::new("Server2", "127.0.0.1:4000", "public2"),
        }
    }
}

/// A single static file origin.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OriginConfig {
    /// Label printed in every access log line.
    pub label: String,

    /// Bind address (e.g., "127.0.0.1:6000").
    pub bind_address: String,

    /// Document root served by this origin.
    pub root: String,
}

impl OriginConfig {
    pub fn new(
        label: impl Into<String>,
        bind_address: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            bind_address: bind_address.into(),
            root: root.into(),
        }
    }

    /// Base URL the edge router uses to reach this origin.
    ///
    /// An origin bound to an unspecified address (`0.0.0.0`, `::`) is reached
    /// over loopback.
    pub fn upstream_url(&self) -> Result<String, std::net::AddrParseError> {
        let mut addr: SocketAddr = self.bind_address.parse()?;
        if addr.ip().is_unspecified() {
            let loopback = if addr.is_ipv4() {
                Ipv4Addr::LOCALHOST.into()
            } else {
                Ipv6Addr::LOCALHOST.into()
            };
            addr.set_ip(loopback);
        }
        Ok(format!("http://{}", addr))
    }
}

/// Timeout configuration for outbound calls to the origins.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed for the origin to answer with a response head, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body buffered for forwarding, in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
