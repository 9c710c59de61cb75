//! Path-prefix edge router in front of two static file origins.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod origin;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::EdgeServer;
pub use lifecycle::Shutdown;
pub use origin::OriginServer;
pub use routing::RouteTable;
