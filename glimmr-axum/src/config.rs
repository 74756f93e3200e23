//! Server configuration.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{Level, event};

/// Configuration for the HTTP server.
///
/// ```
/// use glimmr_axum::config::AxumConfig;
///
/// let config = AxumConfig::default();
/// assert_eq!(config.bind_address.port(), 8080);
/// assert!(config.allowed_origins.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AxumConfig {
    /// Where to listen
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Storefront origins allowed to call the API from a browser; any origin
    /// when empty
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_bind_address() -> SocketAddr {
    (Ipv4Addr::UNSPECIFIED, 8080).into()
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            allowed_origins: Vec::new(),
        }
    }
}

impl AxumConfig {
    /// The CORS policy for the configured origins.
    ///
    /// Every route is a read or a side-effect-free quote, so methods and
    /// headers are left open; only origins are restricted.
    pub(crate) fn cors(&self) -> CorsLayer {
        let origins = if self.allowed_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            let parsed = self.allowed_origins.iter().filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .inspect_err(|_| event!(Level::WARN, origin, "ignoring malformed CORS origin"))
                    .ok()
            });
            AllowOrigin::list(parsed)
        };

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
