//! Settings for the HTTP layer, read from the `server` section of the
//! server config.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Where to listen, how verbose errors are, and how listings are paged.
///
/// ```
/// use catalog_axum::config::{AxumConfig, Environment};
///
/// let config = AxumConfig {
///     environment: Environment::Development,
///     page_limit: 20,
///     ..Default::default()
/// };
/// assert_eq!(config.bind_address.port(), 8080);
/// assert_eq!(config.max_page_limit, 100);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// Listening socket, `0.0.0.0:8080` unless set
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Controls how much detail error responses carry
    #[serde(default)]
    pub environment: Environment,

    /// The page size used when a listing does not ask for one
    #[serde(default = "default_page_limit")]
    pub page_limit: u64,

    /// The largest page size a listing may ask for
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: u64,
}

/// The deployment mode of the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Error responses include the chain of underlying causes as `stack`
    Development,
    /// Error responses carry only the message and field errors
    #[default]
    Production,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

fn default_page_limit() -> u64 {
    catalog_core::query::DEFAULT_LIMIT
}

fn default_max_page_limit() -> u64 {
    catalog_core::query::MAX_LIMIT
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            bind_address: default_bind_address(),
            max_page_limit: default_max_page_limit(),
            page_limit: default_page_limit(),
        }
    }
}
