//! Gateway configuration and the public deployment description.

use serde::Serialize;
use shared_types::Address;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default request body ceiling.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_bytes: usize,
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Non-secret deployment facts served by `GET /info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ServiceInfo {
    pub version: u64,
    pub chain_id: u64,
    pub default_service_provider_borrow_address: Address,
    pub k_squared_lending_contract: Address,
    pub k_squared_reporter_registry: Address,
    pub liveness_endpoint: String,
    pub report_deadline_length_in_eth_blocks: u64,
    pub data_feed_endpoint: String,
    /// Address of the co-signing key.
    pub designated_verifier: Address,
}
