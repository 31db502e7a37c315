//! # Middleware Configuration
//!
//! Immutable settings loaded once at start-up from environment variables.
//!
//! ## Security Requirements
//!
//! - The co-signing key is parsed here and never kept as text
//! - Bearer credentials are redacted from `Debug` output
//! - Every required key must be present and non-blank; start-up fails on the
//!   first one that is not

use dv_02_chain_gateway::ChainContracts;
use dv_03_oracle_gateway::{BearerToken, OracleEndpoints};
use dv_04_report_pipeline::{DesignatedVerifier, PipelineConfig};
use dv_05_api_gateway::{CorsConfig, GatewayConfig, ServiceInfo, DEFAULT_MAX_BODY_BYTES};
use reqwest::Url;
use shared_types::{parse_address, Address};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Environment keys.
pub mod keys {
    pub const VERSION: &str = "VERSION";
    pub const DEFAULT_SERVICE_PROVIDER_BORROW_ADDRESS: &str =
        "DEFAULT_SERVICE_PROVIDER_BORROW_ADDRESS";
    pub const DESIGNATED_VERIFIER_PRIVATE_KEY: &str = "DESIGNATED_VERIFIER_PRIVATE_KEY";
    pub const PROVIDER_URL: &str = "PROVIDER_URL";
    pub const K_SQUARED_LENDING_CONTRACT: &str = "K_SQUARED_LENDING_CONTRACT";
    pub const K_SQUARED_REPORTER_REGISTRY: &str = "K_SQUARED_REPORTER_REGISTRY";
    pub const LIVENESS_ENDPOINT: &str = "LIVENESS_ENDPOINT";
    pub const CORRUPTION_VERIFICATION_ENDPOINT: &str = "CORRUPTION_VERIFICATION_ENDPOINT";
    pub const DATA_FEED_ENDPOINT: &str = "DATA_FEED_ENDPOINT";
    pub const IDENTIFIER_GENERATOR_ENDPOINT: &str = "IDENTIFIER_GENERATOR_ENDPOINT";
    pub const CHAIN_ID: &str = "CHAIN_ID";
    pub const REPORT_DEADLINE_LENGTH_IN_ETH_BLOCKS: &str = "REPORT_DEADLINE_LENGTH_IN_ETH_BLOCKS";
    pub const CORRUPTION_VALIDATION_BEARER_TOKEN: &str = "CORRUPTION_VALIDATION_BEARER_TOKEN";
    pub const IDENTIFIER_BEARER_TOKEN: &str = "IDENTIFIER_BEARER_TOKEN";

    pub const DV_HTTP_HOST: &str = "DV_HTTP_HOST";
    pub const DV_HTTP_PORT: &str = "DV_HTTP_PORT";
    pub const DV_OUTBOUND_TIMEOUT_MS: &str = "DV_OUTBOUND_TIMEOUT_MS";
    pub const DV_MAX_BODY_BYTES: &str = "DV_MAX_BODY_BYTES";
}

/// Default bound on every outbound request.
pub const DEFAULT_OUTBOUND_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required key is absent or blank.
    #[error("Missing required configuration key {0}")]
    Missing(&'static str),

    /// A key is present but unusable.
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

/// Complete middleware configuration.
#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    /// Payload version accepted by this deployment.
    pub version: u64,
    pub default_service_provider: Address,
    /// Co-signing key. Its `Debug` output is redacted.
    pub verifier: Arc<DesignatedVerifier>,
    pub provider_url: String,
    pub lending_contract: Address,
    pub reporter_registry: Address,
    /// Prefix the reporter's liveness query is appended to.
    pub liveness_endpoint: String,
    pub corruption_endpoint: String,
    pub data_feed_endpoint: String,
    pub identifier_endpoint: String,
    pub chain_id: u64,
    pub report_deadline_blocks: u64,
    pub corruption_token: BearerToken,
    pub identifier_token: BearerToken,

    pub http_host: IpAddr,
    pub http_port: u16,
    pub outbound_timeout: Duration,
    pub max_body_bytes: usize,
}

impl MiddlewareConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let version = env.number(keys::VERSION)?;
        let default_service_provider = env.address(keys::DEFAULT_SERVICE_PROVIDER_BORROW_ADDRESS)?;
        let verifier = env.verifier(keys::DESIGNATED_VERIFIER_PRIVATE_KEY)?;
        let provider_url = env.url(keys::PROVIDER_URL)?;
        let lending_contract = env.address(keys::K_SQUARED_LENDING_CONTRACT)?;
        let reporter_registry = env.address(keys::K_SQUARED_REPORTER_REGISTRY)?;
        let liveness_endpoint = env.url(keys::LIVENESS_ENDPOINT)?;
        let corruption_endpoint = env.url(keys::CORRUPTION_VERIFICATION_ENDPOINT)?;
        let data_feed_endpoint = env.url(keys::DATA_FEED_ENDPOINT)?;
        let identifier_endpoint = env.url(keys::IDENTIFIER_GENERATOR_ENDPOINT)?;
        let chain_id = env.number(keys::CHAIN_ID)?;
        let report_deadline_blocks = env.number(keys::REPORT_DEADLINE_LENGTH_IN_ETH_BLOCKS)?;
        let corruption_token =
            BearerToken::new(env.required(keys::CORRUPTION_VALIDATION_BEARER_TOKEN)?);
        let identifier_token = BearerToken::new(env.required(keys::IDENTIFIER_BEARER_TOKEN)?);

        let http_host = env
            .optional_parsed(keys::DV_HTTP_HOST)?
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let http_port = env.optional_parsed(keys::DV_HTTP_PORT)?.unwrap_or(3000);
        let outbound_timeout = match env.optional_parsed::<u64>(keys::DV_OUTBOUND_TIMEOUT_MS)? {
            None => DEFAULT_OUTBOUND_TIMEOUT,
            Some(0) => return Err(invalid(keys::DV_OUTBOUND_TIMEOUT_MS, "must be positive")),
            Some(ms) => Duration::from_millis(ms),
        };
        let max_body_bytes = env
            .optional_parsed(keys::DV_MAX_BODY_BYTES)?
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Ok(Self {
            version,
            default_service_provider,
            verifier,
            provider_url,
            lending_contract,
            reporter_registry,
            liveness_endpoint,
            corruption_endpoint,
            data_feed_endpoint,
            identifier_endpoint,
            chain_id,
            report_deadline_blocks,
            corruption_token,
            identifier_token,
            http_host,
            http_port,
            outbound_timeout,
            max_body_bytes,
        })
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            version: self.version,
            report_deadline_blocks: self.report_deadline_blocks,
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            host: self.http_host,
            port: self.http_port,
            max_body_bytes: self.max_body_bytes,
            cors: CorsConfig::default(),
        }
    }

    pub fn chain_contracts(&self) -> ChainContracts {
        ChainContracts {
            lending: self.lending_contract,
            reporter_registry: self.reporter_registry,
        }
    }

    pub fn oracle_endpoints(&self) -> OracleEndpoints {
        OracleEndpoints {
            liveness: self.liveness_endpoint.clone(),
            corruption: self.corruption_endpoint.clone(),
            corruption_token: self.corruption_token.clone(),
            identifier: self.identifier_endpoint.clone(),
            identifier_token: self.identifier_token.clone(),
        }
    }

    /// Public facts served by `GET /info`.
    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            version: self.version,
            chain_id: self.chain_id,
            default_service_provider_borrow_address: self.default_service_provider,
            k_squared_lending_contract: self.lending_contract,
            k_squared_reporter_registry: self.reporter_registry,
            liveness_endpoint: self.liveness_endpoint.clone(),
            report_deadline_length_in_eth_blocks: self.report_deadline_blocks,
            data_feed_endpoint: self.data_feed_endpoint.clone(),
            designated_verifier: self.verifier.address(),
        }
    }
}

// =============================================================================
// KEY LOOKUP
// =============================================================================

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &'static str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn number(&self, key: &'static str) -> Result<u64, ConfigError> {
        let value = self.required(key)?;
        value
            .parse()
            .map_err(|_| invalid(key, format!("expected a non-negative integer, got {value:?}")))
    }

    fn optional_parsed<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.optional(key)
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| invalid(key, format!("cannot parse {value:?}")))
            })
            .transpose()
    }

    fn address(&self, key: &'static str) -> Result<Address, ConfigError> {
        let value = self.required(key)?;
        parse_address(&value).ok_or_else(|| invalid(key, "expected a 20-byte hex address"))
    }

    fn url(&self, key: &'static str) -> Result<String, ConfigError> {
        let value = self.required(key)?;
        let url = Url::parse(&value).map_err(|e| invalid(key, e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(key, "expected an http or https URL"));
        }
        Ok(value)
    }

    fn verifier(&self, key: &'static str) -> Result<Arc<DesignatedVerifier>, ConfigError> {
        let value = zeroize::Zeroizing::new(self.required(key)?);
        DesignatedVerifier::from_hex(&value)
            .map(Arc::new)
            .map_err(|e| invalid(key, e.to_string()))
    }
}
