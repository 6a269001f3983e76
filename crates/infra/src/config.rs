//! Configuration loading and representation.
//!
//! Everything comes from environment variables; unset variables fall back
//! to development defaults.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use thiserror::Error;

use bizledger_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "BIZLEDGER_BIND_ADDR";
pub const SEED_CHART_VAR: &str = "BIZLEDGER_SEED_CHART";
pub const LOG_FORMAT_VAR: &str = "BIZLEDGER_LOG_FORMAT";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration for the ledger server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Create the default chart of accounts on startup.
    pub seed_chart: bool,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::Invalid {
                    key: BIND_ADDR_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_BIND_ADDR,
        };

        let seed_chart = match lookup(SEED_CHART_VAR) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                key: SEED_CHART_VAR,
                value: raw.clone(),
                reason: "expected true or false".to_string(),
            })?,
            None => true,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| ConfigError::Invalid {
                key: LOG_FORMAT_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            seed_chart,
            log_format,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
