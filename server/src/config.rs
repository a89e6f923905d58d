//! Server configuration parsed from environment variables.
//!
//! `.env` is loaded by `main` before this runs, so values may come from
//! either the process environment or the file.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info,server=debug,tower_http=info";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: expected an integer in 1..=65535")]
    InvalidPort { value: String },
    #[error("invalid HOST {value:?}: expected an IP address")]
    InvalidHost { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Origin allowed to call the server's JSON endpoints cross-origin; any when unset.
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `HOST`: bind address, default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `CORS_ORIGIN`: single allowed origin, default any
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `HOST` or `PORT` is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("HOST").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
            std::env::var("CORS_ORIGIN").ok().as_deref(),
        )
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] for a malformed host or port.
    pub fn from_values(host: Option<&str>, port: Option<&str>, cors_origin: Option<&str>) -> Result<Self, ConfigError> {
        let host = parse_host(host)?;
        let port = parse_port(port)?;
        let cors_origin = cors_origin
            .map(|origin| origin.trim().trim_end_matches('/').to_owned())
            .filter(|origin| !origin.is_empty());
        Ok(Self { addr: SocketAddr::new(host, port), cors_origin })
    }
}

fn parse_host(raw: Option<&str>) -> Result<IpAddr, ConfigError> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_HOST);
    value.parse().map_err(|_| ConfigError::InvalidHost { value: value.to_owned() })
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_PORT);
    };
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort { value: value.to_owned() }),
    }
}
