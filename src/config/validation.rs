//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap handles syntactic)
//! - Check the probe URL parses and carries a usable scheme
//! - Check the gate bind address parses as a socket address
//! - Validate value ranges (interval must be nonzero)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: Config → Result<(), Vec<ValidationError>>
//! - Runs before the core is constructed

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::Config;

/// A single semantic problem found in the configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// The server address is not a parseable URL.
    ServerAddr(String, url::ParseError),
    /// The server address parsed but is not an http(s) URL with a host.
    ServerScheme(String),
    /// The gate bind address is not a parseable socket address.
    TcpAddr(String, std::net::AddrParseError),
    /// The poll interval is zero.
    ZeroInterval,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ServerAddr(addr, e) => {
                write!(f, "invalid server address {:?}: {}", addr, e)
            }
            ValidationError::ServerScheme(addr) => {
                write!(f, "server address {:?} must be an http(s) URL with a host", addr)
            }
            ValidationError::TcpAddr(addr, e) => {
                write!(f, "invalid TCP bind address {:?}: {}", addr, e)
            }
            ValidationError::ZeroInterval => write!(f, "poll interval must be nonzero"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.server_addr) {
        Ok(url) => {
            let scheme_ok = url.scheme() == "http" || url.scheme() == "https";
            if !scheme_ok || url.host_str().is_none() {
                errors.push(ValidationError::ServerScheme(config.server_addr.clone()));
            }
        }
        Err(e) => errors.push(ValidationError::ServerAddr(config.server_addr.clone(), e)),
    }

    if let Err(e) = config.tcp_addr.parse::<SocketAddr>() {
        errors.push(ValidationError::TcpAddr(config.tcp_addr.clone(), e));
    }

    if config.interval.is_zero() {
        errors.push(ValidationError::ZeroInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
