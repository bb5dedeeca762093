//! Configuration loading from flags and environment.
//!
//! Every flag has a `HEALTH_GATE_*` environment fallback so the sidecar can
//! be configured entirely from its unit file or pod spec; explicit flags win.

use std::time::Duration;

use clap::Parser;

use crate::config::schema::Config;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Validation(errors) => {
                write!(f, "validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Parser, Debug)]
#[command(name = "health-gate", version)]
#[command(about = "Gates a TCP listener on a clustered backend's HTTP health")]
struct Cli {
    /// Base address of the backend to probe.
    #[arg(long, env = "HEALTH_GATE_SERVER_ADDR", default_value = "https://127.0.0.1:8200")]
    server_addr: String,

    /// Address the gated TCP listener binds to.
    #[arg(long, env = "HEALTH_GATE_TCP_ADDR", default_value = "0.0.0.0:8210")]
    tcp_addr: String,

    /// Poll interval in milliseconds.
    #[arg(long, env = "HEALTH_GATE_INTERVAL_MS", default_value_t = 1000)]
    interval_ms: u64,

    /// Treat standby nodes as healthy.
    #[arg(long, env = "HEALTH_GATE_STANDBY_OK")]
    standby_ok: bool,

    /// Skip TLS certificate verification when probing over https.
    #[arg(long, env = "HEALTH_GATE_SKIP_VERIFY")]
    skip_verify: bool,

    /// How long each accepted connection is held open, in milliseconds.
    #[arg(long, env = "HEALTH_GATE_HOLD_OPEN_MS", default_value_t = 500)]
    hold_open_ms: u64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            server_addr: cli.server_addr,
            tcp_addr: cli.tcp_addr,
            interval: Duration::from_millis(cli.interval_ms),
            standby_ok: cli.standby_ok,
            verify_tls: !cli.skip_verify,
            hold_open: Duration::from_millis(cli.hold_open_ms),
        }
    }
}

/// Parse flags and environment into a validated configuration.
pub fn load() -> Result<Config, ConfigError> {
    let config: Config = Cli::parse().into();
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
