//! Configuration schema definitions.

use std::time::Duration;

/// Validated runtime configuration for the sidecar.
///
/// Supplied to the core components at construction time; nothing in the
/// poller or gate reads the environment itself.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the backend whose health endpoint is probed
    /// (e.g. "https://127.0.0.1:8200").
    pub server_addr: String,

    /// Address the gated TCP listener binds to while the backend is healthy
    /// (e.g. "0.0.0.0:8210").
    pub tcp_addr: String,

    /// Delay between the end of one probe and the start of the next.
    pub interval: Duration,

    /// Treat standby nodes as healthy (keep the listener open).
    pub standby_ok: bool,

    /// Verify the backend's TLS certificate when probing over https.
    pub verify_tls: bool,

    /// How long each accepted connection is held open before being closed.
    pub hold_open: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "https://127.0.0.1:8200".to_string(),
            tcp_addr: "0.0.0.0:8210".to_string(),
            interval: Duration::from_secs(1),
            standby_ok: false,
            verify_tls: true,
            hold_open: Duration::from_millis(500),
        }
    }
}
