//! TCP health gate sidecar.
//!
//! # Architecture Overview
//!
//! ```text
//!   backend health endpoint
//!            │  HEAD /v1/sys/health?activecode=...   (once per interval)
//!            ▼
//!      ┌──────────┐   status transitions    ┌──────────────┐
//!      │  poller  │ ──────────────────────▶ │ listener gate │
//!      │ classify │   bounded channel (10)  │ bind / close  │
//!      └──────────┘                         └──────┬───────┘
//!                                                  │ while Running
//!                                                  ▼
//!                                        TCP listener: accept,
//!                                        hold briefly, close
//!                                                  ▲
//!                                      L4 load balancer connect checks
//! ```
//!
//! Two long-lived tasks, one channel between them, no other shared state.
//! The process runs until killed; the gate's bind/unbind transitions are the
//! only lifecycle events.

use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use health_gate::{config, ListenerGate, StatusPoller};

/// Exit status for unusable configuration (sysexits EX_USAGE).
const EX_USAGE: i32 = 64;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "health_gate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(EX_USAGE);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        server_addr = %config.server_addr,
        tcp_addr = %config.tcp_addr,
        interval_ms = config.interval.as_millis() as u64,
        standby_ok = config.standby_ok,
        verify_tls = config.verify_tls,
        "health-gate starting"
    );

    // Capacity 10 lets probing continue for a while if the gate is slow to
    // react; a full channel blocks the poller rather than dropping a
    // transition.
    let (status_tx, status_rx) = mpsc::channel(10);

    let poller = match StatusPoller::new(&config, status_tx) {
        Ok(poller) => poller,
        Err(e) => {
            tracing::error!(error = %e, "Error constructing poller");
            std::process::exit(1);
        }
    };
    tokio::spawn(poller.run());

    ListenerGate::new(&config, status_rx).run().await;
}
