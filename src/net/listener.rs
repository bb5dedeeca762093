//! TCP listener resource for the gate.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming connections while the gate is Running
//! - Exit promptly when the stop signal flips

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::net::connection;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to an address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

/// A bound TCP listener whose lifetime is nested inside one Running phase
/// of the gate.
#[derive(Debug)]
pub struct GateListener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl GateListener {
    /// Bind to the given address.
    pub async fn bind(addr: &str) -> Result<Self, ListenerError> {
        let inner = TcpListener::bind(addr).await.map_err(|source| ListenerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        let local_addr = inner.local_addr().map_err(|source| ListenerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        Ok(Self { inner, local_addr })
    }

    /// The address this listener is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until the stop signal flips (or its sender drops).
    ///
    /// Each accepted connection is handed to a short-lived task that holds it
    /// open for `hold_open`, then closes it. Accept errors other than the
    /// stop signal are logged and the loop keeps accepting; the loop never
    /// terminates on its own while the gate believes it is Running.
    pub async fn accept_loop(self, mut stop: watch::Receiver<bool>, hold_open: Duration) {
        loop {
            tokio::select! {
                result = self.inner.accept() => match result {
                    Ok((stream, peer_addr)) => {
                        tracing::debug!(peer_addr = %peer_addr, "Connection accepted");
                        tokio::spawn(connection::hold_open(stream, hold_open));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Error accepting connection");
                    }
                },
                _ = stop.changed() => {
                    tracing::info!(address = %self.local_addr, "Listener closed");
                    break;
                }
            }
        }
    }
}
