//! Status poller: probes the backend and emits status transitions.
//!
//! # Responsibilities
//! - Probe the backend's health endpoint once per interval (HEAD, no body)
//! - Classify the result, treating any transport failure as unhealthy
//! - Emit into the status channel only when the status actually changed
//!
//! # Design Decisions
//! - Fixed-delay scheduling: the interval is slept after each probe and is
//!   not adjusted for probe latency
//! - No backoff, no jitter, no circuit breaker; a closed listener is a safe
//!   failure mode, so the poller just keeps probing at the same cadence
//! - A full channel blocks the send rather than dropping a transition; a
//!   dropped "became unhealthy" event would be unsafe for the load balancer

use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use crate::config::Config;
use crate::status::{
    HealthStatus, CODE_ACTIVE, CODE_DR_SECONDARY, CODE_PERFORMANCE_STANDBY, CODE_SEALED,
    CODE_STANDBY, CODE_UNINITIALIZED,
};

/// Error type for poller construction.
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error("invalid server address {addr:?}: {source}")]
    Addr {
        addr: String,
        source: url::ParseError,
    },
    #[error("failed to build probe client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Polls the backend health endpoint and writes status transitions to the
/// channel consumed by the gate.
pub struct StatusPoller {
    probe_url: Url,
    interval: Duration,
    client: reqwest::Client,
    status_tx: mpsc::Sender<HealthStatus>,
    last_sent: Option<HealthStatus>,
}

impl StatusPoller {
    /// Build a poller from validated configuration.
    ///
    /// The TLS verification mode is baked into the client here, not applied
    /// per request.
    pub fn new(config: &Config, status_tx: mpsc::Sender<HealthStatus>) -> Result<Self, PollerError> {
        let probe_url = build_probe_url(&config.server_addr)?;
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            probe_url,
            interval: config.interval,
            client,
            status_tx,
            last_sent: None,
        })
    }

    /// Probe forever, one iteration per interval.
    pub async fn run(mut self) {
        loop {
            if let Some(status) = self.probe().await {
                self.send_status(status).await;
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One probe. `None` means the request could not even be constructed;
    /// the iteration is skipped without emitting anything.
    async fn probe(&self) -> Option<HealthStatus> {
        let request = match self.client.head(self.probe_url.clone()).build() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Error constructing probe request");
                return None;
            }
        };

        match self.client.execute(request).await {
            Ok(response) => {
                // Status line is all we need; the response (and any body) is
                // dropped unread.
                let code = response.status().as_u16();
                tracing::debug!(code, "Probe response");
                Some(HealthStatus::classify(code))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Probe request failed");
                Some(HealthStatus::Unhealthy)
            }
        }
    }

    /// Emit a status if it differs from the last one sent.
    ///
    /// Blocks when the channel is full: a stalled gate stalls the poller
    /// instead of losing a transition.
    pub async fn send_status(&mut self, status: HealthStatus) {
        if self.last_sent == Some(status) {
            return;
        }
        self.last_sent = Some(status);
        if self.status_tx.send(status).await.is_err() {
            tracing::error!("Status channel closed");
        }
    }
}

/// Attach the health path and the code-table query parameters to the base
/// address. The codes here instruct the backend which status code to return
/// for each cluster role and must match the classifier's table exactly.
fn build_probe_url(server_addr: &str) -> Result<Url, PollerError> {
    let mut url = Url::parse(server_addr).map_err(|source| PollerError::Addr {
        addr: server_addr.to_string(),
        source,
    })?;
    url.set_path("v1/sys/health");
    url.query_pairs_mut()
        .append_pair("activecode", &CODE_ACTIVE.to_string())
        .append_pair("standbycode", &CODE_STANDBY.to_string())
        .append_pair("drsecondarycode", &CODE_DR_SECONDARY.to_string())
        .append_pair("performancestandbycode", &CODE_PERFORMANCE_STANDBY.to_string())
        .append_pair("sealedcode", &CODE_SEALED.to_string())
        .append_pair("uninitcode", &CODE_UNINITIALIZED.to_string());
    Ok(url)
}
