//! Listener gate: opens and closes the TCP socket on status changes.
//!
//! # Data Flow
//! ```text
//! status channel (transitions only, in order)
//!     → policy.rs (status + standby_ok → desired phase)
//!     → reconcile against current phase
//!         Stopped → Running: bind, spawn accept loop
//!         Running → Stopped: flip stop signal, await accept task, drop socket
//!         no change: no-op (never rebind, never re-close)
//! ```
//!
//! # Design Decisions
//! - The listener resource lives strictly inside one Running phase; the
//!   gate holds its stop signal and join handle while Running
//! - Bind failure leaves the gate Stopped and is retried only on the next
//!   status event that again wants Running (no retry timer)
//! - The gate is the channel's sole consumer; no other synchronization

pub mod policy;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::gate::policy::Phase;
use crate::net::GateListener;
use crate::status::HealthStatus;

/// The bound listener plus the handles needed to tear it down.
struct ActiveListener {
    local_addr: SocketAddr,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Consumes status transitions and drives the listener's start/stop
/// state machine.
pub struct ListenerGate {
    addr: String,
    standby_ok: bool,
    hold_open: Duration,
    status_rx: mpsc::Receiver<HealthStatus>,
    active: Option<ActiveListener>,
}

impl ListenerGate {
    pub fn new(config: &Config, status_rx: mpsc::Receiver<HealthStatus>) -> Self {
        Self {
            addr: config.tcp_addr.clone(),
            standby_ok: config.standby_ok,
            hold_open: config.hold_open,
            status_rx,
            active: None,
        }
    }

    /// Current phase of the gate.
    pub fn phase(&self) -> Phase {
        if self.active.is_some() {
            Phase::Running
        } else {
            Phase::Stopped
        }
    }

    /// Bound address while Running, `None` while Stopped.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.active.as_ref().map(|a| a.local_addr)
    }

    /// Receive status transitions until the channel closes.
    ///
    /// The channel only closes when the poller's sender is dropped, which
    /// never happens in the running process; tests use it to wind down.
    pub async fn run(mut self) {
        while let Some(status) = self.status_rx.recv().await {
            self.apply(status).await;
        }
        self.stop().await;
    }

    /// Apply one status transition to the state machine.
    pub async fn apply(&mut self, status: HealthStatus) {
        let desired = policy::desired(status, self.standby_ok);
        match desired {
            Phase::Running => tracing::info!(%status, "Backend healthy"),
            Phase::Stopped => tracing::info!(%status, "Backend unhealthy"),
        }

        match (desired, self.phase()) {
            (Phase::Running, Phase::Stopped) => self.start().await,
            (Phase::Stopped, Phase::Running) => self.stop().await,
            // Idempotent: same desired phase means no rebind, no re-close.
            (Phase::Running, Phase::Running) | (Phase::Stopped, Phase::Stopped) => {}
        }
    }

    async fn start(&mut self) {
        let listener = match GateListener::bind(&self.addr).await {
            Ok(listener) => listener,
            Err(e) => {
                // Stay Stopped; retried on the next event that wants Running.
                tracing::error!(error = %e, "TCP listener error");
                return;
            }
        };

        let local_addr = listener.local_addr();
        let (stop, stop_rx) = watch::channel(false);
        let task = tokio::spawn(listener.accept_loop(stop_rx, self.hold_open));

        tracing::info!(address = %local_addr, "Listening");
        self.active = Some(ActiveListener {
            local_addr,
            stop,
            task,
        });
    }

    async fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            let _ = active.stop.send(true);
            if let Err(e) = active.task.await {
                tracing::error!(error = %e, "Accept task failed");
            }
            tracing::info!(address = %active.local_addr, "Listener stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_on(addr: &str, standby_ok: bool) -> (ListenerGate, mpsc::Sender<HealthStatus>) {
        let (tx, rx) = mpsc::channel(10);
        let config = Config {
            tcp_addr: addr.to_string(),
            standby_ok,
            hold_open: Duration::from_millis(10),
            ..Config::default()
        };
        (ListenerGate::new(&config, rx), tx)
    }

    #[tokio::test]
    async fn starts_stopped() {
        let (gate, _tx) = gate_on("127.0.0.1:0", false);
        assert_eq!(gate.phase(), Phase::Stopped);
        assert!(gate.local_addr().is_none());
    }

    #[tokio::test]
    async fn policy_sequence_standby_not_ok() {
        let (mut gate, _tx) = gate_on("127.0.0.1:0", false);

        gate.apply(HealthStatus::Active).await;
        assert_eq!(gate.phase(), Phase::Running);

        gate.apply(HealthStatus::Standby).await;
        assert_eq!(gate.phase(), Phase::Stopped);

        gate.apply(HealthStatus::Active).await;
        assert_eq!(gate.phase(), Phase::Running);

        gate.stop().await;
    }

    #[tokio::test]
    async fn policy_sequence_standby_ok() {
        let (mut gate, _tx) = gate_on("127.0.0.1:0", true);

        gate.apply(HealthStatus::Active).await;
        assert_eq!(gate.phase(), Phase::Running);

        gate.apply(HealthStatus::Standby).await;
        assert_eq!(gate.phase(), Phase::Running);

        gate.apply(HealthStatus::Active).await;
        assert_eq!(gate.phase(), Phase::Running);

        gate.stop().await;
    }

    #[tokio::test]
    async fn no_op_transition_keeps_listener_identity() {
        let (mut gate, _tx) = gate_on("127.0.0.1:0", true);

        gate.apply(HealthStatus::Active).await;
        let bound = gate.local_addr().unwrap();

        // Still Running under standby_ok: must not rebind. An ephemeral-port
        // rebind would change the address.
        gate.apply(HealthStatus::Standby).await;
        assert_eq!(gate.local_addr(), Some(bound));

        gate.stop().await;
    }

    #[tokio::test]
    async fn bind_failure_stays_stopped_and_retries_on_next_event() {
        let (mut gate, _tx) = gate_on("127.0.0.1:0", false);

        // Occupy an address, point the gate at it, and watch the bind fail.
        let blocker = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        gate.addr = blocker.local_addr().unwrap().to_string();

        gate.apply(HealthStatus::Active).await;
        assert_eq!(gate.phase(), Phase::Stopped);

        // Next qualifying event retries the bind.
        drop(blocker);
        gate.apply(HealthStatus::Unhealthy).await;
        assert_eq!(gate.phase(), Phase::Stopped);
        gate.apply(HealthStatus::Active).await;
        assert_eq!(gate.phase(), Phase::Running);

        gate.stop().await;
    }
}
