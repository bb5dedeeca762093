//! Gate policy: which statuses keep the listener open.

use crate::status::HealthStatus;

/// Phase of the gated listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No listener bound; the load balancer sees connection refused.
    Stopped,
    /// Listener bound and accepting; the load balancer sees a handshake.
    Running,
}

/// Desired phase for a status under the standby policy.
///
/// Standby counts as healthy only when `standby_ok` is set. DR secondaries
/// and performance standbys never do: they serve no traffic the load
/// balancer should route.
pub fn desired(status: HealthStatus, standby_ok: bool) -> Phase {
    match status {
        HealthStatus::Active => Phase::Running,
        HealthStatus::Standby if standby_ok => Phase::Running,
        HealthStatus::Standby
        | HealthStatus::DrSecondary
        | HealthStatus::PerformanceStandby
        | HealthStatus::Unhealthy => Phase::Stopped,
    }
}
