//! TCP health gate sidecar library.
//!
//! Makes a clustered backend's application-level health visible to an L4
//! load balancer that can only do TCP-connect checks: while the backend is
//! healthy a plain TCP listener accepts handshakes, and while it is not the
//! port refuses connections.

pub mod config;
pub mod gate;
pub mod net;
pub mod poller;
pub mod status;

pub use config::Config;
pub use gate::ListenerGate;
pub use poller::StatusPoller;
pub use status::HealthStatus;
