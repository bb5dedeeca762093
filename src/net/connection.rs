//! Per-connection handling for the gated listener.

use std::time::Duration;

use tokio::net::TcpStream;

/// Hold an accepted connection open for `delay`, then close it.
///
/// No bytes are read or written. The delay exists so an L4 health checker
/// that connects and briefly waits sees a live socket rather than an
/// instantaneous close it might misinterpret.
pub async fn hold_open(stream: TcpStream, delay: Duration) {
    tokio::time::sleep(delay).await;
    drop(stream);
}
