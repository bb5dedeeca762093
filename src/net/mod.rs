//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Gate decides Running
//!     → listener.rs (bind, spawn accept loop)
//!     → connection.rs (hold each accepted socket open, then close)
//!
//! Gate decides Stopped
//!     → stop signal flips
//!     → accept loop exits, socket dropped
//! ```
//!
//! # Design Decisions
//! - The accept task owns the socket; stopping is signalled, never forced,
//!   so the loop can exit cleanly instead of spinning on a closed listener
//! - Transient accept errors are logged and the loop keeps accepting
//! - Connections carry no protocol: zero bytes in either direction

pub mod connection;
pub mod listener;

pub use listener::{GateListener, ListenerError};
