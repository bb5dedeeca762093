//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / HEALTH_GATE_* environment variables
//!     → loader.rs (clap parse, flags win over env)
//!     → validation.rs (semantic checks)
//!     → Config (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the core never touches the
//!   environment itself
//! - All fields have defaults so the sidecar runs with zero flags
//! - Validation separates syntactic (clap) from semantic checks and
//!   reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::Config;
