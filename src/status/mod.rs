//! Backend health status classification.
//!
//! # Responsibilities
//! - Define the status enumeration reported by the backend cluster
//! - Map HTTP health-endpoint status codes onto it
//!
//! # Design Decisions
//! - Classification is a total function: any code outside the table
//!   (sealed and uninitialized included) is `Unhealthy`
//! - The code constants here are the same ones the poller encodes into the
//!   probe URL's query parameters; both sides must agree or the sidecar
//!   misclassifies

/// Status code the backend returns when it is the active node.
pub const CODE_ACTIVE: u16 = 200;
/// Status code for a standby node.
pub const CODE_STANDBY: u16 = 429;
/// Status code for a disaster-recovery secondary.
pub const CODE_DR_SECONDARY: u16 = 472;
/// Status code for a performance standby.
pub const CODE_PERFORMANCE_STANDBY: u16 = 473;
/// Status code for a sealed backend. Classified as unhealthy.
pub const CODE_SEALED: u16 = 503;
/// Status code for an uninitialized backend. Classified as unhealthy.
pub const CODE_UNINITIALIZED: u16 = 501;

/// Cluster role reported by the backend's health endpoint.
///
/// `Unhealthy` is the catch-all for sealed, uninitialized, or unreachable
/// backends. Equality is the only operation the rest of the system needs;
/// there is no ordering between roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Active,
    Standby,
    DrSecondary,
    PerformanceStandby,
    Unhealthy,
}

impl HealthStatus {
    /// Classify an HTTP status code from the health endpoint.
    pub fn classify(code: u16) -> Self {
        match code {
            CODE_ACTIVE => HealthStatus::Active,
            CODE_STANDBY => HealthStatus::Standby,
            CODE_DR_SECONDARY => HealthStatus::DrSecondary,
            CODE_PERFORMANCE_STANDBY => HealthStatus::PerformanceStandby,
            _ => HealthStatus::Unhealthy,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthStatus::Active => "active",
            HealthStatus::Standby => "standby",
            HealthStatus::DrSecondary => "dr-secondary",
            HealthStatus::PerformanceStandby => "performance-standby",
            HealthStatus::Unhealthy => "unhealthy",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_codes() {
        assert_eq!(HealthStatus::classify(200), HealthStatus::Active);
        assert_eq!(HealthStatus::classify(429), HealthStatus::Standby);
        assert_eq!(HealthStatus::classify(472), HealthStatus::DrSecondary);
        assert_eq!(HealthStatus::classify(473), HealthStatus::PerformanceStandby);
    }

    #[test]
    fn sealed_and_uninitialized_are_unhealthy() {
        assert_eq!(HealthStatus::classify(CODE_SEALED), HealthStatus::Unhealthy);
        assert_eq!(
            HealthStatus::classify(CODE_UNINITIALIZED),
            HealthStatus::Unhealthy
        );
    }

    #[test]
    fn classify_is_total() {
        // Every representable code yields exactly one of the five variants.
        for code in 0..=u16::MAX {
            let status = HealthStatus::classify(code);
            match code {
                200 => assert_eq!(status, HealthStatus::Active),
                429 => assert_eq!(status, HealthStatus::Standby),
                472 => assert_eq!(status, HealthStatus::DrSecondary),
                473 => assert_eq!(status, HealthStatus::PerformanceStandby),
                _ => assert_eq!(status, HealthStatus::Unhealthy),
            }
        }
    }

    #[test]
    fn display_names_are_stable() {
        assert_eq!(HealthStatus::Active.to_string(), "active");
        assert_eq!(HealthStatus::Standby.to_string(), "standby");
        assert_eq!(HealthStatus::DrSecondary.to_string(), "dr-secondary");
        assert_eq!(
            HealthStatus::PerformanceStandby.to_string(),
            "performance-standby"
        );
        assert_eq!(HealthStatus::Unhealthy.to_string(), "unhealthy");
    }
}
