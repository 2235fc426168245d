use crate::ScenarioName;
use thiserror::Error;

/// Errors that can occur during scenario routing and factory operations
#[derive(Error, Debug)]
pub enum Error {
    /// Router or factory was built from an unusable configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Scenario resolution found zero or more than one matching factory
    #[error("unable to locate a single configuration for scenario '{scenario}' ({matches} matching factories)")]
    NoUniqueScenario {
        /// Scenario name that failed to resolve.
        scenario: ScenarioName,
        /// Number of factories that reported support (zero, or two and up).
        matches: usize,
    },

    /// Failure surfaced by a concrete factory implementation
    #[error("factory error: {0}")]
    Factory(String),

    /// Operation attempted on a factory or capability that was already released
    #[error("closed: {0}")]
    Closed(String),
}

/// Result type alias for routing operations
pub type Result<T> = std::result::Result<T, Error>;
