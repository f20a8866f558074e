//! Module errors

use thiserror::Error;

use common::SourceKind;

/// Errors raised while building or configuring a dispatcher.
///
/// Source failures are not reported here: they reach the observer as
/// [`DispatchError`](common::DispatchError).
#[derive(Error, Debug)]
pub enum DispatcherError {
    /// The dispatcher was created outside of a tokio runtime.
    #[error("No tokio runtime available: {0}")]
    NoRuntime(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Simulated sources could not be set up.
    #[error("Simulation setup failed: {0}")]
    Simulation(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sampling interval for {0} must be greater than zero")]
    ZeroInterval(SourceKind),

    #[error("Pedometer look-back must be between 0 and 604800 seconds, got {0}")]
    InvalidLookback(f64),
}
