//! Module errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SourceKind;

/// Failure reported by a sensor source adapter.
///
/// The `Display` output is the bare cause, so it can be surfaced verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFailure {
    #[error("timeout")]
    Timeout,

    #[error("not authorized")]
    NotAuthorized,

    #[error("not available")]
    NotAvailable,

    #[error("{0}")]
    Other(String),
}

/// Errors handed to the observer in place of an event.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchError {
    /// The source reported success without a payload.
    #[error("{}", unavailable_message(.0))]
    SourceUnavailable(SourceKind),

    /// The source reported a failure. `cause` is kept as delivered by the adapter.
    #[error("{cause}")]
    SourceError { kind: SourceKind, cause: SourceFailure },
}

impl DispatchError {
    pub fn kind(&self) -> SourceKind {
        match self {
            DispatchError::SourceUnavailable(kind) => *kind,
            DispatchError::SourceError { kind, .. } => *kind,
        }
    }
}

fn unavailable_message(kind: &SourceKind) -> &'static str {
    match kind {
        SourceKind::Motion => "No motion data given by the motion framework",
        SourceKind::Accelerometer => "No acceleration data given by the motion framework",
        SourceKind::Activity => "No motion activity given by the motion framework",
        SourceKind::Pedometer => "No pedometer data given by the motion framework",
    }
}
