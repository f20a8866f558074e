use crate::errors::SourceFailure;
use crate::types::{Activation, SampleHandler};

/// Port to a sensor source adapter.
///
/// Adapters invoke `handler` at most once per physical event, from their own
/// execution context, and stop invoking it once `deactivate` has returned.
pub trait SensorSource<S>: Send + Sync {
    /// Starts delivering samples to `handler`.
    /// Returns an error if the source cannot be started; nothing is delivered in that case.
    fn activate(&self, activation: Activation, handler: SampleHandler<S>)
        -> Result<(), SourceFailure>;

    /// Stops delivery. Safe to call when not active.
    fn deactivate(&self);
}
