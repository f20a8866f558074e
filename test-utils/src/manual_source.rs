use log::debug;
use std::sync::{Arc, Mutex};

use common::{Activation, SampleHandler, SensorSource, SourceFailure, SourceResult};

/// Sensor source driven directly by a test.
///
/// `activate` adds a handler without dropping earlier ones, so a caller that activates
/// twice without deactivating ends up with two live subscriptions and duplicate
/// deliveries. `deactivate` drops every handler.
pub struct ManualSource<S> {
    handlers: Mutex<Vec<SampleHandler<S>>>,
    activations: Mutex<Vec<Activation>>,
    deactivations: Mutex<usize>,
    next_failure: Mutex<Option<SourceFailure>>,
}

impl<S> ManualSource<S>
where
    S: Clone + Send + 'static,
{
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            handlers: Mutex::new(Vec::new()),
            activations: Mutex::new(Vec::new()),
            deactivations: Mutex::new(0),
            next_failure: Mutex::new(None),
        })
    }

    /// Invokes every live handler with `result`. Returns how many were invoked.
    pub fn inject(&self, result: SourceResult<S>) -> usize {
        let handlers = self.handlers.lock().unwrap().clone();
        for handler in handlers.iter() {
            handler(result.clone());
        }
        handlers.len()
    }

    pub fn emit(&self, sample: S) -> usize {
        self.inject(Ok(Some(sample)))
    }

    pub fn fail(&self, cause: SourceFailure) -> usize {
        self.inject(Err(cause))
    }

    /// Makes the next `activate` call fail with `cause`.
    pub fn fail_next_activation(&self, cause: SourceFailure) {
        *self.next_failure.lock().unwrap() = Some(cause);
    }

    pub fn live_subscriptions(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    pub fn activation_count(&self) -> usize {
        self.activations.lock().unwrap().len()
    }

    pub fn last_activation(&self) -> Option<Activation> {
        self.activations.lock().unwrap().last().copied()
    }

    pub fn deactivation_count(&self) -> usize {
        *self.deactivations.lock().unwrap()
    }
}

impl<S> SensorSource<S> for ManualSource<S>
where
    S: Clone + Send + 'static,
{
    fn activate(
        &self,
        activation: Activation,
        handler: SampleHandler<S>,
    ) -> Result<(), SourceFailure> {
        if let Some(cause) = self.next_failure.lock().unwrap().take() {
            debug!("Manual source refusing activation: {}", cause);
            return Err(cause);
        }
        self.activations.lock().unwrap().push(activation);
        self.handlers.lock().unwrap().push(handler);
        Ok(())
    }

    fn deactivate(&self) {
        self.handlers.lock().unwrap().clear();
        *self.deactivations.lock().unwrap() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AccelerationSample;
    use std::time::Duration;

    fn counting_handler(counter: Arc<Mutex<Vec<SourceResult<AccelerationSample>>>>) -> SampleHandler<AccelerationSample> {
        Arc::new(move |result: SourceResult<AccelerationSample>| counter.lock().unwrap().push(result))
    }

    #[test]
    fn test_inject_without_subscription() {
        let source = ManualSource::<AccelerationSample>::new();
        assert_eq!(source.emit(AccelerationSample::new(0.0, [0.0; 3])), 0);
    }

    #[test]
    fn test_double_activation_duplicates() {
        let source = ManualSource::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let activation = Activation::periodic(Duration::from_millis(100));

        source.activate(activation, counting_handler(received.clone())).unwrap();
        source.activate(activation, counting_handler(received.clone())).unwrap();

        assert_eq!(source.emit(AccelerationSample::new(0.0, [0.0; 3])), 2);
        assert_eq!(received.lock().unwrap().len(), 2);
        assert_eq!(source.activation_count(), 2);
        assert_eq!(source.last_activation(), Some(activation));
    }

    #[test]
    fn test_deactivate_drops_handlers() {
        let source = ManualSource::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        source
            .activate(Activation::on_change(), counting_handler(received.clone()))
            .unwrap();

        source.deactivate();

        assert_eq!(source.live_subscriptions(), 0);
        assert_eq!(source.deactivation_count(), 1);
        assert_eq!(source.fail(SourceFailure::Timeout), 0);
        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn test_fail_next_activation() {
        let source = ManualSource::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        source.fail_next_activation(SourceFailure::NotAuthorized);

        let first = source.activate(Activation::on_change(), counting_handler(received.clone()));
        let second = source.activate(Activation::on_change(), counting_handler(received.clone()));

        assert_eq!(first, Err(SourceFailure::NotAuthorized));
        assert!(second.is_ok());
        assert_eq!(source.live_subscriptions(), 1);
    }
}
