use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use common::{DispatchError, Event, Observer};

const POLL_PERIOD_MILLIS: u64 = 5;

/// Observer that keeps everything it receives, in delivery order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
    errors: Mutex<Vec<DispatchError>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<DispatchError> {
        self.errors.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    /// Polls until `predicate` holds or `timeout` elapses. Returns the last evaluation.
    pub async fn wait_for<F>(&self, predicate: F, timeout: Duration) -> bool
    where
        F: Fn(&Self) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            if predicate(self) {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(POLL_PERIOD_MILLIS)).await;
        }
    }
}

impl Observer for RecordingObserver {
    fn on_event(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn on_error(&self, error: DispatchError) {
        self.errors.lock().unwrap().push(error);
    }
}

impl std::fmt::Debug for RecordingObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingObserver")
            .field("events", &self.event_count())
            .field("errors", &self.error_count())
            .finish()
    }
}
