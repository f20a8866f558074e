use log::warn;
use std::sync::Arc;

use common::{DispatchError, Event, Observer};

pub type EventCallback = Arc<dyn Fn(Event) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(DispatchError) + Send + Sync>;

/// Observer built from a pair of closures.
#[derive(Clone)]
pub struct Listener {
    on_event: EventCallback,
    on_error: ErrorCallback,
}

impl Listener {
    pub fn new<E, R>(on_event: E, on_error: R) -> Self
    where
        E: Fn(Event) + Send + Sync + 'static,
        R: Fn(DispatchError) + Send + Sync + 'static,
    {
        Listener {
            on_event: Arc::new(on_event),
            on_error: Arc::new(on_error),
        }
    }

    /// Listener that only cares about events; errors are logged.
    pub fn events_only<E>(on_event: E) -> Self
    where
        E: Fn(Event) + Send + Sync + 'static,
    {
        Self::new(on_event, |error: DispatchError| {
            warn!("Unhandled {} error: {}", error.kind(), error);
        })
    }

    /// Wraps the listener so it can be handed to a dispatcher.
    pub fn into_observer(self) -> Arc<dyn Observer> {
        Arc::new(self)
    }
}

impl Observer for Listener {
    fn on_event(&self, event: Event) {
        (self.on_event)(event);
    }

    fn on_error(&self, error: DispatchError) {
        (self.on_error)(error);
    }
}
