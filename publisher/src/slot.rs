use log::debug;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use common::{DispatchError, Event, Observer};

/// Outcome of handing a payload to the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The registered observer received the payload.
    Delivered,
    /// No observer is registered.
    Vacant,
    /// The registered observer has been dropped by its owner.
    Released,
}

/// Single, weakly held observer registration. The last registration wins.
#[derive(Default)]
pub struct ObserverSlot {
    observer: RwLock<Option<Weak<dyn Observer>>>,
}

impl ObserverSlot {
    pub fn new() -> Self {
        Self {
            observer: RwLock::new(None),
        }
    }

    /// Registers `observer`, replacing any previous registration.
    ///
    /// Only a weak reference is kept; the caller owns the observer.
    pub fn register(&self, observer: &Arc<dyn Observer>) {
        let mut slot = self.observer.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            debug!("Replacing registered observer");
        }
        *slot = Some(Arc::downgrade(observer));
    }

    pub fn clear(&self) {
        let mut slot = self.observer.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Returns the registered observer if it is still alive.
    pub fn current(&self) -> Option<Arc<dyn Observer>> {
        let slot = self.observer.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().and_then(Weak::upgrade)
    }

    /// Returns true if a registration exists, alive or not.
    pub fn is_registered(&self) -> bool {
        let slot = self.observer.read().unwrap_or_else(PoisonError::into_inner);
        slot.is_some()
    }

    pub fn notify_event(&self, event: Event) -> Notification {
        self.notify(|observer| observer.on_event(event))
    }

    pub fn notify_error(&self, error: DispatchError) -> Notification {
        self.notify(|observer| observer.on_error(error))
    }

    // The lock is released before the observer runs, so callbacks may re-register.
    fn notify<F>(&self, deliver: F) -> Notification
    where
        F: FnOnce(&dyn Observer),
    {
        if !self.is_registered() {
            return Notification::Vacant;
        }
        match self.current() {
            Some(observer) => {
                deliver(observer.as_ref());
                Notification::Delivered
            }
            None => Notification::Released,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{AccelerationSample, SourceFailure, SourceKind};
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static SAMPLE: Lazy<Event> =
        Lazy::new(|| Event::Acceleration(AccelerationSample::new(1.0, [0.1, 0.2, 0.3])));

    #[derive(Default)]
    struct TestHandler {
        events: Mutex<Vec<Event>>,
        errors: Mutex<Vec<DispatchError>>,
    }

    impl Observer for TestHandler {
        fn on_event(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
        fn on_error(&self, error: DispatchError) {
            self.errors.lock().unwrap().push(error);
        }
    }

    #[test]
    fn test_empty_slot_is_vacant() {
        let slot = ObserverSlot::new();
        assert!(!slot.is_registered());
        assert_eq!(slot.notify_event(SAMPLE.clone()), Notification::Vacant);
    }

    #[test]
    fn test_register_and_notify() {
        let slot = ObserverSlot::new();
        let handler = Arc::new(TestHandler::default());
        slot.register(&(handler.clone() as Arc<dyn Observer>));

        assert_eq!(slot.notify_event(SAMPLE.clone()), Notification::Delivered);
        let error = DispatchError::SourceError {
            kind: SourceKind::Accelerometer,
            cause: SourceFailure::Timeout,
        };
        assert_eq!(slot.notify_error(error.clone()), Notification::Delivered);

        assert_eq!(*handler.events.lock().unwrap(), vec![SAMPLE.clone()]);
        assert_eq!(*handler.errors.lock().unwrap(), vec![error]);
    }

    #[test]
    fn test_last_registration_wins() {
        let slot = ObserverSlot::new();
        let first = Arc::new(TestHandler::default());
        let second = Arc::new(TestHandler::default());
        slot.register(&(first.clone() as Arc<dyn Observer>));
        slot.register(&(second.clone() as Arc<dyn Observer>));

        slot.notify_event(SAMPLE.clone());

        assert!(first.events.lock().unwrap().is_empty());
        assert_eq!(second.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dropped_observer_is_released() {
        let slot = ObserverSlot::new();
        let handler: Arc<dyn Observer> = Arc::new(TestHandler::default());
        slot.register(&handler);
        drop(handler);

        assert!(slot.is_registered());
        assert!(slot.current().is_none());
        assert_eq!(slot.notify_event(SAMPLE.clone()), Notification::Released);
    }

    #[test]
    fn test_clear() {
        let slot = ObserverSlot::new();
        let handler = Arc::new(TestHandler::default());
        slot.register(&(handler.clone() as Arc<dyn Observer>));
        slot.clear();

        assert_eq!(slot.notify_event(SAMPLE.clone()), Notification::Vacant);
        assert!(handler.events.lock().unwrap().is_empty());
    }
}
