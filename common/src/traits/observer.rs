use crate::errors::DispatchError;
use crate::types::Event;

/// Consumer of dispatched events.
///
/// Both entry points are invoked synchronously on the dispatcher's serial
/// delivery context, one call at a time. Implementations should return quickly.
pub trait Observer: Send + Sync {
    fn on_event(&self, event: Event);
    fn on_error(&self, error: DispatchError);
}
