//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate holds the single observer registration of a dispatcher.
//!
//! An [`ObserverSlot`] keeps a weak reference to one [`Observer`](common::Observer).
//! Registering a new observer replaces the previous one, and dropping the observer
//! leaves the slot `Released` rather than keeping it alive.
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use common::{AccelerationSample, Event, Observer};
//! use publisher::{Listener, Notification, ObserverSlot};
//!
//! let slot = ObserverSlot::new();
//!
//! // Register a listener
//! let observer: Arc<dyn Observer> = Listener::events_only(|event: Event| {
//!     println!("Listener received: {:?}", event);
//! })
//! .into_observer();
//! slot.register(&observer);
//!
//! // Notify the registered listener
//! let event = Event::Acceleration(AccelerationSample::new(0.0, [0.0, 0.0, -1.0]));
//! assert_eq!(slot.notify_event(event.clone()), Notification::Delivered);
//!
//! // Once the owner drops it, the slot reports it as released
//! drop(observer);
//! assert_eq!(slot.notify_event(event), Notification::Released);
//! ```

pub mod listener;
pub mod macros;
pub mod slot;

pub use listener::Listener;
pub use slot::{Notification, ObserverSlot};

#[doc(hidden)]
pub mod __private {
    pub use common::{DispatchError, Event};
}
