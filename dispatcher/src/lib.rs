//! # Crate motion_dispatcher
//!
//! `motion_dispatcher` drives four independent motion sensor sources (device motion,
//! accelerometer, activity classifier and pedometer) and forwards what they report to a
//! single registered observer.
//!
//! Features include:
//! - Normalization of every source callback into one [`common::Event`] or [`common::DispatchError`].
//! - Serial delivery: the observer is invoked from one task, one call at a time, in arrival
//!   order per source.
//! - Per-source activation policies, so calling `start` twice never duplicates a subscription.
//! - `stop` discards deliveries that have not reached the observer yet.
//! - The observer is held weakly. Dropping it stops all sources.
//! - Simulated sources and a service helper for demos.
//!
//! ```no_run
//! use common::Event;
//! use motion_dispatcher::{services, DispatcherConfig};
//! use publisher::Listener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let observer = Listener::events_only(|event: Event| println!("{:?}", event)).into_observer();
//!     let (handle, _dispatcher) =
//!         services::run_simulated_service(DispatcherConfig::default(), observer, true, Some(2_000))
//!             .expect("Error starting simulated service");
//!     handle.await.unwrap();
//! }
//! ```

pub mod adapters;
pub(crate) mod constants;
mod dispatcher;
pub mod models;
pub mod ports;
pub mod services;

pub use dispatcher::MotionDispatcher;
pub use models::config::{ActivationPolicies, DispatcherConfig};
pub use models::errors::{ConfigError, DispatcherError};
pub use models::state::{ActivationPolicy, SourceState};
pub use ports::SensorSuite;
