//! Data model and ports shared by the `motion-dispatch` workspace.
//!
//! Sources deliver [`types::samples`] through a [`SampleHandler`]; the dispatcher turns
//! them into an [`Event`] or a [`DispatchError`] and hands them to an [`Observer`].

pub mod constants;
pub mod errors;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{Observer, SensorSource, TimedSample};

// Re-export types
#[doc(inline)]
pub use errors::{DispatchError, SourceFailure};
#[doc(inline)]
pub use types::{
    Activation, AttitudeReferenceFrame, Clock, Event, SampleHandler, SourceKind, SourceResult,
};
#[doc(inline)]
pub use types::samples::{
    AccelerationSample, ActivityConfidence, ActivityMode, ActivityModes, ActivitySample,
    MagneticField, MagneticFieldAccuracy, MotionSample, PedometerEvent, PedometerEventKind,
    PedometerSample,
};
#[doc(inline)]
pub use types::untimed::{Attitude, XYZ};
