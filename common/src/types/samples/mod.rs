pub mod acceleration;
pub mod activity;
pub mod motion;
pub mod pedometer;

pub use crate::types::samples::acceleration::AccelerationSample;
pub use crate::types::samples::activity::{
    ActivityConfidence, ActivityMode, ActivityModes, ActivitySample,
};
pub use crate::types::samples::motion::{MagneticField, MagneticFieldAccuracy, MotionSample};
pub use crate::types::samples::pedometer::{
    PedometerEvent, PedometerEventKind, PedometerSample, PedometerSampleBuilder,
};
