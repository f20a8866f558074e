use serde::{Deserialize, Serialize};

use crate::traits::TimedSample;
use crate::types::samples::{AccelerationSample, ActivitySample, MotionSample, PedometerSample};
use crate::types::SourceKind;

/// A single sample forwarded to the observer; exactly one payload per event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "sample", rename_all = "lowercase")]
pub enum Event {
    Motion(MotionSample),
    Acceleration(AccelerationSample),
    Activity(ActivitySample),
    Pedometer(PedometerSample),
}

impl Event {
    pub fn kind(&self) -> SourceKind {
        match self {
            Event::Motion(_) => SourceKind::Motion,
            Event::Acceleration(_) => SourceKind::Accelerometer,
            Event::Activity(_) => SourceKind::Activity,
            Event::Pedometer(_) => SourceKind::Pedometer,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            Event::Motion(sample) => sample.timestamp(),
            Event::Acceleration(sample) => sample.timestamp(),
            Event::Activity(sample) => sample.timestamp(),
            Event::Pedometer(sample) => sample.timestamp(),
        }
    }
}

impl From<MotionSample> for Event {
    fn from(value: MotionSample) -> Self {
        Event::Motion(value)
    }
}

impl From<AccelerationSample> for Event {
    fn from(value: AccelerationSample) -> Self {
        Event::Acceleration(value)
    }
}

impl From<ActivitySample> for Event {
    fn from(value: ActivitySample) -> Self {
        Event::Activity(value)
    }
}

impl From<PedometerSample> for Event {
    fn from(value: PedometerSample) -> Self {
        Event::Pedometer(value)
    }
}
