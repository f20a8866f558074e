use serde::{Deserialize, Serialize};

use crate::traits::TimedSample;
use crate::types::untimed::{Attitude, XYZ};

/// Calibration quality of a magnetic field estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagneticFieldAccuracy {
    #[default]
    Uncalibrated,
    Low,
    Medium,
    High,
}

/// Calibrated magnetic field in microtesla.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MagneticField {
    pub field: XYZ,
    pub accuracy: MagneticFieldAccuracy,
}

/// Fused device-motion snapshot.
///
/// `heading` is in degrees within `[0, 360)` relative to the attitude reference
/// frame, or negative when the frame has no heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    timestamp: f64,
    attitude: Attitude,
    rotation_rate: XYZ,
    gravity: XYZ,
    user_acceleration: XYZ,
    magnetic_field: MagneticField,
    heading: f64,
}

impl MotionSample {
    pub fn builder(timestamp: f64) -> MotionSampleBuilder {
        MotionSampleBuilder {
            sample: MotionSample {
                timestamp,
                ..MotionSample::default()
            },
        }
    }

    pub fn attitude(&self) -> Attitude {
        self.attitude
    }

    pub fn rotation_rate(&self) -> XYZ {
        self.rotation_rate
    }

    pub fn gravity(&self) -> XYZ {
        self.gravity
    }

    pub fn user_acceleration(&self) -> XYZ {
        self.user_acceleration
    }

    pub fn magnetic_field(&self) -> MagneticField {
        self.magnetic_field
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn has_heading(&self) -> bool {
        self.heading >= 0.0
    }
}

impl TimedSample for MotionSample {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

/// Assembles a [`MotionSample`]; the sample is immutable once built.
#[derive(Clone, Debug)]
pub struct MotionSampleBuilder {
    sample: MotionSample,
}

impl MotionSampleBuilder {
    pub fn attitude(mut self, attitude: Attitude) -> Self {
        self.sample.attitude = attitude;
        self
    }

    pub fn rotation_rate(mut self, rotation_rate: XYZ) -> Self {
        self.sample.rotation_rate = rotation_rate;
        self
    }

    pub fn gravity(mut self, gravity: XYZ) -> Self {
        self.sample.gravity = gravity;
        self
    }

    pub fn user_acceleration(mut self, user_acceleration: XYZ) -> Self {
        self.sample.user_acceleration = user_acceleration;
        self
    }

    pub fn magnetic_field(mut self, magnetic_field: MagneticField) -> Self {
        self.sample.magnetic_field = magnetic_field;
        self
    }

    pub fn heading(mut self, heading: f64) -> Self {
        self.sample.heading = heading;
        self
    }

    pub fn build(self) -> MotionSample {
        self.sample
    }
}
