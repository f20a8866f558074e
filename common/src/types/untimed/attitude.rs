use nalgebra::{Quaternion, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::constants::N_QUATERNION_COORDINATES;
use crate::types::untimed::XYZ;

pub(crate) const W_QUATERNION_COORD_IDX: usize = 0;
pub(crate) const X_QUATERNION_COORD_IDX: usize = 1;
pub(crate) const Y_QUATERNION_COORD_IDX: usize = 2;
pub(crate) const Z_QUATERNION_COORD_IDX: usize = 3;

/// Orientation of the device relative to its attitude reference frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attitude(UnitQuaternion<f64>);

impl Attitude {
    /// Builds an attitude from `[w, x, y, z]`; the quaternion is normalized.
    pub fn new(data: [f64; N_QUATERNION_COORDINATES]) -> Self {
        let quaternion = Quaternion::new(
            data[W_QUATERNION_COORD_IDX],
            data[X_QUATERNION_COORD_IDX],
            data[Y_QUATERNION_COORD_IDX],
            data[Z_QUATERNION_COORD_IDX],
        );
        Self(UnitQuaternion::from_quaternion(quaternion))
    }

    /// Builds an attitude from roll, pitch and yaw in radians.
    pub fn from_euler_angles(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self(UnitQuaternion::from_euler_angles(roll, pitch, yaw))
    }

    pub fn from_unit_quaternion(unit_quaternion: UnitQuaternion<f64>) -> Self {
        Self(unit_quaternion)
    }

    pub fn inner(&self) -> UnitQuaternion<f64> {
        self.0
    }

    pub fn roll(&self) -> f64 {
        self.0.euler_angles().0
    }

    pub fn pitch(&self) -> f64 {
        self.0.euler_angles().1
    }

    pub fn yaw(&self) -> f64 {
        self.0.euler_angles().2
    }

    /// Expresses a reference-frame vector in the device frame.
    pub fn to_device_frame(&self, reference: XYZ) -> XYZ {
        XYZ::from_vector(self.0.inverse_transform_vector(&reference.0))
    }
}

impl Default for Attitude {
    fn default() -> Self {
        Self(UnitQuaternion::identity())
    }
}

impl From<Attitude> for [f64; N_QUATERNION_COORDINATES] {
    fn from(value: Attitude) -> Self {
        let unit_quaternion = value.inner();
        [
            unit_quaternion.w,
            unit_quaternion.i,
            unit_quaternion.j,
            unit_quaternion.k,
        ]
    }
}

impl From<[f64; N_QUATERNION_COORDINATES]> for Attitude {
    fn from(value: [f64; N_QUATERNION_COORDINATES]) -> Self {
        Self::new(value)
    }
}

impl TryFrom<Vec<f64>> for Attitude {
    type Error = &'static str;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        let array: [f64; N_QUATERNION_COORDINATES] =
            value.try_into().map_err(|_| "Conversion failed")?;
        Ok(Attitude::new(array))
    }
}
