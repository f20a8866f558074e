use serde::{Deserialize, Serialize};

use crate::constants::N_XYZ_COORDINATES;
use crate::traits::TimedSample;
use crate::types::untimed::XYZ;

const TIMESTAMP_IDX: usize = 0;
const X_COORD_IDX: usize = 1;

/// Raw three-axis accelerometer reading, in G.
///
/// # Examples
///
/// ```
/// use common::{AccelerationSample, TimedSample, XYZ};
///
/// let sample = AccelerationSample::new(1627846267.0, [0.501234, 0.0, -1.0]);
///
/// assert_eq!(sample.timestamp(), 1627846267.0);
/// assert_eq!(sample.acceleration(), XYZ::new([0.501234, 0.0, -1.0]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSample {
    timestamp: f64,
    acceleration: XYZ,
}

impl AccelerationSample {
    pub fn new(timestamp: f64, acceleration: [f64; N_XYZ_COORDINATES]) -> Self {
        Self {
            timestamp,
            acceleration: XYZ::new(acceleration),
        }
    }

    pub fn from_xyz(timestamp: f64, acceleration: XYZ) -> Self {
        Self {
            timestamp,
            acceleration,
        }
    }

    pub fn acceleration(&self) -> XYZ {
        self.acceleration
    }
}

impl TimedSample for AccelerationSample {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

/// Parses a `[timestamp, x, y, z]` row.
impl TryFrom<Vec<f64>> for AccelerationSample {
    type Error = &'static str;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        if value.len() != N_XYZ_COORDINATES + 1 {
            return Err("Invalid length of input vector");
        }
        let acceleration = XYZ::try_from(value[X_COORD_IDX..=N_XYZ_COORDINATES].to_vec())?;
        Ok(AccelerationSample::from_xyz(value[TIMESTAMP_IDX], acceleration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_row() {
        let sample = AccelerationSample::try_from(vec![2.5, 0.1, 0.2, -0.98]).unwrap();
        assert_eq!(sample.timestamp(), 2.5);
        assert_eq!(sample.acceleration().inner(), [0.1, 0.2, -0.98]);
    }

    #[test]
    fn test_try_from_row_invalid_length() {
        assert!(AccelerationSample::try_from(vec![2.5, 0.1, 0.2]).is_err());
        assert!(AccelerationSample::try_from(vec![]).is_err());
    }

    #[test]
    fn test_value_is_not_rounded() {
        let sample = AccelerationSample::new(0.0, [0.501234, 0.0, 0.0]);
        assert_eq!(sample.acceleration().x(), 0.501234);
    }
}
