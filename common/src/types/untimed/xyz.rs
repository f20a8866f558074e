use nalgebra::Vector3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::ops::{Add, Mul, Sub};

use crate::constants::N_XYZ_COORDINATES;

/// Three-axis vector (acceleration in G, rotation rate in rad/s, field in microtesla).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct XYZ(pub Vector3<f64>);

impl XYZ {
    pub fn new(data: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::from(data))
    }

    pub fn from_vector(data: Vector3<f64>) -> Self {
        Self(data)
    }

    pub fn inner(&self) -> [f64; N_XYZ_COORDINATES] {
        [self.0.x, self.0.y, self.0.z]
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }
}

impl From<XYZ> for [f64; N_XYZ_COORDINATES] {
    fn from(value: XYZ) -> Self {
        value.inner()
    }
}

impl From<[f64; N_XYZ_COORDINATES]> for XYZ {
    fn from(value: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::from(value))
    }
}

impl From<XYZ> for Vec<f64> {
    fn from(value: XYZ) -> Self {
        value.inner().to_vec()
    }
}

impl TryFrom<Vec<f64>> for XYZ {
    type Error = &'static str;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        if value.len() != N_XYZ_COORDINATES {
            return Err("Can't convert to XYZ");
        }
        Ok(Self(Vector3::from_vec(value)))
    }
}

impl Add for XYZ {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for XYZ {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for XYZ {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Serialize for XYZ {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        XYZFields {
            x: self.0.x,
            y: self.0.y,
            z: self.0.z,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for XYZ {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match XYZRepr::deserialize(deserializer)? {
            XYZRepr::Array(data) => Ok(XYZ::new(data)),
            XYZRepr::Object(XYZFields { x, y, z }) => Ok(XYZ::new([x, y, z])),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct XYZFields {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    z: f64,
}

// Accepted wire shapes: `[x, y, z]` or `{"x": .., "y": .., "z": ..}`
#[derive(Deserialize)]
#[serde(untagged)]
enum XYZRepr {
    Array([f64; N_XYZ_COORDINATES]),
    Object(XYZFields),
}
