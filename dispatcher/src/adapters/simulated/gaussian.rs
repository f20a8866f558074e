use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use common::XYZ;

use crate::models::errors::DispatcherError;

/// Functionality to add some Gaussian noise.
#[derive(Clone, Debug)]
pub(crate) struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev.
    /// Returns a Simulation error if stdev is negative or not finite.
    pub(crate) fn new(mean: f64, stdev: f64) -> Result<Self, DispatcherError> {
        let normal = Normal::new(mean, stdev)
            .map_err(|e| DispatcherError::Simulation(format!("Invalid noise: {}", e)))?;
        Ok(Self { normal })
    }

    /// Sample from distribution
    pub(crate) fn draw_sample(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    /// Adds noise to sample
    pub(crate) fn add_noise(&self, rng: &mut StdRng, data: f64) -> f64 {
        data + self.draw_sample(rng)
    }

    /// Adds independent noise to each axis
    pub(crate) fn add_noise_xyz(&self, rng: &mut StdRng, data: XYZ) -> XYZ {
        XYZ::new([
            self.add_noise(rng, data.x()),
            self.add_noise(rng, data.y()),
            self.add_noise(rng, data.z()),
        ])
    }
}

/// Applies `noise` when present, otherwise returns `data` untouched.
pub(crate) fn perturb(noise: Option<&GaussianNoise>, rng: &mut StdRng, data: XYZ) -> XYZ {
    match noise {
        Some(noise) => noise.add_noise_xyz(rng, data),
        None => data,
    }
}
