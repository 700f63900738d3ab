//! Simulation context: the random source and audio volume shared by a match

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::Volume;

/// Uniform random numbers in `[0, 1)`
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl UniformSource for Pcg32 {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

pub struct SimContext {
    pub rng: Box<dyn UniformSource>,
    pub volume: Volume,
}

impl SimContext {
    /// Context with a seeded PCG generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(Box::new(Pcg32::seed_from_u64(seed)))
    }

    pub fn with_source(rng: Box<dyn UniformSource>) -> Self {
        Self {
            rng,
            volume: Volume::default(),
        }
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = volume;
        self
    }
}

impl std::fmt::Debug for SimContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimContext")
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}
