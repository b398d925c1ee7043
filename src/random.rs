// src/random.rs

use crate::common::{Result, VerifyError};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

/// Default closed interval test samples are drawn from.
pub const SAMPLE_LO: f32 = -5.0;
pub const SAMPLE_HI: f32 = 5.0;

/// Uniform sample generator owned by a single run.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: StdRng,
    dist: Uniform<f32>,
}

impl RandomSource {
    /// Seeds the generator from the operating system's entropy source.
    pub fn from_entropy(lo: f32, hi: f32) -> Result<Self> {
        let dist = Self::interval(lo, hi)?;
        let rng = StdRng::from_rng(OsRng)?;
        Ok(Self { rng, dist })
    }

    /// Deterministic generator, for reproducing a run.
    pub fn seeded(seed: u64, lo: f32, hi: f32) -> Result<Self> {
        let dist = Self::interval(lo, hi)?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            dist,
        })
    }

    fn interval(lo: f32, hi: f32) -> Result<Uniform<f32>> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(VerifyError::invalid_config(format!(
                "sample range [{lo}, {hi}] is empty or not finite"
            )));
        }
        Ok(Uniform::new_inclusive(lo, hi))
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.dist.sample(&mut self.rng)
    }

    pub fn fill(&mut self, buffer: &mut [f32]) {
        for x in buffer.iter_mut() {
            *x = self.next_sample();
        }
    }
}
