use rand::Rng;
use rand_distr::StandardNormal;

use super::Mutation;
use crate::{
    error::{GeneticError, Result},
    individual::Individual,
    rng::RandomNumberGenerator,
};

/// Additive Gaussian mutation.
///
/// Each gene is independently perturbed with probability
/// `independent_probability` by noise drawn from `N(mu, sigma²)`. Genes may
/// become negative; they are clamped only when the individual is read as a
/// distribution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianMutation {
    mu: f64,
    sigma: f64,
    independent_probability: f64,
}

impl GaussianMutation {
    /// # Errors
    ///
    /// Returns a configuration error if `sigma` is negative, any parameter is
    /// not finite, or `independent_probability` is outside `[0, 1]`.
    pub fn new(mu: f64, sigma: f64, independent_probability: f64) -> Result<Self> {
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Gaussian mutation needs a finite mean and a non-negative standard deviation, got mu={} sigma={}",
                mu, sigma
            )));
        }
        if !(0.0..=1.0).contains(&independent_probability) {
            return Err(GeneticError::Configuration(format!(
                "Per-gene mutation probability must be within [0, 1], got {}",
                independent_probability
            )));
        }
        Ok(Self {
            mu,
            sigma,
            independent_probability,
        })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn independent_probability(&self) -> f64 {
        self.independent_probability
    }
}

impl Default for GaussianMutation {
    fn default() -> Self {
        Self {
            mu: 0.0,
            sigma: 0.1,
            independent_probability: 0.2,
        }
    }
}

impl Mutation for GaussianMutation {
    fn mutate(&self, individual: &mut Individual, rng: &mut RandomNumberGenerator) {
        for gene in individual.genes_mut() {
            if rng.chance(self.independent_probability) {
                let noise: f64 = rng.sample(StandardNormal);
                *gene += self.mu + self.sigma * noise;
            }
        }
    }
}
