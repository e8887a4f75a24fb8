use super::Crossover;
use crate::{
    error::{GeneticError, Result},
    individual::Individual,
    rng::RandomNumberGenerator,
};

/// Blend crossover (BLX-α).
///
/// For every gene pair a fresh `gamma` is drawn uniformly from
/// `[-alpha, 1 + alpha)` and both children are placed on the line through the
/// parents: `x1' = (1 - gamma) * x1 + gamma * x2` and
/// `x2' = gamma * x1 + (1 - gamma) * x2`. Children can land outside the segment
/// by up to `alpha` times its length on either side.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendCrossover {
    alpha: f64,
}

impl BlendCrossover {
    /// # Errors
    ///
    /// Returns a configuration error if `alpha` is negative or not finite.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Blend crossover alpha must be a non-negative number, got {}",
                alpha
            )));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for BlendCrossover {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

impl Crossover for BlendCrossover {
    fn mate(&self, first: &mut Individual, second: &mut Individual, rng: &mut RandomNumberGenerator) {
        let a = first.genes_mut();
        let b = second.genes_mut();
        for (x1, x2) in a.iter_mut().zip(b.iter_mut()) {
            let gamma = (1.0 + 2.0 * self.alpha) * rng.uniform() - self.alpha;
            let (old1, old2) = (*x1, *x2);
            *x1 = (1.0 - gamma) * old1 + gamma * old2;
            *x2 = gamma * old1 + (1.0 - gamma) * old2;
        }
    }
}
