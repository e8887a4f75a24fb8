//! # Individual
//!
//! An `Individual` is one candidate solution: a vector of unnormalized weights
//! over the strategy roster plus a cached fitness.
//!
//! The genes may become negative after mutation. They are only interpreted
//! through [`Individual::to_probabilities`], which clamps and renormalizes.
//!
//! ## Example
//!
//! ```rust
//! use stratmix::individual::{normalize, Individual};
//!
//! let individual = Individual::new(vec![-1.0, 1.0, 3.0]);
//! assert_eq!(individual.to_probabilities(), normalize(&[0.0, 1.0, 3.0]));
//! assert_eq!(individual.fitness(), None);
//! ```

use crate::rng::RandomNumberGenerator;

/// Scales `values` so they sum to 1.
///
/// A vector that sums to zero maps to the uniform distribution, as does one
/// whose sum cannot be represented even after rescaling. The input is left
/// untouched.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let mut scale = 1.0;
    let mut sum: f64 = values.iter().sum();
    if sum.is_infinite() {
        // finite values whose sum overflows
        scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        sum = values.iter().map(|v| v / scale).sum();
    }
    if sum == 0.0 || !sum.is_finite() {
        let uniform = 1.0 / values.len() as f64;
        return vec![uniform; values.len()];
    }
    values.iter().map(|v| v / scale / sum).collect()
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<f64>,
    fitness: Option<u32>,
}

impl Individual {
    /// Creates an unevaluated individual from raw genes.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Draws `len` uniform weights in `[0, 1)` and normalizes them.
    pub fn random(len: usize, rng: &mut RandomNumberGenerator) -> Self {
        let raw: Vec<f64> = rng.fetch_uniform(0.0, 1.0, len).into_iter().collect();
        Self::new(normalize(&raw))
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Mutable access to the genes. Clears the cached fitness.
    pub fn genes_mut(&mut self) -> &mut [f64] {
        self.fitness = None;
        &mut self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn fitness(&self) -> Option<u32> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn set_fitness(&mut self, fitness: u32) {
        self.fitness = Some(fitness);
    }

    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Interprets the genes as a probability distribution.
    ///
    /// Negative and non-finite genes count as zero; if nothing positive
    /// remains the distribution is uniform.
    pub fn to_probabilities(&self) -> Vec<f64> {
        let clamped: Vec<f64> = self
            .genes
            .iter()
            .map(|&g| if g.is_finite() && g > 0.0 { g } else { 0.0 })
            .collect();
        normalize(&clamped)
    }
}
