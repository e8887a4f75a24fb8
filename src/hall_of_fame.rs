//! # HallOfFame
//!
//! Keeps the best individual observed over a whole run. The record holds a
//! clone, so later variation of the population cannot alter it, and it is only
//! replaced by a strictly fitter individual. Its fitness therefore never
//! decreases.

use tracing::debug;

use crate::individual::Individual;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct HallOfFame {
    best: Option<Individual>,
}

impl HallOfFame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    pub fn best_fitness(&self) -> Option<u32> {
        self.best.as_ref().and_then(Individual::fitness)
    }

    /// Offers every evaluated individual of `population`. Returns `true` if
    /// the record changed. Unevaluated individuals are ignored.
    pub fn update(&mut self, population: &[Individual]) -> bool {
        let mut challenger: Option<&Individual> = None;
        for individual in population {
            if let Some(fitness) = individual.fitness() {
                let current = challenger
                    .and_then(Individual::fitness)
                    .or(self.best_fitness());
                if current.map_or(true, |best| fitness > best) {
                    challenger = Some(individual);
                }
            }
        }

        match challenger {
            Some(individual) => {
                debug!(fitness = ?individual.fitness(), "hall of fame improved");
                self.best = Some(individual.clone());
                true
            }
            None => false,
        }
    }
}
