use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{evaluated_fitness, SelectionStrategy};

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament samples `tournament_size` aspirants uniformly with
/// replacement and keeps the fittest. The first aspirant drawn wins ties.
/// Tournaments are repeated until enough individuals are selected, so the
/// same individual may be selected several times.
///
/// - Smaller tournament sizes lead to more exploration
/// - Larger tournament sizes lead to more exploitation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament(&self, fitness: &[u32], rng: &mut RandomNumberGenerator) -> usize {
        let mut best_idx = rng.index(fitness.len());

        for _ in 1..self.tournament_size {
            let idx = rng.index(fitness.len());
            if fitness[idx] > fitness[best_idx] {
                best_idx = idx;
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 3 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        population: &[Individual],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        let fitness = evaluated_fitness(population)?;

        Ok((0..num_to_select)
            .map(|_| population[self.run_tournament(&fitness, rng)].clone())
            .collect())
    }
}
