use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// A selection strategy picks `num_to_select` individuals from an evaluated
/// population. The returned individuals are clones; they carry their fitness.
///
/// # Examples
///
/// ```
/// use stratmix::individual::Individual;
/// use stratmix::rng::RandomNumberGenerator;
/// use stratmix::selection::{SelectionStrategy, TournamentSelection};
///
/// let population: Vec<Individual> = (0..4)
///     .map(|i| {
///         let mut individual = Individual::new(vec![1.0, i as f64]);
///         individual.set_fitness(i);
///         individual
///     })
///     .collect();
///
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let selected = TournamentSelection::default()
///     .select(&population, 4, &mut rng)
///     .unwrap();
/// assert_eq!(selected.len(), 4);
/// ```
pub trait SelectionStrategy: Debug + Clone + Send + Sync {
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - Any individual has no valid fitness
    fn select(
        &self,
        population: &[Individual],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>;
}

/// Collects the fitness of every individual, failing on the first one that
/// has not been evaluated.
pub(crate) fn evaluated_fitness(population: &[Individual]) -> Result<Vec<u32>> {
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    population
        .iter()
        .enumerate()
        .map(|(i, individual)| {
            individual
                .fitness()
                .ok_or(GeneticError::UnevaluatedIndividual(i))
        })
        .collect()
}
