use tracing::debug;

use super::{Crossover, Mutation};
use crate::{individual::Individual, rng::RandomNumberGenerator};

/// Produces an offspring population of the same size as `population`.
///
/// The offspring start as clones of the population. Each consecutive pair
/// `(0, 1), (2, 3), ...` is mated with probability `crossover_probability`, then
/// every offspring is mutated with probability `mutation_probability`. Both
/// steps can touch the same individual. Untouched offspring keep the fitness
/// of their parent and need no re-evaluation.
pub fn vary_and<C, M>(
    population: &[Individual],
    crossover: &C,
    mutation: &M,
    crossover_probability: f64,
    mutation_probability: f64,
    rng: &mut RandomNumberGenerator,
) -> Vec<Individual>
where
    C: Crossover,
    M: Mutation,
{
    let mut offspring = population.to_vec();
    let mut mated = 0usize;
    let mut mutated = 0usize;

    for pair in offspring.chunks_exact_mut(2) {
        if rng.chance(crossover_probability) {
            let (first, second) = pair.split_at_mut(1);
            crossover.mate(&mut first[0], &mut second[0], rng);
            mated += 1;
        }
    }

    for child in offspring.iter_mut() {
        if rng.chance(mutation_probability) {
            mutation.mutate(child, rng);
            mutated += 1;
        }
    }

    debug!(pairs_mated = mated, mutated, "variation applied");
    offspring
}
