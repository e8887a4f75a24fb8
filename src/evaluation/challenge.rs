use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// A noisy fitness function over individuals.
///
/// Scores are integer counts in `0..=max_score()`. The random generator is
/// owned by the caller so parallel evaluations never share a stream.
pub trait Challenge: Send + Sync {
    /// Number of genes an individual must have.
    fn genome_len(&self) -> usize;

    /// Highest attainable score.
    fn max_score(&self) -> u32;

    fn score(&self, individual: &Individual, rng: &mut RandomNumberGenerator) -> u32;
}
