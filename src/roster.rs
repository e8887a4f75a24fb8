//! # Roster
//!
//! The fixed, ordered set of strategies whose mixing weights are being
//! optimized. Strategies are identified by position, so two entries are never
//! considered the same strategy even if their values compare equal.
//!
//! A roster also knows how to draw a table for one simulated match: a
//! candidate picked by weight, plus three distinct opponents picked uniformly
//! from the rest.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;

use crate::error::{GeneticError, Result, TrialError};
use crate::rng::RandomNumberGenerator;

/// Number of seats at a table.
pub const TABLE_SIZE: usize = 4;

/// Seat occupied by the strategy being optimized.
pub const CANDIDATE_SEAT: usize = 0;

/// Positional identity of a strategy within a [`Roster`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrategyId(pub usize);

#[derive(Debug, Clone)]
pub struct Roster<S> {
    strategies: Vec<S>,
}

impl<S> Roster<S> {
    /// Creates a roster. A table needs a candidate and three distinct
    /// opponents, so at least four strategies are required.
    pub fn new(strategies: Vec<S>) -> Result<Self> {
        if strategies.len() < TABLE_SIZE {
            return Err(GeneticError::Configuration(format!(
                "Roster needs at least {} strategies, got {}",
                TABLE_SIZE,
                strategies.len()
            )));
        }
        Ok(Self { strategies })
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn get(&self, id: StrategyId) -> Option<&S> {
        self.strategies.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrategyId, &S)> {
        self.strategies
            .iter()
            .enumerate()
            .map(|(i, s)| (StrategyId(i), s))
    }

    /// Draws the seating for one match.
    ///
    /// Seat 0 holds a candidate sampled according to `probabilities`; seats
    /// 1 to 3 hold three distinct opponents drawn uniformly without
    /// replacement from the remaining strategies, in sampled order.
    pub fn draw_table(
        &self,
        probabilities: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> std::result::Result<[StrategyId; TABLE_SIZE], TrialError> {
        if probabilities.len() != self.len() {
            return Err(TrialError::Sampling(format!(
                "expected {} probabilities, got {}",
                self.len(),
                probabilities.len()
            )));
        }

        let candidate = weighted_choice(probabilities, rng)?;

        let mut others: Vec<usize> = (0..self.len()).filter(|&i| i != candidate).collect();
        let (opponents, _) = others.partial_shuffle(rng, TABLE_SIZE - 1);

        let mut table = [StrategyId(candidate); TABLE_SIZE];
        for (seat, &opponent) in table.iter_mut().skip(1).zip(opponents.iter()) {
            *seat = StrategyId(opponent);
        }
        Ok(table)
    }

    /// Resolves a drawn table to the seated strategies, or `None` if an id
    /// lies outside the roster.
    pub fn seat_table(&self, ids: [StrategyId; TABLE_SIZE]) -> Option<[&S; TABLE_SIZE]> {
        if ids.iter().any(|id| id.0 >= self.len()) {
            return None;
        }
        Some(ids.map(|id| &self.strategies[id.0]))
    }
}

/// Draws one index with probability proportional to `weights`.
pub fn weighted_choice(
    weights: &[f64],
    rng: &mut RandomNumberGenerator,
) -> std::result::Result<usize, TrialError> {
    let dist = WeightedIndex::new(weights).map_err(|e| TrialError::Sampling(e.to_string()))?;
    Ok(dist.sample(rng))
}
