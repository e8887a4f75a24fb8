//! # Breeding
//!
//! Variation operators. A [`Crossover`] recombines two parents in place and a
//! [`Mutation`] perturbs one individual in place. Both go through
//! [`Individual::genes_mut`], so every touched individual loses its fitness.
//!
//! [`vary_and`] applies both operators to a whole population the way a
//! classic generational GA does.
pub mod blend;
pub mod gaussian;
pub mod variation;

use std::fmt::Debug;

use crate::{individual::Individual, rng::RandomNumberGenerator};

/// Recombines two individuals in place.
pub trait Crossover: Debug + Clone + Send + Sync {
    fn mate(&self, first: &mut Individual, second: &mut Individual, rng: &mut RandomNumberGenerator);
}

/// Perturbs one individual in place.
pub trait Mutation: Debug + Clone + Send + Sync {
    fn mutate(&self, individual: &mut Individual, rng: &mut RandomNumberGenerator);
}

pub use blend::BlendCrossover;
pub use gaussian::GaussianMutation;
pub use variation::vary_and;
