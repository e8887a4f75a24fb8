//! # EvolutionOptions
//!
//! The run parameters of an optimization: population size, generation
//! budget, operator probabilities, evaluation batch size, worker count and
//! seed.
//!
//! ## Example
//!
//! ```rust
//! use stratmix::evolution::options::EvolutionOptions;
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_population_size(), 50);
//!
//! // Or configure it fluently
//! let options = EvolutionOptions::builder()
//!     .population_size(6)
//!     .num_generations(2)
//!     .trials_per_evaluation(5)
//!     .seed(7)
//!     .build();
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## Defaults
//!
//! | Parameter | Default |
//! |---|---|
//! | `population_size` | 50 |
//! | `num_generations` | 5 |
//! | `crossover_probability` | 0.8 |
//! | `mutation_probability` | 0.2 |
//! | `trials_per_evaluation` | 10 |
//! | `num_workers` | 6 |
//! | `seed` | 42 |
//! | `max_rounds` | 200 |

use crate::error::{GeneticError, Result};
use crate::evaluation::scheduler::DEFAULT_NUM_WORKERS;
use crate::evaluation::win_rate::DEFAULT_MAX_ROUNDS;

const DEFAULT_POPULATION_SIZE: usize = 50;
const DEFAULT_NUM_GENERATIONS: usize = 5;
const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.8;
const DEFAULT_MUTATION_PROBABILITY: f64 = 0.2;
const DEFAULT_TRIALS_PER_EVALUATION: u32 = 10;
const DEFAULT_SEED: u64 = 42;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    population_size: usize,
    crossover_probability: f64,
    mutation_probability: f64,
    /// Simulated matches per fitness evaluation
    trials_per_evaluation: u32,
    num_workers: usize,
    seed: u64,
    /// Round cap handed to the game engine
    max_rounds: u32,
}

impl EvolutionOptions {
    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn get_mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn get_trials_per_evaluation(&self) -> u32 {
        self.trials_per_evaluation
    }

    pub fn get_num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    pub fn get_max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_crossover_probability(&mut self, probability: f64) {
        self.crossover_probability = probability;
    }

    pub fn set_mutation_probability(&mut self, probability: f64) {
        self.mutation_probability = probability;
    }

    pub fn set_trials_per_evaluation(&mut self, trials: u32) {
        self.trials_per_evaluation = trials;
    }

    pub fn set_num_workers(&mut self, num_workers: usize) {
        self.num_workers = num_workers;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn set_max_rounds(&mut self, max_rounds: u32) {
        self.max_rounds = max_rounds;
    }

    /// Checks that the options describe a runnable optimization.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the population size, trial
    /// count, worker count or round cap is zero, or if a probability lies
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.trials_per_evaluation == 0 {
            return Err(GeneticError::Configuration(
                "Number of trials per evaluation cannot be zero".to_string(),
            ));
        }
        if self.num_workers == 0 {
            return Err(GeneticError::Configuration(
                "Number of workers cannot be zero".to_string(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(GeneticError::Configuration(
                "Round cap cannot be zero".to_string(),
            ));
        }
        for (name, p) in [
            ("Crossover", self.crossover_probability),
            ("Mutation", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GeneticError::Configuration(format!(
                    "{} probability must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: DEFAULT_NUM_GENERATIONS,
            population_size: DEFAULT_POPULATION_SIZE,
            crossover_probability: DEFAULT_CROSSOVER_PROBABILITY,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            trials_per_evaluation: DEFAULT_TRIALS_PER_EVALUATION,
            num_workers: DEFAULT_NUM_WORKERS,
            seed: DEFAULT_SEED,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    population_size: Option<usize>,
    crossover_probability: Option<f64>,
    mutation_probability: Option<f64>,
    trials_per_evaluation: Option<u32>,
    num_workers: Option<usize>,
    seed: Option<u64>,
    max_rounds: Option<u32>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    pub fn trials_per_evaluation(mut self, value: u32) -> Self {
        self.trials_per_evaluation = Some(value);
        self
    }

    pub fn num_workers(mut self, value: usize) -> Self {
        self.num_workers = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn max_rounds(mut self, value: u32) -> Self {
        self.max_rounds = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(DEFAULT_NUM_GENERATIONS),
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            crossover_probability: self
                .crossover_probability
                .unwrap_or(DEFAULT_CROSSOVER_PROBABILITY),
            mutation_probability: self
                .mutation_probability
                .unwrap_or(DEFAULT_MUTATION_PROBABILITY),
            trials_per_evaluation: self
                .trials_per_evaluation
                .unwrap_or(DEFAULT_TRIALS_PER_EVALUATION),
            num_workers: self.num_workers.unwrap_or(DEFAULT_NUM_WORKERS),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            max_rounds: self.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS),
        }
    }
}
