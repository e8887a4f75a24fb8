//! # Error Types
//!
//! This module defines the error types of the optimizer. Errors are split into
//! two tiers:
//!
//! - [`GeneticError`] covers the fatal conditions of a run: invalid
//!   configuration, a worker pool that cannot be started, an unevaluated
//!   individual reaching selection, or an I/O or CSV failure while exporting
//!   the logbook. These propagate to the caller.
//! - [`TrialError`] covers the failure of a single simulated match. Trial errors
//!   are recovered by the fitness evaluator and never abort an evaluation.
//!
//! ## Examples
//!
//! ```rust
//! use stratmix::error::{GeneticError, Result};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use stratmix::error::{GeneticError, OptionExt};
//!
//! fn first_fitness(values: &[u32]) -> stratmix::error::Result<u32> {
//!     values.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//! ```

use thiserror::Error;

/// Fatal errors of an optimization run.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An invalid run parameter or operator parameter was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operation required at least one individual.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Selection was asked to compare an individual whose fitness is unset.
    #[error("Individual at position {0} has no valid fitness")]
    UnevaluatedIndividual(usize),

    /// The evaluation worker pool could not be created.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// An evolution run could not produce a result.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The logbook could not be written as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Failure reported by a simulation engine while playing one match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("simulation failed: {0}")]
pub struct SimulationError(pub String);

impl SimulationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The terminal game state could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("game trace contains no rounds")]
    NoRounds,

    #[error("round {0} contains no turns")]
    NoTurns(String),

    #[error("label {0:?} has no numeric suffix")]
    UnorderedLabel(String),

    #[error("turn {turn} of round {round} has no end-of-turn snapshot")]
    MissingSnapshot { round: String, turn: String },

    #[error("victory point tally is empty")]
    EmptyTally,

    #[error("seat label {0:?} does not name a seat")]
    UnknownSeat(String),
}

/// Reason a single trial was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrialError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("result extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("simulation engine panicked: {0}")]
    EnginePanic(String),

    #[error("candidate sampling failed: {0}")]
    Sampling(String),
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
