//! # Evaluation
//!
//! Fitness evaluation: the [`Challenge`] seam, the simulated win-rate
//! challenge and the worker pool that runs evaluations in parallel.
pub mod challenge;
pub mod scheduler;
pub mod win_rate;

pub use challenge::Challenge;
pub use scheduler::EvaluationScheduler;
pub use win_rate::{EvaluationReport, TrialOutcome, WinRateChallenge};
