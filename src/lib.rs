//! Evolutionary search for the strategy-mixing distribution that maximizes a
//! candidate's win rate in a simulated 4-player game.
pub mod breeding;
pub mod error;
pub mod evaluation;
pub mod evolution;
pub mod hall_of_fame;
pub mod individual;
pub mod rng;
pub mod roster;
pub mod selection;
pub mod simulation;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evaluation::{Challenge, WinRateChallenge};
pub use evolution::{EvolutionLauncher, EvolutionLauncherBuilder, EvolutionOptions, EvolutionResult};
pub use individual::Individual;
pub use roster::Roster;
pub use simulation::{GameEngine, GameTrace, Table};
