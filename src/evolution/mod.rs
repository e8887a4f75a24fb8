pub mod builder;
pub mod launcher;
pub mod logbook;
pub mod options;

pub use builder::EvolutionLauncherBuilder;
pub use launcher::{EvolutionLauncher, EvolutionResult, Termination};
pub use logbook::{GenerationRecord, Logbook};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
