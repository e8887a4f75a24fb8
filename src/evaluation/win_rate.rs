//! # WinRateChallenge
//!
//! Scores an individual by Monte-Carlo simulation: each trial seats a
//! candidate strategy drawn from the individual's distribution against three
//! random opponents and counts a win when the candidate finishes first.
//!
//! A trial that fails, whether the engine reports an error, panics or
//! returns a trace that cannot be read, is skipped. It contributes no win and
//! never aborts the evaluation.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use super::challenge::Challenge;
use crate::error::{GeneticError, Result, TrialError};
use crate::evolution::options::EvolutionOptions;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::roster::{Roster, CANDIDATE_SEAT};
use crate::simulation::{GameEngine, Table};

/// Default round cap passed to the engine.
pub const DEFAULT_MAX_ROUNDS: u32 = 200;

/// Result of one simulated match.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialOutcome {
    Completed { candidate_won: bool },
    Skipped(TrialError),
}

/// Aggregate of one evaluation batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    pub wins: u32,
    pub skipped: u32,
}

impl EvaluationReport {
    fn record(&mut self, outcome: &TrialOutcome) {
        match outcome {
            TrialOutcome::Completed { candidate_won } => {
                if *candidate_won {
                    self.wins += 1;
                }
            }
            TrialOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WinRateChallenge<S, E> {
    roster: Roster<S>,
    engine: E,
    trials: u32,
    max_rounds: u32,
}

impl<S, E> WinRateChallenge<S, E>
where
    S: Send + Sync,
    E: GameEngine<S>,
{
    /// Creates a challenge playing `trials` matches per evaluation.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `trials` is zero.
    pub fn new(roster: Roster<S>, engine: E, trials: u32) -> Result<Self> {
        if trials == 0 {
            return Err(GeneticError::Configuration(
                "Number of trials per evaluation cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            roster,
            engine,
            trials,
            max_rounds: DEFAULT_MAX_ROUNDS,
        })
    }

    /// Creates a challenge using the trial count and round cap of `options`.
    pub fn from_options(roster: Roster<S>, engine: E, options: &EvolutionOptions) -> Result<Self> {
        Ok(Self::new(roster, engine, options.get_trials_per_evaluation())?
            .with_max_rounds(options.get_max_rounds()))
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn roster(&self) -> &Roster<S> {
        &self.roster
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Plays one match with seats drawn from `probabilities`.
    pub fn run_trial(&self, probabilities: &[f64], rng: &mut RandomNumberGenerator) -> TrialOutcome {
        match self.play_table(probabilities, rng) {
            Ok(winner) => TrialOutcome::Completed {
                candidate_won: winner == CANDIDATE_SEAT,
            },
            Err(e) => TrialOutcome::Skipped(e),
        }
    }

    /// Runs the full batch of trials for `individual`.
    pub fn evaluate(&self, individual: &Individual, rng: &mut RandomNumberGenerator) -> EvaluationReport {
        let probabilities = individual.to_probabilities();
        let mut report = EvaluationReport::default();

        for trial in 0..self.trials {
            let outcome = self.run_trial(&probabilities, rng);
            if let TrialOutcome::Skipped(reason) = &outcome {
                warn!(trial, %reason, "skipping trial");
            }
            report.record(&outcome);
        }

        report
    }

    fn play_table(
        &self,
        probabilities: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> std::result::Result<usize, TrialError> {
        let ids = self.roster.draw_table(probabilities, rng)?;
        let table = Table {
            seats: self
                .roster
                .seat_table(ids)
                .ok_or_else(|| TrialError::Sampling("table holds an unknown strategy".to_string()))?,
            max_rounds: self.max_rounds,
            store_trace: false,
        };

        let trace = panic::catch_unwind(AssertUnwindSafe(|| self.engine.play(&table)))
            .map_err(|payload| TrialError::EnginePanic(panic_message(payload.as_ref())))??;

        Ok(trace.winner_seat()?)
    }
}

impl<S, E> Challenge for WinRateChallenge<S, E>
where
    S: Send + Sync,
    E: GameEngine<S>,
{
    fn genome_len(&self) -> usize {
        self.roster.len()
    }

    fn max_score(&self) -> u32 {
        self.trials
    }

    fn score(&self, individual: &Individual, rng: &mut RandomNumberGenerator) -> u32 {
        self.evaluate(individual, rng).wins
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, SimulationError};
    use crate::roster::TABLE_SIZE;
    use crate::simulation::{seat_label, GameTrace};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn trace_with_winner(winner: usize) -> GameTrace {
        let mut trace = GameTrace::new();
        let tally: Vec<(String, i64)> = (0..TABLE_SIZE)
            .map(|seat| (seat_label(seat), if seat == winner { 10 } else { 3 }))
            .collect();
        trace.record_turn("round_1", "turn_P0", tally);
        trace
    }

    struct FixedWinner(usize);

    impl GameEngine<u8> for FixedWinner {
        fn play(&self, _table: &Table<'_, u8>) -> std::result::Result<GameTrace, SimulationError> {
            Ok(trace_with_winner(self.0))
        }
    }

    struct AlternatingFailure {
        calls: AtomicU32,
    }

    impl GameEngine<u8> for AlternatingFailure {
        fn play(&self, table: &Table<'_, u8>) -> std::result::Result<GameTrace, SimulationError> {
            assert!(!table.store_trace);
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match call % 3 {
                0 => Err(SimulationError::new("invalid game state")),
                1 => panic!("engine exploded"),
                _ => Ok(trace_with_winner(0)),
            }
        }
    }

    struct Unreadable;

    impl GameEngine<u8> for Unreadable {
        fn play(&self, _table: &Table<'_, u8>) -> std::result::Result<GameTrace, SimulationError> {
            Ok(GameTrace::new())
        }
    }

    fn roster() -> Roster<u8> {
        Roster::new((0..6).collect()).unwrap()
    }

    #[test]
    fn test_zero_trials_rejected() {
        let result = WinRateChallenge::new(roster(), FixedWinner(0), 0);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_always_winning_candidate() {
        let challenge = WinRateChallenge::new(roster(), FixedWinner(0), 12).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let individual = Individual::new(vec![1.0; 6]);

        assert_eq!(challenge.score(&individual, &mut rng), 12);
    }

    #[test]
    fn test_never_winning_candidate() {
        let challenge = WinRateChallenge::new(roster(), FixedWinner(2), 12).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let individual = Individual::new(vec![1.0; 6]);

        assert_eq!(challenge.score(&individual, &mut rng), 0);
    }

    #[test]
    fn test_failures_are_skipped() {
        let engine = AlternatingFailure {
            calls: AtomicU32::new(0),
        };
        let challenge = WinRateChallenge::new(roster(), engine, 9).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let individual = Individual::new(vec![-1.0, 0.0, 2.0, 0.5, 0.5, 0.0]);

        let report = challenge.evaluate(&individual, &mut rng);
        assert_eq!(report, EvaluationReport { wins: 3, skipped: 6 });
    }

    #[test]
    fn test_unreadable_trace_is_skipped() {
        let challenge = WinRateChallenge::new(roster(), Unreadable, 5).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let probabilities = vec![1.0 / 6.0; 6];

        match challenge.run_trial(&probabilities, &mut rng) {
            TrialOutcome::Skipped(TrialError::Extraction(_)) => (),
            other => panic!("Expected extraction failure, got {:?}", other),
        }
        assert_eq!(challenge.score(&Individual::new(vec![1.0; 6]), &mut rng), 0);
    }

    /// Reports a tally whose labels are not plain ASCII.
    struct AccentedLabels;

    impl GameEngine<u8> for AccentedLabels {
        fn play(&self, _table: &Table<'_, u8>) -> std::result::Result<GameTrace, SimulationError> {
            let mut trace = GameTrace::new();
            trace.record_turn(
                "round_1",
                "turn_P0",
                [("Jé0", 10), ("Jé1", 1), ("Jé2", 1), ("Jé3", 1)],
            );
            Ok(trace)
        }
    }

    struct AccentedUnnumbered;

    impl GameEngine<u8> for AccentedUnnumbered {
        fn play(&self, _table: &Table<'_, u8>) -> std::result::Result<GameTrace, SimulationError> {
            let mut trace = GameTrace::new();
            trace.record_turn("round_1", "turn_P0", [("Jé", 10), ("Jé1", 1)]);
            Ok(trace)
        }
    }

    #[test]
    fn test_non_ascii_seat_labels_do_not_abort() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let individual = Individual::new(vec![1.0; 6]);

        let challenge = WinRateChallenge::new(roster(), AccentedLabels, 4).unwrap();
        assert_eq!(challenge.score(&individual, &mut rng), 4);

        let challenge = WinRateChallenge::new(roster(), AccentedUnnumbered, 4).unwrap();
        assert_eq!(
            challenge.evaluate(&individual, &mut rng),
            EvaluationReport { wins: 0, skipped: 4 }
        );
        match challenge.run_trial(&[1.0 / 6.0; 6], &mut rng) {
            TrialOutcome::Skipped(TrialError::Extraction(ExtractionError::UnknownSeat(label))) => {
                assert_eq!(label, "Jé")
            }
            other => panic!("Expected unknown seat, got {:?}", other),
        }
    }

    struct FavorsStrategy(u8);

    impl GameEngine<u8> for FavorsStrategy {
        fn play(&self, table: &Table<'_, u8>) -> std::result::Result<GameTrace, SimulationError> {
            Ok(trace_with_winner(if *table.seats[0] == self.0 { 0 } else { 1 }))
        }
    }

    struct RequiresRoundCap(u32);

    impl GameEngine<u8> for RequiresRoundCap {
        fn play(&self, table: &Table<'_, u8>) -> std::result::Result<GameTrace, SimulationError> {
            if table.max_rounds == self.0 {
                Ok(trace_with_winner(0))
            } else {
                Err(SimulationError::new("unexpected round cap"))
            }
        }
    }

    #[test]
    fn test_candidate_is_seated_first() {
        let challenge = WinRateChallenge::new(roster(), FavorsStrategy(4), 20).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);

        let all_on_four = Individual::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(challenge.score(&all_on_four, &mut rng), 20);

        let none_on_four = Individual::new(vec![1.0, 1.0, 1.0, 1.0, 0.0, 1.0]);
        assert_eq!(challenge.score(&none_on_four, &mut rng), 0);
    }

    #[test]
    fn test_from_options() {
        let options = EvolutionOptions::builder()
            .trials_per_evaluation(7)
            .max_rounds(50)
            .build();
        let challenge = WinRateChallenge::from_options(roster(), RequiresRoundCap(50), &options).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);

        assert_eq!(challenge.max_score(), 7);
        assert_eq!(challenge.genome_len(), 6);
        assert_eq!(challenge.score(&Individual::new(vec![1.0; 6]), &mut rng), 7);
    }

    #[test]
    fn test_max_rounds_forwarded() {
        let challenge = WinRateChallenge::new(roster(), RequiresRoundCap(50), 4)
            .unwrap()
            .with_max_rounds(50);
        let mut rng = RandomNumberGenerator::from_seed(5);

        assert_eq!(challenge.score(&Individual::new(vec![1.0; 6]), &mut rng), 4);
    }
}
