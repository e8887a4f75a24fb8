//! # Simulation
//!
//! The contract between the optimizer and the external game engine.
//!
//! An engine receives a [`Table`] with four seated strategies and returns a
//! [`GameTrace`]. The trace is a two-level map of round label to turn label to
//! [`TurnRecord`]. Round labels end in a numeric suffix after the last `_`
//! (`round_12`), turn labels end in a numeric suffix after the last `_` with a
//! single-letter seat prefix (`turn_P3`). Only the victory-point tally of the
//! last turn of the last round is read.
//!
//! ## Example
//!
//! ```rust
//! use stratmix::simulation::GameTrace;
//!
//! let mut trace = GameTrace::new();
//! trace.record_turn("round_1", "turn_P0", [("J0", 3), ("J1", 2), ("J2", 2), ("J3", 1)]);
//! trace.record_turn("round_2", "turn_P1", [("J0", 4), ("J1", 10), ("J2", 2), ("J3", 1)]);
//!
//! assert_eq!(trace.winner_seat().unwrap(), 1);
//! ```

use std::collections::BTreeMap;

use crate::error::{ExtractionError, SimulationError};
use crate::roster::TABLE_SIZE;

/// Victory points keyed by seat label.
pub type Tally = BTreeMap<String, i64>;

/// One match to be played.
#[derive(Debug)]
pub struct Table<'a, S> {
    /// Seated strategies; seat 0 is the candidate.
    pub seats: [&'a S; TABLE_SIZE],
    /// Round cap for the match.
    pub max_rounds: u32,
    /// Whether the engine should keep a full trace of the game.
    pub store_trace: bool,
}

/// A multiplayer game engine able to play one full match.
///
/// Implementations must be shareable across evaluation workers. Any failure is
/// reported through `Err`; the evaluator skips the trial and continues.
pub trait GameEngine<S>: Send + Sync {
    fn play(&self, table: &Table<'_, S>) -> Result<GameTrace, SimulationError>;
}

impl<S, F> GameEngine<S> for F
where
    F: Fn(&Table<'_, S>) -> Result<GameTrace, SimulationError> + Send + Sync,
{
    fn play(&self, table: &Table<'_, S>) -> Result<GameTrace, SimulationError> {
        self(table)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnSnapshot {
    pub victory_points: Tally,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnRecord {
    /// State at the end of the turn, if the engine recorded it.
    pub end_turn: Option<TurnSnapshot>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameTrace {
    pub rounds: BTreeMap<String, BTreeMap<String, TurnRecord>>,
}

impl GameTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the end-of-turn tally of one turn.
    pub fn record_turn<L, I>(&mut self, round: &str, turn: &str, tally: I)
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, i64)>,
    {
        let victory_points = tally.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.rounds.entry(round.to_string()).or_default().insert(
            turn.to_string(),
            TurnRecord {
                end_turn: Some(TurnSnapshot { victory_points }),
            },
        );
    }

    /// Returns the tally of the highest-numbered turn of the highest-numbered
    /// round.
    pub fn final_tally(&self) -> Result<&Tally, ExtractionError> {
        let (round_label, turns) = last_by_suffix(self.rounds.iter(), None)?
            .ok_or(ExtractionError::NoRounds)?;
        let (turn_label, record) = last_by_suffix(turns.iter(), Some('P'))?
            .ok_or_else(|| ExtractionError::NoTurns(round_label.clone()))?;

        record
            .end_turn
            .as_ref()
            .map(|snapshot| &snapshot.victory_points)
            .ok_or_else(|| ExtractionError::MissingSnapshot {
                round: round_label.clone(),
                turn: turn_label.clone(),
            })
    }

    /// Returns the seat with the most victory points at the end of the game.
    ///
    /// Seats are scanned in ascending label order and the first seat holding
    /// the maximum wins ties.
    pub fn winner_seat(&self) -> Result<usize, ExtractionError> {
        let tally = self.final_tally()?;

        let mut best: Option<(&String, i64)> = None;
        for (label, &points) in tally {
            if best.map_or(true, |(_, top)| points > top) {
                best = Some((label, points));
            }
        }

        let (label, _) = best.ok_or(ExtractionError::EmptyTally)?;
        seat_index(label)
    }
}

/// Label used by engines for a seat, e.g. `J2`.
pub fn seat_label(seat: usize) -> String {
    format!("J{}", seat)
}

/// Parses the seat number a seat label ends with.
pub fn seat_index(label: &str) -> Result<usize, ExtractionError> {
    let stem = label.trim_end_matches(|c: char| c.is_ascii_digit());
    label[stem.len()..]
        .parse::<usize>()
        .ok()
        .filter(|&seat| seat < TABLE_SIZE)
        .ok_or_else(|| ExtractionError::UnknownSeat(label.to_string()))
}

/// Numeric order key of a round or turn label: the text after the last `_`,
/// with an optional single-letter prefix stripped.
fn label_order(label: &str, prefix: Option<char>) -> Result<u64, ExtractionError> {
    let suffix = label.rsplit('_').next().unwrap_or(label);
    let suffix = match prefix {
        Some(p) => suffix.trim_start_matches(p),
        None => suffix,
    };
    suffix
        .parse::<u64>()
        .map_err(|_| ExtractionError::UnorderedLabel(label.to_string()))
}

fn last_by_suffix<'a, V, I>(
    entries: I,
    prefix: Option<char>,
) -> Result<Option<(&'a String, &'a V)>, ExtractionError>
where
    I: Iterator<Item = (&'a String, &'a V)>,
{
    let mut last: Option<(u64, (&'a String, &'a V))> = None;
    for (label, value) in entries {
        let order = label_order(label, prefix)?;
        if last.map_or(true, |(top, _)| order > top) {
            last = Some((order, (label, value)));
        }
    }
    Ok(last.map(|(_, entry)| entry))
}
