use std::sync::atomic::{AtomicU64, Ordering};

use stratmix::{
    error::SimulationError,
    evaluation::{Challenge, EvaluationScheduler},
    individual::{normalize, Individual},
    rng::RandomNumberGenerator,
    roster::{weighted_choice, Roster},
    simulation::{seat_label, GameEngine, GameTrace, Table},
    WinRateChallenge,
};

/// Picks a pseudo-random winner and fails every fifth match.
struct Noisy {
    calls: AtomicU64,
}

impl GameEngine<u32> for Noisy {
    fn play(&self, table: &Table<'_, u32>) -> Result<GameTrace, SimulationError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        if call % 5 == 4 {
            return Err(SimulationError::new("board exhausted"));
        }
        let winner = (call as usize + *table.seats[1] as usize) % 4;
        let mut trace = GameTrace::new();
        trace.record_turn(
            "round_3",
            "turn_P2",
            (0..4).map(|s| (seat_label(s), if s == winner { 10 } else { 5 })),
        );
        Ok(trace)
    }
}

/// The candidate wins exactly when it plays strategy 3.
struct CandidateThreeWins;

impl GameEngine<u32> for CandidateThreeWins {
    fn play(&self, table: &Table<'_, u32>) -> Result<GameTrace, SimulationError> {
        let winner = if *table.seats[0] == 3 { 0 } else { 2 };
        let mut trace = GameTrace::new();
        trace.record_turn(
            "round_1",
            "turn_P0",
            (0..4).map(|s| (seat_label(s), if s == winner { 1 } else { 0 })),
        );
        Ok(trace)
    }
}

#[test]
fn test_normalize_properties() {
    let mut rng = RandomNumberGenerator::from_seed(42);
    for _ in 0..50 {
        let v: Vec<f64> = rng.fetch_uniform(0.01, 5.0, 8).into_iter().collect();
        let n = normalize(&v);
        assert!((n.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((n[3] / n[5] - v[3] / v[5]).abs() < 1e-9);
    }
    assert_eq!(normalize(&[0.0; 4]), vec![0.25; 4]);
}

#[test]
fn test_to_probabilities_matches_clamped_normalize() {
    let individual = Individual::new(vec![-1.0, 1.0, 2.0]);
    assert_eq!(individual.to_probabilities(), normalize(&[0.0, 1.0, 2.0]));
}

#[test]
fn test_weighted_sampling_converges() {
    let mut rng = RandomNumberGenerator::from_seed(9);
    let draws = 50_000;
    let firsts = (0..draws)
        .filter(|_| weighted_choice(&[0.9, 0.1], &mut rng).unwrap() == 0)
        .count();
    let ratio = firsts as f64 / draws as f64;
    assert!((ratio - 0.9).abs() < 0.01, "ratio was {}", ratio);
}

#[test]
fn test_fitness_stays_in_range() {
    let roster = Roster::new((0..7).collect::<Vec<u32>>()).unwrap();
    let engine = Noisy {
        calls: AtomicU64::new(0),
    };
    let challenge = WinRateChallenge::new(roster, engine, 10).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(42);

    for _ in 0..50 {
        let mut individual = Individual::random(7, &mut rng);
        individual.genes_mut()[2] = -3.0;
        let report = challenge.evaluate(&individual, &mut rng);
        assert!(report.wins <= challenge.max_score());
        assert_eq!(report.skipped, 2);
    }
}

#[test]
fn test_parallel_evaluation_matches_sequential() {
    let roster = Roster::new((0..7).collect::<Vec<u32>>()).unwrap();
    let challenge = WinRateChallenge::new(roster, CandidateThreeWins, 25).unwrap();

    let mut rng = RandomNumberGenerator::from_seed(1);
    let population: Vec<Individual> = (0..12).map(|_| Individual::random(7, &mut rng)).collect();
    let refs: Vec<&Individual> = population.iter().collect();

    let score = |i: usize, individual: &Individual| {
        challenge.score(individual, &mut RandomNumberGenerator::derived(42, 0, i))
    };

    let scheduler = EvaluationScheduler::new(6).unwrap();
    let parallel = scheduler.evaluate_all(&refs, score);
    let sequential: Vec<u32> = population
        .iter()
        .enumerate()
        .map(|(i, individual)| score(i, individual))
        .collect();

    assert_eq!(parallel, sequential);
}
