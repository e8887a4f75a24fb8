use std::time::{Duration, Instant};

use tracing::{debug, info, info_span};

use super::{logbook::Logbook, options::EvolutionOptions};
use crate::{
    breeding::{vary_and, Crossover, Mutation},
    error::{GeneticError, OptionExt, Result},
    evaluation::{Challenge, EvaluationScheduler},
    hall_of_fame::HallOfFame,
    individual::Individual,
    rng::RandomNumberGenerator,
    selection::SelectionStrategy,
};

/// Why a run stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All configured generations were run.
    GenerationBudget { generations: usize },
    /// The hall of fame reached the highest attainable fitness.
    MaxFitnessReached { generation: usize },
}

/// Final outputs of a run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best individual ever observed, with its raw genes.
    pub best: Individual,
    /// Distribution over the roster derived from `best`.
    pub probabilities: Vec<f64>,
    /// Fitness of `best`.
    pub fitness: u32,
    /// Wall time of the whole run.
    pub elapsed: Duration,
    pub logbook: Logbook,
    /// Population after the last generation.
    pub population: Vec<Individual>,
    pub termination: Termination,
}

/// Drives the generational loop: variation, parallel evaluation, selection
/// and hall-of-fame bookkeeping, until the generation budget is spent or a
/// perfect score is observed.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Chall, Cross, Mut, Select>
where
    Chall: Challenge,
    Cross: Crossover,
    Mut: Mutation,
    Select: SelectionStrategy,
{
    challenge: Chall,
    crossover: Cross,
    mutation: Mut,
    selection: Select,
}

impl<Chall, Cross, Mut, Select> EvolutionLauncher<Chall, Cross, Mut, Select>
where
    Chall: Challenge,
    Cross: Crossover,
    Mut: Mutation,
    Select: SelectionStrategy,
{
    pub fn new(challenge: Chall, crossover: Cross, mutation: Mut, selection: Select) -> Self {
        Self {
            challenge,
            crossover,
            mutation,
            selection,
        }
    }

    pub fn challenge(&self) -> &Chall {
        &self.challenge
    }

    /// Runs an optimization from a random initial population.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options are invalid
    /// - The challenge expects an empty genome
    /// - The worker pool cannot be started
    pub fn evolve(&self, options: &EvolutionOptions) -> Result<EvolutionResult> {
        options.validate()?;
        let genome_len = self.genome_len()?;

        let mut rng = RandomNumberGenerator::from_seed(options.get_seed());
        let population = (0..options.get_population_size())
            .map(|_| Individual::random(genome_len, &mut rng))
            .collect();

        self.run(options, population, rng)
    }

    /// Runs an optimization from a caller-supplied initial population.
    ///
    /// Every individual is reset to its normalized distribution with no
    /// fitness before the run starts.
    ///
    /// # Errors
    ///
    /// Fails like [`evolve`](Self::evolve), and also if the population size
    /// differs from the options or an individual has the wrong genome length.
    pub fn evolve_from(
        &self,
        options: &EvolutionOptions,
        population: Vec<Individual>,
    ) -> Result<EvolutionResult> {
        options.validate()?;
        let genome_len = self.genome_len()?;

        if population.len() != options.get_population_size() {
            return Err(GeneticError::Configuration(format!(
                "Initial population has {} individuals, expected {}",
                population.len(),
                options.get_population_size()
            )));
        }
        if let Some(bad) = population.iter().find(|i| i.len() != genome_len) {
            return Err(GeneticError::Configuration(format!(
                "Individual has {} genes, expected {}",
                bad.len(),
                genome_len
            )));
        }

        let population = population
            .iter()
            .map(|individual| Individual::new(individual.to_probabilities()))
            .collect();
        let rng = RandomNumberGenerator::from_seed(options.get_seed());

        self.run(options, population, rng)
    }

    fn genome_len(&self) -> Result<usize> {
        match self.challenge.genome_len() {
            0 => Err(GeneticError::Configuration(
                "Challenge expects an empty genome".to_string(),
            )),
            len => Ok(len),
        }
    }

    fn run(
        &self,
        options: &EvolutionOptions,
        mut population: Vec<Individual>,
        mut rng: RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        let start = Instant::now();
        let scheduler = EvaluationScheduler::new(options.get_num_workers())?;
        let max_fitness = self.challenge.max_score();
        let mut logbook = Logbook::new();
        let mut hall_of_fame = HallOfFame::new();

        debug!(
            population = population.len(),
            workers = scheduler.num_workers(),
            max_fitness,
            "initializing"
        );
        let evaluations = self.evaluate(&scheduler, &mut population, 0, options.get_seed());
        logbook.record(0, evaluations, &population)?;
        hall_of_fame.update(&population);

        let mut termination = Termination::GenerationBudget {
            generations: options.get_num_generations(),
        };

        if hall_of_fame.best_fitness() == Some(max_fitness) {
            termination = Termination::MaxFitnessReached { generation: 0 };
        } else {
            for generation in 1..=options.get_num_generations() {
                let _span = info_span!("generation", generation).entered();

                let mut offspring = vary_and(
                    &population,
                    &self.crossover,
                    &self.mutation,
                    options.get_crossover_probability(),
                    options.get_mutation_probability(),
                    &mut rng,
                );

                let evaluations =
                    self.evaluate(&scheduler, &mut offspring, generation, options.get_seed());

                debug!("selecting");
                population = self.selection.select(&offspring, offspring.len(), &mut rng)?;
                hall_of_fame.update(&population);
                logbook.record(generation, evaluations, &population)?;

                if hall_of_fame.best_fitness() == Some(max_fitness) {
                    termination = Termination::MaxFitnessReached { generation };
                    break;
                }
            }
        }

        let best = hall_of_fame.best().cloned().ok_or_else_genetic(|| {
            GeneticError::Evolution("Evolution completed without an evaluated individual".to_string())
        })?;
        let fitness = best.fitness().ok_or_else_genetic(|| {
            GeneticError::Evolution("Hall of fame holds an unevaluated individual".to_string())
        })?;
        let elapsed = start.elapsed();

        info!(
            fitness,
            ?termination,
            elapsed_ms = elapsed.as_millis() as u64,
            "evolution finished"
        );

        Ok(EvolutionResult {
            probabilities: best.to_probabilities(),
            best,
            fitness,
            elapsed,
            logbook,
            population,
            termination,
        })
    }

    /// Scores every unevaluated individual; returns how many were scored.
    fn evaluate(
        &self,
        scheduler: &EvaluationScheduler,
        population: &mut [Individual],
        generation: usize,
        seed: u64,
    ) -> usize {
        debug!(generation, "evaluating");
        scheduler.evaluate_invalid(population, |position, individual| {
            let mut rng = RandomNumberGenerator::derived(seed, generation, position);
            self.challenge.score(individual, &mut rng)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeding::{BlendCrossover, GaussianMutation};
    use crate::selection::TournamentSelection;

    /// Fitness is the share of the first gene scaled to `scale`.
    #[derive(Debug, Clone)]
    struct FirstGeneShare {
        len: usize,
        scale: u32,
        max: u32,
    }

    impl Challenge for FirstGeneShare {
        fn genome_len(&self) -> usize {
            self.len
        }

        fn max_score(&self) -> u32 {
            self.max
        }

        fn score(&self, individual: &Individual, _rng: &mut RandomNumberGenerator) -> u32 {
            (individual.to_probabilities()[0] * self.scale as f64).round() as u32
        }
    }

    type TestLauncher =
        EvolutionLauncher<FirstGeneShare, BlendCrossover, GaussianMutation, TournamentSelection>;

    fn launcher(scale: u32, max: u32) -> TestLauncher {
        EvolutionLauncher::new(
            FirstGeneShare { len: 4, scale, max },
            BlendCrossover::default(),
            GaussianMutation::default(),
            TournamentSelection::default(),
        )
    }

    /// A launcher whose maximum fitness can never be scored.
    fn unreachable_launcher() -> TestLauncher {
        launcher(1000, 1001)
    }

    fn options(population: usize, generations: usize) -> EvolutionOptions {
        EvolutionOptions::builder()
            .population_size(population)
            .num_generations(generations)
            .num_workers(2)
            .build()
    }

    #[test]
    fn test_population_size_is_invariant() {
        let result = unreachable_launcher().evolve(&options(7, 6)).unwrap();

        assert_eq!(result.population.len(), 7);
        assert_eq!(result.logbook.len(), 7);
        assert!(result.population.iter().all(Individual::is_evaluated));
    }

    #[test]
    fn test_hall_of_fame_dominates_every_generation() {
        let result = unreachable_launcher().evolve(&options(10, 8)).unwrap();

        let best_seen = result.logbook.iter().map(|r| r.max).max().unwrap();
        assert!(result.fitness >= best_seen);
        assert_eq!(result.best.fitness(), Some(result.fitness));
        assert!((result.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_generation_zero_counts_every_individual() {
        let result = unreachable_launcher().evolve(&options(9, 1)).unwrap();
        let first = &result.logbook.records()[0];
        assert_eq!(first.generation, 0);
        assert_eq!(first.evaluations, 9);
    }

    #[test]
    fn test_same_seed_same_run() {
        let a = unreachable_launcher().evolve(&options(8, 4)).unwrap();
        let b = unreachable_launcher().evolve(&options(8, 4)).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.logbook, b.logbook);
    }

    #[test]
    fn test_stops_at_generation_zero_on_perfect_start() {
        let mut perfect = Individual::new(vec![1.0, 0.0, 0.0, 0.0]);
        perfect.set_fitness(0);
        let population = vec![
            perfect,
            Individual::new(vec![0.25; 4]),
            Individual::new(vec![0.0, 1.0, 1.0, 1.0]),
        ];

        let result = launcher(10, 10)
            .evolve_from(&options(3, 5), population)
            .unwrap();

        assert_eq!(
            result.termination,
            Termination::MaxFitnessReached { generation: 0 }
        );
        assert_eq!(result.fitness, 10);
        assert_eq!(result.logbook.len(), 1);
        // the supplied fitness is discarded and recomputed
        assert_eq!(result.logbook.records()[0].evaluations, 3);
    }

    /// Scores the maximum only for individuals that moved away from the
    /// uniform distribution.
    #[derive(Debug, Clone)]
    struct LeavesUniform;

    impl Challenge for LeavesUniform {
        fn genome_len(&self) -> usize {
            4
        }

        fn max_score(&self) -> u32 {
            5
        }

        fn score(&self, individual: &Individual, _rng: &mut RandomNumberGenerator) -> u32 {
            let moved = individual
                .to_probabilities()
                .iter()
                .any(|p| (p - 0.25).abs() > 1e-9);
            if moved {
                5
            } else {
                0
            }
        }
    }

    #[test]
    fn test_stops_inside_generation_loop() {
        // every gene of every offspring is perturbed in generation 1
        let launcher = EvolutionLauncher::new(
            LeavesUniform,
            BlendCrossover::default(),
            GaussianMutation::new(0.0, 0.1, 1.0).unwrap(),
            TournamentSelection::default(),
        );
        let options = EvolutionOptions::builder()
            .population_size(6)
            .num_generations(5)
            .crossover_probability(0.0)
            .mutation_probability(1.0)
            .num_workers(2)
            .build();

        let result = launcher
            .evolve_from(&options, vec![Individual::new(vec![1.0; 4]); 6])
            .unwrap();

        assert_eq!(
            result.termination,
            Termination::MaxFitnessReached { generation: 1 }
        );
        assert_eq!(result.logbook.len(), 2);
        assert_eq!(result.logbook.records()[0].max, 0);
        assert_eq!(result.logbook.records()[1].evaluations, 6);
        assert_eq!(result.fitness, 5);
        assert!(result.population.iter().all(|i| i.fitness() == Some(5)));
    }

    #[test]
    fn test_unreachable_maximum_runs_full_budget() {
        let result = unreachable_launcher().evolve(&options(4, 3)).unwrap();
        assert_eq!(
            result.termination,
            Termination::GenerationBudget { generations: 3 }
        );
        assert_eq!(result.logbook.len(), 4);
    }

    #[test]
    fn test_evolve_from_validates_shape() {
        let launcher = launcher(10, 10);
        let short = vec![Individual::new(vec![1.0; 4]); 2];
        assert!(matches!(
            launcher.evolve_from(&options(3, 1), short),
            Err(GeneticError::Configuration(_))
        ));

        let wrong_genes = vec![Individual::new(vec![1.0; 3]); 3];
        assert!(matches!(
            launcher.evolve_from(&options(3, 1), wrong_genes),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_options() {
        let result = launcher(10, 10).evolve(&options(0, 1));
        match result {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }
}
