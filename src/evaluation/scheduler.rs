//! # EvaluationScheduler
//!
//! Runs fitness evaluations on a fixed-size worker pool.
//!
//! The pool is a dedicated Rayon thread pool built once per run. Results come
//! back in input order whatever order the workers finish in, and the call
//! blocks until every evaluation is done.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{GeneticError, Result};
use crate::individual::Individual;

/// Number of workers in the reference configuration.
pub const DEFAULT_NUM_WORKERS: usize = 6;

#[derive(Debug)]
pub struct EvaluationScheduler {
    pool: ThreadPool,
}

impl EvaluationScheduler {
    /// Starts a pool of `num_workers` threads.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for zero workers and
    /// `GeneticError::WorkerPool` if the threads cannot be spawned.
    pub fn new(num_workers: usize) -> Result<Self> {
        if num_workers == 0 {
            return Err(GeneticError::Configuration(
                "Number of workers cannot be zero".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("stratmix-eval-{}", i))
            .build()
            .map_err(|e| GeneticError::WorkerPool(e.to_string()))?;

        Ok(Self { pool })
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Evaluates every individual and returns the scores in input order.
    ///
    /// `evaluate` receives the position of the individual in `individuals`
    /// along with the individual itself.
    pub fn evaluate_all<F>(&self, individuals: &[&Individual], evaluate: F) -> Vec<u32>
    where
        F: Fn(usize, &Individual) -> u32 + Sync,
    {
        self.pool.install(|| {
            individuals
                .par_iter()
                .enumerate()
                .map(|(i, individual)| evaluate(i, *individual))
                .collect()
        })
    }

    /// Evaluates the individuals of `population` whose fitness is unset and
    /// stores the scores on them. Returns the number of evaluations.
    ///
    /// `evaluate` receives the position of the individual in `population`.
    pub fn evaluate_invalid<F>(&self, population: &mut [Individual], evaluate: F) -> usize
    where
        F: Fn(usize, &Individual) -> u32 + Sync,
    {
        let positions: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, individual)| !individual.is_evaluated())
            .map(|(i, _)| i)
            .collect();

        let pending: Vec<&Individual> = positions.iter().map(|&i| &population[i]).collect();
        let scores = self.evaluate_all(&pending, |k, individual| evaluate(positions[k], individual));

        for (&i, score) in positions.iter().zip(scores) {
            population[i].set_fitness(score);
        }

        positions.len()
    }
}
