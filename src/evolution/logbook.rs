//! # Logbook
//!
//! Per-generation statistics of a run. Each [`GenerationRecord`] holds the
//! generation index, how many evaluations that generation needed, and the
//! mean, minimum and maximum fitness of the population after selection.
//!
//! The logbook can be exported as CSV:
//!
//! ```rust
//! use stratmix::evolution::logbook::Logbook;
//! use stratmix::individual::Individual;
//!
//! let population: Vec<Individual> = [2, 4, 6]
//!     .iter()
//!     .map(|&f| {
//!         let mut individual = Individual::new(vec![1.0]);
//!         individual.set_fitness(f);
//!         individual
//!     })
//!     .collect();
//!
//! let mut logbook = Logbook::new();
//! logbook.record(0, 3, &population).unwrap();
//!
//! let mut out = Vec::new();
//! logbook.write_csv(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "gen,nevals,avg,min,max\n0,3,4,2,6\n");
//! ```

use std::io::Write;

use tracing::info;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::selection::selection_strategy::evaluated_fitness;

/// Column names of the CSV export.
pub const HEADER: [&str; 5] = ["gen", "nevals", "avg", "min", "max"];

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub generation: usize,
    pub evaluations: usize,
    pub mean: f64,
    pub min: u32,
    pub max: u32,
}

impl GenerationRecord {
    /// Summarizes an evaluated population.
    ///
    /// # Errors
    ///
    /// Fails if the population is empty or holds an unevaluated individual.
    pub fn compile(generation: usize, evaluations: usize, population: &[Individual]) -> Result<Self> {
        let fitness = evaluated_fitness(population)?;
        let min = fitness.iter().copied().min().ok_or(GeneticError::EmptyPopulation)?;
        let max = fitness.iter().copied().max().ok_or(GeneticError::EmptyPopulation)?;
        let mean = fitness.iter().map(|&f| f64::from(f)).sum::<f64>() / fitness.len() as f64;

        Ok(Self {
            generation,
            evaluations,
            mean,
            min,
            max,
        })
    }
}

/// Append-only sequence of generation records.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Logbook {
    records: Vec<GenerationRecord>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and appends the record of one generation.
    pub fn record(
        &mut self,
        generation: usize,
        evaluations: usize,
        population: &[Individual],
    ) -> Result<&GenerationRecord> {
        let record = GenerationRecord::compile(generation, evaluations, population)?;
        info!(
            generation = record.generation,
            nevals = record.evaluations,
            avg = record.mean,
            min = record.min,
            max = record.max,
            "generation recorded"
        );
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenerationRecord> {
        self.records.iter()
    }

    /// Writes a header row followed by one row per generation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Csv` or `GeneticError::Io` if `writer` fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADER)?;
        for record in &self.records {
            wtr.write_record(&[
                record.generation.to_string(),
                record.evaluations.to_string(),
                record.mean.to_string(),
                record.min.to_string(),
                record.max.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
