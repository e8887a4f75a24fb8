//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the explicit random source threaded
//! through every stochastic step of a run. Nothing in the crate draws from a
//! global generator, so a run is fully determined by its seed.
//!
//! ## Example
//!
//! ```rust
//! use stratmix::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let random_numbers = rng.fetch_uniform(0.0, 1.0, 5);
//!
//! for number in random_numbers {
//!     assert!((0.0..1.0).contains(&number));
//! }
//! ```
//!
//! ## Derived streams
//!
//! Parallel fitness evaluations must not share a generator. Each evaluation
//! instead gets its own stream derived from the run seed, the generation index
//! and the position of the individual in its population:
//!
//! ```rust
//! use stratmix::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::derived(42, 3, 7);
//! let mut b = RandomNumberGenerator::derived(42, 3, 7);
//! assert_eq!(a.fetch_uniform(0.0, 1.0, 4), b.fetch_uniform(0.0, 1.0, 4));
//! ```

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::collections::VecDeque;

/// A wrapper around the `rand` crate's `StdRng`.
///
/// Implements [`RngCore`], so it can be handed to any `rand` or `rand_distr`
/// API directly.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the generator for one fitness evaluation.
    ///
    /// The stream depends only on `(seed, generation, index)`, never on which
    /// worker runs the evaluation or in which order evaluations complete.
    pub fn derived(seed: u64, generation: usize, index: usize) -> Self {
        let mut state = splitmix64(seed);
        state = splitmix64(state ^ generation as u64);
        state = splitmix64(state ^ index as u64);
        Self::from_seed(state)
    }

    /// Generates `num` uniform floating-point numbers in `[from, to)`.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> VecDeque<f64> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.rng.gen_range(from..to)));
        uniform_numbers
    }

    /// Returns a uniform value in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns `true` with probability `p`; values outside `[0, 1]` are clamped.
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p.clamp(0.0, 1.0)
    }

    /// Returns a uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for RandomNumberGenerator {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
