//! Genetic evolution of small binary pattern dictionaries.
//!
//! A [`PatternSet`](pattern::PatternSet) holds seven 3×3 binary patterns. Each
//! 24×24 training [`Image`](image::Image) is cut into non-overlapping 3×3
//! blocks, every block is matched against its closest pattern, and the summed
//! Hamming distance is the loss. [`SimpleGA`](algorithms::simple::SimpleGA)
//! searches for the pattern set with the lowest total loss over all training
//! images.
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//! use symbios_patterns::{
//!     Evolver, algorithms::simple::{ReplacementStrategy, SimpleGA},
//!     image::Image, loss::ImageSetEvaluator, pattern::PatternSet,
//! };
//!
//! let evaluator = ImageSetEvaluator::new(vec![Image::filled(false); 2]);
//! let mut ga = SimpleGA::initialize(
//!     20,
//!     0.05,
//!     ReplacementStrategy::Elitist,
//!     Pcg64::seed_from_u64(7),
//!     PatternSet::random,
//! )
//! .unwrap();
//!
//! ga.evaluate(&evaluator);
//! let stats = ga.step(&evaluator);
//! assert!(stats.best <= stats.average);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod image;
pub mod loss;
pub mod pattern;
pub mod prompt;
pub mod reconstruct;
pub mod report;

pub mod algorithms {
    pub mod simple;
}

/// Side length of every training image, in pixels.
pub const IMAGE_SIZE: usize = 24;
/// Side length of a block and of a pattern.
pub const BLOCK_SIZE: usize = 3;
/// Blocks per image row (and per image column).
pub const NUM_BLOCKS: usize = IMAGE_SIZE / BLOCK_SIZE;
/// Patterns in one candidate.
pub const NUM_PATTERNS: usize = 7;

const _: () = assert!(IMAGE_SIZE % BLOCK_SIZE == 0, "blocks must tile the image");
const _: () = assert!(NUM_PATTERNS > 0);

/// Block-match loss. Lower is better.
pub type Loss = u32;

/// The 'DNA' of an individual.
/// Defined by how it changes, not what it does.
pub trait Genotype: Clone + Serialize + for<'de> Deserialize<'de> {
    fn mutate<R: Rng>(&mut self, rng: &mut R, rate: f32);
    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self;
}

/// A genotype together with the loss it scored at its last evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "G: Genotype")]
pub struct Phenotype<G: Genotype> {
    pub genotype: G,
    pub fitness: Loss,
}

impl<G: Genotype> Phenotype<G> {
    /// Wraps a genotype that has not been scored yet.
    pub fn unevaluated(genotype: G) -> Self {
        Self {
            genotype,
            fitness: 0,
        }
    }
}

/// Scores a genotype. Lower loss is better.
pub trait Evaluator<G: Genotype> {
    fn evaluate(&self, genotype: &G) -> Loss;
}

/// Summary of one evolved generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    /// Lowest loss in the population.
    pub best: Loss,
    /// Mean loss, truncated toward zero.
    pub average: Loss,
}

/// The master engine trait.
pub trait Evolver<G: Genotype> {
    fn step<E: Evaluator<G>>(&mut self, evaluator: &E) -> GenerationStats;
    fn population(&self) -> &[Phenotype<G>];
}
