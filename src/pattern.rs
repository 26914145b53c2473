//! Binary 3×3 patterns and the pattern-set genotype.
//!
//! A [`Pattern`] is also the shape of an image block, so block matching is a
//! plain [`Pattern::hamming`] between two values of the same type.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{BLOCK_SIZE, Genotype, NUM_PATTERNS};

/// A `BLOCK_SIZE`×`BLOCK_SIZE` grid of bits, stored row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern([[bool; BLOCK_SIZE]; BLOCK_SIZE]);

impl Pattern {
    pub fn new(cells: [[bool; BLOCK_SIZE]; BLOCK_SIZE]) -> Self {
        Self(cells)
    }

    /// Builds a pattern from 0/1 rows. Any non-zero value counts as 1.
    pub fn from_bits(rows: [[u8; BLOCK_SIZE]; BLOCK_SIZE]) -> Self {
        Self(rows.map(|row| row.map(|bit| bit != 0)))
    }

    pub fn filled(value: bool) -> Self {
        Self([[value; BLOCK_SIZE]; BLOCK_SIZE])
    }

    /// Every cell an independent fair coin flip.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut cells = [[false; BLOCK_SIZE]; BLOCK_SIZE];
        for cell in cells.iter_mut().flatten() {
            *cell = rng.random::<bool>();
        }
        Self(cells)
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.0[row][col]
    }

    pub fn cells(&self) -> &[[bool; BLOCK_SIZE]; BLOCK_SIZE] {
        &self.0
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [[bool; BLOCK_SIZE]; BLOCK_SIZE] {
        &mut self.0
    }

    /// Number of cells in which the two grids differ.
    pub fn hamming(&self, other: &Pattern) -> u32 {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .filter(|(a, b)| a != b)
            .count() as u32
    }

    pub fn count_ones(&self) -> u32 {
        self.0.iter().flatten().filter(|&&cell| cell).count() as u32
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for &cell in row {
                write!(f, "{} ", u8::from(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The genotype evolved by the GA: a fixed, ordered dictionary of patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternSet([Pattern; NUM_PATTERNS]);

impl PatternSet {
    pub fn new(patterns: [Pattern; NUM_PATTERNS]) -> Self {
        Self(patterns)
    }

    /// A set with every cell of every pattern drawn uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(std::array::from_fn(|_| Pattern::random(rng)))
    }

    pub fn patterns(&self) -> &[Pattern; NUM_PATTERNS] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Genotype for PatternSet {
    /// Flips each cell independently with probability `rate`.
    fn mutate<R: Rng>(&mut self, rng: &mut R, rate: f32) {
        for pattern in &mut self.0 {
            for cell in pattern.cells_mut().iter_mut().flatten() {
                if rng.random::<f32>() < rate {
                    *cell = !*cell;
                }
            }
        }
    }

    /// Uniform crossover at pattern granularity: each slot is copied whole
    /// from one parent or the other.
    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        Self(std::array::from_fn(|slot| {
            if rng.random_bool(0.5) {
                self.0[slot]
            } else {
                other.0[slot]
            }
        }))
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, pattern) in self.0.iter().enumerate() {
            writeln!(f, "Pattern {}:", index + 1)?;
            write!(f, "{pattern}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
