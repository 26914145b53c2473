//! Block-match loss.
//!
//! An image is cut into `NUM_BLOCKS × NUM_BLOCKS` disjoint blocks. Each block
//! is charged the Hamming distance to its closest pattern; the image loss is
//! the sum of those charges. Scoring is always done from scratch: nothing is
//! cached between calls.

use crate::image::Image;
use crate::pattern::{Pattern, PatternSet};
use crate::{Evaluator, Loss};

/// The closest pattern to one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockMatch {
    pub pattern_index: usize,
    pub distance: u32,
}

/// Finds the pattern closest to `block`. On ties the lowest index wins.
pub fn best_match(block: &Pattern, patterns: &PatternSet) -> BlockMatch {
    let mut best = BlockMatch {
        pattern_index: 0,
        distance: block.hamming(&patterns.patterns()[0]),
    };
    for (pattern_index, pattern) in patterns.iter().enumerate().skip(1) {
        let distance = block.hamming(pattern);
        if distance < best.distance {
            best = BlockMatch {
                pattern_index,
                distance,
            };
        }
    }
    best
}

/// Loss of one image under one pattern set.
pub fn compute_loss(image: &Image, patterns: &PatternSet) -> Loss {
    image
        .blocks()
        .map(|(_, block)| best_match(&block, patterns).distance)
        .sum()
}

/// Scores pattern sets against a fixed collection of training images.
#[derive(Clone, Debug)]
pub struct ImageSetEvaluator {
    images: Vec<Image>,
}

impl ImageSetEvaluator {
    pub fn new(images: Vec<Image>) -> Self {
        Self { images }
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Loss of each training image, in image order.
    pub fn image_losses(&self, patterns: &PatternSet) -> Vec<Loss> {
        self.images
            .iter()
            .map(|image| compute_loss(image, patterns))
            .collect()
    }
}

impl Evaluator<PatternSet> for ImageSetEvaluator {
    fn evaluate(&self, genotype: &PatternSet) -> Loss {
        self.images
            .iter()
            .map(|image| compute_loss(image, genotype))
            .sum()
    }
}
