//! Rebuilding images from an evolved pattern set.

use crate::Loss;
use crate::image::Image;
use crate::loss::best_match;
use crate::pattern::PatternSet;

/// An image approximated block by block, with the loss it incurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconstruction {
    pub image: Image,
    pub loss: Loss,
}

/// Replaces every block of `image` with its closest pattern.
///
/// Ties go to the lowest pattern index, matching [`best_match`], so the
/// result's distance to `image` is exactly the block-match loss.
pub fn reconstruct(image: &Image, patterns: &PatternSet) -> Image {
    reconstruct_with_loss(image, patterns).image
}

/// Like [`reconstruct`], also summing the per-block distances.
pub fn reconstruct_with_loss(image: &Image, patterns: &PatternSet) -> Reconstruction {
    let mut result = Image::filled(false);
    let mut loss = 0;
    for ((block_row, block_col), block) in image.blocks() {
        let matched = best_match(&block, patterns);
        result.set_block(
            block_row,
            block_col,
            &patterns.patterns()[matched.pattern_index],
        );
        loss += matched.distance;
    }
    Reconstruction {
        image: result,
        loss,
    }
}
