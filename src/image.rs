//! Binary training images and their text format.
//!
//! The on-disk format is `IMAGE_SIZE * IMAGE_SIZE` integers separated by any
//! whitespace, each 0 or 1, read row by row. Tokens after the last pixel are
//! ignored.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ImageLoadError;
use crate::pattern::Pattern;
use crate::{BLOCK_SIZE, IMAGE_SIZE, NUM_BLOCKS};

/// Total pixel count of an image.
pub const PIXEL_COUNT: usize = IMAGE_SIZE * IMAGE_SIZE;

/// An `IMAGE_SIZE`×`IMAGE_SIZE` grid of bits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Image {
    pixels: [[bool; IMAGE_SIZE]; IMAGE_SIZE],
}

impl Image {
    pub fn new(pixels: [[bool; IMAGE_SIZE]; IMAGE_SIZE]) -> Self {
        Self { pixels }
    }

    pub fn filled(value: bool) -> Self {
        Self {
            pixels: [[value; IMAGE_SIZE]; IMAGE_SIZE],
        }
    }

    /// Reads and parses an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageLoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ImageLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.pixels[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.pixels[row][col] = value;
    }

    pub fn pixels(&self) -> &[[bool; IMAGE_SIZE]; IMAGE_SIZE] {
        &self.pixels
    }

    /// Copies out the block at (`block_row`, `block_col`), both in
    /// `0..NUM_BLOCKS`.
    pub fn block(&self, block_row: usize, block_col: usize) -> Pattern {
        let top = block_row * BLOCK_SIZE;
        let left = block_col * BLOCK_SIZE;
        Pattern::new(std::array::from_fn(|i| {
            std::array::from_fn(|j| self.pixels[top + i][left + j])
        }))
    }

    /// Overwrites the block at (`block_row`, `block_col`) with `pattern`.
    pub fn set_block(&mut self, block_row: usize, block_col: usize, pattern: &Pattern) {
        let top = block_row * BLOCK_SIZE;
        let left = block_col * BLOCK_SIZE;
        for (i, row) in pattern.cells().iter().enumerate() {
            self.pixels[top + i][left..left + BLOCK_SIZE].copy_from_slice(row);
        }
    }

    /// All blocks with their coordinates, block rows first, then block
    /// columns.
    pub fn blocks(&self) -> impl Iterator<Item = ((usize, usize), Pattern)> + '_ {
        (0..NUM_BLOCKS).flat_map(move |block_row| {
            (0..NUM_BLOCKS).map(move |block_col| {
                ((block_row, block_col), self.block(block_row, block_col))
            })
        })
    }
}

impl FromStr for Image {
    type Err = ImageLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pixels = [[false; IMAGE_SIZE]; IMAGE_SIZE];
        let mut tokens = s.split_whitespace();

        for (index, pixel) in pixels.iter_mut().flatten().enumerate() {
            let (row, col) = (index / IMAGE_SIZE, index % IMAGE_SIZE);
            let token = tokens.next().ok_or(ImageLoadError::MissingPixels {
                expected: PIXEL_COUNT,
                found: index,
            })?;
            let value: i64 = token.parse().map_err(|_| ImageLoadError::InvalidToken {
                row,
                col,
                token: token.to_string(),
            })?;
            *pixel = match value {
                0 => false,
                1 => true,
                other => {
                    return Err(ImageLoadError::InvalidPixel {
                        row,
                        col,
                        value: other,
                    });
                }
            };
        }

        Ok(Self { pixels })
    }
}

/// Renders each pixel right-aligned in two columns, one image row per line.
impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.pixels {
            for &pixel in row {
                write!(f, "{:2}", u8::from(pixel))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
