//! Error types for symbios-patterns.

use std::path::PathBuf;

use thiserror::Error;

/// A training image could not be loaded.
///
/// Loading is all-or-nothing: on any of these errors no image is produced.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// The file could not be opened or read
    #[error("failed to read image file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token where a pixel was expected is not an integer
    #[error("error reading pixel at ({row}, {col}): {token:?} is not an integer")]
    InvalidToken {
        row: usize,
        col: usize,
        token: String,
    },

    /// A pixel is an integer other than 0 or 1
    #[error("pixel at ({row}, {col}) must be 0 or 1, found {value}")]
    InvalidPixel { row: usize, col: usize, value: i64 },

    /// The input ran out before every pixel was read
    #[error("image ended after {found} pixels, expected {expected}")]
    MissingPixels { expected: usize, found: usize },
}

/// Invalid run configuration, rejected before evolution starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Blocks would not tile the image exactly
    #[error("image size {image_size} is not divisible by block size {block_size}")]
    IndivisibleGeometry {
        image_size: usize,
        block_size: usize,
    },

    /// Geometry differs from the one this build was compiled for
    #[error(
        "unsupported geometry {image_size}x{image_size} with {block_size}x{block_size} blocks \
         (supported: {supported_image}x{supported_image} with {supported_block}x{supported_block} blocks)"
    )]
    UnsupportedGeometry {
        image_size: usize,
        block_size: usize,
        supported_image: usize,
        supported_block: usize,
    },

    #[error("population must contain at least one candidate")]
    EmptyPopulation,

    #[error("mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f32),

    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,

    #[error("at least one training image is required")]
    NoImages,

    /// Config file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Interactive input could not supply an image.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input closed before a readable image file was named
    #[error("input ended while waiting for image file {index}")]
    EndOfInput { index: usize },
}
