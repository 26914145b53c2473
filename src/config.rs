//! Run configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::algorithms::simple::{DEFAULT_TOURNAMENT_SIZE, ReplacementStrategy};
use crate::error::ConfigError;
use crate::{BLOCK_SIZE, IMAGE_SIZE};

/// Everything needed to set up and drive one evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Generations evolved after the initial evaluation.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Per-cell flip probability.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Training images to load.
    #[serde(default = "default_num_images")]
    pub num_images: usize,
    #[serde(default)]
    pub strategy: ReplacementStrategy,
    /// Fixed RNG seed. Taken from the wall clock when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_image_size")]
    pub image_size: usize,
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    /// Per-generation CSV report.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    /// Detailed text log of the run.
    #[serde(default = "default_details_path")]
    pub details_path: PathBuf,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
            num_images: default_num_images(),
            strategy: ReplacementStrategy::default(),
            seed: None,
            image_size: default_image_size(),
            block_size: default_block_size(),
            csv_path: default_csv_path(),
            details_path: default_details_path(),
        }
    }
}

fn default_population_size() -> usize {
    500
}
fn default_generations() -> usize {
    500
}
fn default_mutation_rate() -> f32 {
    0.05
}
fn default_tournament_size() -> usize {
    DEFAULT_TOURNAMENT_SIZE
}
fn default_num_images() -> usize {
    5
}
fn default_image_size() -> usize {
    IMAGE_SIZE
}
fn default_block_size() -> usize {
    BLOCK_SIZE
}
fn default_csv_path() -> PathBuf {
    PathBuf::from("results.csv")
}
fn default_details_path() -> PathBuf {
    PathBuf::from("detailed_results.txt")
}

impl EvolutionConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_geometry(self.image_size, self.block_size)?;
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        check_mutation_rate(self.mutation_rate)?;
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if self.num_images == 0 {
            return Err(ConfigError::NoImages);
        }
        Ok(())
    }

    /// The configured seed, or one derived from the current time.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

/// Checks that `block_size` tiles `image_size` and that the geometry is the
/// compiled one. Returns the number of blocks per side.
pub fn check_geometry(image_size: usize, block_size: usize) -> Result<usize, ConfigError> {
    if block_size == 0 || image_size % block_size != 0 {
        return Err(ConfigError::IndivisibleGeometry {
            image_size,
            block_size,
        });
    }
    if image_size != IMAGE_SIZE || block_size != BLOCK_SIZE {
        return Err(ConfigError::UnsupportedGeometry {
            image_size,
            block_size,
            supported_image: IMAGE_SIZE,
            supported_block: BLOCK_SIZE,
        });
    }
    Ok(image_size / block_size)
}

pub(crate) fn check_mutation_rate(rate: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMutationRate(rate))
    }
}
