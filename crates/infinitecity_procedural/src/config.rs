//! # City Configuration
//!
//! All world parameters, loaded once at startup from TOML.
//!
//! ```toml
//! seed = 0
//! chunk_size = [16, 16, 16]
//! world_chunks = [5, 5, 1]
//! min_lot_size = 8
//! lot_types = ["park", "city_block", "skyscraper"]
//! workers = 4
//!
//! [[buildings]]
//! wall_style = "windowed"
//! corner_pillar = true
//! max_floors = 8
//! ```
//!
//! Every field is optional; missing fields take the [`Default`] values.
//! [`CityConfig::validate`] rejects anything that could fail mid-generation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{BuildingCatalog, BuildingType, LotType};
use crate::error::{ConfigError, ConfigResult};
use crate::generator::{MIN_BUILDING_HEIGHT, MIN_CHUNK_FOOTPRINT};
use crate::random::WorldSeed;

/// World generation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CityConfig {
    /// World seed.
    pub seed: u64,
    /// Chunk size in voxels along X, Y and Z (Z is up).
    pub chunk_size: [usize; 3],
    /// Number of chunks along X, Y and Z.
    pub world_chunks: [usize; 3],
    /// Minimum lot side length inside a city block.
    pub min_lot_size: i32,
    /// Lot types drawn from, uniformly, for each chunk.
    pub lot_types: Vec<LotType>,
    /// Worker threads for generation; 0 or 1 generates on the caller's thread.
    pub workers: usize,
    /// Building catalog override. `None` uses the built-in catalog.
    pub buildings: Option<Vec<BuildingType>>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            chunk_size: [16, 16, 16],
            world_chunks: [5, 5, 1],
            min_lot_size: 8,
            lot_types: LotType::ALL.to_vec(),
            workers: 0,
            buildings: None,
        }
    }
}

impl CityConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, or any
    /// validation error from [`Self::validate`].
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// The world seed.
    #[inline]
    #[must_use]
    pub const fn world_seed(&self) -> WorldSeed {
        WorldSeed::new(self.seed)
    }

    /// The building catalog in effect.
    ///
    /// # Errors
    ///
    /// Fails if the override is empty or has an entry with zero floors.
    pub fn building_catalog(&self) -> ConfigResult<BuildingCatalog> {
        match &self.buildings {
            Some(entries) => BuildingCatalog::new(entries.clone()),
            None => Ok(BuildingCatalog::default()),
        }
    }

    /// Checks every parameter before generation starts.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        let dimensions = [
            ("chunk_size x", self.chunk_size[0]),
            ("chunk_size y", self.chunk_size[1]),
            ("chunk_size z", self.chunk_size[2]),
            ("world_chunks x", self.world_chunks[0]),
            ("world_chunks y", self.world_chunks[1]),
            ("world_chunks z", self.world_chunks[2]),
        ];
        for (name, value) in dimensions {
            if value == 0 {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        if self.min_lot_size <= 0 {
            return Err(ConfigError::NonPositiveLotSize);
        }
        if self.lot_types.is_empty() {
            return Err(ConfigError::EmptyLotTypes);
        }
        self.building_catalog()?;

        if self.lot_types.iter().any(|lot| lot.has_buildings()) {
            let [x, y, z] = self.chunk_size;
            if x < MIN_CHUNK_FOOTPRINT || y < MIN_CHUNK_FOOTPRINT {
                return Err(ConfigError::FootprintTooSmall {
                    x,
                    y,
                    min: MIN_CHUNK_FOOTPRINT,
                });
            }
            if z < MIN_BUILDING_HEIGHT {
                return Err(ConfigError::ChunkTooShort {
                    z,
                    min: MIN_BUILDING_HEIGHT,
                });
            }
        }
        Ok(())
    }
}
