//! # Generation Error Types
//!
//! Two families of failure:
//!
//! - [`ConfigError`]: bad configuration, detected at startup before any chunk
//!   is generated.
//! - [`GenerationError`]: a painting primitive was asked to write outside its
//!   chunk. This is always a bug in footprint arithmetic, so it aborts the
//!   whole world instead of clipping.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A chunk or world dimension was zero.
    #[error("invalid dimension: {name} must be positive, got {value}")]
    NonPositiveDimension {
        /// Which dimension was rejected.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// The chunk footprint leaves no room inside the street margins.
    #[error("chunk footprint {x}x{y} is smaller than the street margins allow (minimum {min})")]
    FootprintTooSmall {
        /// Chunk X size.
        x: usize,
        /// Chunk Y size.
        y: usize,
        /// Minimum accepted size on each axis.
        min: usize,
    },

    /// The chunk is too short to hold a single floor above the ground.
    #[error("chunk height {z} cannot hold one floor (minimum {min})")]
    ChunkTooShort {
        /// Chunk Z size.
        z: usize,
        /// Minimum accepted height.
        min: usize,
    },

    /// The minimum lot size was zero.
    #[error("min_lot_size must be positive")]
    NonPositiveLotSize,

    /// The building catalog has no entries.
    #[error("building catalog is empty")]
    EmptyBuildingCatalog,

    /// A building catalog entry allows no floors.
    #[error("building catalog entry {index} has max_floors = 0")]
    ZeroFloorBuilding {
        /// Position of the entry in the catalog.
        index: usize,
    },

    /// No lot types are enabled.
    #[error("lot type list is empty")]
    EmptyLotTypes,

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::CityConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while generating chunks or composing the world.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A write landed outside the target volume.
    #[error("write at ({x}, {y}, {z}) is outside volume {size_x}x{size_y}x{size_z}")]
    OutOfBounds {
        /// X coordinate of the write.
        x: i64,
        /// Y coordinate of the write.
        y: i64,
        /// Z coordinate of the write.
        z: i64,
        /// Volume X size.
        size_x: usize,
        /// Volume Y size.
        size_y: usize,
        /// Volume Z size.
        size_z: usize,
    },

    /// A rectangle or prism had inverted bounds.
    #[error("inverted bounds: {0}")]
    InvertedBounds(String),

    /// A windowed wall was asked for a non-positive window spacing.
    #[error("window spacing must be positive, got {0}")]
    InvalidSpacing(i32),

    /// A catalog was empty at generation time.
    #[error("cannot choose from an empty {0} catalog")]
    EmptyCatalog(&'static str),

    /// A worker thread stopped before delivering its chunks.
    #[error("generation worker disconnected before finishing")]
    WorkerDisconnected,

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
