//! # Infinite City Procedural Generation
//!
//! Deterministic voxel city generation, one chunk at a time.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same city
//! 2. **Chunked**: Every chunk draws from its own random stream
//! 3. **Order-free**: Chunks can be generated in any order, on any thread
//! 4. **Strict**: Painting outside a chunk is an error, never clipped
//!
//! ## Core Components
//!
//! - `Rect` / `RectPrism`: Footprints and volumes
//! - `LotSubdivider`: Recursive city block splitting
//! - `ChunkContentGenerator`: Terrain, city blocks and skyscrapers
//! - `CityWorld`: Chunk grid composed into one `VoxelStore`
//!
//! ## Example
//!
//! ```rust,ignore
//! use infinitecity_procedural::{CityConfig, CityWorld, Tile};
//!
//! let world = CityWorld::new(CityConfig::default())?;
//! let (store, stats) = world.generate()?;
//!
//! // Ground is always solid
//! assert_eq!(store.get(0, 0, 0), Some(Tile::Solid));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod random;
pub mod subdivide;
pub mod tile;
pub mod volume;
pub mod world;

pub use catalog::{BuildingCatalog, BuildingType, LotType, WallStyle, DEFAULT_BUILDINGS};
pub use config::CityConfig;
pub use error::{ConfigError, ConfigResult, GenerationError, GenerationResult};
pub use generator::{BuildingPlan, ChunkContentGenerator, FLOOR_SPACING, GROUND_HEIGHT};
pub use geometry::{Rect, RectPrism};
pub use random::{ChunkCoord, ChunkRng, RandomSource, WorldSeed};
pub use subdivide::LotSubdivider;
pub use tile::Tile;
pub use volume::VoxelVolume;
pub use world::{CityWorld, GeneratedChunk, VoxelSink, VoxelStore, WorldStats};
