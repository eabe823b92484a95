//! # World Composition
//!
//! Walks the chunk grid, generates each chunk and copies it into one global
//! voxel store at `chunk index * chunk size` per axis.
//!
//! ## Ordering
//!
//! Each chunk draws from its own random stream, so the store does not
//! depend on the order chunks are generated in. [`CityWorld::generate`] and
//! [`CityWorld::generate_parallel`] produce bit-identical stores.

use std::time::Instant;

use crossbeam_channel::{bounded, unbounded};
use tracing::{debug, info};

use crate::catalog::{BuildingCatalog, LotType};
use crate::config::CityConfig;
use crate::error::{ConfigError, ConfigResult, GenerationError, GenerationResult};
use crate::generator::{BuildingPlan, ChunkContentGenerator};
use crate::random::{ChunkCoord, ChunkRng, RandomSource, WorldSeed};
use crate::tile::Tile;
use crate::volume::VoxelVolume;

/// Write side of a global voxel store.
pub trait VoxelSink {
    /// Stores `tile` at global coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::OutOfBounds`] for coordinates outside the
    /// store.
    fn set(&mut self, x: usize, y: usize, z: usize, tile: Tile) -> GenerationResult<()>;
}

/// Dense global voxel store covering the whole generated world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelStore {
    size: [usize; 3],
    tiles: Vec<Tile>,
}

impl VoxelStore {
    /// Allocates an all-air store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveDimension`] if any axis is zero.
    pub fn new(size: [usize; 3]) -> ConfigResult<Self> {
        for (name, value) in ["world x", "world y", "world z"].into_iter().zip(size) {
            if value == 0 {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        Ok(Self {
            size,
            tiles: vec![Tile::Air; size[0] * size[1] * size[2]],
        })
    }

    /// Size in voxels along X, Y and Z.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> [usize; 3] {
        self.size
    }

    /// Raw tiles, indexed as `x + size_x * (y + size_y * z)`.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Gets a tile, or `None` outside the store.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Tile> {
        let [sx, sy, sz] = self.size;
        (x < sx && y < sy && z < sz).then(|| self.tiles[x + sx * (y + sy * z)])
    }

    /// Counts voxels holding `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}

impl VoxelSink for VoxelStore {
    #[inline]
    fn set(&mut self, x: usize, y: usize, z: usize, tile: Tile) -> GenerationResult<()> {
        let [sx, sy, sz] = self.size;
        if x >= sx || y >= sy || z >= sz {
            return Err(GenerationError::OutOfBounds {
                x: to_i64(x),
                y: to_i64(y),
                z: to_i64(z),
                size_x: sx,
                size_y: sy,
                size_z: sz,
            });
        }
        self.tiles[x + sx * (y + sy * z)] = tile;
        Ok(())
    }
}

/// Totals gathered while composing the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks generated per lot type, indexed by [`LotType::index`].
    pub chunks_per_lot_type: [usize; 3],
    /// Buildings raised, skyscrapers included.
    pub buildings: usize,
    /// Floors raised across all buildings.
    pub floors: u64,
}

impl WorldStats {
    /// Chunks generated as `lot_type`.
    #[inline]
    #[must_use]
    pub const fn chunks(&self, lot_type: LotType) -> usize {
        self.chunks_per_lot_type[lot_type.index()]
    }

    /// Chunks generated in total.
    #[must_use]
    pub fn total_chunks(&self) -> usize {
        self.chunks_per_lot_type.iter().sum()
    }

    fn record(&mut self, chunk: &GeneratedChunk) {
        self.chunks_per_lot_type[chunk.lot_type.index()] += 1;
        self.buildings += chunk.buildings.len();
        self.floors += chunk
            .buildings
            .iter()
            .map(|plan| u64::try_from(plan.floors).unwrap_or(0))
            .sum::<u64>();
    }
}

/// One finished chunk, ready to be copied into the store.
#[derive(Clone, Debug)]
pub struct GeneratedChunk {
    /// Position in the chunk grid.
    pub coord: ChunkCoord,
    /// Lot type drawn for the chunk.
    pub lot_type: LotType,
    /// Buildings raised, in painting order.
    pub buildings: Vec<BuildingPlan>,
    /// Chunk-local tiles.
    pub volume: VoxelVolume,
}

/// City world generator.
#[derive(Clone, Debug)]
pub struct CityWorld {
    config: CityConfig,
    catalog: BuildingCatalog,
    seed: WorldSeed,
}

impl CityWorld {
    /// Validates `config` and prepares a generator for it.
    ///
    /// # Errors
    ///
    /// Returns any error from [`CityConfig::validate`].
    pub fn new(config: CityConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            catalog: config.building_catalog()?,
            seed: config.world_seed(),
            config,
        })
    }

    /// The configuration in effect.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Size of the global store in voxels.
    #[must_use]
    pub fn world_size(&self) -> [usize; 3] {
        let [cx, cy, cz] = self.config.chunk_size;
        let [nx, ny, nz] = self.config.world_chunks;
        [cx * nx, cy * ny, cz * nz]
    }

    /// Number of chunks in the world grid.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.config.world_chunks.iter().product()
    }

    /// Every chunk coordinate of the grid, X outermost, Z innermost.
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> {
        let [nx, ny, nz] = self.config.world_chunks.map(to_i32);
        (0..nx).flat_map(move |x| {
            (0..ny).flat_map(move |y| (0..nz).map(move |z| ChunkCoord::new(x, y, z)))
        })
    }

    /// Generates the chunk at `coord`.
    ///
    /// Works for any coordinate, including ones outside the configured grid;
    /// the result depends only on the seed and `coord`.
    ///
    /// # Errors
    ///
    /// Propagates any painting error.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> GenerationResult<GeneratedChunk> {
        let mut rng = ChunkRng::for_chunk(self.seed, coord);
        let mut generator = ChunkContentGenerator::new(self.config.chunk_size)?;

        let lot_type = *rng
            .choose(&self.config.lot_types)
            .ok_or(GenerationError::EmptyCatalog("lot type"))?;

        generator.flatten_world();
        let buildings = match lot_type {
            LotType::Park => Vec::new(),
            LotType::CityBlock => {
                generator.construct_buildings(self.config.min_lot_size, &self.catalog, &mut rng)?
            }
            LotType::Skyscraper => vec![generator.construct_skyscraper(&mut rng)?],
        };
        debug!(
            x = coord.x,
            y = coord.y,
            z = coord.z,
            ?lot_type,
            buildings = buildings.len(),
            "chunk generated"
        );

        Ok(GeneratedChunk {
            coord,
            lot_type,
            buildings,
            volume: generator.into_volume(),
        })
    }

    /// Generates every chunk on the calling thread, writing into `sink`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing chunk or write.
    pub fn generate_into<S: VoxelSink>(&self, sink: &mut S) -> GenerationResult<WorldStats> {
        let mut stats = WorldStats::default();
        for coord in self.chunk_coords() {
            let chunk = self.generate_chunk(coord)?;
            self.copy_chunk(sink, &chunk)?;
            stats.record(&chunk);
        }
        Ok(stats)
    }

    /// Generates the whole world sequentially.
    ///
    /// # Errors
    ///
    /// Stops at the first failing chunk; no partial world is returned.
    pub fn generate(&self) -> GenerationResult<(VoxelStore, WorldStats)> {
        let start = Instant::now();
        info!(
            seed = self.seed.value(),
            chunks = self.chunk_count(),
            "generating city"
        );
        let mut store = VoxelStore::new(self.world_size())?;
        let stats = self.generate_into(&mut store)?;
        info!(elapsed_ms = start.elapsed().as_millis(), ?stats, "city generated");
        Ok((store, stats))
    }

    /// Generates the whole world on `workers` threads.
    ///
    /// Workers pull coordinates from a job queue and send finished chunks
    /// back; only the calling thread writes to the store. No more threads
    /// than chunks are spawned. With `workers <= 1` this is
    /// [`Self::generate`].
    ///
    /// # Errors
    ///
    /// Stops at the first failing chunk; no partial world is returned.
    pub fn generate_parallel(&self, workers: usize) -> GenerationResult<(VoxelStore, WorldStats)> {
        let total = self.chunk_count();
        let workers = workers.min(total);
        if workers <= 1 {
            return self.generate();
        }

        let start = Instant::now();
        info!(
            seed = self.seed.value(),
            chunks = total,
            workers,
            "generating city in parallel"
        );

        let mut store = VoxelStore::new(self.world_size())?;
        let mut stats = WorldStats::default();

        std::thread::scope(|scope| -> GenerationResult<()> {
            let (job_tx, job_rx) = unbounded::<ChunkCoord>();
            let (result_tx, result_rx) =
                bounded::<GenerationResult<GeneratedChunk>>(workers.saturating_mul(2));

            for coord in self.chunk_coords() {
                job_tx
                    .send(coord)
                    .map_err(|_| GenerationError::WorkerDisconnected)?;
            }
            drop(job_tx);

            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for coord in job_rx {
                        let result = self.generate_chunk(coord);
                        let failed = result.is_err();
                        if result_tx.send(result).is_err() || failed {
                            break;
                        }
                    }
                });
            }
            drop(result_tx);

            // Returning early drops `result_rx`, which unblocks the workers.
            let mut received = 0;
            for result in result_rx {
                let chunk = result?;
                self.copy_chunk(&mut store, &chunk)?;
                stats.record(&chunk);
                received += 1;
            }
            if received == total {
                Ok(())
            } else {
                Err(GenerationError::WorkerDisconnected)
            }
        })?;

        info!(elapsed_ms = start.elapsed().as_millis(), ?stats, "city generated");
        Ok((store, stats))
    }

    /// Copies a chunk into `sink` at its global offset.
    fn copy_chunk<S: VoxelSink>(&self, sink: &mut S, chunk: &GeneratedChunk) -> GenerationResult<()> {
        let origin = chunk.coord.origin(self.config.chunk_size);
        let [ox, oy, oz] = origin.map(|o| usize::try_from(o).ok());
        let (Some(ox), Some(oy), Some(oz)) = (ox, oy, oz) else {
            let [sx, sy, sz] = self.world_size();
            return Err(GenerationError::OutOfBounds {
                x: origin[0],
                y: origin[1],
                z: origin[2],
                size_x: sx,
                size_y: sy,
                size_z: sz,
            });
        };
        for (x, y, z, tile) in chunk.volume.cells() {
            sink.set(ox + x, oy + y, oz + z, tile)?;
        }
        Ok(())
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_config(seed: u64) -> CityConfig {
        CityConfig {
            seed,
            chunk_size: [12, 12, 12],
            world_chunks: [3, 2, 1],
            min_lot_size: 4,
            ..CityConfig::default()
        }
    }

    #[test]
    fn test_store_bounds() {
        let mut store = VoxelStore::new([4, 4, 4]).unwrap();
        store.set(3, 3, 3, Tile::Window).unwrap();
        assert_eq!(store.get(3, 3, 3), Some(Tile::Window));
        assert_eq!(store.get(4, 0, 0), None);
        assert!(matches!(
            store.set(0, 4, 0, Tile::Solid),
            Err(GenerationError::OutOfBounds { y: 4, .. })
        ));
        assert!(VoxelStore::new([0, 1, 1]).is_err());
    }

    #[test]
    fn test_chunk_coords_cover_grid_once() {
        let world = CityWorld::new(small_config(1)).unwrap();
        let coords: Vec<_> = world.chunk_coords().collect();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords.iter().collect::<HashSet<_>>().len(), 6);
        assert_eq!(coords[0], ChunkCoord::new(0, 0, 0));
        assert_eq!(coords[5], ChunkCoord::new(2, 1, 0));
    }

    #[test]
    fn test_store_is_tiled_by_chunks() {
        let world = CityWorld::new(small_config(3)).unwrap();
        let (store, stats) = world.generate().unwrap();
        assert_eq!(store.size(), [36, 24, 12]);
        assert_eq!(stats.total_chunks(), 6);

        for coord in world.chunk_coords() {
            let chunk = world.generate_chunk(coord).unwrap();
            let [ox, oy, oz] = coord.origin([12, 12, 12]).map(|o| o as usize);
            for (x, y, z, tile) in chunk.volume.cells() {
                assert_eq!(store.get(ox + x, oy + y, oz + z), Some(tile));
            }
        }
    }

    #[test]
    fn test_park_only_world_is_flat() {
        let config = CityConfig {
            lot_types: vec![LotType::Park],
            ..small_config(8)
        };
        let (store, stats) = CityWorld::new(config).unwrap().generate().unwrap();
        assert_eq!(stats.chunks(LotType::Park), 6);
        assert_eq!(stats.buildings, 0);
        assert_eq!(store.count(Tile::Solid), 36 * 24 * 3);
        assert_eq!(store.count(Tile::Window), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let world = CityWorld::new(small_config(17)).unwrap();
        let (sequential, seq_stats) = world.generate().unwrap();
        let (parallel, par_stats) = world.generate_parallel(4).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(seq_stats, par_stats);
    }

    #[test]
    fn test_empty_lot_types_is_an_error() {
        // Bypasses validation to reach the generation-time check
        let world = CityWorld {
            config: CityConfig {
                lot_types: Vec::new(),
                ..small_config(1)
            },
            catalog: BuildingCatalog::default(),
            seed: WorldSeed::new(1),
        };
        assert!(matches!(
            world.generate_chunk(ChunkCoord::new(0, 0, 0)),
            Err(GenerationError::EmptyCatalog("lot type"))
        ));
    }

    #[test]
    fn test_absurd_worker_count_is_capped() {
        let world = CityWorld::new(small_config(23)).unwrap();
        let (sequential, _) = world.generate().unwrap();
        let (parallel, stats) = world.generate_parallel(usize::MAX).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(stats.total_chunks(), 6);
    }

    #[test]
    fn test_chunk_independent_of_generation_order() {
        let world = CityWorld::new(small_config(5)).unwrap();
        let later = ChunkCoord::new(2, 1, 0);
        let direct = world.generate_chunk(later).unwrap();
        for coord in world.chunk_coords() {
            let _ = world.generate_chunk(coord).unwrap();
        }
        let again = world.generate_chunk(later).unwrap();
        assert_eq!(direct.volume, again.volume);
        assert_eq!(direct.lot_type, again.lot_type);
    }

    #[test]
    fn test_negative_chunks_generate() {
        let world = CityWorld::new(small_config(5)).unwrap();
        let chunk = world.generate_chunk(ChunkCoord::new(-4, -9, 0)).unwrap();
        assert_eq!(chunk.volume.size(), [12, 12, 12]);
    }

    #[test]
    fn test_negative_chunk_cannot_be_copied() {
        let world = CityWorld::new(small_config(5)).unwrap();
        let chunk = world.generate_chunk(ChunkCoord::new(-1, 0, 0)).unwrap();
        let mut store = VoxelStore::new(world.world_size()).unwrap();
        assert!(matches!(
            world.copy_chunk(&mut store, &chunk),
            Err(GenerationError::OutOfBounds { x: -12, .. })
        ));
    }
}
