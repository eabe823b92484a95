//! # Deterministic Randomness
//!
//! Every chunk draws from its own ChaCha8 stream, seeded from the world seed
//! and the chunk coordinate. The n-th draw of a chunk therefore depends only
//! on `(world seed, chunk coord, n)`: chunks can be generated in any order,
//! or in parallel, and the city comes out identical.
//!
//! ## Determinism Guarantee
//!
//! ChaCha8 is portable, so a given `WorldSeed` produces exactly the same
//! city on any platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // Fx-style multiply mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Seed of the random stream owned by one chunk.
    #[must_use]
    pub const fn chunk_seed(self, coord: ChunkCoord) -> u64 {
        self.derive(coord.x as u32 as u64)
            .derive(0x9E37_79B9_0000_0000 | coord.y as u32 as u64)
            .derive(0xC2B2_AE35_0000_0000 | coord.z as u32 as u64)
            .value()
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0xDEAD_BEEF_CAFE_BABE)
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not voxels).
    pub x: i32,
    /// Y coordinate (in chunks, not voxels).
    pub y: i32,
    /// Z coordinate (in chunks, not voxels).
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Global voxel coordinate of this chunk's origin corner.
    #[inline]
    #[must_use]
    pub const fn origin(self, chunk_size: [usize; 3]) -> [i64; 3] {
        [
            self.x as i64 * chunk_size[0] as i64,
            self.y as i64 * chunk_size[1] as i64,
            self.z as i64 * chunk_size[2] as i64,
        ]
    }
}

/// Source of uniform random draws used by the generator.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`, both inclusive.
    ///
    /// Callers must pass `min <= max`.
    fn int_in_range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform choice among `options`. `None` only if `options` is empty.
    fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        let last = i32::try_from(options.len().checked_sub(1)?).ok()?;
        let index = self.int_in_range(0, last);
        options.get(usize::try_from(index).ok()?)
    }
}

/// Random stream owned by a single chunk.
#[derive(Clone, Debug)]
pub struct ChunkRng {
    rng: ChaCha8Rng,
}

impl ChunkRng {
    /// Opens the stream for `coord` in the world seeded by `seed`.
    #[must_use]
    pub fn for_chunk(seed: WorldSeed, coord: ChunkCoord) -> Self {
        Self::from_seed(seed.chunk_seed(coord))
    }

    /// Opens a stream directly from a raw seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for ChunkRng {
    #[inline]
    fn int_in_range(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "empty range [{min}, {max}]");
        self.rng.gen_range(min..=max)
    }
}
