//! # Voxel Volume
//!
//! Dense tile buffer for one chunk plus the painting primitives the
//! generator builds with.
//!
//! ## Layout
//!
//! One flat `Vec<Tile>`, indexed as `x + size_x * (y + size_y * z)`.
//!
//! ## Bounds
//!
//! Every write is bounds-checked. A write outside the volume returns
//! [`GenerationError::OutOfBounds`] instead of being clipped: it means the
//! caller computed a footprint wrong.

use crate::error::{ConfigError, ConfigResult, GenerationError, GenerationResult};
use crate::geometry::{Rect, RectPrism};
use crate::tile::Tile;

/// A chunk-sized grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelVolume {
    size: [usize; 3],
    tiles: Vec<Tile>,
}

impl VoxelVolume {
    /// Allocates an all-air volume of exactly `size` cells per axis.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveDimension`] if any axis is zero.
    pub fn new(size: [usize; 3]) -> ConfigResult<Self> {
        for (name, value) in ["chunk x", "chunk y", "chunk z"].into_iter().zip(size) {
            if value == 0 {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        Ok(Self {
            size,
            tiles: vec![Tile::Air; size[0] * size[1] * size[2]],
        })
    }

    /// Size in cells along X, Y and Z.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> [usize; 3] {
        self.size
    }

    /// Raw tiles in storage order.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        let [sx, sy, sz] = self.size;
        let x = usize::try_from(x).ok().filter(|&x| x < sx)?;
        let y = usize::try_from(y).ok().filter(|&y| y < sy)?;
        let z = usize::try_from(z).ok().filter(|&z| z < sz)?;
        Some(x + sx * (y + sy * z))
    }

    /// Gets the tile at local coordinates, or `None` outside the volume.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Tile> {
        self.index(x, y, z).map(|i| self.tiles[i])
    }

    /// Sets the tile at local coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::OutOfBounds`] outside the volume.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, tile: Tile) -> GenerationResult<()> {
        let index = self.index(x, y, z).ok_or(GenerationError::OutOfBounds {
            x: i64::from(x),
            y: i64::from(y),
            z: i64::from(z),
            size_x: self.size[0],
            size_y: self.size[1],
            size_z: self.size[2],
        })?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// Counts cells holding `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Visits every cell as `(x, y, z, tile)` in storage order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize, Tile)> + '_ {
        let [sx, sy, _] = self.size;
        self.tiles.iter().enumerate().map(move |(i, &tile)| {
            (i % sx, (i / sx) % sy, i / (sx * sy), tile)
        })
    }

    /// Overwrites every cell with `tile_at(x, y, z)`.
    pub fn fill_with<F>(&mut self, tile_at: F)
    where
        F: Fn(usize, usize, usize) -> Tile,
    {
        let [sx, sy, _] = self.size;
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            *tile = tile_at(i % sx, (i / sx) % sy, i / (sx * sy));
        }
    }

    /// Fills the vertical span `z_base..=z_top` at `(x, y)` with solid.
    ///
    /// # Errors
    ///
    /// Fails if the span is inverted or leaves the volume.
    pub fn fill_column(&mut self, x: i32, y: i32, z_base: i32, z_top: i32) -> GenerationResult<()> {
        self.fill_block(Rect::new(x, y, x, y)?.extrude(z_base, z_top)?, Tile::Solid)
    }

    /// Fills every cell of `prism` with `tile`.
    ///
    /// # Errors
    ///
    /// Fails on the first cell outside the volume.
    pub fn fill_block(&mut self, prism: RectPrism, tile: Tile) -> GenerationResult<()> {
        for z in prism.z1..=prism.z2 {
            self.solid_level(prism.footprint(), z, tile)?;
        }
        Ok(())
    }

    /// Fills every cell of `rect` at height `z`.
    ///
    /// # Errors
    ///
    /// Fails on the first cell outside the volume.
    pub fn solid_level(&mut self, rect: Rect, z: i32, tile: Tile) -> GenerationResult<()> {
        for y in rect.y1..=rect.y2 {
            for x in rect.x1..=rect.x2 {
                self.set(x, y, z, tile)?;
            }
        }
        Ok(())
    }

    /// Paints the perimeter of `rect` on `height` layers starting at `z`.
    ///
    /// Interior cells are left untouched.
    ///
    /// # Errors
    ///
    /// Fails on the first cell outside the volume.
    pub fn wall(&mut self, rect: Rect, z: i32, height: i32, tile: Tile) -> GenerationResult<()> {
        for layer in z..z + height {
            self.perimeter(rect, layer, |_| tile)?;
        }
        Ok(())
    }

    /// Like [`Self::wall`], but a cell whose offset from its edge's starting
    /// corner is a multiple of `spacing` gets `window_tile`.
    ///
    /// Edges are painted in the order `y1`, `y2` (offset from `x1`), then
    /// `x1`, `x2` (offset from `y1`). Corners keep the value of the last edge
    /// painted.
    ///
    /// # Errors
    ///
    /// Fails on a non-positive spacing or the first cell outside the volume.
    pub fn windowed_wall(
        &mut self,
        rect: Rect,
        z: i32,
        height: i32,
        spacing: i32,
        wall_tile: Tile,
        window_tile: Tile,
    ) -> GenerationResult<()> {
        if spacing <= 0 {
            return Err(GenerationError::InvalidSpacing(spacing));
        }
        for layer in z..z + height {
            self.perimeter(rect, layer, |offset| {
                if offset % spacing == 0 {
                    window_tile
                } else {
                    wall_tile
                }
            })?;
        }
        Ok(())
    }

    /// Paints the four edges of `rect` at height `z`, asking `tile_at` for
    /// each cell's tile given its offset along the edge.
    fn perimeter<F>(&mut self, rect: Rect, z: i32, tile_at: F) -> GenerationResult<()>
    where
        F: Fn(i32) -> Tile,
    {
        for y in [rect.y1, rect.y2] {
            for x in rect.x1..=rect.x2 {
                self.set(x, y, z, tile_at(x - rect.x1))?;
            }
        }
        for x in [rect.x1, rect.x2] {
            for y in rect.y1..=rect.y2 {
                self.set(x, y, z, tile_at(y - rect.y1))?;
            }
        }
        Ok(())
    }
}
