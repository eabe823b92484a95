//! # Chunk Content Generator
//!
//! Turns one empty chunk into terrain, a city block or a skyscraper.
//!
//! ## Vertical Layout
//!
//! ```text
//! z = G + 3f + 3   ██████████  slab of floor f
//! z = G + 3f + 2   █        █  wall
//! z = G + 3f + 1   █        █  wall
//! z = G + 3f       ██████████  slab of floor f-1 (or ground)
//! ```
//!
//! `G` is [`GROUND_HEIGHT`]. Corner pillars run from the ground to the top
//! slab, `G + 3 * floors`.

use tracing::trace;

use crate::catalog::{BuildingCatalog, WallStyle, WINDOW_SPACING};
use crate::error::{ConfigError, ConfigResult, GenerationError, GenerationResult};
use crate::geometry::Rect;
use crate::random::RandomSource;
use crate::subdivide::LotSubdivider;
use crate::tile::Tile;
use crate::volume::VoxelVolume;

/// Highest solid layer of flattened terrain.
pub const GROUND_HEIGHT: i32 = 2;

/// Vertical distance between floor slabs.
pub const FLOOR_SPACING: i32 = 3;

/// Street width on the low X/Y side of a chunk.
pub const STREET_MARGIN_LOW: i32 = 2;

/// Street width on the high X/Y side of a chunk.
pub const STREET_MARGIN_HIGH: i32 = 3;

/// Largest random setback of a foundation inside its lot.
pub const MAX_SETBACK: i32 = 2;

/// Tallest wall a skyscraper floor can draw.
pub const MAX_SKYSCRAPER_WALL: i32 = 2;

/// City-block walls fill the gap between two slabs.
const STOREY_WALL_HEIGHT: i32 = FLOOR_SPACING - 1;

/// Smallest chunk side that leaves one buildable cell between the streets.
pub const MIN_CHUNK_FOOTPRINT: usize = (STREET_MARGIN_LOW + STREET_MARGIN_HIGH) as usize;

/// Smallest chunk height that holds one floor above the ground.
pub const MIN_BUILDING_HEIGHT: usize = (GROUND_HEIGHT + FLOOR_SPACING + 1) as usize;

/// Everything decided about one building before it is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingPlan {
    /// Lot the building stands on.
    pub lot: Rect,
    /// Lot inset by the setback.
    pub foundation: Rect,
    /// Number of floors (at least 1).
    pub floors: i32,
    /// Perimeter style.
    pub wall_style: WallStyle,
    /// Wall layers per floor.
    pub wall_height: i32,
    /// Whether corner pillars are raised.
    pub corner_pillar: bool,
}

impl BuildingPlan {
    /// Height of the top floor slab.
    #[inline]
    #[must_use]
    pub const fn roof_height(&self) -> i32 {
        GROUND_HEIGHT + self.floors * FLOOR_SPACING
    }

    /// Height of the slab closing floor `floor`.
    #[inline]
    #[must_use]
    pub const fn slab_height(floor: i32) -> i32 {
        GROUND_HEIGHT + floor * FLOOR_SPACING + FLOOR_SPACING
    }

    /// Height of the lowest wall layer of floor `floor`.
    #[inline]
    #[must_use]
    pub const fn wall_base(floor: i32) -> i32 {
        GROUND_HEIGHT + floor * FLOOR_SPACING + 1
    }
}

/// Generator owning the voxel buffer of one chunk.
///
/// Create one per chunk, paint, then hand the buffer off with
/// [`Self::into_volume`].
#[derive(Debug)]
pub struct ChunkContentGenerator {
    volume: VoxelVolume,
}

impl ChunkContentGenerator {
    /// Creates a generator with an all-air buffer of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveDimension`] if any axis is zero.
    pub fn new(size: [usize; 3]) -> ConfigResult<Self> {
        Ok(Self {
            volume: VoxelVolume::new(size)?,
        })
    }

    /// The buffer painted so far.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> &VoxelVolume {
        &self.volume
    }

    /// Hands the finished buffer off, consuming the generator.
    #[inline]
    #[must_use]
    pub fn into_volume(self) -> VoxelVolume {
        self.volume
    }

    /// Chunk footprint minus the surrounding street.
    ///
    /// # Errors
    ///
    /// Fails if the chunk is narrower than [`MIN_CHUNK_FOOTPRINT`].
    pub fn buildable_footprint(&self) -> GenerationResult<Rect> {
        let [sx, sy, _] = self.volume.size();
        Rect::new(
            STREET_MARGIN_LOW,
            STREET_MARGIN_LOW,
            axis_len(sx) - STREET_MARGIN_HIGH,
            axis_len(sy) - STREET_MARGIN_HIGH,
        )
    }

    /// Most floors whose top slab still fits inside the chunk.
    #[must_use]
    pub fn floor_capacity(&self) -> i32 {
        let sz = axis_len(self.volume.size()[2]);
        ((sz - GROUND_HEIGHT - 1) / FLOOR_SPACING).max(0)
    }

    /// Solid at and below [`GROUND_HEIGHT`], air above.
    pub fn flatten_world(&mut self) {
        let ground = usize::try_from(GROUND_HEIGHT).unwrap_or(0);
        self.volume
            .fill_with(|_, _, z| if z <= ground { Tile::Solid } else { Tile::Air });
    }

    /// Subdivides the buildable footprint into lots and raises a building
    /// from `catalog` on each.
    ///
    /// Returns the plan of every building, in painting order.
    ///
    /// # Errors
    ///
    /// Fails on a non-positive `min_lot_size`, a chunk too small to hold
    /// one floor, or any out-of-bounds write.
    pub fn construct_buildings<R: RandomSource>(
        &mut self,
        min_lot_size: i32,
        catalog: &BuildingCatalog,
        rng: &mut R,
    ) -> GenerationResult<Vec<BuildingPlan>> {
        let subdivider = LotSubdivider::new(min_lot_size)?;
        let capacity = self.require_capacity()?;
        let lots = subdivider.divide(self.buildable_footprint()?, rng);

        let mut plans = Vec::with_capacity(lots.len());
        for lot in lots {
            let building = *rng
                .choose(catalog.entries())
                .ok_or(GenerationError::EmptyCatalog("building"))?;
            let max_floors = i32::try_from(building.max_floors)
                .unwrap_or(i32::MAX)
                .min(capacity);
            let floors = rng.int_in_range(1, max_floors);
            let foundation = Self::draw_foundation(lot, rng)?;

            let plan = BuildingPlan {
                lot,
                foundation,
                floors,
                wall_style: building.wall_style,
                wall_height: STOREY_WALL_HEIGHT,
                corner_pillar: building.corner_pillar,
            };
            self.build(&plan)?;
            trace!(?plan, "city block lot built");
            plans.push(plan);
        }
        Ok(plans)
    }

    /// Raises one tower over the whole buildable footprint.
    ///
    /// Floors are bounded only by the chunk height. Wall height and style
    /// are drawn per tower; towers with short walls get corner pillars.
    ///
    /// # Errors
    ///
    /// Fails on a chunk too small to hold one floor, or any out-of-bounds
    /// write.
    pub fn construct_skyscraper<R: RandomSource>(
        &mut self,
        rng: &mut R,
    ) -> GenerationResult<BuildingPlan> {
        let capacity = self.require_capacity()?;
        let lot = self.buildable_footprint()?;

        let floors = rng.int_in_range(1, capacity);
        let wall_height = rng.int_in_range(0, MAX_SKYSCRAPER_WALL);
        let wall_style = *rng
            .choose(&WallStyle::ALL)
            .ok_or(GenerationError::EmptyCatalog("wall style"))?;
        let foundation = Self::draw_foundation(lot, rng)?;

        let plan = BuildingPlan {
            lot,
            foundation,
            floors,
            wall_style,
            wall_height,
            corner_pillar: wall_height != MAX_SKYSCRAPER_WALL,
        };
        self.build(&plan)?;
        trace!(?plan, "skyscraper built");
        Ok(plan)
    }

    /// Draws a setback and insets `lot` by it. The setback is lowered when
    /// the lot is too narrow, so the foundation keeps at least one cell.
    fn draw_foundation<R: RandomSource>(lot: Rect, rng: &mut R) -> GenerationResult<Rect> {
        let setback = rng.int_in_range(0, MAX_SETBACK).min(lot.max_inset());
        lot.inset(setback).ok_or_else(|| {
            GenerationError::InvertedBounds(format!("lot {lot:?} inset by {setback}"))
        })
    }

    fn require_capacity(&self) -> GenerationResult<i32> {
        let capacity = self.floor_capacity();
        if capacity < 1 {
            return Err(ConfigError::ChunkTooShort {
                z: self.volume.size()[2],
                min: MIN_BUILDING_HEIGHT,
            }
            .into());
        }
        Ok(capacity)
    }

    /// Paints a planned building: walls and slabs per floor, then pillars.
    fn build(&mut self, plan: &BuildingPlan) -> GenerationResult<()> {
        let foundation = plan.foundation;
        for floor in 0..plan.floors {
            let wall_z = BuildingPlan::wall_base(floor);
            match plan.wall_style {
                WallStyle::None => {}
                WallStyle::Solid => {
                    self.volume
                        .wall(foundation, wall_z, plan.wall_height, Tile::Solid)?;
                }
                WallStyle::Windowed => self.volume.windowed_wall(
                    foundation,
                    wall_z,
                    plan.wall_height,
                    WINDOW_SPACING,
                    Tile::Solid,
                    Tile::Window,
                )?,
            }
            self.volume
                .solid_level(foundation, BuildingPlan::slab_height(floor), Tile::Solid)?;
        }

        // Last, so windows never cut into a pillar.
        if plan.corner_pillar {
            for (x, y) in foundation.corners() {
                self.volume
                    .fill_column(x, y, GROUND_HEIGHT, plan.roof_height())?;
            }
        }
        Ok(())
    }
}

/// Chunk axis length as a signed coordinate.
fn axis_len(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}
