//! # Building and Lot Catalogs
//!
//! Closed sets of variants, switched on by value. A building type is plain
//! data; the generator reads its fields to decide which painting routine
//! runs.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// What a chunk is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotType {
    /// Flat ground, no buildings.
    Park,
    /// Subdivided block of independent buildings.
    CityBlock,
    /// One tower covering the whole block.
    Skyscraper,
}

impl LotType {
    /// Every lot type.
    pub const ALL: [LotType; 3] = [LotType::Park, LotType::CityBlock, LotType::Skyscraper];

    /// Returns true if this lot type places buildings.
    #[inline]
    #[must_use]
    pub const fn has_buildings(self) -> bool {
        !matches!(self, LotType::Park)
    }

    /// Index used for per-type statistics.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            LotType::Park => 0,
            LotType::CityBlock => 1,
            LotType::Skyscraper => 2,
        }
    }
}

/// How a building's perimeter is painted on each floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallStyle {
    /// Open floors, slabs only.
    None,
    /// Solid perimeter.
    Solid,
    /// Perimeter with a window every [`WINDOW_SPACING`] cells.
    Windowed,
}

impl WallStyle {
    /// Every wall style.
    pub const ALL: [WallStyle; 3] = [WallStyle::None, WallStyle::Solid, WallStyle::Windowed];
}

/// Distance between windows along a windowed wall.
pub const WINDOW_SPACING: i32 = 3;

/// One entry of the building catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingType {
    /// Perimeter wall style.
    pub wall_style: WallStyle,
    /// Whether solid columns rise at the foundation corners.
    pub corner_pillar: bool,
    /// Upper bound for the floor count (at least 1).
    pub max_floors: u32,
}

impl BuildingType {
    /// Creates a catalog entry.
    #[must_use]
    pub const fn new(wall_style: WallStyle, corner_pillar: bool, max_floors: u32) -> Self {
        Self {
            wall_style,
            corner_pillar,
            max_floors,
        }
    }
}

/// Default catalog: every wall style with and without pillars.
pub const DEFAULT_BUILDINGS: [BuildingType; 6] = [
    BuildingType::new(WallStyle::None, true, 8),     // parking structure
    BuildingType::new(WallStyle::None, false, 2),    // pavilion
    BuildingType::new(WallStyle::Solid, true, 4),    // warehouse
    BuildingType::new(WallStyle::Solid, false, 6),   // apartments
    BuildingType::new(WallStyle::Windowed, true, 8), // office
    BuildingType::new(WallStyle::Windowed, false, 5),
];

/// Validated, non-empty building catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingCatalog {
    entries: Vec<BuildingType>,
}

impl BuildingCatalog {
    /// Wraps a list of building types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBuildingCatalog`] for an empty list and
    /// [`ConfigError::ZeroFloorBuilding`] for any entry with `max_floors = 0`.
    pub fn new(entries: Vec<BuildingType>) -> ConfigResult<Self> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyBuildingCatalog);
        }
        if let Some(index) = entries.iter().position(|b| b.max_floors == 0) {
            return Err(ConfigError::ZeroFloorBuilding { index });
        }
        Ok(Self { entries })
    }

    /// Catalog entries.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[BuildingType] {
        &self.entries
    }
}

impl Default for BuildingCatalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_BUILDINGS.to_vec(),
        }
    }
}
