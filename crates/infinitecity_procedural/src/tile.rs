//! Tile codes shared with the renderer.

/// Material code of one voxel.
///
/// Using u8 representation for memory efficiency. The numeric values are
/// part of the renderer contract and must not change.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tile {
    /// Empty space.
    #[default]
    Air = 0,
    /// Generic solid: ground, wall, floor slab, pillar.
    Solid = 1,
    /// Transparent wall opening.
    Window = 2,
}

/// Number of distinct tile codes.
pub const TILE_TYPE_COUNT: usize = 3;

impl Tile {
    /// All tile codes, in code order.
    pub const ALL: [Tile; TILE_TYPE_COUNT] = [Tile::Air, Tile::Solid, Tile::Window];

    /// Raw code handed to the renderer.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Convert from u8. Unknown codes map to `None`.
    #[inline]
    #[must_use]
    pub const fn from_code(value: u8) -> Option<Self> {
        match value {
            0 => Some(Tile::Air),
            1 => Some(Tile::Solid),
            2 => Some(Tile::Window),
            _ => None,
        }
    }
}
