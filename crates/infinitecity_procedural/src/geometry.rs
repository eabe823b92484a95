//! # Geometry Primitives
//!
//! Inclusive integer rectangles and prisms in chunk-local coordinates.
//! A `Rect` of `(2, 2)-(4, 4)` covers 3x3 cells.

use crate::error::{GenerationError, GenerationResult};

/// A 2D footprint with inclusive bounds (`x1 <= x2`, `y1 <= y2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Low X bound.
    pub x1: i32,
    /// Low Y bound.
    pub y1: i32,
    /// High X bound (inclusive).
    pub x2: i32,
    /// High Y bound (inclusive).
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle, rejecting inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvertedBounds`] if `x1 > x2` or `y1 > y2`.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> GenerationResult<Self> {
        if x1 > x2 || y1 > y2 {
            return Err(GenerationError::InvertedBounds(format!(
                "rect ({x1}, {y1})-({x2}, {y2})"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    /// Height (Y extent) in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }

    /// Number of cells covered.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Returns true if the cell lies inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Returns true if the cell lies on one of the four edges.
    #[inline]
    #[must_use]
    pub const fn on_perimeter(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && (x == self.x1 || x == self.x2 || y == self.y1 || y == self.y2)
    }

    /// Returns true if the two rectangles share at least one cell.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// Largest inset that still leaves at least one cell on each axis.
    #[must_use]
    pub const fn max_inset(&self) -> i32 {
        let shortest = if self.width() < self.height() {
            self.width()
        } else {
            self.height()
        };
        (shortest - 1) / 2
    }

    /// Shrinks the rectangle by `amount` on all four sides.
    ///
    /// Returns `None` when the result would be empty.
    #[must_use]
    pub const fn inset(&self, amount: i32) -> Option<Self> {
        let inner = Self {
            x1: self.x1 + amount,
            y1: self.y1 + amount,
            x2: self.x2 - amount,
            y2: self.y2 - amount,
        };
        if inner.x1 > inner.x2 || inner.y1 > inner.y2 {
            None
        } else {
            Some(inner)
        }
    }

    /// The four corners, in `(x1,y1) (x2,y1) (x1,y2) (x2,y2)` order.
    #[must_use]
    pub const fn corners(&self) -> [(i32, i32); 4] {
        [
            (self.x1, self.y1),
            (self.x2, self.y1),
            (self.x1, self.y2),
            (self.x2, self.y2),
        ]
    }

    /// Extrudes the footprint into a prism spanning `z1..=z2`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvertedBounds`] if `z1 > z2`.
    pub fn extrude(&self, z1: i32, z2: i32) -> GenerationResult<RectPrism> {
        RectPrism::new(self.x1, self.y1, z1, self.x2, self.y2, z2)
    }
}

/// A 3D fill region with inclusive bounds on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RectPrism {
    /// Low X bound.
    pub x1: i32,
    /// Low Y bound.
    pub y1: i32,
    /// Low Z bound.
    pub z1: i32,
    /// High X bound (inclusive).
    pub x2: i32,
    /// High Y bound (inclusive).
    pub y2: i32,
    /// High Z bound (inclusive).
    pub z2: i32,
}

impl RectPrism {
    /// Creates a prism, rejecting inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvertedBounds`] if any low bound exceeds
    /// its high bound.
    pub fn new(x1: i32, y1: i32, z1: i32, x2: i32, y2: i32, z2: i32) -> GenerationResult<Self> {
        if x1 > x2 || y1 > y2 || z1 > z2 {
            return Err(GenerationError::InvertedBounds(format!(
                "prism ({x1}, {y1}, {z1})-({x2}, {y2}, {z2})"
            )));
        }
        Ok(Self { x1, y1, z1, x2, y2, z2 })
    }

    /// The XY footprint of the prism.
    #[must_use]
    pub const fn footprint(&self) -> Rect {
        Rect {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        }
    }
}
