//! # Lot Subdivision
//!
//! Splits a city block into building lots by recursive random cuts.
//!
//! A rectangle is cut along an axis only if both halves keep at least
//! `min_size` cells on that axis. When both axes qualify, the axis is picked
//! at random; the cut position is uniform over every valid position. Leaves
//! are emitted low half first, so the output order is a pure function of the
//! random stream.

use crate::error::{ConfigError, ConfigResult};
use crate::geometry::Rect;
use crate::random::RandomSource;

/// Axis of a cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Recursive rectangle splitter with a minimum lot size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LotSubdivider {
    min_size: i32,
}

impl LotSubdivider {
    /// Creates a subdivider producing lots of at least `min_size` cells per side.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveLotSize`] if `min_size <= 0`.
    pub fn new(min_size: i32) -> ConfigResult<Self> {
        if min_size <= 0 {
            return Err(ConfigError::NonPositiveLotSize);
        }
        Ok(Self { min_size })
    }

    /// Partitions `rect` into non-overlapping lots whose union is `rect`.
    ///
    /// If `rect` is already smaller than `2 * min_size` on both axes it is
    /// returned unchanged as the only lot.
    pub fn divide<R: RandomSource>(&self, rect: Rect, rng: &mut R) -> Vec<Rect> {
        let mut lots = Vec::new();
        self.split_into(rect, rng, &mut lots);
        lots
    }

    fn split_into<R: RandomSource>(&self, rect: Rect, rng: &mut R, lots: &mut Vec<Rect>) {
        let min = self.min_size;
        // `side / 2 >= min` is `side >= 2 * min` without overflow
        let axis = match (rect.width() / 2 >= min, rect.height() / 2 >= min) {
            (false, false) => {
                lots.push(rect);
                return;
            }
            (true, false) => Axis::X,
            (false, true) => Axis::Y,
            (true, true) => {
                if rng.int_in_range(0, 1) == 0 {
                    Axis::X
                } else {
                    Axis::Y
                }
            }
        };

        let (low, high) = match axis {
            Axis::X => {
                let cut = rng.int_in_range(rect.x1 + (min - 1), rect.x2 - min);
                (
                    Rect { x2: cut, ..rect },
                    Rect { x1: cut + 1, ..rect },
                )
            }
            Axis::Y => {
                let cut = rng.int_in_range(rect.y1 + (min - 1), rect.y2 - min);
                (
                    Rect { y2: cut, ..rect },
                    Rect { y1: cut + 1, ..rect },
                )
            }
        };

        self.split_into(low, rng, lots);
        self.split_into(high, rng, lots);
    }
}
