//! Obstacle modeling.
//!
//! - [`ObstacleShape`]: world-space rectangle with an active flag
//! - [`ObstacleMap`]: blocked-cell snapshot rasterized from shapes
//! - [`RandomGrid`]: seeded random bounded grids
//! - [`Occupancy`]: what the search asks of any blocked-cell source

mod map;
mod random;
mod shape;

pub use map::ObstacleMap;
pub use random::RandomGrid;
pub use shape::ObstacleShape;

use crate::core::Cell;

/// Blocked/open oracle consulted by the search.
///
/// Implemented by [`ObstacleMap`] and by any `Fn(Cell) -> bool` closure
/// returning `true` for blocked cells.
pub trait Occupancy {
    /// Is the cell impassable?
    fn is_blocked(&self, cell: Cell) -> bool;

    /// Is the cell inside the traversable region?
    ///
    /// Used only to tell out-of-bounds endpoints apart from blocked ones.
    fn in_bounds(&self, _cell: Cell) -> bool {
        true
    }
}

impl<F> Occupancy for F
where
    F: Fn(Cell) -> bool,
{
    #[inline]
    fn is_blocked(&self, cell: Cell) -> bool {
        self(cell)
    }
}
