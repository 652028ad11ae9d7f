//! Lattice and world coordinate types.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Lattice cell (integer coordinates on the search grid).
///
/// A cell has no size of its own; the world-space size of one cell is the
/// step of the [`CoordinateQuantizer`](super::CoordinateQuantizer) it was
/// produced by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl Cell {
    /// Create a new cell
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another cell, in lattice units
    #[inline]
    pub fn distance(&self, other: &Cell) -> f32 {
        // Widened so cells at opposite ends of the i32 range don't overflow
        let dx = (i64::from(self.x) - i64::from(other.x)) as f32;
        let dy = (i64::from(self.y) - i64::from(other.y)) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Step by `offset`, or `None` when a coordinate would leave the i32 range.
    #[inline]
    pub fn checked_add(self, offset: Cell) -> Option<Cell> {
        Some(Cell::new(
            self.x.checked_add(offset.x)?,
            self.y.checked_add(offset.y)?,
        ))
    }

    /// Length of this cell read as an offset vector
    #[inline]
    pub fn length(&self) -> f32 {
        self.distance(&Cell::new(0, 0))
    }
}

impl Add for Cell {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Cell::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Cell {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Cell::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// World coordinates (continuous, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Move towards `target` by at most `max_delta`.
    ///
    /// Lands exactly on `target` when it is within reach, so repeated calls
    /// never overshoot.
    pub fn move_towards(&self, target: WorldPoint, max_delta: f32) -> WorldPoint {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist <= max_delta || dist == 0.0 {
            return target;
        }

        let scale = max_delta.max(0.0) / dist;
        WorldPoint::new(self.x + dx * scale, self.y + dy * scale)
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}
