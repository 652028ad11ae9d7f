//! Core types shared by the obstacle map, the search and the follower.
//!
//! ## Coordinates
//! - [`Cell`]: integer lattice coordinate, the key the search reasons about
//! - [`WorldPoint`]: continuous world position the agent moves through
//! - [`CoordinateQuantizer`]: world ⇄ lattice mapping at a configurable step
//! - [`GridBounds`]: optional inclusive rectangle of traversable cells
//!
//! ```rust
//! use marga::core::{CoordinateQuantizer, WorldPoint, Cell};
//!
//! let q = CoordinateQuantizer::new(0.5);
//! assert_eq!(q.to_cell(WorldPoint::new(1.1, -0.9)), Cell::new(2, -2));
//! ```

mod bounds;
mod point;
mod quantize;

pub use bounds::GridBounds;
pub use point::{Cell, WorldPoint};
pub use quantize::{CoordinateQuantizer, to_cell, to_world};
