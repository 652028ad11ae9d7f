//! Rectangular obstacle descriptors.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;

fn default_active() -> bool {
    true
}

/// Axis-aligned rectangular obstacle in world space.
///
/// Shapes are owned by the caller and may be toggled between searches; the
/// obstacle map only reads a snapshot when it is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    /// Center of the rectangle
    pub center: WorldPoint,
    /// Half of the width (x) and height (y)
    pub half_extents: WorldPoint,
    /// Inactive shapes contribute no blocked cells
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ObstacleShape {
    /// Create an active obstacle.
    pub fn new(center: WorldPoint, half_extents: WorldPoint) -> Self {
        Self {
            center,
            half_extents: WorldPoint::new(half_extents.x.abs(), half_extents.y.abs()),
            active: true,
        }
    }

    /// Builder-style activity flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Top-left corner (min x, max y)
    pub fn top_left(&self) -> WorldPoint {
        WorldPoint::new(
            self.center.x - self.half_extents.x,
            self.center.y + self.half_extents.y,
        )
    }

    /// Top-right corner (max x, max y)
    pub fn top_right(&self) -> WorldPoint {
        WorldPoint::new(
            self.center.x + self.half_extents.x,
            self.center.y + self.half_extents.y,
        )
    }

    /// Bottom-left corner (min x, min y)
    pub fn bottom_left(&self) -> WorldPoint {
        WorldPoint::new(
            self.center.x - self.half_extents.x,
            self.center.y - self.half_extents.y,
        )
    }
}
