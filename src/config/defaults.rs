//! Default value functions for serde deserialization.

use crate::pathfinding::Connectivity;

pub fn step() -> f32 {
    1.0
}

pub fn grid_size() -> u32 {
    20
}

pub fn closed_chance() -> f32 {
    0.2
}

pub fn connectivity() -> Connectivity {
    Connectivity::Eight
}

pub fn max_iterations() -> usize {
    10_000
}

pub fn move_speed() -> f32 {
    10.0
}

pub fn arrival_tolerance() -> f32 {
    0.01
}

pub fn fixed_timestep() -> f32 {
    0.02
}
