//! Terrain generation module.
//!
//! Turns a smooth sphere into a planet surface by radial noise displacement.

mod former;
mod planet;

pub use former::{
    displacement, form_terrain, TerrainError,
    OCTAVES, HILL_PIVOT, DETAIL_FREQUENCY, MIN_RADIAL_SCALE,
};
pub use planet::Planet;
