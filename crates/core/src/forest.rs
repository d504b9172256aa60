//! Procedural forest generation domain split into coherent submodules.

pub mod config;
pub mod model;

mod bitmask;
mod features;
mod generator;
mod grid;
mod random;
mod rooms;
mod walker;
mod walls;

pub use bitmask::{BAD_WALL_BITMASKS, FloorCategory, WallCategory};
pub use generator::ForestGenerator;
pub use grid::{Bounds, CellKind, GridIndex};

use config::ForestConfig;
use model::GeneratedForest;

pub fn generate_forest(seed: u64, config: &ForestConfig) -> GeneratedForest {
    ForestGenerator::new(seed, config.clone()).generate()
}
