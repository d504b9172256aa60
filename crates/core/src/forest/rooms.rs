//! Blob stamping used by the room-based walk strategies.

use rand_chacha::ChaCha8Rng;

use super::config::RoomShape;
use super::grid::GridIndex;
use super::random::{range_i32, unit_f32};
use crate::types::Pos;

/// How far the per-cell wobble can push the circular boundary either way.
const BOUNDARY_NOISE: f32 = 0.5;

/// Stamps a room centered at `center`. The radius is re-rolled from [4, 7)
/// on every call, and circular rooms resample their boundary noise per cell,
/// which is what gives them their jagged organic edge.
pub(super) fn stamp_room(grid: &mut GridIndex, rng: &mut ChaCha8Rng, center: Pos, shape: RoomShape) {
    let base_radius = range_i32(rng, 4, 7);

    for x in -(base_radius + 1)..=(base_radius + 1) {
        for y in -(base_radius + 1)..=(base_radius + 1) {
            let distance = ((x * x + y * y) as f32).sqrt();
            let wobble = unit_f32(rng) * (2.0 * BOUNDARY_NOISE) - BOUNDARY_NOISE;
            let adjusted_radius = base_radius as f32 + wobble;

            if shape == RoomShape::Circular && distance > adjusted_radius {
                continue;
            }

            grid.insert_floor(center.offset(y, x));
        }
    }
}
