//! Wall synthesis around the floor set and the lonely-wall repair loop.

use super::bitmask::{cardinal_bitmask, classify_wall, is_bad_wall_bitmask};
use super::grid::{CellKind, GridIndex};
use crate::types::Pos;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct RepairOutcome {
    pub(super) removed: usize,
    pub(super) passes: usize,
}

/// Surrounds every floor cell with walls: each of the 8 neighbors that is
/// neither floor nor wall becomes a wall. Must complete before any
/// classification, which needs a stable floor/wall partition.
pub(super) fn synthesize_walls(grid: &mut GridIndex) {
    let floors: Vec<Pos> = grid.floor_order().to_vec();
    for pos in floors {
        fill_wall_ring(grid, pos);
    }
    classify_walls(grid);
}

fn fill_wall_ring(grid: &mut GridIndex, center: Pos) {
    for x in -1..=1 {
        for y in -1..=1 {
            let pos = center.offset(y, x);
            if grid.kind(pos) == CellKind::Empty {
                grid.insert_wall(pos);
            }
        }
    }
}

/// Removes walls whose live bitmask falls in the bad set, frees each cell
/// into floor, and rescans the whole wall set until a pass removes nothing.
/// Every pass recomputes bitmasks against the current partition; cached
/// values are never trusted here. Freed floors get their wall ring filled
/// inside the same pass so the fixpoint covers the new walls too.
pub(super) fn repair_lonely_walls(grid: &mut GridIndex) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();

    loop {
        let to_remove: Vec<Pos> = grid
            .wall_positions()
            .into_iter()
            .filter(|&pos| is_bad_wall_bitmask(cardinal_bitmask(grid, pos)))
            .collect();

        if to_remove.is_empty() {
            break;
        }
        outcome.passes += 1;

        for pos in to_remove {
            grid.remove_wall(pos);
            outcome.removed += 1;
            if grid.insert_floor(pos) {
                fill_wall_ring(grid, pos);
            }
        }
    }

    outcome
}

/// Recomputes the cached bitmask and category of every remaining wall.
/// Required after repair since removals change neighbors' bitmasks.
pub(super) fn classify_walls(grid: &mut GridIndex) {
    for pos in grid.wall_positions() {
        let mask = cardinal_bitmask(grid, pos);
        let category = classify_wall(grid, pos);
        grid.set_wall_class(pos, mask, category);
    }
}
