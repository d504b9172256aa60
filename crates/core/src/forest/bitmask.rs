//! Neighbor bitmask computation and tile category resolution.
//!
//! The bitmask encodes which cardinal neighbors are floor: up = 1, right = 2,
//! down = 4, left = 8. Resolution order is contractual: the diagonal
//! outer-corner override at mask 0 wins before any edge lookup, and floor
//! tiles additionally try the middle-corner L-patterns before falling back.

use serde::{Deserialize, Serialize};

use super::grid::GridIndex;
use crate::types::Pos;

/// Wall configurations that read as topologically broken and get repaired.
/// Tuned by inspection; kept as a literal set on purpose.
pub const BAD_WALL_BITMASKS: [u8; 7] = [5, 7, 10, 11, 13, 14, 15];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallCategory {
    Edge(u8),
    OuterCornerTopLeft,
    OuterCornerTopRight,
    OuterCornerBottomLeft,
    OuterCornerBottomRight,
}

impl WallCategory {
    pub fn code(self) -> u8 {
        match self {
            WallCategory::Edge(mask) => mask,
            WallCategory::OuterCornerTopLeft => 16,
            WallCategory::OuterCornerTopRight => 17,
            WallCategory::OuterCornerBottomLeft => 18,
            WallCategory::OuterCornerBottomRight => 19,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloorCategory {
    Edge(u8),
    OuterCornerTopLeft,
    OuterCornerTopRight,
    OuterCornerBottomLeft,
    OuterCornerBottomRight,
    MidCornerTop,
    MidCornerRight,
    MidCornerBottom,
    MidCornerLeft,
}

impl FloorCategory {
    pub fn code(self) -> u8 {
        match self {
            FloorCategory::Edge(mask) => mask,
            FloorCategory::OuterCornerTopLeft => 16,
            FloorCategory::OuterCornerTopRight => 17,
            FloorCategory::OuterCornerBottomLeft => 18,
            FloorCategory::OuterCornerBottomRight => 19,
            FloorCategory::MidCornerTop => 20,
            FloorCategory::MidCornerRight => 21,
            FloorCategory::MidCornerBottom => 22,
            FloorCategory::MidCornerLeft => 23,
        }
    }
}

pub fn cardinal_bitmask(grid: &GridIndex, pos: Pos) -> u8 {
    let mut mask = 0;
    if grid.is_floor(pos.up()) {
        mask += 1;
    }
    if grid.is_floor(pos.right()) {
        mask += 2;
    }
    if grid.is_floor(pos.down()) {
        mask += 4;
    }
    if grid.is_floor(pos.left()) {
        mask += 8;
    }
    mask
}

pub fn is_bad_wall_bitmask(mask: u8) -> bool {
    BAD_WALL_BITMASKS.contains(&mask)
}

/// Fully isolated walls check their diagonals for floor before settling on
/// the plain edge category. First match wins, in fixed order.
pub fn classify_wall(grid: &GridIndex, pos: Pos) -> WallCategory {
    let mask = cardinal_bitmask(grid, pos);
    if mask == 0 {
        if grid.is_floor(pos.up().left()) {
            return WallCategory::OuterCornerTopLeft;
        }
        if grid.is_floor(pos.up().right()) {
            return WallCategory::OuterCornerTopRight;
        }
        if grid.is_floor(pos.down().left()) {
            return WallCategory::OuterCornerBottomLeft;
        }
        if grid.is_floor(pos.down().right()) {
            return WallCategory::OuterCornerBottomRight;
        }
    }
    WallCategory::Edge(mask)
}

/// Floor tiles resolve outer corners first (mask 0 only), then the
/// middle-corner L-patterns, then the plain edge lookup.
pub fn classify_floor(grid: &GridIndex, pos: Pos) -> FloorCategory {
    let mask = cardinal_bitmask(grid, pos);
    if mask == 0 {
        if grid.is_floor(pos.up().left()) {
            return FloorCategory::OuterCornerTopLeft;
        }
        if grid.is_floor(pos.up().right()) {
            return FloorCategory::OuterCornerTopRight;
        }
        if grid.is_floor(pos.down().left()) {
            return FloorCategory::OuterCornerBottomLeft;
        }
        if grid.is_floor(pos.down().right()) {
            return FloorCategory::OuterCornerBottomRight;
        }
    }

    if let Some(middle) = middle_corner(grid, pos) {
        return middle;
    }

    FloorCategory::Edge(mask)
}

fn middle_corner(grid: &GridIndex, pos: Pos) -> Option<FloorCategory> {
    let up = grid.is_floor(pos.up());
    let down = grid.is_floor(pos.down());
    let left = grid.is_floor(pos.left());
    let right = grid.is_floor(pos.right());

    let up_left = grid.is_floor(pos.up().left());
    let up_right = grid.is_floor(pos.up().right());
    let down_left = grid.is_floor(pos.down().left());
    let down_right = grid.is_floor(pos.down().right());

    if !up && up_left && up_right {
        return Some(FloorCategory::MidCornerTop);
    }
    if !right && up_right && down_right {
        return Some(FloorCategory::MidCornerRight);
    }
    if !down && down_left && down_right {
        return Some(FloorCategory::MidCornerBottom);
    }
    if !left && up_left && down_left {
        return Some(FloorCategory::MidCornerLeft);
    }
    None
}
