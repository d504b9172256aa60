//! The single authoritative tile index for a generation pass.
//!
//! Floors keep their insertion order (the last walker-inserted coordinate is
//! the designated exit location), walls carry their cached classification,
//! and bounds grow incrementally as floors are realized.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::bitmask::WallCategory;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Floor,
    Wall,
}

/// Running extent over every floor coordinate ever realized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    fn expand(&mut self, pos: Pos) {
        if pos.x < self.min_x {
            self.min_x = pos.x;
        }
        if pos.x > self.max_x {
            self.max_x = pos.x;
        }
        if pos.y < self.min_y {
            self.min_y = pos.y;
        }
        if pos.y > self.max_y {
            self.max_y = pos.y;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallTile {
    pub bitmask: u8,
    pub category: WallCategory,
}

#[derive(Clone, Debug, Default)]
pub struct GridIndex {
    floors: HashSet<Pos>,
    // Full insertion history; `floors` is the live membership set. Walls use
    // an ordered map so every scan is deterministic for a fixed seed.
    floor_order: Vec<Pos>,
    walls: BTreeMap<Pos, WallTile>,
    bounds: Bounds,
}

impl GridIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a floor cell unless one was ever recorded there. Returns
    /// whether the set grew.
    pub fn insert_floor(&mut self, pos: Pos) -> bool {
        if !self.floors.insert(pos) {
            return false;
        }
        self.floor_order.push(pos);
        self.bounds.expand(pos);
        true
    }

    /// Drops a floor cell from the live membership set. Its history entry
    /// stays, so "last inserted" remains answerable.
    pub fn remove_floor(&mut self, pos: Pos) -> bool {
        self.floors.remove(&pos)
    }

    pub fn insert_wall(&mut self, pos: Pos) {
        debug_assert_eq!(self.kind(pos), CellKind::Empty);
        self.walls.insert(pos, WallTile { bitmask: 0, category: WallCategory::Edge(0) });
    }

    pub fn remove_wall(&mut self, pos: Pos) -> bool {
        self.walls.remove(&pos).is_some()
    }

    pub fn set_wall_class(&mut self, pos: Pos, bitmask: u8, category: WallCategory) {
        if let Some(tile) = self.walls.get_mut(&pos) {
            tile.bitmask = bitmask;
            tile.category = category;
        }
    }

    pub fn kind(&self, pos: Pos) -> CellKind {
        if self.floors.contains(&pos) {
            CellKind::Floor
        } else if self.walls.contains_key(&pos) {
            CellKind::Wall
        } else {
            CellKind::Empty
        }
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.floors.contains(&pos)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls.contains_key(&pos)
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Every coordinate ever inserted, in insertion order, including cells
    /// later removed (e.g. the exit).
    pub fn floor_order(&self) -> &[Pos] {
        &self.floor_order
    }

    /// Live floor cells in insertion order.
    pub fn live_floors(&self) -> impl Iterator<Item = Pos> + '_ {
        self.floor_order.iter().copied().filter(|pos| self.floors.contains(pos))
    }

    pub fn last_inserted_floor(&self) -> Option<Pos> {
        self.floor_order.last().copied()
    }

    /// Wall coordinates in ascending `(y, x)` order.
    pub fn wall_positions(&self) -> Vec<Pos> {
        self.walls.keys().copied().collect()
    }

    pub fn walls(&self) -> impl Iterator<Item = (Pos, &WallTile)> + '_ {
        self.walls.iter().map(|(pos, tile)| (*pos, tile))
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}
