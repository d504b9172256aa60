//! Immutable configuration for one generation pass.

use serde::{Deserialize, Serialize};

use crate::content;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WalkStrategy {
    Caverns,
    Rooms,
    Winding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HallwayWidth {
    Narrow,
    Medium,
    Wide,
}

impl HallwayWidth {
    /// Perpendicular cell offsets carved on each hike step. Width 2 is
    /// deliberately one-sided.
    pub fn offsets(self) -> &'static [i32] {
        match self {
            HallwayWidth::Narrow => &[0],
            HallwayWidth::Medium => &[0, 1],
            HallwayWidth::Wide => &[-1, 0, 1],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomShape {
    Square,
    Circular,
}

/// Everything the host hands the generator for one pass. Cloned and
/// normalized by the generator; never mutated mid-pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub strategy: WalkStrategy,
    pub total_floor_count: usize,
    pub item_spawn_percent: i32,
    pub enemy_spawn_percent: i32,
    pub tree_spawn_percent: i32,
    pub winding_hall_percent: i32,
    pub hallway_width: HallwayWidth,
    pub use_hallway_width: bool,
    pub room_shape: RoomShape,
    pub persistent_direction: bool,
    pub start_in_room: bool,
    pub fix_lonely_walls: bool,
    pub place_exit_door: bool,
    pub spawn_items: bool,
    pub spawn_enemies: bool,
    pub spawn_trees: bool,
    pub item_prefabs: Vec<String>,
    pub enemy_prefabs: Vec<String>,
    pub tree_prefabs: Vec<String>,
    pub merchant_prefab: Option<String>,
    pub wounded_knight_prefab: Option<String>,
    pub altar_prefab: Option<String>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            strategy: WalkStrategy::Rooms,
            total_floor_count: 400,
            item_spawn_percent: 10,
            enemy_spawn_percent: 10,
            tree_spawn_percent: 40,
            winding_hall_percent: 50,
            hallway_width: HallwayWidth::Narrow,
            use_hallway_width: true,
            room_shape: RoomShape::Square,
            persistent_direction: true,
            start_in_room: true,
            fix_lonely_walls: true,
            place_exit_door: true,
            spawn_items: true,
            spawn_enemies: true,
            spawn_trees: true,
            item_prefabs: content::default_item_prefabs(),
            enemy_prefabs: content::default_enemy_prefabs(),
            tree_prefabs: content::default_tree_prefabs(),
            merchant_prefab: Some(content::keys::NPC_MERCHANT.to_string()),
            wounded_knight_prefab: Some(content::keys::NPC_WOUNDED_KNIGHT.to_string()),
            altar_prefab: Some(content::keys::ALTAR_SACRIFICIAL.to_string()),
        }
    }
}

impl ForestConfig {
    /// Applies the strategy overrides that are part of the walker contract:
    /// caverns always re-roll direction per step, never widen hallways, and
    /// never start inside a stamped room.
    pub fn effective(&self) -> ForestConfig {
        let mut config = self.clone();
        if config.strategy == WalkStrategy::Caverns {
            config.use_hallway_width = false;
            config.persistent_direction = false;
            config.start_in_room = false;
        }
        config
    }
}
