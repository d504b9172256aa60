//! Public data models for a finished generation pass.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use super::bitmask::{FloorCategory, WallCategory};
use super::grid::Bounds;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Exit,
    Item(String),
    Enemy(String),
    Tree(String),
    Merchant,
    WoundedKnight,
    Altar,
}

impl FeatureKind {
    fn code(&self) -> u8 {
        match self {
            FeatureKind::Exit => 0,
            FeatureKind::Item(_) => 1,
            FeatureKind::Enemy(_) => 2,
            FeatureKind::Tree(_) => 3,
            FeatureKind::Merchant => 4,
            FeatureKind::WoundedKnight => 5,
            FeatureKind::Altar => 6,
        }
    }

    fn prefab(&self) -> Option<&str> {
        match self {
            FeatureKind::Item(key) | FeatureKind::Enemy(key) | FeatureKind::Tree(key) => {
                Some(key)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedFeature {
    pub kind: FeatureKind,
    pub pos: Pos,
}

/// Chosen spawn coordinates of the unique features, read by tree placement.
/// `None` means the placement was skipped this pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueSpots {
    pub merchant: Option<Pos>,
    pub wounded_knight: Option<Pos>,
    pub altar: Option<Pos>,
}

/// Diagnostic tallies a host can surface in logs or debug overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub walk_floor_count: usize,
    pub lonely_walls_removed: usize,
    pub repair_passes: usize,
    pub trees_checked: usize,
    pub trees_spawned: usize,
    pub trees_skipped_near_unique: usize,
    pub trees_skipped_wall_adjacent: usize,
    pub trees_skipped_no_wall_nearby: usize,
    pub trees_skipped_roll: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRecord {
    pub pos: Pos,
    pub category: FloorCategory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallRecord {
    pub pos: Pos,
    pub bitmask: u8,
    pub category: WallCategory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedForest {
    /// Live floor cells in insertion order. The exit's cell is absent when an
    /// exit door was placed.
    pub floors: Vec<FloorRecord>,
    /// Remaining walls in ascending `(y, x)` order with their cached
    /// classification.
    pub walls: Vec<WallRecord>,
    pub bounds: Bounds,
    pub player_spawn: Pos,
    pub exit: Option<Pos>,
    pub features: Vec<PlacedFeature>,
    pub uniques: UniqueSpots,
    pub stats: GenerationStats,
}

impl GeneratedForest {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend((self.floors.len() as u32).to_le_bytes());
        for floor in &self.floors {
            push_pos(&mut bytes, floor.pos);
            bytes.push(floor.category.code());
        }

        bytes.extend((self.walls.len() as u32).to_le_bytes());
        for wall in &self.walls {
            push_pos(&mut bytes, wall.pos);
            bytes.push(wall.bitmask);
            bytes.push(wall.category.code());
        }

        push_pos(&mut bytes, self.player_spawn);
        push_optional_pos(&mut bytes, self.exit);

        bytes.extend((self.features.len() as u32).to_le_bytes());
        for feature in &self.features {
            bytes.push(feature.kind.code());
            let prefab = feature.kind.prefab().unwrap_or("");
            bytes.extend((prefab.len() as u32).to_le_bytes());
            bytes.extend(prefab.as_bytes());
            push_pos(&mut bytes, feature.pos);
        }

        push_optional_pos(&mut bytes, self.uniques.merchant);
        push_optional_pos(&mut bytes, self.uniques.wounded_knight);
        push_optional_pos(&mut bytes, self.uniques.altar);

        bytes
    }

    /// Stable layout fingerprint for cross-run comparisons.
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub fn floor_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.floors.iter().map(|floor| floor.pos)
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

fn push_optional_pos(bytes: &mut Vec<u8>, pos: Option<Pos>) {
    match pos {
        Some(pos) => {
            bytes.push(1);
            push_pos(bytes, pos);
        }
        None => bytes.push(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_forest() -> GeneratedForest {
        GeneratedForest {
            floors: vec![FloorRecord { pos: Pos::ORIGIN, category: FloorCategory::Edge(0) }],
            walls: vec![WallRecord {
                pos: Pos { y: 1, x: 0 },
                bitmask: 4,
                category: WallCategory::Edge(4),
            }],
            bounds: Bounds::default(),
            player_spawn: Pos::ORIGIN,
            exit: None,
            features: Vec::new(),
            uniques: UniqueSpots::default(),
            stats: GenerationStats::default(),
        }
    }

    #[test]
    fn fingerprint_is_stable_for_equal_values() {
        let a = minimal_forest();
        let b = minimal_forest();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn canonical_bytes_change_when_a_feature_is_added() {
        let base = minimal_forest();
        let mut extended = minimal_forest();
        extended.features.push(PlacedFeature {
            kind: FeatureKind::Item("item_healing_salve".to_string()),
            pos: Pos::ORIGIN,
        });
        assert_ne!(base.canonical_bytes(), extended.canonical_bytes());
    }

    #[test]
    fn canonical_bytes_distinguish_prefab_keys() {
        let mut a = minimal_forest();
        a.features.push(PlacedFeature {
            kind: FeatureKind::Tree("tree_birch".to_string()),
            pos: Pos::ORIGIN,
        });
        let mut b = minimal_forest();
        b.features.push(PlacedFeature {
            kind: FeatureKind::Tree("tree_dead_pine".to_string()),
            pos: Pos::ORIGIN,
        });
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn model_round_trips_through_json() {
        let forest = minimal_forest();
        let json = serde_json::to_string(&forest).expect("forest should serialize");
        let parsed: GeneratedForest =
            serde_json::from_str(&json).expect("forest should deserialize");
        assert_eq!(parsed, forest);
    }
}
