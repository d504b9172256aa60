//! Feature placement over the finished floor/wall layout.
//!
//! Stages run in a fixed order because each one consumes RNG draws and later
//! stages read earlier results: exit, items, enemies, merchant, wounded
//! knight, altar, trees.

use std::collections::HashSet;

use rand_chacha::ChaCha8Rng;

use super::config::ForestConfig;
use super::grid::GridIndex;
use super::model::{FeatureKind, GenerationStats, PlacedFeature, UniqueSpots};
use super::random::{choose, percent_roll, range_i32};
use crate::types::{Pos, euclidean, manhattan};

/// Enemies never spawn within this manhattan distance of the player spawn.
const PLAYER_SAFE_RADIUS: u32 = 5;
/// Trees keep this much euclidean clearance around every unique feature.
const UNIQUE_SAFE_RADIUS: f32 = 5.0;
/// The wounded knight refuses to camp near the merchant.
const KNIGHT_MERCHANT_CLEARANCE: f32 = 16.0;
/// Altar candidates need a mostly-open square ring of this radius.
const ALTAR_RING_RADIUS: i32 = 4;
const ALTAR_RING_FILL: f32 = 0.9;

pub(super) struct PlacementOutput {
    pub(super) features: Vec<PlacedFeature>,
    pub(super) uniques: UniqueSpots,
    pub(super) exit: Option<Pos>,
    pub(super) stats: GenerationStats,
}

pub(super) struct FeaturePlacer<'a> {
    grid: &'a mut GridIndex,
    rng: &'a mut ChaCha8Rng,
    config: &'a ForestConfig,
    exit_anchor: Pos,
    player_spawn: Pos,
    occupied: HashSet<Pos>,
    features: Vec<PlacedFeature>,
    uniques: UniqueSpots,
    exit: Option<Pos>,
    stats: GenerationStats,
}

impl<'a> FeaturePlacer<'a> {
    pub(super) fn new(
        grid: &'a mut GridIndex,
        rng: &'a mut ChaCha8Rng,
        config: &'a ForestConfig,
        exit_anchor: Pos,
        player_spawn: Pos,
        stats: GenerationStats,
    ) -> Self {
        let mut occupied = HashSet::new();
        occupied.insert(player_spawn);
        Self {
            grid,
            rng,
            config,
            exit_anchor,
            player_spawn,
            occupied,
            features: Vec::new(),
            uniques: UniqueSpots::default(),
            exit: None,
            stats,
        }
    }

    pub(super) fn place_all(&mut self) {
        self.place_exit();
        self.place_items();
        self.place_enemies();
        self.place_merchant();
        self.place_wounded_knight();
        self.place_altar();
        self.place_trees();
    }

    pub(super) fn finish(self) -> PlacementOutput {
        PlacementOutput {
            features: self.features,
            uniques: self.uniques,
            exit: self.exit,
            stats: self.stats,
        }
    }

    fn record(&mut self, kind: FeatureKind, pos: Pos) {
        self.occupied.insert(pos);
        self.features.push(PlacedFeature { kind, pos });
    }

    /// The exit door lands on the last floor the walker inserted. Its cell
    /// leaves the live floor set so nothing else spawns on it.
    fn place_exit(&mut self) {
        if !self.config.place_exit_door {
            return;
        }
        let pos = self.exit_anchor;
        self.grid.remove_floor(pos);
        self.exit = Some(pos);
        self.record(FeatureKind::Exit, pos);
    }

    /// Scans the floor extent column by column. Item spots hug exactly one
    /// side of a wall: at least one cardinal wall, but never opposing pairs.
    fn place_items(&mut self) {
        if !self.config.spawn_items || self.config.item_prefabs.is_empty() {
            return;
        }

        let bounds = self.grid.bounds();
        for x in (bounds.min_x - 2)..=(bounds.max_x + 2) {
            for y in (bounds.min_y - 2)..=(bounds.max_y + 2) {
                let pos = Pos { y, x };
                if !self.grid.is_floor(pos) || pos == self.exit_anchor {
                    continue;
                }
                self.try_item_at(pos);
            }
        }
    }

    fn try_item_at(&mut self, pos: Pos) {
        if self.occupied.contains(&pos) {
            return;
        }

        let up = self.grid.is_wall(pos.up());
        let right = self.grid.is_wall(pos.right());
        let down = self.grid.is_wall(pos.down());
        let left = self.grid.is_wall(pos.left());

        let next_to_wall = up || right || down || left;
        let boxed_vertically = up && down;
        let boxed_horizontally = left && right;
        if !next_to_wall || boxed_vertically || boxed_horizontally {
            return;
        }

        if percent_roll(self.rng) > self.config.item_spawn_percent {
            return;
        }

        let key = choose(self.rng, &self.config.item_prefabs).clone();
        self.record(FeatureKind::Item(key), pos);
    }

    /// Enemies go on fully open cells away from the player spawn. The spawn
    /// count is a percentage of the candidate pool, drawn without
    /// replacement.
    fn place_enemies(&mut self) {
        if !self.config.spawn_enemies || self.config.enemy_prefabs.is_empty() {
            return;
        }

        let mut candidates = Vec::new();
        for pos in self.grid.live_floors() {
            if manhattan(pos, self.player_spawn) <= PLAYER_SAFE_RADIUS {
                continue;
            }
            let open = !self.grid.is_wall(pos.up())
                && !self.grid.is_wall(pos.right())
                && !self.grid.is_wall(pos.down())
                && !self.grid.is_wall(pos.left());
            if open {
                candidates.push(pos);
            }
        }

        let fraction = self.config.enemy_spawn_percent as f32 / 100.0;
        let spawn_count = (candidates.len() as f32 * fraction).round() as usize;

        for _ in 0..spawn_count {
            if candidates.is_empty() {
                break;
            }
            let index = range_i32(self.rng, 0, candidates.len() as i32) as usize;
            let pos = candidates.remove(index);
            let key = choose(self.rng, &self.config.enemy_prefabs).clone();
            self.record(FeatureKind::Enemy(key), pos);
        }
    }

    /// A merchant spot backs onto a wall on its left with open floor on its
    /// right, in the upper quarter of the layout's vertical extent.
    fn place_merchant(&mut self) {
        let bounds = self.grid.bounds();
        let midpoint = (bounds.min_y + bounds.max_y) as f32 / 2.0;
        let y_threshold = midpoint + (bounds.max_y as f32 - midpoint) * 0.5;

        let mut candidates = Vec::new();
        for pos in self.grid.live_floors() {
            if (pos.y as f32) >= y_threshold && self.backs_onto_wall(pos) {
                candidates.push(pos);
            }
        }
        if candidates.is_empty() || self.config.merchant_prefab.is_none() {
            return;
        }

        let pos = *choose(self.rng, &candidates);
        self.uniques.merchant = Some(pos);
        self.record(FeatureKind::Merchant, pos);
    }

    fn place_wounded_knight(&mut self) {
        let mut candidates = Vec::new();
        for pos in self.grid.live_floors() {
            if let Some(merchant) = self.uniques.merchant {
                if euclidean(pos, merchant) < KNIGHT_MERCHANT_CLEARANCE {
                    continue;
                }
            }
            if self.backs_onto_wall(pos) {
                candidates.push(pos);
            }
        }
        if candidates.is_empty() || self.config.wounded_knight_prefab.is_none() {
            return;
        }

        let pos = *choose(self.rng, &candidates);
        self.uniques.wounded_knight = Some(pos);
        self.record(FeatureKind::WoundedKnight, pos);
    }

    /// Wall immediately left, no floor beyond it, and open to the right.
    fn backs_onto_wall(&self, pos: Pos) -> bool {
        self.grid.is_wall(pos.left())
            && !self.grid.is_floor(pos.left().left())
            && !self.grid.is_wall(pos.right())
            && !self.occupied.contains(&pos)
    }

    /// The altar needs breathing room: the square ring at radius 4 must be
    /// at least 90% floor.
    fn place_altar(&mut self) {
        let mut candidates = Vec::new();
        for pos in self.grid.live_floors() {
            if !self.occupied.contains(&pos) && self.ring_mostly_floor(pos) {
                candidates.push(pos);
            }
        }
        if candidates.is_empty() || self.config.altar_prefab.is_none() {
            return;
        }

        let pos = *choose(self.rng, &candidates);
        self.uniques.altar = Some(pos);
        self.record(FeatureKind::Altar, pos);
    }

    fn ring_mostly_floor(&self, center: Pos) -> bool {
        let radius = ALTAR_RING_RADIUS;
        let ring_cells = (radius * 8) as f32;
        let mut hits = 0;
        for x in -radius..=radius {
            for y in -radius..=radius {
                if x.abs() != radius && y.abs() != radius {
                    continue;
                }
                if self.grid.is_floor(center.offset(y, x)) {
                    hits += 1;
                }
            }
        }
        hits as f32 >= ring_cells * ALTAR_RING_FILL
    }

    /// Trees fill the leftover floor: clear of every unique feature, not
    /// touching a wall, but with a wall two cells out in some cardinal
    /// direction so they stay near the layout's edges.
    fn place_trees(&mut self) {
        if !self.config.spawn_trees || self.config.tree_prefabs.is_empty() {
            return;
        }

        let floors: Vec<Pos> = self.grid.live_floors().collect();
        for pos in floors {
            self.stats.trees_checked += 1;

            if self.occupied.contains(&pos) {
                continue;
            }
            if self.near_unique(pos) {
                self.stats.trees_skipped_near_unique += 1;
                continue;
            }

            let wall_adjacent = self.grid.is_wall(pos.up())
                || self.grid.is_wall(pos.down())
                || self.grid.is_wall(pos.left())
                || self.grid.is_wall(pos.right());
            if wall_adjacent {
                self.stats.trees_skipped_wall_adjacent += 1;
                continue;
            }

            let wall_nearby = self.grid.is_wall(pos.offset(2, 0))
                || self.grid.is_wall(pos.offset(-2, 0))
                || self.grid.is_wall(pos.offset(0, 2))
                || self.grid.is_wall(pos.offset(0, -2));
            if !wall_nearby {
                self.stats.trees_skipped_no_wall_nearby += 1;
                continue;
            }

            if percent_roll(self.rng) > self.config.tree_spawn_percent {
                self.stats.trees_skipped_roll += 1;
                continue;
            }

            let key = choose(self.rng, &self.config.tree_prefabs).clone();
            self.stats.trees_spawned += 1;
            self.record(FeatureKind::Tree(key), pos);
        }
    }

    fn near_unique(&self, pos: Pos) -> bool {
        [self.uniques.merchant, self.uniques.altar, self.uniques.wounded_knight]
            .iter()
            .flatten()
            .any(|&unique| euclidean(pos, unique) < UNIQUE_SAFE_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::forest::walls::synthesize_walls;

    /// A solid `width` x `height` room anchored at the origin, walled in.
    fn room_grid(width: i32, height: i32) -> GridIndex {
        let mut grid = GridIndex::new();
        for y in 0..height {
            for x in 0..width {
                grid.insert_floor(Pos { y, x });
            }
        }
        synthesize_walls(&mut grid);
        grid
    }

    fn placer<'a>(
        grid: &'a mut GridIndex,
        rng: &'a mut ChaCha8Rng,
        config: &'a ForestConfig,
        exit_anchor: Pos,
        player_spawn: Pos,
    ) -> FeaturePlacer<'a> {
        FeaturePlacer::new(grid, rng, config, exit_anchor, player_spawn, GenerationStats::default())
    }

    fn features_of_kind(output: &PlacementOutput, matcher: fn(&FeatureKind) -> bool) -> Vec<Pos> {
        output
            .features
            .iter()
            .filter(|feature| matcher(&feature.kind))
            .map(|feature| feature.pos)
            .collect()
    }

    #[test]
    fn exit_door_frees_its_floor_cell() {
        let mut grid = room_grid(3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = ForestConfig::default();
        let anchor = Pos { y: 2, x: 2 };

        let mut placer = placer(&mut grid, &mut rng, &config, anchor, Pos::ORIGIN);
        placer.place_exit();
        let output = placer.finish();

        assert_eq!(output.exit, Some(anchor));
        assert!(!grid.is_floor(anchor));
    }

    #[test]
    fn items_avoid_cells_boxed_between_opposing_walls() {
        // A 1-wide corridor has walls above and below every cell, so no item
        // can ever land there even at 100%.
        let mut grid = GridIndex::new();
        for x in 0..5 {
            grid.insert_floor(Pos { y: 0, x });
        }
        synthesize_walls(&mut grid);

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = ForestConfig { item_spawn_percent: 100, ..ForestConfig::default() };
        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 9, x: 9 }, Pos::ORIGIN);
        placer.place_items();
        let output = placer.finish();

        assert!(output.features.is_empty());
    }

    #[test]
    fn items_fill_every_eligible_perimeter_cell_at_full_percent() {
        // In a 3x3 room only the 8 perimeter cells touch a wall; the player
        // spawn sits on the (ineligible) center and the exit anchor blocks
        // one corner.
        let mut grid = room_grid(3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = ForestConfig { item_spawn_percent: 100, ..ForestConfig::default() };
        let anchor = Pos { y: 2, x: 2 };

        let mut placer = placer(&mut grid, &mut rng, &config, anchor, Pos { y: 1, x: 1 });
        placer.place_items();
        let output = placer.finish();

        let items = features_of_kind(&output, |kind| matches!(kind, FeatureKind::Item(_)));
        assert_eq!(items.len(), 7);
        assert!(!items.contains(&anchor));
        assert!(!items.contains(&Pos { y: 1, x: 1 }));
    }

    #[test]
    fn enemies_only_take_fully_open_cells() {
        // The 3x3 room's single open cell is its center.
        let mut grid = room_grid(3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = ForestConfig { enemy_spawn_percent: 100, ..ForestConfig::default() };

        let far_spawn = Pos { y: 50, x: 50 };
        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 9, x: 9 }, far_spawn);
        placer.place_enemies();
        let output = placer.finish();

        let enemies = features_of_kind(&output, |kind| matches!(kind, FeatureKind::Enemy(_)));
        assert_eq!(enemies, vec![Pos { y: 1, x: 1 }]);
    }

    #[test]
    fn enemies_keep_their_distance_from_the_player_spawn() {
        let mut grid = room_grid(3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = ForestConfig { enemy_spawn_percent: 100, ..ForestConfig::default() };

        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 9, x: 9 }, Pos { y: 1, x: 1 });
        placer.place_enemies();
        let output = placer.finish();

        assert!(output.features.is_empty());
    }

    #[test]
    fn merchant_spawns_against_the_left_wall_in_the_upper_band() {
        let mut grid = room_grid(7, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let config = ForestConfig::default();

        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 9, x: 9 }, Pos { y: 50, x: 50 });
        placer.place_merchant();
        let output = placer.finish();

        let pos = output.uniques.merchant.expect("a 7x7 room has merchant spots");
        assert_eq!(pos.x, 0, "merchant backs onto the left wall");
        assert!(pos.y >= 5, "merchant stays in the upper quarter, got y {}", pos.y);
    }

    #[test]
    fn merchant_is_skipped_without_a_prefab() {
        let mut grid = room_grid(7, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let config = ForestConfig { merchant_prefab: None, ..ForestConfig::default() };

        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 9, x: 9 }, Pos { y: 50, x: 50 });
        placer.place_merchant();
        let output = placer.finish();

        assert_eq!(output.uniques.merchant, None);
        assert!(output.features.is_empty());
    }

    #[test]
    fn knight_refuses_to_spawn_near_the_merchant() {
        // Every wall-backed cell of a 7x7 room is within 16 of any other, so
        // once the merchant lands the knight has nowhere left.
        let mut grid = room_grid(7, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = ForestConfig::default();

        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 9, x: 9 }, Pos { y: 50, x: 50 });
        placer.place_merchant();
        placer.place_wounded_knight();
        let output = placer.finish();

        assert!(output.uniques.merchant.is_some());
        assert_eq!(output.uniques.wounded_knight, None);
    }

    #[test]
    fn knight_takes_a_wall_backed_spot_when_no_merchant_exists() {
        let mut grid = room_grid(7, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let config = ForestConfig { merchant_prefab: None, ..ForestConfig::default() };

        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 9, x: 9 }, Pos { y: 50, x: 50 });
        placer.place_merchant();
        placer.place_wounded_knight();
        let output = placer.finish();

        let pos = output.uniques.wounded_knight.expect("knight should spawn without a merchant");
        assert_eq!(pos.x, 0);
    }

    #[test]
    fn altar_requires_a_mostly_open_ring() {
        // 11x11 leaves exactly the center with a fully-floor radius-4 ring;
        // 7x7 has no cell with one.
        let mut small = room_grid(7, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = ForestConfig::default();
        let mut placer_small =
            placer(&mut small, &mut rng, &config, Pos { y: 9, x: 9 }, Pos { y: 50, x: 50 });
        placer_small.place_altar();
        assert_eq!(placer_small.finish().uniques.altar, None);

        let mut large = room_grid(11, 11);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut placer_large =
            placer(&mut large, &mut rng, &config, Pos { y: 50, x: 50 }, Pos { y: 50, x: 50 });
        placer_large.place_altar();
        let pos = placer_large.finish().uniques.altar.expect("11x11 room fits an altar ring");
        // Only centers whose radius-4 ring stays inside the room qualify.
        assert!((4..=6).contains(&pos.x) && (4..=6).contains(&pos.y), "altar at {pos:?}");
    }

    #[test]
    fn trees_stay_off_walls_but_near_them() {
        let mut grid = room_grid(11, 11);
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let config = ForestConfig { tree_spawn_percent: 100, ..ForestConfig::default() };

        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 50, x: 50 }, Pos { y: 50, x: 50 });
        placer.place_trees();
        let output = placer.finish();

        let trees = features_of_kind(&output, |kind| matches!(kind, FeatureKind::Tree(_)));
        assert!(!trees.is_empty());
        for pos in trees {
            let boundary_distance = [pos.x, 10 - pos.x, pos.y, 10 - pos.y]
                .into_iter()
                .min()
                .unwrap();
            assert_eq!(boundary_distance, 1, "tree at {pos:?} should sit one cell off the wall");
        }
        assert_eq!(output.stats.trees_checked, 121);
        assert_eq!(output.stats.trees_skipped_roll, 0);
    }

    #[test]
    fn trees_keep_clear_of_unique_features() {
        let mut grid = room_grid(11, 11);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = ForestConfig { tree_spawn_percent: 100, ..ForestConfig::default() };

        let unique = Pos { y: 1, x: 5 };
        let mut placer = placer(&mut grid, &mut rng, &config, Pos { y: 50, x: 50 }, Pos { y: 50, x: 50 });
        placer.uniques.merchant = Some(unique);
        placer.place_trees();
        let output = placer.finish();

        assert!(output.stats.trees_skipped_near_unique > 0);
        for feature in &output.features {
            if matches!(feature.kind, FeatureKind::Tree(_)) {
                assert!(euclidean(feature.pos, unique) >= UNIQUE_SAFE_RADIUS);
            }
        }
    }
}
