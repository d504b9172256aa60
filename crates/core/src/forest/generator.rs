//! The end-to-end generation pipeline.
//!
//! One seeded RNG drives every stage in a fixed order, so a `(seed, config)`
//! pair always yields the same forest: grow floors, synthesize walls, repair
//! lonely walls, classify, then place features.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use super::bitmask::classify_floor;
use super::config::ForestConfig;
use super::features::FeaturePlacer;
use super::grid::GridIndex;
use super::model::{FloorRecord, GeneratedForest, GenerationStats, WallRecord};
use super::{walker, walls};
use crate::types::Pos;

pub struct ForestGenerator {
    seed: u64,
    config: ForestConfig,
}

impl ForestGenerator {
    /// Normalizes the config up front; the stored copy is what every stage
    /// sees.
    pub fn new(seed: u64, config: ForestConfig) -> Self {
        Self { seed, config: config.effective() }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn generate(&self) -> GeneratedForest {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut grid = GridIndex::new();

        walker::grow(&mut grid, &mut rng, &self.config);

        // Anchors are fixed before walls exist: the exit goes where the walk
        // ended, the player starts where it began.
        let exit_anchor = grid.last_inserted_floor().unwrap_or(Pos::ORIGIN);
        let player_spawn = grid.floor_order().first().copied().unwrap_or(Pos::ORIGIN);

        let mut stats = GenerationStats { walk_floor_count: grid.floor_count(), ..Default::default() };

        walls::synthesize_walls(&mut grid);
        if self.config.fix_lonely_walls {
            let outcome = walls::repair_lonely_walls(&mut grid);
            stats.lonely_walls_removed = outcome.removed;
            stats.repair_passes = outcome.passes;
            // Repair invalidates cached wall bitmasks.
            walls::classify_walls(&mut grid);
        }

        let mut placer =
            FeaturePlacer::new(&mut grid, &mut rng, &self.config, exit_anchor, player_spawn, stats);
        placer.place_all();
        let output = placer.finish();

        let floors = grid
            .live_floors()
            .map(|pos| FloorRecord { pos, category: classify_floor(&grid, pos) })
            .collect();
        let walls = grid
            .walls()
            .map(|(pos, tile)| WallRecord { pos, bitmask: tile.bitmask, category: tile.category })
            .collect();

        GeneratedForest {
            floors,
            walls,
            bounds: grid.bounds(),
            player_spawn,
            exit: output.exit,
            features: output.features,
            uniques: output.uniques,
            stats: output.stats,
        }
    }
}
