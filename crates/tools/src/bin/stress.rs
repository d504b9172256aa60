use std::collections::BTreeSet;

use anyhow::Result;
use clap::Parser;
use forest_core::types::euclidean;
use forest_core::{
    BAD_WALL_BITMASKS, FeatureKind, ForestConfig, Pos, WalkStrategy, generate_forest,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 25)]
    runs: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Starting stress harness: {} runs from seed {}...", args.runs, args.seed);

    for offset in 0..args.runs {
        let seed = args.seed.wrapping_add(offset);
        for strategy in [WalkStrategy::Caverns, WalkStrategy::Rooms, WalkStrategy::Winding] {
            let config =
                ForestConfig { strategy, total_floor_count: 300, ..ForestConfig::default() };
            let forest = generate_forest(seed, &config);
            let replay = generate_forest(seed, &config);
            assert_eq!(
                forest.fingerprint(),
                replay.fingerprint(),
                "Invariant failed: replay diverged (seed {seed}, {strategy:?})"
            );

            let floors: BTreeSet<Pos> = forest.floor_positions().collect();
            for wall in &forest.walls {
                assert!(
                    !BAD_WALL_BITMASKS.contains(&wall.bitmask),
                    "Invariant failed: bad wall bitmask survived (seed {seed}, {strategy:?})"
                );
                assert!(
                    !floors.contains(&wall.pos),
                    "Invariant failed: cell is both floor and wall (seed {seed})"
                );
            }

            for feature in &forest.features {
                match feature.kind {
                    FeatureKind::Exit => assert!(
                        !floors.contains(&feature.pos),
                        "Invariant failed: exit cell still walkable (seed {seed})"
                    ),
                    _ => assert!(
                        floors.contains(&feature.pos),
                        "Invariant failed: feature off the floor (seed {seed})"
                    ),
                }
            }

            let uniques: Vec<Pos> =
                [forest.uniques.merchant, forest.uniques.wounded_knight, forest.uniques.altar]
                    .into_iter()
                    .flatten()
                    .collect();
            for feature in &forest.features {
                if matches!(feature.kind, FeatureKind::Tree(_)) {
                    for &unique in &uniques {
                        assert!(
                            euclidean(feature.pos, unique) >= 5.0,
                            "Invariant failed: tree crowds a unique feature (seed {seed})"
                        );
                    }
                }
            }

            // Caverns may legitimately stop at the attempt cap.
            if strategy != WalkStrategy::Caverns {
                assert!(
                    forest.stats.walk_floor_count >= 300,
                    "Invariant failed: walk stopped short (seed {seed}, {strategy:?})"
                );
            }
        }
    }

    println!("Stress run completed successfully.");
    Ok(())
}
