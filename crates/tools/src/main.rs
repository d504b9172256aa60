use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use forest_core::{FeatureKind, ForestConfig, GeneratedForest, Pos, generate_forest};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the generation RNG
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Path to a JSON config file; omitted fields fall back to defaults
    #[arg(short, long)]
    config: Option<String>,
    /// Write the full generated forest as pretty JSON to this path
    #[arg(short, long)]
    report: Option<String>,
    /// Print an ASCII preview of the layout
    #[arg(short, long)]
    preview: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let forest = generate_forest(args.seed, &config);

    println!("Generation complete.");
    println!("Seed: {}", args.seed);
    println!("Floors: {}", forest.floors.len());
    println!("Walls: {}", forest.walls.len());
    println!("Features: {}", forest.features.len());
    println!(
        "Lonely walls removed: {} over {} passes",
        forest.stats.lonely_walls_removed, forest.stats.repair_passes
    );
    println!("Fingerprint: {:016x}", forest.fingerprint());

    if args.preview {
        print!("{}", render_preview(&forest));
    }

    if let Some(path) = &args.report {
        let report = serde_json::to_string_pretty(&forest)
            .with_context(|| "Failed to serialize the forest report")?;
        fs::write(path, report).with_context(|| format!("Failed to write report: {path}"))?;
        println!("Report written to {path}");
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<ForestConfig> {
    match path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            serde_json::from_str(&data).with_context(|| "Failed to deserialize config JSON")
        }
        None => Ok(ForestConfig::default()),
    }
}

/// Rows print top-down since positive `y` is up in the layout.
fn render_preview(forest: &GeneratedForest) -> String {
    let mut glyphs: BTreeMap<Pos, char> = BTreeMap::new();
    for floor in &forest.floors {
        glyphs.insert(floor.pos, '.');
    }
    for wall in &forest.walls {
        glyphs.insert(wall.pos, '#');
    }
    for feature in &forest.features {
        let glyph = match &feature.kind {
            FeatureKind::Exit => 'E',
            FeatureKind::Item(_) => 'i',
            FeatureKind::Enemy(_) => 'e',
            FeatureKind::Tree(_) => 'T',
            FeatureKind::Merchant => 'M',
            FeatureKind::WoundedKnight => 'K',
            FeatureKind::Altar => 'A',
        };
        glyphs.insert(feature.pos, glyph);
    }
    glyphs.insert(forest.player_spawn, '@');

    let bounds = forest.bounds;
    let mut out = String::new();
    for y in ((bounds.min_y - 1)..=(bounds.max_y + 1)).rev() {
        for x in (bounds.min_x - 1)..=(bounds.max_x + 1) {
            out.push(glyphs.get(&Pos { y, x }).copied().unwrap_or(' '));
        }
        out.push('\n');
    }
    out
}
