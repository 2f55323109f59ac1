//! Example: Generate a tectonic planet
//!
//! Runs the full pipeline and prints tile, plate and terrain statistics.
//! Set `RUST_LOG=debug` to see per-stage timings.

use std::collections::BTreeMap;

use clap::{Parser, ValueEnum};
use tectonic_planet::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAlgorithm {
    #[value(name = "golden")]
    Golden,
    #[value(name = "fibonacci")]
    Fibonacci,
}

impl From<CliAlgorithm> for AlgorithmVariant {
    fn from(value: CliAlgorithm) -> Self {
        match value {
            CliAlgorithm::Golden => AlgorithmVariant::Golden,
            CliAlgorithm::Fibonacci => AlgorithmVariant::Fibonacci,
        }
    }
}

/// Generate a planet and summarize it
#[derive(Parser, Debug)]
#[command(name = "generate_planet", version, about)]
struct Cli {
    /// Number of tiles
    #[arg(long, default_value_t = 4000)]
    tiles: usize,

    /// Number of tectonic plates
    #[arg(long, default_value_t = 12)]
    plates: usize,

    /// Point jitter in [0, 1]
    #[arg(long, default_value_t = 0.5)]
    jitter: f64,

    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Spiral variant for point sampling
    #[arg(long, value_enum, default_value_t = CliAlgorithm::Golden)]
    algorithm: CliAlgorithm,

    /// Planet radius in km
    #[arg(long, default_value_t = tectonic_planet::config::EARTH_RADIUS_KM)]
    radius: f64,

    /// Generate on the background worker thread
    #[arg(long)]
    background: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut builder = PlanetConfigBuilder::new()
        .tile_count(cli.tiles)?
        .plate_count(cli.plates)?
        .jitter(cli.jitter)?
        .algorithm(cli.algorithm.into())
        .radius(cli.radius)?;
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let config = builder.build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Tiles: {}", config.tile_count);
    println!("  Plates: {}", config.plate_count);
    println!("  Jitter: {}", config.jitter);
    println!("  Algorithm: {:?}", config.algorithm);
    println!("  Radius: {} km", config.radius);
    println!();

    let planet = if cli.background {
        let mut worker = PlanetWorker::spawn()?;
        worker.submit(config)?;
        worker.wait()?
    } else {
        std::sync::Arc::new(Planet::generate(config)?)
    };

    let stats = planet.stats();
    println!("Geometry:");
    println!("  Triangles: {} (stitched: {})", stats.triangle_count, stats.hull_stitched);
    let avg_neighbors = planet.tiles().iter().map(|t| t.neighbor_count()).sum::<usize>() as f64
        / planet.tile_count() as f64;
    println!("  Average neighbors per tile: {:.2}", avg_neighbors);
    let area_error = (planet.total_area() - config.surface_area()) / config.surface_area();
    println!("  Total area: {:.0} km² ({:+.4}% vs sphere)", planet.total_area(), area_error * 100.0);
    println!();

    println!("Plates:");
    for plate in planet.plates() {
        println!(
            "  Plate {:>2}: {:>5} tiles, {}, base elevation {:+.2}",
            plate.id,
            planet.plate_members(plate.id).len(),
            if plate.is_oceanic { "oceanic    " } else { "continental" },
            plate.base_elevation
        );
    }
    println!();

    let mut terrain_counts: BTreeMap<u8, usize> = BTreeMap::new();
    for tile in planet.tiles() {
        *terrain_counts.entry(tile.terrain.id()).or_insert(0) += 1;
    }
    println!("Terrain distribution:");
    for (id, count) in terrain_counts {
        let name = TerrainType::from_id(id).map(TerrainType::name).unwrap_or("?");
        let pct = count as f64 / planet.tile_count() as f64 * 100.0;
        println!("  {:<11} {:>6} ({:.1}%)", name, count, pct);
    }
    println!();

    println!("Warnings:");
    println!("  Degenerate tiles: {}", stats.degenerate_tiles);
    println!("  Unassigned tiles: {}", stats.unassigned_tiles);
    println!("  Terrain fallbacks: {}", stats.terrain_fallbacks);

    Ok(())
}
