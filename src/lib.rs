//! Procedural tectonic planet generation
//!
//! Tessellates a sphere into irregular Voronoi tiles, partitions them into
//! tectonic plates, and derives elevation, moisture, temperature and a
//! terrain type for every tile. Generation is fully deterministic: the same
//! configuration always produces the same planet.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tectonic_planet::*;
//!
//! let config = PlanetConfigBuilder::new()
//!     .seed(42)
//!     .planet_size(PlanetSize::Small)
//!     .plate_count(14).unwrap()
//!     .build().unwrap();
//!
//! let planet = Planet::generate(config).unwrap();
//!
//! for tile in planet.tiles().iter().take(5) {
//!     println!("tile {}: {} at elevation {:.2}", tile.id, tile.terrain.name(), tile.elevation);
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-tile lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, tiles and plates

// Modules
pub mod climate;
pub mod config;
pub mod error;
pub mod generation;
pub mod planet;
pub mod rng;
pub mod tectonics;
pub mod terrain;
pub mod tile;
pub mod worker;

mod util;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use climate::ClimateParams;
pub use config::{AlgorithmVariant, PlanetConfig, PlanetConfigBuilder, PlanetSize, SimulationParams};
pub use error::{PlanetError, Result};
pub use planet::{GenerationStats, Planet};
pub use rng::SeededRng;
pub use tectonics::{ElevationParams, Plate, PlateParams};
pub use terrain::{Interval, RuleTable, TerrainClassifier, TerrainRule, TerrainType, TileSample, WaterRequirement};
pub use tile::Tile;
pub use worker::PlanetWorker;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec3 for convenience
pub use glam::DVec3;
