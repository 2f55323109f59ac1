//! Planet main structure

use std::collections::{HashMap, HashSet};

use glam::DVec3;

use crate::climate;
use crate::config::PlanetConfig;
use crate::error::{PlanetError, Result};
use crate::generation::{self, TilePair};
use crate::rng::SeededRng;
use crate::tectonics::{self, Plate};
use crate::terrain::{RuleTable, TerrainClassifier, TileSample};
use crate::tile::Tile;
use crate::util::Timed;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Counters for the non-fatal conditions met during generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationStats {
    /// Triangles in the closed sphere triangulation (`2N − 4` when stitched)
    pub triangle_count: usize,
    /// Whether the projection pole was stitched back into the mesh
    pub hull_stitched: bool,
    /// Tiles the plate flood fill never reached (forced onto plate 0)
    pub unassigned_tiles: usize,
    /// Tiles no terrain rule matched
    pub terrain_fallbacks: usize,
    /// Tiles with fewer than 3 boundary vertices
    pub degenerate_tiles: usize,
}

/// A fully generated planet
///
/// Immutable once built: every tile carries all of its fields, and the
/// planet is replaced wholesale on regeneration.
///
/// # Examples
///
/// ```
/// use tectonic_planet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed(42)
///     .tile_count(500)
///     .unwrap()
///     .plate_count(6)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let planet = Planet::generate(config).unwrap();
/// assert_eq!(planet.tile_count(), 500);
///
/// if let Some(tile) = planet.get_tile(0) {
///     println!("Tile 0 terrain: {}", tile.terrain.name());
/// }
/// ```
#[derive(Clone)]
pub struct Planet {
    /// Configuration used to generate this planet
    config: PlanetConfig,

    /// All tiles (indexed by tile ID)
    tiles: Vec<Tile>,

    /// All plates (indexed by plate ID)
    plates: Vec<Plate>,

    /// Shared boundary edge of every neighbouring tile pair
    segments: HashMap<TilePair, (DVec3, DVec3)>,

    stats: GenerationStats,

    /// Spatial index for fast position-to-tile lookups (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Planet {
    /// Generate a planet with the default terrain rule table
    ///
    /// The table's water and coast bounds follow the configured sea level.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` before any stage runs if the configuration is
    /// rejected, and `GenerationFailed` if the triangulator rejects its input.
    pub fn generate(config: PlanetConfig) -> Result<Self> {
        let table = RuleTable::with_sea_level(config.params.climate.sea_level);
        Self::generate_with_classifier(config, &table)
    }

    /// Generate a planet with a custom terrain classifier
    ///
    /// The classifier is called once per tile, after every physical field is
    /// known. Tiles it cannot classify take its fallback terrain.
    pub fn generate_with_classifier<C>(config: PlanetConfig, classifier: &C) -> Result<Self>
    where
        C: TerrainClassifier,
    {
        config.validate()?;

        let _t = Timed::info("planet generation");
        log::info!(
            "generating planet: {} tiles, {} plates, seed {}",
            config.tile_count,
            config.plate_count,
            config.seed
        );

        let mut rng = SeededRng::new(config.seed);
        let params = &config.params;

        let tessellation = {
            let _t = Timed::info("tessellation");
            generation::tessellate(&config, &mut rng)?
        };
        let centers = tessellation.centers();
        let neighbors = &tessellation.adjacency.neighbors;

        let assignment = {
            let _t = Timed::info("plate assignment");
            tectonics::assign_plates(
                &centers,
                neighbors,
                config.plate_count,
                &params.plates,
                &mut rng,
            )
        };

        let elevations = {
            let _t = Timed::info("elevation");
            tectonics::simulate_elevation(
                &centers,
                neighbors,
                &assignment.tile_plate,
                &assignment.plates,
                &params.elevation,
            )
        };

        let climate = {
            let _t = Timed::info("climate");
            climate::simulate_climate(
                &centers,
                neighbors,
                &elevations,
                &assignment.tile_plate,
                &assignment.plates,
                &params.climate,
                &mut rng,
            )
        };

        let _classify = Timed::info("terrain classification");
        let mut terrain_fallbacks = 0;
        let generation::Tessellation {
            tiles: raw_tiles,
            areas,
            adjacency,
            triangulation,
        } = tessellation;
        let degenerate_tiles = raw_tiles.iter().filter(|t| t.is_degenerate()).count();

        let tiles: Vec<Tile> = raw_tiles
            .into_iter()
            .zip(adjacency.neighbors)
            .map(|(raw, neighbors)| {
                let id = raw.id;
                let sample = TileSample {
                    elevation: elevations[id],
                    moisture: climate.moisture[id],
                    temperature: climate.temperature[id],
                    is_ocean_connected: climate.ocean_connected[id],
                };
                let terrain = classifier.classify(&sample).unwrap_or_else(|| {
                    log::warn!("no terrain rule matched tile {} ({:?})", id, sample);
                    terrain_fallbacks += 1;
                    classifier.fallback()
                });

                Tile {
                    id,
                    terrain,
                    center: raw.center,
                    neighbors,
                    vertices: raw.vertices,
                    area: areas[id],
                    elevation: sample.elevation,
                    plate: assignment.tile_plate[id],
                    moisture: sample.moisture,
                    temperature: sample.temperature,
                    is_ocean_connected: sample.is_ocean_connected,
                }
            })
            .collect();
        drop(_classify);

        let stats = GenerationStats {
            triangle_count: triangulation.triangle_count(),
            hull_stitched: triangulation.stitched,
            unassigned_tiles: assignment.unassigned,
            terrain_fallbacks,
            degenerate_tiles,
        };
        log::debug!("generation stats: {:?}", stats);

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&centers);

        Ok(Self {
            config,
            tiles,
            plates: assignment.plates,
            segments: adjacency.segments,
            stats,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this planet
    #[inline]
    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Get the number of tiles on this planet
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Get the sphere radius
    #[inline]
    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Get a tile by ID
    ///
    /// Returns `None` if the tile ID is out of bounds.
    #[inline]
    pub fn get_tile(&self, id: usize) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Get a tile by ID, failing with `TileNotFound`
    pub fn tile(&self, id: usize) -> Result<&Tile> {
        self.tiles.get(id).ok_or(PlanetError::TileNotFound(id))
    }

    /// Get all tiles as a slice
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get all plates as a slice
    #[inline]
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    /// Tile IDs belonging to a plate, ascending
    ///
    /// Empty for an unknown plate ID.
    pub fn plate_members(&self, plate_id: usize) -> Vec<usize> {
        self.tiles
            .iter()
            .filter(|t| t.plate == plate_id)
            .map(|t| t.id)
            .collect()
    }

    /// Counters for warnings raised during generation
    #[inline]
    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Sum of all tile areas
    ///
    /// Close to `4πr²` for realistic tile counts; a handful of tiles can
    /// miss it by several steradians.
    pub fn total_area(&self) -> f64 {
        self.tiles.iter().map(|t| t.area).sum()
    }

    /// Get neighbor IDs for a tile
    ///
    /// Returns an empty slice if the tile ID is invalid.
    pub fn get_neighbors(&self, tile_id: usize) -> &[usize] {
        self.tiles
            .get(tile_id)
            .map(|t| t.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Voronoi edge shared by two neighbouring tiles, on the unit sphere
    ///
    /// Returns `None` if the tiles are not neighbours.
    pub fn boundary_segment(&self, a: usize, b: usize) -> Option<(DVec3, DVec3)> {
        self.segments.get(&generation::tile_pair(a, b)).copied()
    }

    /// Find the tile containing a position (requires spatial-index feature)
    ///
    /// Accepts world-space or unit-sphere positions; only the direction from
    /// the planet center matters.
    ///
    /// ```
    /// # use tectonic_planet::*;
    /// # let config = PlanetConfigBuilder::new().seed(1).tile_count(200).unwrap().build().unwrap();
    /// # let planet = Planet::generate(config).unwrap();
    /// let position = DVec3::new(planet.radius(), 0.0, 0.0);
    /// let tile_id = planet.find_tile_at(position);
    /// assert!(tile_id < planet.tile_count());
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_tile_at(&self, position: DVec3) -> usize {
        self.spatial_index.find_nearest(position)
    }

    /// Find tiles within a given hop count from a center tile (BFS)
    ///
    /// Includes the center tile; hop 0 returns just the center. Returns an
    /// empty vec if `center_id` is invalid. The result is sorted.
    pub fn find_tiles_within_radius(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.tiles.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &tile_id in &current {
                for &neighbor in self.get_neighbors(tile_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        found
    }
}

impl std::fmt::Debug for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planet")
            .field("config", &self.config)
            .field("tiles", &self.tiles.len())
            .field("plates", &self.plates.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainType;
    use crate::PlanetConfigBuilder;

    fn small_planet(seed: u64) -> Planet {
        let config = PlanetConfigBuilder::new()
            .seed(seed)
            .tile_count(600)
            .unwrap()
            .plate_count(8)
            .unwrap()
            .build()
            .unwrap();
        Planet::generate(config).unwrap()
    }

    #[test]
    fn test_planet_generation() {
        let planet = small_planet(42);
        assert_eq!(planet.tile_count(), 600);
        assert_eq!(planet.plates().len(), 8);
        assert_eq!(planet.radius(), crate::config::EARTH_RADIUS_KM);
        assert_eq!(planet.stats().triangle_count, 2 * 600 - 4);
        assert!(planet.stats().hull_stitched);
        assert_eq!(planet.stats().terrain_fallbacks, 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PlanetConfig {
            tile_count: 3,
            ..PlanetConfig::default()
        };
        assert!(matches!(
            Planet::generate(config),
            Err(PlanetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_get_tile() {
        let planet = small_planet(42);
        assert!(planet.get_tile(0).is_some());
        assert!(planet.get_tile(planet.tile_count()).is_none());
        assert_eq!(planet.tile(600), Err(PlanetError::TileNotFound(600)));
    }

    #[test]
    fn test_get_neighbors() {
        let planet = small_planet(7);
        let neighbors = planet.get_neighbors(0);
        assert!(neighbors.len() >= 3);
        assert!(neighbors.len() <= 10);
        assert!(planet.get_neighbors(999_999).is_empty());
    }

    #[test]
    fn test_boundary_segment() {
        let planet = small_planet(3);
        let tile = planet.get_tile(10).unwrap();
        for &n in &tile.neighbors {
            let (a, b) = planet.boundary_segment(tile.id, n).unwrap();
            assert!(tile.vertices.contains(&a));
            assert!(tile.vertices.contains(&b));
        }
        let far = (0..planet.tile_count())
            .find(|&id| id != 10 && !tile.is_neighbor_of(id))
            .unwrap();
        assert!(planet.boundary_segment(10, far).is_none());
    }

    #[test]
    fn test_plate_members_partition() {
        let planet = small_planet(5);
        let total: usize = planet
            .plates()
            .iter()
            .map(|p| planet.plate_members(p.id).len())
            .sum();
        assert_eq!(total, planet.tile_count());
        assert!(planet.plate_members(999).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_tile_at() {
        let planet = small_planet(42);
        for id in [0, 17, 299, 599] {
            let center = planet.get_tile(id).unwrap().world_center(planet.radius());
            assert_eq!(planet.find_tile_at(center), id);
        }
    }

    #[test]
    fn test_find_tiles_within_radius() {
        let planet = small_planet(11);

        assert_eq!(planet.find_tiles_within_radius(0, 0), vec![0]);

        let ring1 = planet.find_tiles_within_radius(0, 1);
        assert_eq!(ring1.len(), 1 + planet.get_neighbors(0).len());

        let ring2 = planet.find_tiles_within_radius(0, 2);
        assert!(ring2.len() > ring1.len());

        assert!(planet.find_tiles_within_radius(999_999, 5).is_empty());
    }

    #[test]
    fn test_custom_classifier() {
        struct AllDesert;
        impl TerrainClassifier for AllDesert {
            fn classify(&self, _sample: &TileSample) -> Option<TerrainType> {
                Some(TerrainType::Desert)
            }
        }

        let config = PlanetConfigBuilder::new()
            .seed(1)
            .tile_count(100)
            .unwrap()
            .build()
            .unwrap();
        let planet = Planet::generate_with_classifier(config, &AllDesert).unwrap();
        assert!(planet.tiles().iter().all(|t| t.terrain == TerrainType::Desert));
    }

    #[test]
    fn test_fallback_is_counted() {
        let config = PlanetConfigBuilder::new()
            .seed(1)
            .tile_count(50)
            .unwrap()
            .plate_count(3)
            .unwrap()
            .build()
            .unwrap();
        let table = RuleTable::new(Vec::new(), TerrainType::Tundra);
        let planet = Planet::generate_with_classifier(config, &table).unwrap();
        assert_eq!(planet.stats().terrain_fallbacks, 50);
        assert!(planet.tiles().iter().all(|t| t.terrain == TerrainType::Tundra));
    }

    #[test]
    fn test_terrain_distribution() {
        let planet = small_planet(42);

        let mut counts = HashMap::new();
        for tile in planet.tiles() {
            *counts.entry(tile.terrain).or_insert(0usize) += 1;
        }
        assert!(counts.len() > 1, "Should have varied terrain");
    }
}
