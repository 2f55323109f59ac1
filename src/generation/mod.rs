//! Sphere tessellation
//!
//! Samples points on the unit sphere, triangulates them, and builds the
//! Voronoi dual: one polygonal tile per point with its area and neighbours.

pub mod adjacency;
pub mod area;
pub mod delaunay;
pub mod points;
pub mod voronoi;

pub use adjacency::{build_from_polygons, build_from_triangles, tile_pair, Adjacency, TilePair};
pub use delaunay::{triangulate_sphere, SphereTriangulation};
pub use points::generate_sphere_points;
pub use voronoi::{build_tiles, triangle_centers, RawTile};

use crate::config::PlanetConfig;
use crate::error::Result;
use crate::rng::SeededRng;
use crate::util::Timed;

/// Geometry of a tessellated sphere, before any simulation
#[derive(Debug, Clone)]
pub struct Tessellation {
    /// One tile per sample point, indexed by tile id
    pub tiles: Vec<RawTile>,
    /// Tile areas on a sphere of the configured radius
    pub areas: Vec<f64>,
    pub adjacency: Adjacency,
    pub triangulation: SphereTriangulation,
}

impl Tessellation {
    /// Tile centers, indexed by tile id
    pub fn centers(&self) -> Vec<glam::DVec3> {
        self.tiles.iter().map(|t| t.center).collect()
    }

    /// Tiles with fewer than 3 boundary vertices
    pub fn degenerate_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_degenerate()).count()
    }
}

/// Tessellate the sphere described by `config`
///
/// Draws from `rng` only for point jitter.
pub fn tessellate(config: &PlanetConfig, rng: &mut SeededRng) -> Result<Tessellation> {
    let points = {
        let _t = Timed::debug("sample points");
        points::generate_sphere_points(config.tile_count, config.jitter, config.algorithm, rng)
    };

    let triangulation = {
        let _t = Timed::debug("triangulate");
        delaunay::triangulate_sphere(&points)?
    };

    let _t = Timed::debug("voronoi dual");
    let centers = voronoi::triangle_centers(&points, &triangulation.triangles);
    let tiles = voronoi::build_tiles(&points, &triangulation.triangles, &centers);
    let areas = tiles
        .iter()
        .map(|t| area::tile_area(t.center, &t.vertices, config.radius))
        .collect();
    let adjacency =
        adjacency::build_from_triangles(points.len(), &triangulation.triangles, &centers);

    Ok(Tessellation {
        tiles,
        areas,
        adjacency,
        triangulation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_area_sums_to_sphere() {
        let config = PlanetConfig::builder()
            .seed(3)
            .tile_count(1000)
            .unwrap()
            .radius(2.0)
            .unwrap()
            .build()
            .unwrap();
        let mut rng = SeededRng::new(config.seed);
        let tess = tessellate(&config, &mut rng).unwrap();

        let total: f64 = tess.areas.iter().sum();
        let expected = 4.0 * PI * 4.0;
        assert!(
            ((total - expected) / expected).abs() < 0.01,
            "total area {} vs {}",
            total,
            expected
        );
        assert_eq!(tess.degenerate_count(), 0);
    }

    #[test]
    fn test_twelve_point_icosahedral_layout() {
        let config = PlanetConfig::builder()
            .seed(0)
            .tile_count(12)
            .unwrap()
            .jitter(0.0)
            .unwrap()
            .plate_count(1)
            .unwrap()
            .radius(1.0)
            .unwrap()
            .build()
            .unwrap();
        let mut rng = SeededRng::new(0);
        let tess = tessellate(&config, &mut rng).unwrap();

        assert_eq!(tess.tiles.len(), 12);
        assert_eq!(tess.triangulation.triangle_count(), 20);
        for list in &tess.adjacency.neighbors {
            assert_eq!(list.len(), 5);
        }
        let total: f64 = tess.areas.iter().sum();
        assert!((total - 4.0 * PI).abs() < 1e-6);
    }
}
