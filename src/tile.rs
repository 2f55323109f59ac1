//! Planet tile structure
//!
//! A tile is one Voronoi region of the planet surface, carrying its geometry
//! and every simulated field.

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::terrain::TerrainType;

/// A single tile on the planet surface
///
/// Geometry is stored on the unit sphere; scale by the planet radius for
/// world positions. `area` is already in radius units squared (km² for the
/// default radius).
///
/// # Design Notes
///
/// Tiles are regenerated from a `PlanetConfig` rather than saved. The same
/// configuration always reproduces the same tiles with the same ids.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Unique identifier (0 to tile_count-1)
    pub id: usize,

    /// Terrain classified from the physical fields below
    pub terrain: TerrainType,

    /// Sample point on the unit sphere
    pub center: DVec3,

    /// IDs of tiles sharing a boundary edge, ascending
    ///
    /// Used for pathfinding, territory expansion and flood fills.
    pub neighbors: Vec<usize>,

    /// Boundary polygon on the unit sphere, counter-clockwise seen from outside
    pub vertices: Vec<DVec3>,

    /// Surface area on a sphere of the planet radius
    ///
    /// Polygons use normalized triangle centroids, so tile areas sum to the
    /// sphere only approximately; the error grows for very small tile counts.
    pub area: f64,

    /// Elevation in `[-1, 1]`; water below the configured sea level
    pub elevation: f64,

    /// Owning plate id
    pub plate: usize,

    /// Moisture in `[0, 1]`
    pub moisture: f64,

    /// Temperature in `[0, 1]`
    pub temperature: f64,

    /// Whether the tile is water connected to the world ocean
    pub is_ocean_connected: bool,
}

impl Tile {
    /// Get the number of neighboring tiles
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this tile is a neighbor of another tile
    #[inline]
    pub fn is_neighbor_of(&self, other_tile_id: usize) -> bool {
        self.neighbors.binary_search(&other_tile_id).is_ok()
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the terrain is water (ocean, deep ocean or lake)
    #[inline]
    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }

    /// Latitude of the center in degrees, positive in the north
    pub fn latitude(&self) -> f64 {
        self.center.y.clamp(-1.0, 1.0).asin().to_degrees()
    }

    /// Center scaled to a sphere of `radius`
    #[inline]
    pub fn world_center(&self, radius: f64) -> DVec3 {
        self.center * radius
    }

    /// Great-circle distance between tile centers on a sphere of `radius`
    pub fn distance_to(&self, other: &Tile, sphere_radius: f64) -> f64 {
        let cos_angle = self.center.dot(other.center).clamp(-1.0, 1.0);
        sphere_radius * cos_angle.acos()
    }
}
