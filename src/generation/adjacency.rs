//! Tile adjacency and shared boundary segments
//!
//! Two tiles are neighbours when the Delaunay edge between their sample points
//! is shared by two triangles; the Voronoi vertices of those two triangles are
//! the endpoints of the boundary segment the tiles share. Edge identity uses
//! the triangulation's vertex indices. [`build_from_polygons`] rebuilds the
//! same graph from boundary polygons alone, keying edges by rounded
//! coordinates, for callers that no longer hold the triangulation.

use glam::DVec3;
use std::collections::HashMap;

/// Canonical unordered pair of tile ids, smaller first
pub type TilePair = (usize, usize);

/// Order a pair of tile ids canonically
#[inline]
pub fn tile_pair(a: usize, b: usize) -> TilePair {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Neighbour lists plus the boundary segment of every neighbouring pair
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// Sorted neighbour ids per tile
    pub neighbors: Vec<Vec<usize>>,
    /// Shared Voronoi edge per neighbouring pair, keyed by [`tile_pair`]
    pub segments: HashMap<TilePair, (DVec3, DVec3)>,
}

impl Adjacency {
    /// Boundary segment shared by two tiles, if they are neighbours
    pub fn segment(&self, a: usize, b: usize) -> Option<(DVec3, DVec3)> {
        self.segments.get(&tile_pair(a, b)).copied()
    }
}

/// Build adjacency from outward-wound triangles and their Voronoi vertices
pub fn build_from_triangles(
    tile_count: usize,
    triangles: &[[usize; 3]],
    centers: &[DVec3],
) -> Adjacency {
    let mut edge_triangles: HashMap<TilePair, Vec<usize>> = HashMap::new();
    for (tri_idx, tri) in triangles.iter().enumerate() {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            if a == b {
                continue;
            }
            edge_triangles.entry(tile_pair(a, b)).or_default().push(tri_idx);
        }
    }

    let mut neighbors = vec![Vec::new(); tile_count];
    let mut segments = HashMap::with_capacity(edge_triangles.len());

    for (&(a, b), shared) in &edge_triangles {
        if let [t0, t1] = shared[..] {
            neighbors[a].push(b);
            neighbors[b].push(a);
            segments.insert((a, b), (centers[t0], centers[t1]));
        }
    }

    for list in &mut neighbors {
        list.sort_unstable(); // Deterministic ordering
        list.dedup();
    }

    Adjacency {
        neighbors,
        segments,
    }
}

/// Default rounding for coordinate edge keys (decimal places)
pub const DEFAULT_KEY_PRECISION: i32 = 9;

type PointKey = (i64, i64, i64);

fn point_key(p: DVec3, scale: f64) -> PointKey {
    (
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    )
}

/// Rebuild neighbour lists from tile boundary polygons
///
/// Each polygon edge is keyed by its endpoints rounded to `precision`
/// decimal places and ordered, so floating-point duplicates of the same
/// Voronoi edge merge. Edges seen only by one tile, zero-length edges, and
/// edges repeated within one tile do not create neighbours.
pub fn build_from_polygons(polygons: &[Vec<DVec3>], precision: i32) -> Vec<Vec<usize>> {
    let scale = 10f64.powi(precision);
    let mut edge_tiles: HashMap<(PointKey, PointKey), Vec<usize>> = HashMap::new();

    for (tile, polygon) in polygons.iter().enumerate() {
        let n = polygon.len();
        if n < 2 {
            continue;
        }
        for i in 0..n {
            let ka = point_key(polygon[i], scale);
            let kb = point_key(polygon[(i + 1) % n], scale);
            if ka == kb {
                continue;
            }
            let key = if ka < kb { (ka, kb) } else { (kb, ka) };
            edge_tiles.entry(key).or_default().push(tile);
        }
    }

    let mut neighbors = vec![Vec::new(); polygons.len()];
    for tiles in edge_tiles.values() {
        for (i, &a) in tiles.iter().enumerate() {
            for &b in &tiles[i + 1..] {
                if a != b {
                    neighbors[a].push(b);
                    neighbors[b].push(a);
                }
            }
        }
    }

    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}
