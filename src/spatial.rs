//! Spatial indexing for fast position-to-tile lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec3;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// KD-tree over tile centers on the unit sphere
///
/// Returns the tile with the nearest center. Tile polygons are built from
/// triangle centroids rather than circumcenters, so near a boundary the
/// nearest center can differ from the polygon that contains the position.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 3, 32>,
}

impl SpatialIndex {
    /// Build the index from tile centers (unit vectors)
    ///
    /// # Example
    ///
    /// ```
    /// use tectonic_planet::*;
    ///
    /// let centers = vec![DVec3::X, DVec3::Y, DVec3::Z];
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(DVec3::new(1.0, 0.1, 0.0)), 0);
    /// ```
    pub fn new(centers: &[DVec3]) -> Self {
        let points: Vec<[f64; 3]> = centers.iter().map(|c| [c.x, c.y, c.z]).collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Tile containing a position at any distance from the origin
    ///
    /// The position is projected onto the unit sphere first. The origin
    /// itself maps to whichever tile the tree returns for `(0, 0, 0)`.
    pub fn find_nearest(&self, position: DVec3) -> usize {
        let p = position.try_normalize().unwrap_or(DVec3::ZERO);
        let result = self.tree.nearest_one::<SquaredEuclidean>(&[p.x, p.y, p.z]);
        result.item as usize
    }
}
