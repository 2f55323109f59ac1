//! Voronoi tile construction from the sphere triangulation
//!
//! Each triangle contributes one Voronoi vertex (its renormalized centroid).
//! Each sample point becomes one tile whose boundary is the ring of its
//! incident triangles' vertices, ordered counter-clockwise as seen from
//! outside the sphere.

use glam::DVec3;

use super::points::tangent_basis;

/// A tile without simulation data (geometry only)
///
/// This is an intermediate representation used during generation.
/// Plate, elevation, climate and terrain are added later.
#[derive(Debug, Clone)]
pub struct RawTile {
    /// Unique tile identifier (index of the sample point)
    pub id: usize,
    /// Sample point on the unit sphere
    pub center: DVec3,
    /// Incident triangles, ordered counter-clockwise around the center
    pub corners: Vec<usize>,
    /// Boundary polygon on the unit sphere, parallel to `corners`
    pub vertices: Vec<DVec3>,
}

impl RawTile {
    /// Whether the tile has a proper polygon (at least 3 corners)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.corners.len() < 3
    }
}

/// Voronoi vertex of each triangle
///
/// The renormalized centroid is used instead of the true circumcenter. For
/// the near-uniform spiral distribution the two are very close, and the
/// centroid can never fall outside its triangle.
pub fn triangle_centers(points: &[DVec3], triangles: &[[usize; 3]]) -> Vec<DVec3> {
    triangles
        .iter()
        .map(|&[a, b, c]| ((points[a] + points[b] + points[c]) / 3.0).normalize())
        .collect()
}

/// Build map from point index to all triangles that include it
///
/// Indexed densely by point; each list holds unique triangle ids in
/// ascending order.
pub fn build_point_triangle_map(point_count: usize, triangles: &[[usize; 3]]) -> Vec<Vec<usize>> {
    let mut map = vec![Vec::new(); point_count];
    for (tri_idx, triangle) in triangles.iter().enumerate() {
        for &point in triangle {
            map[point].push(tri_idx);
        }
    }
    for incident in &mut map {
        incident.dedup();
    }
    map
}

/// Generate one tile per sample point
///
/// # Arguments
///
/// * `points` - Sample points on the unit sphere
/// * `triangles` - Outward-wound triangles over `points`
/// * `centers` - Voronoi vertex per triangle (see [`triangle_centers`])
pub fn build_tiles(points: &[DVec3], triangles: &[[usize; 3]], centers: &[DVec3]) -> Vec<RawTile> {
    let point_triangles = build_point_triangle_map(points.len(), triangles);

    points
        .iter()
        .zip(point_triangles)
        .enumerate()
        .map(|(id, (&center, incident))| {
            if incident.len() < 3 {
                log::warn!(
                    "tile {} has only {} incident triangles, boundary left degenerate",
                    id,
                    incident.len()
                );
            }

            let corners = order_corners(center, incident, centers);
            let vertices = corners.iter().map(|&t| centers[t]).collect();

            RawTile {
                id,
                center,
                corners,
                vertices,
            }
        })
        .collect()
}

/// Order Voronoi corners counter-clockwise around a tile center
///
/// Projects the corner positions onto the tangent plane and sorts by angle.
fn order_corners(center: DVec3, mut corners: Vec<usize>, centers: &[DVec3]) -> Vec<usize> {
    if corners.len() < 3 {
        return corners;
    }

    let (tangent_u, tangent_v) = tangent_basis(center);

    corners.sort_by(|&a, &b| {
        let angle = |t: usize| {
            let to_corner = centers[t] - center;
            to_corner.dot(tangent_v).atan2(to_corner.dot(tangent_u))
        };
        angle(a).total_cmp(&angle(b))
    });
    corners
}
