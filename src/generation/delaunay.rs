//! Spherical Delaunay triangulation via stereographic projection
//!
//! Every sample point except the south pole is projected onto a plane, the
//! plane is triangulated with spade's Delaunay triangulation, and the south
//! pole is stitched back as a triangle fan over the planar convex hull. Because
//! stereographic projection maps circles to circles, the result is the
//! Delaunay triangulation of the sphere, closed with exactly `2N − 4`
//! triangles.

use glam::DVec3;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};

use crate::error::{PlanetError, Result};

/// A sample point projected onto the plane, remembering its sphere index
#[derive(Debug, Clone, Copy)]
pub struct ProjectedPoint {
    /// Planar position
    pub position: Point2<f64>,
    /// Index of the source point on the sphere
    pub source: usize,
}

impl HasPosition for ProjectedPoint {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Closed (or, for degenerate input, open) triangulation of the sphere points
#[derive(Debug, Clone, Default)]
pub struct SphereTriangulation {
    /// Triangles as sphere point indices, wound outward
    pub triangles: Vec<[usize; 3]>,
    /// Planar convex hull in boundary order (sphere point indices)
    pub hull: Vec<usize>,
    /// Whether the excluded pole was stitched back in
    pub stitched: bool,
}

impl SphereTriangulation {
    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Project every point except the last (the south pole) stereographically
///
/// `(x, y, z) → (x / (1 + y), z / (1 + y))`, projecting from `(0, −1, 0)`.
pub fn project_stereographic(points: &[DVec3]) -> Vec<ProjectedPoint> {
    let Some((_, rest)) = points.split_last() else {
        return Vec::new();
    };

    rest.iter()
        .enumerate()
        .map(|(source, p)| {
            let denom = 1.0 + p.y;
            ProjectedPoint {
                position: Point2::new(p.x / denom, p.z / denom),
                source,
            }
        })
        .collect()
}

/// Triangulate points on the unit sphere
///
/// The last point must be the projection pole. A degenerate planar hull is
/// logged and leaves the mesh unstitched rather than failing.
///
/// # Errors
///
/// Returns `GenerationFailed` if the projected coordinates are rejected by the
/// triangulator (NaN or out of range).
pub fn triangulate_sphere(points: &[DVec3]) -> Result<SphereTriangulation> {
    if points.len() < 4 {
        log::warn!(
            "cannot close a sphere with {} points, skipping triangulation",
            points.len()
        );
        return Ok(SphereTriangulation::default());
    }

    let projected = project_stereographic(points);
    let planar = DelaunayTriangulation::<ProjectedPoint>::bulk_load(projected).map_err(|e| {
        PlanetError::GenerationFailed(format!("planar triangulation rejected input: {:?}", e))
    })?;

    let mut triangles: Vec<[usize; 3]> = planar
        .inner_faces()
        .map(|face| {
            let [a, b, c] = face.vertices();
            orient_outward([a.data().source, b.data().source, c.data().source], points)
        })
        .collect();

    if planar.num_inner_faces() == 0 {
        log::warn!(
            "degenerate planar triangulation ({} vertices, no faces), leaving pole unstitched",
            planar.num_vertices()
        );
        return Ok(SphereTriangulation {
            triangles,
            hull: Vec::new(),
            stitched: false,
        });
    }

    let hull: Vec<usize> = planar
        .convex_hull()
        .map(|edge| edge.from().data().source)
        .collect();

    let stitched = stitch_pole(&hull, points.len() - 1, points, &mut triangles);

    Ok(SphereTriangulation {
        triangles,
        hull,
        stitched,
    })
}

/// Close the mesh by fanning the pole over the hull
///
/// Emits one triangle per hull edge. Returns `false` (and emits nothing) when
/// the hull has fewer than 3 points.
pub fn stitch_pole(
    hull: &[usize],
    pole: usize,
    points: &[DVec3],
    triangles: &mut Vec<[usize; 3]>,
) -> bool {
    if hull.len() < 3 {
        log::warn!(
            "convex hull has {} points, leaving pole {} unstitched",
            hull.len(),
            pole
        );
        return false;
    }

    for (i, &from) in hull.iter().enumerate() {
        let to = hull[(i + 1) % hull.len()];
        triangles.push(orient_outward([from, to, pole], points));
    }
    true
}

/// Reorder a triangle so its face normal points away from the sphere centre
#[inline]
pub fn orient_outward(tri: [usize; 3], points: &[DVec3]) -> [usize; 3] {
    let [a, b, c] = tri;
    let (pa, pb, pc) = (points[a], points[b], points[c]);
    let normal = (pb - pa).cross(pc - pa);
    if normal.dot(pa + pb + pc) < 0.0 {
        [a, c, b]
    } else {
        tri
    }
}
