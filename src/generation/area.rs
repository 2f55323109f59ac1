//! Spherical polygon area via spherical excess

use glam::DVec3;

/// Denominators below this magnitude contribute no area
const EXCESS_EPSILON: f64 = 1e-12;

/// Spherical excess (solid angle, in steradians) of the triangle `a, b, c`
///
/// Uses `E = 2·atan2(|a·(b×c)|, 1 + a·b + b·c + c·a)` for unit vectors.
/// Returns 0 for a near-zero denominator instead of an unstable angle.
#[inline]
pub fn spherical_excess(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    let numerator = a.dot(b.cross(c)).abs();
    let denominator = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
    if denominator.abs() < EXCESS_EPSILON {
        return 0.0;
    }
    2.0 * numerator.atan2(denominator)
}

/// Solid angle of a tile, fanned from its center over its ordered boundary
pub fn polygon_solid_angle(center: DVec3, boundary: &[DVec3]) -> f64 {
    if boundary.len() < 3 {
        return 0.0;
    }
    (0..boundary.len())
        .map(|i| spherical_excess(center, boundary[i], boundary[(i + 1) % boundary.len()]))
        .sum()
}

/// Surface area of a tile on a sphere of `radius` (same unit squared)
#[inline]
pub fn tile_area(center: DVec3, boundary: &[DVec3], radius: f64) -> f64 {
    polygon_solid_angle(center, boundary) * radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_octant_excess() {
        // One octant of the sphere covers 4π/8 steradians
        let excess = spherical_excess(DVec3::X, DVec3::Y, DVec3::Z);
        assert!((excess - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_winding_does_not_change_sign() {
        let forward = spherical_excess(DVec3::X, DVec3::Y, DVec3::Z);
        let backward = spherical_excess(DVec3::X, DVec3::Z, DVec3::Y);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_degenerate_triangle_is_zero_not_nan() {
        let excess = spherical_excess(DVec3::X, DVec3::X, DVec3::X);
        assert_eq!(excess, 0.0);

        // Antipodal pair drives the denominator to zero
        let excess = spherical_excess(DVec3::X, DVec3::NEG_X, DVec3::Y);
        assert!(!excess.is_nan());
        assert_eq!(excess, 0.0);
    }

    #[test]
    fn test_tile_area_scales_with_radius_squared() {
        let center = DVec3::ONE.normalize();
        let boundary = [DVec3::X, DVec3::Y, DVec3::Z];
        let unit = tile_area(center, &boundary, 1.0);
        assert!((unit - PI / 2.0).abs() < 1e-12);
        let scaled = tile_area(center, &boundary, 10.0);
        assert!((scaled - unit * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_polygon_has_no_area() {
        assert_eq!(tile_area(DVec3::X, &[DVec3::Y, DVec3::Z], 5.0), 0.0);
    }
}
