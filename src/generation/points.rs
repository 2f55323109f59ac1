//! Spiral Point Distribution
//!
//! Places near-uniform sample points on the unit sphere using a golden-ratio
//! spiral, with optional tangential jitter to break up the regular pattern.
//!
//! # Layout
//!
//! - Index 0 is the north pole `(0, 1, 0)`.
//! - Indices `1..N-1` descend in `y`, with `y = 1 − 2(i + ½)/N`, and advance in
//!   longitude by a fixed golden-ratio increment.
//! - Index `N − 1` is the south pole `(0, −1, 0)`.
//!
//! The poles are never jittered, so the south pole can be excluded exactly by
//! the stereographic projection.

use glam::DVec3;
use std::f64::consts::{PI, TAU};

use crate::config::AlgorithmVariant;
use crate::rng::SeededRng;

/// Jitter strength as fraction of average point spacing at `jitter = 1.0`
const JITTER_STRENGTH: f64 = 0.5;

/// North pole sample position
pub const NORTH_POLE: DVec3 = DVec3::Y;

/// South pole sample position
pub const SOUTH_POLE: DVec3 = DVec3::NEG_Y;

/// Generate `count` unit vectors on a golden-ratio spiral
///
/// Randomness is drawn only when `jitter > 0`: two floats per interior point
/// (offset angle, then offset magnitude), in index order.
///
/// # Arguments
///
/// * `count` - Number of points, at least 4 (validated by the configuration)
/// * `jitter` - Jitter strength in `[0, 1]`
/// * `algorithm` - Spiral variant selecting the longitude increment
/// * `rng` - Shared random stream
pub fn generate_sphere_points(
    count: usize,
    jitter: f64,
    algorithm: AlgorithmVariant,
    rng: &mut SeededRng,
) -> Vec<DVec3> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![NORTH_POLE];
    }

    let n = count as f64;
    let increment = algorithm.angular_increment();

    // Average angular spacing between points (approximate)
    let avg_spacing = (4.0 * PI / n).sqrt();
    let jitter_amount = avg_spacing * JITTER_STRENGTH * jitter;

    let mut points = Vec::with_capacity(count);
    points.push(NORTH_POLE);

    for i in 1..count - 1 {
        let i_f = i as f64;
        let y = 1.0 - 2.0 * (i_f + 0.5) / n;
        let ring = (1.0 - y * y).max(0.0).sqrt();
        let theta = i_f * increment;

        let base = DVec3::new(ring * theta.cos(), y, ring * theta.sin());

        if jitter_amount > 0.0 {
            let jitter_theta = rng.next_float() * TAU;
            let jitter_mag = rng.next_float() * jitter_amount;

            let (tangent, bitangent) = tangent_basis(base);
            let jittered = base
                + tangent * jitter_mag * jitter_theta.cos()
                + bitangent * jitter_mag * jitter_theta.sin();

            // Normalize back to sphere surface
            points.push(jittered.normalize());
        } else {
            points.push(base);
        }
    }

    points.push(SOUTH_POLE);
    points
}

/// Orthonormal tangent basis at a point on the unit sphere
///
/// The reference axis switches away from `Y` near the poles so the cross
/// product never degenerates.
pub(crate) fn tangent_basis(normal: DVec3) -> (DVec3, DVec3) {
    let reference = if normal.y.abs() > 0.9 { DVec3::X } else { DVec3::Y };
    let tangent = reference.cross(normal).normalize();
    let bitangent = normal.cross(tangent).normalize();
    (tangent, bitangent)
}
