//! Boundary-driven elevation
//!
//! Every tile starts at its plate's base elevation. Tiles on a plate boundary
//! take the outcome of the most significant interaction with a neighbouring
//! plate (mountains beat coasts, ridges and trenches, which beat open ocean
//! floor). A few Jacobi smoothing passes then blur the sharp steps.

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::plates::Plate;
use crate::error::{PlanetError, Result};

/// Elevation model parameters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationParams {
    /// Convergence below this counts as a strong collision
    pub convergence_threshold: f64,
    /// Elevation of collision mountains
    pub mountain: f64,
    /// Depth of an oceanic trench below its plate base
    pub trench_offset: f64,
    /// Elevation of mid-ocean ridges
    pub ridge: f64,
    /// Continental side of a quiet ocean/continent margin
    pub coast_low: f64,
    /// Oceanic side of a quiet ocean/continent margin
    pub coast_high: f64,
    /// Elevation of quiet ocean/ocean boundaries
    pub ocean_floor: f64,
    /// Number of smoothing passes
    pub smoothing_passes: usize,
    /// Weight of a tile's own elevation in each smoothing pass
    pub smoothing_weight: f64,
}

impl Default for ElevationParams {
    fn default() -> Self {
        Self {
            convergence_threshold: -0.3,
            mountain: 0.8,
            trench_offset: 0.25,
            ridge: -0.2,
            coast_low: 0.02,
            coast_high: -0.1,
            ocean_floor: -0.55,
            smoothing_passes: 2,
            smoothing_weight: 0.6,
        }
    }
}

impl ElevationParams {
    /// Check that levels stay in `[-1, 1]` and the smoothing weight is a fraction
    pub fn validate(&self) -> Result<()> {
        let levels = [
            ("mountain", self.mountain),
            ("ridge", self.ridge),
            ("coast_low", self.coast_low),
            ("coast_high", self.coast_high),
            ("ocean_floor", self.ocean_floor),
        ];
        for (name, value) in levels {
            if !(-1.0..=1.0).contains(&value) {
                return Err(PlanetError::InvalidConfig(format!(
                    "{} elevation must be within [-1, 1] (got {})",
                    name, value
                )));
            }
        }
        if !(0.0..=2.0).contains(&self.trench_offset) {
            return Err(PlanetError::InvalidConfig(format!(
                "trench_offset must be within [0, 2] (got {})",
                self.trench_offset
            )));
        }
        if !(-1.0..=1.0).contains(&self.convergence_threshold) {
            return Err(PlanetError::InvalidConfig(format!(
                "convergence_threshold must be within [-1, 1] (got {})",
                self.convergence_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing_weight) {
            return Err(PlanetError::InvalidConfig(format!(
                "smoothing_weight must be within [0, 1] (got {})",
                self.smoothing_weight
            )));
        }
        Ok(())
    }
}

/// Significance of a boundary outcome; higher wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BoundaryPriority {
    Base,
    OceanFloor,
    CoastRidgeTrench,
    Mountain,
}

/// Relative motion of two plates across a boundary
///
/// Projects `own_motion - other_motion` onto the boundary normal, the
/// tangential direction at `own` pointing from `other` towards `own`.
/// Negative values mean the plates close on each other. Coincident centers
/// have no normal and report 0.
pub fn convergence(own: DVec3, other: DVec3, own_motion: DVec3, other_motion: DVec3) -> f64 {
    let offset = own - other;
    let tangential = offset - own * offset.dot(own);
    match tangential.try_normalize() {
        Some(normal) => (own_motion - other_motion).dot(normal),
        None => 0.0,
    }
}

/// Elevation and priority a tile on `own` takes from a boundary with `other`
pub fn boundary_outcome(
    own: &Plate,
    other: &Plate,
    convergence: f64,
    params: &ElevationParams,
) -> (f64, BoundaryPriority) {
    let strong = convergence < params.convergence_threshold;
    match (own.is_oceanic, other.is_oceanic, strong) {
        (false, _, true) => (params.mountain, BoundaryPriority::Mountain),
        (false, false, false) => (own.base_elevation, BoundaryPriority::Base),
        (false, true, false) => (params.coast_low, BoundaryPriority::CoastRidgeTrench),
        (true, false, true) => (
            own.base_elevation - params.trench_offset,
            BoundaryPriority::CoastRidgeTrench,
        ),
        (true, false, false) => (params.coast_high, BoundaryPriority::CoastRidgeTrench),
        (true, true, true) => (params.ridge, BoundaryPriority::CoastRidgeTrench),
        (true, true, false) => (params.ocean_floor, BoundaryPriority::OceanFloor),
    }
}

/// Compute boundary elevations, clamp to `[-1, 1]` and smooth
///
/// # Arguments
///
/// * `centers` - Tile centers on the unit sphere
/// * `neighbors` - Symmetric adjacency lists
/// * `tile_plate` - Plate id per tile
/// * `plates` - Plates indexed by id
/// * `params` - Elevation levels and smoothing settings
pub fn simulate_elevation(
    centers: &[DVec3],
    neighbors: &[Vec<usize>],
    tile_plate: &[usize],
    plates: &[Plate],
    params: &ElevationParams,
) -> Vec<f64> {
    let mut boundary_tiles = 0usize;

    let raw: Vec<f64> = (0..centers.len())
        .map(|tile| {
            let own = &plates[tile_plate[tile]];
            let mut best = (own.base_elevation, BoundaryPriority::Base);
            let mut on_boundary = false;

            for &n in &neighbors[tile] {
                let other = &plates[tile_plate[n]];
                if other.id == own.id {
                    continue;
                }
                on_boundary = true;

                let c = convergence(centers[tile], centers[n], own.motion, other.motion);
                let (elevation, priority) = boundary_outcome(own, other, c, params);

                // Equal non-base priorities keep the higher elevation
                let replace = priority > best.1
                    || (priority == best.1
                        && priority != BoundaryPriority::Base
                        && elevation > best.0);
                if replace {
                    best = (elevation, priority);
                }
            }

            if on_boundary {
                boundary_tiles += 1;
            }
            best.0.clamp(-1.0, 1.0)
        })
        .collect();

    log::debug!(
        "{} of {} tiles lie on plate boundaries",
        boundary_tiles,
        centers.len()
    );

    let mut elevations = smooth(
        &raw,
        neighbors,
        params.smoothing_passes,
        params.smoothing_weight,
    );
    // Smoothing is a convex blend; this only absorbs rounding
    for e in &mut elevations {
        *e = e.clamp(-1.0, 1.0);
    }
    elevations
}

/// Jacobi smoothing: each pass blends a tile with its neighbours' mean
///
/// Reads only the previous pass. Tiles without neighbours keep their value.
pub fn smooth(values: &[f64], neighbors: &[Vec<usize>], passes: usize, weight: f64) -> Vec<f64> {
    let mut current = values.to_vec();
    let mut next = vec![0.0; values.len()];

    for _ in 0..passes {
        for (tile, out) in next.iter_mut().enumerate() {
            let list = &neighbors[tile];
            *out = if list.is_empty() {
                current[tile]
            } else {
                let mean = list.iter().map(|&n| current[n]).sum::<f64>() / list.len() as f64;
                weight * current[tile] + (1.0 - weight) * mean
            };
        }
        std::mem::swap(&mut current, &mut next);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate(id: usize, is_oceanic: bool, base_elevation: f64, motion: DVec3) -> Plate {
        Plate {
            id,
            seed_tile: id,
            center: DVec3::Y,
            motion,
            is_oceanic,
            base_elevation,
        }
    }

    #[test]
    fn test_convergence_sign() {
        let a = DVec3::new(0.1, 0.0, 1.0).normalize();
        let b = DVec3::new(-0.1, 0.0, 1.0).normalize();
        // a lies at +x of b: moving a towards -x closes the gap
        let closing = convergence(a, b, DVec3::NEG_X, DVec3::X);
        let opening = convergence(a, b, DVec3::X, DVec3::NEG_X);
        assert!(closing < -1.0);
        assert!(opening > 1.0);
        assert_eq!(convergence(a, a, DVec3::X, DVec3::NEG_X), 0.0);
    }

    #[test]
    fn test_outcome_table() {
        let params = ElevationParams::default();
        let land = plate(0, false, 0.2, DVec3::X);
        let sea = plate(1, true, -0.4, DVec3::X);
        let strong = -1.0;
        let weak = 0.5;

        assert_eq!(
            boundary_outcome(&land, &land, strong, &params),
            (0.8, BoundaryPriority::Mountain)
        );
        assert_eq!(
            boundary_outcome(&land, &land, weak, &params),
            (0.2, BoundaryPriority::Base)
        );
        assert_eq!(
            boundary_outcome(&land, &sea, strong, &params),
            (0.8, BoundaryPriority::Mountain)
        );
        assert_eq!(
            boundary_outcome(&land, &sea, weak, &params),
            (0.02, BoundaryPriority::CoastRidgeTrench)
        );
        let (trench, priority) = boundary_outcome(&sea, &land, strong, &params);
        assert!((trench - (-0.65)).abs() < 1e-12);
        assert_eq!(priority, BoundaryPriority::CoastRidgeTrench);
        assert_eq!(
            boundary_outcome(&sea, &land, weak, &params),
            (-0.1, BoundaryPriority::CoastRidgeTrench)
        );
        assert_eq!(
            boundary_outcome(&sea, &sea, strong, &params),
            (-0.2, BoundaryPriority::CoastRidgeTrench)
        );
        assert_eq!(
            boundary_outcome(&sea, &sea, weak, &params),
            (-0.55, BoundaryPriority::OceanFloor)
        );
    }

    #[test]
    fn test_priority_order() {
        assert!(BoundaryPriority::Mountain > BoundaryPriority::CoastRidgeTrench);
        assert!(BoundaryPriority::CoastRidgeTrench > BoundaryPriority::OceanFloor);
        assert!(BoundaryPriority::OceanFloor > BoundaryPriority::Base);
    }

    #[test]
    fn test_single_plate_stays_at_base() {
        let centers = vec![DVec3::X, DVec3::Y, DVec3::Z, DVec3::NEG_X];
        let neighbors = vec![vec![1, 2], vec![0, 2, 3], vec![0, 1, 3], vec![1, 2]];
        let plates = vec![plate(0, false, 0.3, DVec3::Z)];
        let elevations = simulate_elevation(
            &centers,
            &neighbors,
            &[0, 0, 0, 0],
            &plates,
            &ElevationParams::default(),
        );
        for e in elevations {
            assert!((e - 0.3).abs() < 1e-12);
        }
    }

    #[test]
    fn test_collision_raises_boundary() {
        // Two continental tiles driven into each other
        let a = DVec3::new(0.1, 0.0, 1.0).normalize();
        let b = DVec3::new(-0.1, 0.0, 1.0).normalize();
        let plates = vec![
            plate(0, false, 0.1, DVec3::NEG_X),
            plate(1, false, 0.1, DVec3::X),
        ];
        let params = ElevationParams {
            smoothing_passes: 0,
            ..ElevationParams::default()
        };
        let elevations =
            simulate_elevation(&[a, b], &[vec![1], vec![0]], &[0, 1], &plates, &params);
        assert_eq!(elevations, vec![0.8, 0.8]);
    }

    #[test]
    fn test_equal_priority_keeps_higher_elevation() {
        // Tile 0 on an oceanic plate: quiet margin with a continent on one
        // side (-0.1), strong ridge with another oceanic plate on the other (-0.2)
        let own = DVec3::Z;
        let east = DVec3::new(0.1, 0.0, 1.0).normalize();
        let west = DVec3::new(-0.1, 0.0, 1.0).normalize();
        let plates = vec![
            plate(0, true, -0.4, DVec3::ZERO),
            plate(1, false, 0.1, DVec3::ZERO),
            plate(2, true, -0.4, DVec3::X),
        ];
        let params = ElevationParams {
            smoothing_passes: 0,
            ..ElevationParams::default()
        };

        for order in [vec![1, 2], vec![2, 1]] {
            let neighbors = vec![order, vec![0], vec![0]];
            let elevations = simulate_elevation(
                &[own, east, west],
                &neighbors,
                &[0, 1, 2],
                &plates,
                &params,
            );
            assert_eq!(elevations[0], -0.1);
        }
    }

    #[test]
    fn test_base_outcome_keeps_own_base() {
        // Quiet continental boundaries on both sides
        let own = DVec3::Z;
        let east = DVec3::new(0.1, 0.0, 1.0).normalize();
        let west = DVec3::new(-0.1, 0.0, 1.0).normalize();
        let plates = vec![
            plate(0, false, 0.3, DVec3::ZERO),
            plate(1, false, 0.5, DVec3::ZERO),
            plate(2, false, 0.1, DVec3::ZERO),
        ];
        let params = ElevationParams {
            smoothing_passes: 0,
            ..ElevationParams::default()
        };

        for order in [vec![1, 2], vec![2, 1]] {
            let neighbors = vec![order, vec![0], vec![0]];
            let elevations = simulate_elevation(
                &[own, east, west],
                &neighbors,
                &[0, 1, 2],
                &plates,
                &params,
            );
            assert_eq!(elevations, vec![0.3, 0.5, 0.1]);
        }
    }

    #[test]
    fn test_smoothing_blends_with_neighbors() {
        let neighbors = vec![vec![1], vec![0], vec![]];
        let out = smooth(&[1.0, 0.0, 0.5], &neighbors, 1, 0.6);
        assert!((out[0] - 0.6).abs() < 1e-12);
        assert!((out[1] - 0.4).abs() < 1e-12);
        assert_eq!(out[2], 0.5);

        let unchanged = smooth(&[1.0, 0.0, 0.5], &neighbors, 0, 0.6);
        assert_eq!(unchanged, vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_elevations_are_clamped() {
        let params = ElevationParams {
            trench_offset: 2.0,
            smoothing_passes: 0,
            ..ElevationParams::default()
        };
        let a = DVec3::new(0.1, 0.0, 1.0).normalize();
        let b = DVec3::new(-0.1, 0.0, 1.0).normalize();
        let plates = vec![
            plate(0, true, -0.5, DVec3::NEG_X),
            plate(1, false, 0.1, DVec3::X),
        ];
        let elevations =
            simulate_elevation(&[a, b], &[vec![1], vec![0]], &[0, 1], &plates, &params);
        assert_eq!(elevations[0], -1.0);
    }

    #[test]
    fn test_params_validation() {
        assert!(ElevationParams::default().validate().is_ok());
        let bad = ElevationParams {
            smoothing_weight: 1.2,
            ..ElevationParams::default()
        };
        assert!(bad.validate().is_err());
        let bad = ElevationParams {
            mountain: 3.0,
            ..ElevationParams::default()
        };
        assert!(bad.validate().is_err());
    }
}
