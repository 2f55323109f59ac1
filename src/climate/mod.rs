//! Climate fields: moisture, temperature and ocean connectivity
//!
//! Moisture follows a latitude profile (wet equator, dry subtropics, moderate
//! high latitudes) blended with a per-plate factor and a little positional
//! noise. Temperature falls off with latitude and altitude.

pub mod noise;
pub mod ocean;

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PlanetError, Result};
use crate::rng::SeededRng;
use crate::tectonics::Plate;

pub use noise::position_noise;
pub use ocean::ocean_connectivity;

/// Latitudes (degrees) of the moisture profile knots
const PROFILE_LATITUDES: [f64; 4] = [0.0, 30.0, 60.0, 90.0];

/// Climate model parameters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateParams {
    /// Baseline moisture at 0°, 30°, 60° and 90° latitude
    pub moisture_profile: [f64; 4],
    /// Share of the latitude baseline in the moisture blend (rest is plate factor)
    pub baseline_weight: f64,
    /// Amplitude of positional moisture noise
    pub noise_amplitude: f64,
    /// Temperature lost per unit of positive elevation
    pub elevation_penalty: f64,
    /// Temperature lost over deep ocean
    pub deep_ocean_penalty: f64,
    /// Elevation below which the deep ocean penalty applies
    pub deep_ocean_depth: f64,
    /// Elevation separating water from land
    pub sea_level: f64,
}

impl Default for ClimateParams {
    fn default() -> Self {
        Self {
            moisture_profile: [1.0, 0.2, 0.6, 0.5],
            baseline_weight: 0.7,
            noise_amplitude: 0.05,
            elevation_penalty: 0.4,
            deep_ocean_penalty: 0.05,
            deep_ocean_depth: -0.5,
            sea_level: 0.0,
        }
    }
}

impl ClimateParams {
    /// Check that weights and profile values are fractions
    pub fn validate(&self) -> Result<()> {
        if self.moisture_profile.iter().any(|m| !(0.0..=1.0).contains(m)) {
            return Err(PlanetError::InvalidConfig(format!(
                "moisture_profile values must be within [0, 1] (got {:?})",
                self.moisture_profile
            )));
        }
        if !(0.0..=1.0).contains(&self.baseline_weight) {
            return Err(PlanetError::InvalidConfig(format!(
                "baseline_weight must be within [0, 1] (got {})",
                self.baseline_weight
            )));
        }
        for (name, value) in [
            ("noise_amplitude", self.noise_amplitude),
            ("elevation_penalty", self.elevation_penalty),
            ("deep_ocean_penalty", self.deep_ocean_penalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PlanetError::InvalidConfig(format!(
                    "{} must be within [0, 1] (got {})",
                    name, value
                )));
            }
        }
        if !(-1.0..=1.0).contains(&self.sea_level) || !(-1.0..=1.0).contains(&self.deep_ocean_depth)
        {
            return Err(PlanetError::InvalidConfig(format!(
                "sea_level and deep_ocean_depth must be within [-1, 1] (got {}, {})",
                self.sea_level, self.deep_ocean_depth
            )));
        }
        Ok(())
    }
}

/// Per-tile climate fields
#[derive(Debug, Clone, Default)]
pub struct ClimateFields {
    pub moisture: Vec<f64>,
    pub temperature: Vec<f64>,
    pub ocean_connected: Vec<bool>,
}

/// Latitude of a unit vector in degrees, `[0, 90]` in either hemisphere
#[inline]
pub fn latitude_degrees(center: DVec3) -> f64 {
    center.y.abs().clamp(0.0, 1.0).asin().to_degrees()
}

/// Piecewise-linear moisture baseline for a latitude in degrees
pub fn latitude_baseline(latitude: f64, profile: &[f64; 4]) -> f64 {
    let latitude = latitude.clamp(0.0, 90.0);
    for k in 0..3 {
        let (lo, hi) = (PROFILE_LATITUDES[k], PROFILE_LATITUDES[k + 1]);
        if latitude <= hi {
            let t = (latitude - lo) / (hi - lo);
            return profile[k] + (profile[k + 1] - profile[k]) * t;
        }
    }
    profile[3]
}

/// Moisture of a tile, clamped to `[0, 1]`
pub fn moisture(center: DVec3, plate_factor: f64, seed: u64, params: &ClimateParams) -> f64 {
    let baseline = latitude_baseline(latitude_degrees(center), &params.moisture_profile);
    let blended = params.baseline_weight * baseline + (1.0 - params.baseline_weight) * plate_factor;
    let noise = position_noise(center, seed) * params.noise_amplitude;
    (blended + noise).clamp(0.0, 1.0)
}

/// Temperature of a tile, clamped to `[0, 1]`
pub fn temperature(center: DVec3, elevation: f64, params: &ClimateParams) -> f64 {
    let mut t = 1.0 - center.y.abs();
    t -= params.elevation_penalty * elevation.max(0.0);
    if elevation < params.deep_ocean_depth {
        t -= params.deep_ocean_penalty;
    }
    t.clamp(0.0, 1.0)
}

/// Run the climate stage
///
/// Draws one moisture factor per plate, in plate order, from `rng`.
pub fn simulate_climate(
    centers: &[DVec3],
    neighbors: &[Vec<usize>],
    elevations: &[f64],
    tile_plate: &[usize],
    plates: &[Plate],
    params: &ClimateParams,
    rng: &mut SeededRng,
) -> ClimateFields {
    let plate_factors: Vec<f64> = plates.iter().map(|_| rng.next_float()).collect();
    let seed = rng.current_seed();

    let moisture = centers
        .iter()
        .zip(tile_plate)
        .map(|(&center, &plate)| moisture(center, plate_factors[plate], seed, params))
        .collect();

    let temperature = centers
        .iter()
        .zip(elevations)
        .map(|(&center, &elevation)| temperature(center, elevation, params))
        .collect();

    let ocean_connected =
        ocean_connectivity(elevations, neighbors, tile_plate, plates, params.sea_level);

    let lakes = elevations
        .iter()
        .zip(&ocean_connected)
        .filter(|(e, connected)| **e < params.sea_level && !**connected)
        .count();
    log::debug!("climate: {} lake tiles", lakes);

    ClimateFields {
        moisture,
        temperature,
        ocean_connected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_knots() {
        let profile = ClimateParams::default().moisture_profile;
        assert!((latitude_baseline(0.0, &profile) - 1.0).abs() < 1e-12);
        assert!((latitude_baseline(30.0, &profile) - 0.2).abs() < 1e-12);
        assert!((latitude_baseline(60.0, &profile) - 0.6).abs() < 1e-12);
        assert!((latitude_baseline(90.0, &profile) - 0.5).abs() < 1e-12);
        assert!((latitude_baseline(15.0, &profile) - 0.6).abs() < 1e-12);
        assert!((latitude_baseline(75.0, &profile) - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_latitude_is_symmetric() {
        let north = DVec3::new(0.5, 0.5, 0.0).normalize();
        let south = DVec3::new(0.5, -0.5, 0.0).normalize();
        assert!((latitude_degrees(north) - 45.0).abs() < 1e-9);
        assert_eq!(latitude_degrees(north), latitude_degrees(south));
    }

    #[test]
    fn test_temperature_penalties() {
        let params = ClimateParams::default();
        let equator = DVec3::X;
        assert!((temperature(equator, 0.0, &params) - 1.0).abs() < 1e-12);
        assert!((temperature(equator, 0.5, &params) - 0.8).abs() < 1e-12);
        assert!((temperature(equator, -0.3, &params) - 1.0).abs() < 1e-12);
        assert!((temperature(equator, -0.7, &params) - 0.95).abs() < 1e-12);
        assert_eq!(temperature(DVec3::Y, 1.0, &params), 0.0);
    }

    #[test]
    fn test_moisture_stays_in_range() {
        let params = ClimateParams::default();
        for i in 0..200 {
            let t = i as f64 * 0.1;
            let center = DVec3::new(t.cos(), (t * 0.3).sin(), t.sin()).normalize();
            for factor in [0.0, 0.5, 0.999] {
                let m = moisture(center, factor, 9, &params);
                assert!((0.0..=1.0).contains(&m));
            }
        }
    }

    #[test]
    fn test_moisture_blend_without_noise() {
        let params = ClimateParams {
            noise_amplitude: 0.0,
            ..ClimateParams::default()
        };
        // Equator baseline 1.0, plate factor 0.0 → 0.7
        let m = moisture(DVec3::X, 0.0, 1, &params);
        assert!((m - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_simulate_climate_draws_one_factor_per_plate() {
        let plates: Vec<Plate> = (0..3)
            .map(|id| Plate {
                id,
                seed_tile: id,
                center: DVec3::Y,
                motion: DVec3::X,
                is_oceanic: id == 0,
                base_elevation: 0.0,
            })
            .collect();
        let centers = vec![DVec3::X, DVec3::Z, DVec3::NEG_X];
        let neighbors = vec![vec![1, 2], vec![0, 2], vec![0, 1]];

        let mut rng = SeededRng::new(11);
        let fields = simulate_climate(
            &centers,
            &neighbors,
            &[-0.4, 0.2, -0.1],
            &[0, 1, 2],
            &plates,
            &ClimateParams::default(),
            &mut rng,
        );

        let mut expected = SeededRng::new(11);
        for _ in 0..3 {
            expected.next_float();
        }
        assert_eq!(rng.next_float(), expected.next_float());
        assert_eq!(fields.ocean_connected, vec![true, false, true]);
        assert_eq!(fields.moisture.len(), 3);
    }

    #[test]
    fn test_params_validation() {
        assert!(ClimateParams::default().validate().is_ok());
        let bad = ClimateParams {
            baseline_weight: -0.1,
            ..ClimateParams::default()
        };
        assert!(bad.validate().is_err());
    }
}
