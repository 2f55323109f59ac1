//! Planet Configuration and Builder
//!
//! This module provides the immutable configuration consumed by
//! [`Planet::generate`](crate::Planet::generate). A configuration is a plain value:
//! the same configuration always produces the identical planet.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::climate::ClimateParams;
use crate::error::{PlanetError, Result};
use crate::tectonics::{ElevationParams, PlateParams};

/// Mean radius of the Earth in kilometres, the default planet radius
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Smallest tile count that closes into a valid spherical tessellation
pub const MIN_TILE_COUNT: usize = 4;

/// Planet size presets
///
/// Each size maps to a tile count. The radius is configured separately so the
/// same tessellation density can be used for planets of any physical size.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanetSize {
    /// Tiny planet: 1,000 tiles
    Tiny,
    /// Small planet: 4,000 tiles
    Small,
    /// Medium planet: 10,000 tiles (default)
    #[default]
    Medium,
    /// Large planet: 25,000 tiles
    Large,
    /// Custom tile count
    Custom {
        /// Number of tiles to generate
        tile_count: usize,
    },
}

impl PlanetSize {
    /// Get the number of tiles for this planet size
    pub fn tile_count(self) -> usize {
        match self {
            PlanetSize::Tiny => 1_000,
            PlanetSize::Small => 4_000,
            PlanetSize::Medium => 10_000,
            PlanetSize::Large => 25_000,
            PlanetSize::Custom { tile_count } => tile_count,
        }
    }

    /// Get a human-readable name for this planet size
    pub fn name(self) -> &'static str {
        match self {
            PlanetSize::Tiny => "Tiny",
            PlanetSize::Small => "Small",
            PlanetSize::Medium => "Medium",
            PlanetSize::Large => "Large",
            PlanetSize::Custom { .. } => "Custom",
        }
    }
}

/// Spiral variant used by the point sampler
///
/// The variants differ only in the longitude increment between consecutive
/// points. Both increments are derived from the golden ratio.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmVariant {
    /// Golden angle increment, `π(3 − √5)` radians
    #[default]
    Golden = 1,
    /// Inverse golden ratio turn, `2π/φ` radians
    Fibonacci = 2,
}

impl AlgorithmVariant {
    /// Longitude increment in radians between consecutive spiral points
    pub fn angular_increment(self) -> f64 {
        match self {
            AlgorithmVariant::Golden => std::f64::consts::PI * (3.0 - 5.0_f64.sqrt()),
            AlgorithmVariant::Fibonacci => {
                let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
                std::f64::consts::TAU / phi
            }
        }
    }
}

impl TryFrom<u8> for AlgorithmVariant {
    type Error = PlanetError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(AlgorithmVariant::Golden),
            2 => Ok(AlgorithmVariant::Fibonacci),
            other => Err(PlanetError::InvalidConfig(format!(
                "algorithm variant must be 1 or 2 (got {})",
                other
            ))),
        }
    }
}

/// Tuned constants for the simulation stages
///
/// The values are empirical; they are exposed so games can retune them
/// without touching the pipeline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationParams {
    /// Plate seeding and classification
    pub plates: PlateParams,
    /// Boundary interaction outcomes and smoothing
    pub elevation: ElevationParams,
    /// Moisture and temperature shaping
    pub climate: ClimateParams,
}

impl SimulationParams {
    /// Check every nested parameter group
    pub fn validate(&self) -> Result<()> {
        self.plates.validate()?;
        self.elevation.validate()?;
        self.climate.validate()
    }
}

/// Configuration for deterministic planet generation
///
/// This configuration is serializable and can be shared between client and server.
/// Only the configuration needs to be stored; the planet is regenerated from it.
///
/// # Example
///
/// ```rust
/// use tectonic_planet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed(42)
///     .tile_count(500)
///     .unwrap()
///     .plate_count(8)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tile_count, 500);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetConfig {
    /// Number of tiles (sample points) on the sphere, at least 4
    pub tile_count: usize,

    /// Tangential jitter applied to non-pole points, in `[0, 1]`
    ///
    /// - 0.0: pure spiral, no randomness consumed
    /// - 1.0: points move up to half the average point spacing
    pub jitter: f64,

    /// Spiral variant selecting the longitude increment
    pub algorithm: AlgorithmVariant,

    /// Number of tectonic plates, in `[1, tile_count]`
    pub plate_count: usize,

    /// Sphere radius in kilometres; tile areas are reported in km²
    pub radius: f64,

    /// Seed for the single random stream shared by every stage
    pub seed: u64,

    /// Tuned simulation constants
    pub params: SimulationParams,
}

impl PlanetConfig {
    /// Start a builder with default values
    pub fn builder() -> PlanetConfigBuilder {
        PlanetConfigBuilder::new()
    }

    /// Re-check every configuration rule
    ///
    /// The builder validates as it goes; this catches configurations built
    /// literally or deserialized from storage.
    pub fn validate(&self) -> Result<()> {
        if self.tile_count < MIN_TILE_COUNT {
            return Err(PlanetError::InvalidConfig(format!(
                "tile_count must be >= {} (got {})",
                MIN_TILE_COUNT, self.tile_count
            )));
        }
        if self.plate_count < 1 {
            return Err(PlanetError::InvalidConfig(
                "plate_count must be >= 1 (got 0)".to_string(),
            ));
        }
        if self.plate_count > self.tile_count {
            return Err(PlanetError::InvalidConfig(format!(
                "plate_count ({}) must not exceed tile_count ({})",
                self.plate_count, self.tile_count
            )));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(PlanetError::InvalidConfig(format!(
                "jitter must be within [0, 1] (got {})",
                self.jitter
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(PlanetError::InvalidConfig(format!(
                "radius must be positive and finite (got {})",
                self.radius
            )));
        }
        self.params.validate()
    }

    /// Total surface area of the sphere in km²
    #[inline]
    pub fn surface_area(&self) -> f64 {
        4.0 * std::f64::consts::PI * self.radius * self.radius
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            tile_count: PlanetSize::default().tile_count(),
            jitter: 0.5,
            algorithm: AlgorithmVariant::default(),
            plate_count: 12,
            radius: EARTH_RADIUS_KM,
            seed: 0,
            params: SimulationParams::default(),
        }
    }
}

/// Builder for creating PlanetConfig with validation
///
/// # Example
///
/// ```rust
/// use tectonic_planet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed(12345)
///     .planet_size(PlanetSize::Tiny)
///     .jitter(0.25)
///     .unwrap()
///     .algorithm(AlgorithmVariant::Fibonacci)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tile_count, 1_000);
/// ```
#[derive(Debug, Clone)]
pub struct PlanetConfigBuilder {
    seed: Option<u64>,
    tile_count: usize,
    jitter: f64,
    algorithm: AlgorithmVariant,
    plate_count: usize,
    radius: f64,
    params: SimulationParams,
}

impl PlanetConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - tile_count: 10,000 (`PlanetSize::Medium`)
    /// - jitter: 0.5
    /// - algorithm: `AlgorithmVariant::Golden`
    /// - plate_count: 12
    /// - radius: 6371 km
    pub fn new() -> Self {
        let defaults = PlanetConfig::default();
        Self {
            seed: None,
            tile_count: defaults.tile_count,
            jitter: defaults.jitter,
            algorithm: defaults.algorithm,
            plate_count: defaults.plate_count,
            radius: defaults.radius,
            params: defaults.params,
        }
    }

    /// Set the random seed for planet generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tile count from a size preset
    pub fn planet_size(mut self, size: PlanetSize) -> Self {
        self.tile_count = size.tile_count();
        self
    }

    /// Set an exact tile count
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count < 4`
    pub fn tile_count(mut self, count: usize) -> Result<Self> {
        if count < MIN_TILE_COUNT {
            return Err(PlanetError::InvalidConfig(format!(
                "tile_count must be >= {} (got {})",
                MIN_TILE_COUNT, count
            )));
        }
        self.tile_count = count;
        Ok(self)
    }

    /// Set the jitter strength
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if jitter is outside `[0, 1]`
    pub fn jitter(mut self, jitter: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&jitter) {
            return Err(PlanetError::InvalidConfig(format!(
                "jitter must be within [0, 1] (got {})",
                jitter
            )));
        }
        self.jitter = jitter;
        Ok(self)
    }

    /// Set the spiral variant
    pub fn algorithm(mut self, algorithm: AlgorithmVariant) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the number of tectonic plates
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count == 0`. The upper bound against the
    /// tile count is checked in [`build`](Self::build).
    pub fn plate_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(PlanetError::InvalidConfig(
                "plate_count must be >= 1 (got 0)".to_string(),
            ));
        }
        self.plate_count = count;
        Ok(self)
    }

    /// Set the sphere radius in kilometres
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius is not positive and finite
    pub fn radius(mut self, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PlanetError::InvalidConfig(format!(
                "radius must be positive and finite (got {})",
                radius
            )));
        }
        self.radius = radius;
        Ok(self)
    }

    /// Replace the tuned simulation constants
    pub fn params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<PlanetConfig> {
        let config = PlanetConfig {
            tile_count: self.tile_count,
            jitter: self.jitter,
            algorithm: self.algorithm,
            plate_count: self.plate_count,
            radius: self.radius,
            seed: self.seed.unwrap_or_else(rand::random),
            params: self.params,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for PlanetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
