//! First-match terrain rule table

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{TerrainClassifier, TerrainType, TileSample};

/// Half-open interval `[min, max)`; infinite bounds leave a side open
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Matches every value
    pub const ANY: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `(-∞, max)`
    pub const fn below(max: f64) -> Self {
        Self::new(f64::NEG_INFINITY, max)
    }

    /// `[min, +∞)`
    pub const fn at_least(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::ANY
    }
}

/// Water condition a rule places on a tile
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaterRequirement {
    #[default]
    Any,
    /// Tile must be connected to the ocean
    OceanOnly,
    /// Tile must be below sea level and not connected to the ocean
    LakeOnly,
}

/// One row of the rule table
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainRule {
    pub terrain: TerrainType,
    pub elevation: Interval,
    pub moisture: Interval,
    pub temperature: Interval,
    pub water: WaterRequirement,
}

impl TerrainRule {
    /// Rule with open bounds and no water condition
    pub const fn new(terrain: TerrainType) -> Self {
        Self {
            terrain,
            elevation: Interval::ANY,
            moisture: Interval::ANY,
            temperature: Interval::ANY,
            water: WaterRequirement::Any,
        }
    }

    pub const fn elevation(mut self, interval: Interval) -> Self {
        self.elevation = interval;
        self
    }

    pub const fn moisture(mut self, interval: Interval) -> Self {
        self.moisture = interval;
        self
    }

    pub const fn temperature(mut self, interval: Interval) -> Self {
        self.temperature = interval;
        self
    }

    pub const fn water(mut self, water: WaterRequirement) -> Self {
        self.water = water;
        self
    }

    /// Whether every bound and the water condition hold
    pub fn matches(&self, sample: &TileSample, sea_level: f64) -> bool {
        let water_ok = match self.water {
            WaterRequirement::Any => true,
            WaterRequirement::OceanOnly => sample.is_ocean_connected,
            WaterRequirement::LakeOnly => {
                sample.elevation < sea_level && !sample.is_ocean_connected
            }
        };
        water_ok
            && self.elevation.contains(sample.elevation)
            && self.moisture.contains(sample.moisture)
            && self.temperature.contains(sample.temperature)
    }
}

/// Ordered rule list; the first matching rule wins
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    pub rules: Vec<TerrainRule>,
    pub fallback: TerrainType,
    /// Sea level used by [`WaterRequirement::LakeOnly`]
    pub sea_level: f64,
}

impl RuleTable {
    /// Custom table at sea level 0; set `sea_level` to move lake detection
    pub fn new(rules: Vec<TerrainRule>, fallback: TerrainType) -> Self {
        Self {
            rules,
            fallback,
            sea_level: 0.0,
        }
    }

    /// First rule matching a sample
    pub fn matching_rule(&self, sample: &TileSample) -> Option<&TerrainRule> {
        self.rules.iter().find(|r| r.matches(sample, self.sea_level))
    }

    /// Default biome table with water and coast bounds relative to `sea_level`
    ///
    /// Water and ice come first, then increasingly specific land biomes.
    /// Deep ocean and mountain thresholds stay absolute.
    pub fn with_sea_level(sea_level: f64) -> Self {
        use TerrainType::*;
        use WaterRequirement::*;

        let rules = vec![
            TerrainRule::new(Ice).temperature(Interval::below(0.08)),
            TerrainRule::new(Lake)
                .elevation(Interval::below(sea_level))
                .water(LakeOnly),
            TerrainRule::new(DeepOcean)
                .elevation(Interval::below(-0.5))
                .water(OceanOnly),
            TerrainRule::new(Ocean)
                .elevation(Interval::below(sea_level))
                .water(OceanOnly),
            TerrainRule::new(Mountain).elevation(Interval::at_least(0.6)),
            TerrainRule::new(Beach).elevation(Interval::new(sea_level, sea_level + 0.03)),
            TerrainRule::new(Tundra).temperature(Interval::below(0.25)),
            TerrainRule::new(Taiga)
                .temperature(Interval::below(0.4))
                .moisture(Interval::at_least(0.4)),
            TerrainRule::new(Desert).moisture(Interval::below(0.2)),
            TerrainRule::new(Rainforest)
                .temperature(Interval::at_least(0.7))
                .moisture(Interval::at_least(0.6)),
            TerrainRule::new(Savanna)
                .temperature(Interval::at_least(0.6))
                .moisture(Interval::below(0.45)),
            TerrainRule::new(Forest).moisture(Interval::at_least(0.5)),
            TerrainRule::new(Grassland).elevation(Interval::at_least(sea_level)),
        ];

        Self {
            rules,
            fallback: Grassland,
            sea_level,
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::with_sea_level(0.0)
    }
}

impl TerrainClassifier for RuleTable {
    fn classify(&self, sample: &TileSample) -> Option<TerrainType> {
        self.matching_rule(sample).map(|r| r.terrain)
    }

    fn fallback(&self) -> TerrainType {
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(elevation: f64, moisture: f64, temperature: f64, ocean: bool) -> TileSample {
        TileSample {
            elevation,
            moisture,
            temperature,
            is_ocean_connected: ocean,
        }
    }

    fn classify(s: TileSample) -> Option<TerrainType> {
        RuleTable::default().classify(&s)
    }

    #[test]
    fn test_interval_is_half_open() {
        let i = Interval::new(0.0, 0.03);
        assert!(i.contains(0.0));
        assert!(!i.contains(0.03));
        assert!(Interval::ANY.contains(1.0e300));
        assert!(Interval::at_least(0.6).contains(1.0));
        assert!(!Interval::below(0.0).contains(0.0));
    }

    #[test]
    fn test_enclosed_deep_water_is_lake() {
        assert_eq!(
            classify(sample(-0.6, 0.5, 0.5, false)),
            Some(TerrainType::Lake)
        );
    }

    #[test]
    fn test_connected_water_is_ocean() {
        assert_eq!(
            classify(sample(-0.6, 0.5, 0.5, true)),
            Some(TerrainType::DeepOcean)
        );
        assert_eq!(
            classify(sample(-0.2, 0.5, 0.5, true)),
            Some(TerrainType::Ocean)
        );
    }

    #[test]
    fn test_ice_takes_precedence() {
        assert_eq!(classify(sample(-0.6, 0.5, 0.05, true)), Some(TerrainType::Ice));
        assert_eq!(classify(sample(0.9, 0.5, 0.0, false)), Some(TerrainType::Ice));
    }

    #[test]
    fn test_land_biomes() {
        assert_eq!(classify(sample(0.7, 0.5, 0.5, false)), Some(TerrainType::Mountain));
        assert_eq!(classify(sample(0.01, 0.5, 0.5, false)), Some(TerrainType::Beach));
        assert_eq!(classify(sample(0.2, 0.5, 0.2, false)), Some(TerrainType::Tundra));
        assert_eq!(classify(sample(0.2, 0.5, 0.3, false)), Some(TerrainType::Taiga));
        assert_eq!(classify(sample(0.2, 0.1, 0.5, false)), Some(TerrainType::Desert));
        assert_eq!(classify(sample(0.2, 0.7, 0.8, false)), Some(TerrainType::Rainforest));
        assert_eq!(classify(sample(0.2, 0.3, 0.65, false)), Some(TerrainType::Savanna));
        assert_eq!(classify(sample(0.2, 0.55, 0.5, false)), Some(TerrainType::Forest));
        assert_eq!(classify(sample(0.2, 0.3, 0.5, false)), Some(TerrainType::Grassland));
    }

    #[test]
    fn test_default_table_covers_valid_fields() {
        let table = RuleTable::default();
        let steps: Vec<f64> = (0..=20).map(|i| i as f64 / 20.0).collect();
        for &e in &steps {
            let e = e * 2.0 - 1.0;
            for &m in &steps {
                for &t in &steps {
                    for ocean in [false, true] {
                        // Connected water only exists below sea level
                        let ocean = ocean && e < 0.0;
                        let s = sample(e, m, t, ocean);
                        assert!(table.classify(&s).is_some(), "no rule for {:?}", s);
                    }
                }
            }
        }
    }

    #[test]
    fn test_raised_sea_level_shifts_water_bounds() {
        let table = RuleTable::with_sea_level(0.2);
        assert_eq!(table.sea_level, 0.2);
        assert_eq!(
            table.classify(&sample(0.1, 0.5, 0.5, true)),
            Some(TerrainType::Ocean)
        );
        assert_eq!(
            table.classify(&sample(0.1, 0.5, 0.5, false)),
            Some(TerrainType::Lake)
        );
        assert_eq!(
            table.classify(&sample(0.21, 0.5, 0.5, false)),
            Some(TerrainType::Beach)
        );
    }

    #[test]
    fn test_lowered_sea_level_keeps_shallows_dry() {
        let table = RuleTable::with_sea_level(-0.2);
        // Above sea level and not connected: land, never a lake
        let terrain = table.classify(&sample(-0.1, 0.3, 0.5, false));
        assert_eq!(terrain, Some(TerrainType::Grassland));
        assert_eq!(
            table.classify(&sample(-0.19, 0.3, 0.5, false)),
            Some(TerrainType::Beach)
        );
        assert_eq!(
            table.classify(&sample(-0.3, 0.3, 0.5, false)),
            Some(TerrainType::Lake)
        );
    }

    #[test]
    fn test_empty_table_falls_back() {
        let table = RuleTable::new(Vec::new(), TerrainType::Desert);
        assert_eq!(table.classify(&sample(0.1, 0.1, 0.1, false)), None);
        assert_eq!(table.fallback(), TerrainType::Desert);
    }
}
