//! Terrain types and classification
//!
//! A [`TerrainClassifier`] maps the physical fields of a tile to a terrain
//! type. [`RuleTable`] is the default, a first-match table of biome rules.

mod rules;

pub use rules::{Interval, RuleTable, TerrainRule, WaterRequirement};

/// Terrain types for planet surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TerrainType {
    /// Ocean-connected water
    Ocean = 0,
    /// Ocean-connected water below the deep-ocean depth
    DeepOcean = 1,
    /// Enclosed water not connected to the ocean
    Lake = 2,
    /// Frozen regions
    Ice = 3,
    /// Low land along the shore
    Beach = 4,
    Desert = 5,
    Savanna = 6,
    /// General land (plains)
    #[default]
    Grassland = 7,
    Forest = 8,
    Rainforest = 9,
    Taiga = 10,
    Tundra = 11,
    /// Elevated terrain
    Mountain = 12,
}

impl TerrainType {
    /// All terrain types, ordered by id
    pub const ALL: [TerrainType; 13] = [
        TerrainType::Ocean,
        TerrainType::DeepOcean,
        TerrainType::Lake,
        TerrainType::Ice,
        TerrainType::Beach,
        TerrainType::Desert,
        TerrainType::Savanna,
        TerrainType::Grassland,
        TerrainType::Forest,
        TerrainType::Rainforest,
        TerrainType::Taiga,
        TerrainType::Tundra,
        TerrainType::Mountain,
    ];

    /// Stable numeric id
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a terrain type by id
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainType::Ocean => "Ocean",
            TerrainType::DeepOcean => "Deep Ocean",
            TerrainType::Lake => "Lake",
            TerrainType::Ice => "Ice",
            TerrainType::Beach => "Beach",
            TerrainType::Desert => "Desert",
            TerrainType::Savanna => "Savanna",
            TerrainType::Grassland => "Grassland",
            TerrainType::Forest => "Forest",
            TerrainType::Rainforest => "Rainforest",
            TerrainType::Taiga => "Taiga",
            TerrainType::Tundra => "Tundra",
            TerrainType::Mountain => "Mountain",
        }
    }

    /// Check if this terrain is water
    pub fn is_water(self) -> bool {
        matches!(
            self,
            TerrainType::Ocean | TerrainType::DeepOcean | TerrainType::Lake
        )
    }

    /// Check if this terrain is land
    pub fn is_land(self) -> bool {
        !self.is_water()
    }
}

/// Physical fields of one tile, as seen by a classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSample {
    pub elevation: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub is_ocean_connected: bool,
}

/// Trait for classifying tiles into terrain types
pub trait TerrainClassifier {
    /// Terrain for a tile, or `None` when no rule applies
    fn classify(&self, sample: &TileSample) -> Option<TerrainType>;

    /// Terrain used when [`classify`](Self::classify) finds nothing
    fn fallback(&self) -> TerrainType {
        TerrainType::Grassland
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_round_trip() {
        for (i, terrain) in TerrainType::ALL.iter().enumerate() {
            assert_eq!(terrain.id() as usize, i);
            assert_eq!(TerrainType::from_id(i as u8), Some(*terrain));
        }
        assert_eq!(TerrainType::from_id(13), None);
    }

    #[test]
    fn test_water_types() {
        assert!(TerrainType::Ocean.is_water());
        assert!(TerrainType::DeepOcean.is_water());
        assert!(TerrainType::Lake.is_water());
        assert!(TerrainType::Ice.is_land());
        assert!(TerrainType::Mountain.is_land());
        assert_eq!(TerrainType::default(), TerrainType::Grassland);
    }
}
