//! Tectonic plate assignment
//!
//! Seeds are picked uniformly among the tiles, each seed gets a motion and an
//! oceanic/continental regime, and plates grow by randomized flood fill over
//! the tile adjacency graph until every tile belongs to exactly one plate.

use glam::DVec3;
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PlanetError, Result};
use crate::generation::points::tangent_basis;
use crate::rng::SeededRng;

/// Plate seeding and classification parameters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateParams {
    /// Probability that a plate is oceanic
    pub oceanic_probability: f64,
    /// Base elevation range `[min, max)` for oceanic plates
    pub oceanic_base: (f64, f64),
    /// Base elevation range `[min, max)` for continental plates
    pub continental_base: (f64, f64),
}

impl Default for PlateParams {
    fn default() -> Self {
        Self {
            oceanic_probability: 0.6,
            oceanic_base: (-0.6, -0.3),
            continental_base: (0.05, 0.35),
        }
    }
}

impl PlateParams {
    /// Check probability and elevation ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.oceanic_probability) {
            return Err(PlanetError::InvalidConfig(format!(
                "oceanic_probability must be within [0, 1] (got {})",
                self.oceanic_probability
            )));
        }
        for (name, (min, max)) in [
            ("oceanic_base", self.oceanic_base),
            ("continental_base", self.continental_base),
        ] {
            if !(-1.0..=1.0).contains(&min) || !(-1.0..=1.0).contains(&max) || min > max {
                return Err(PlanetError::InvalidConfig(format!(
                    "{} must be an ordered range within [-1, 1] (got {}..{})",
                    name, min, max
                )));
            }
        }
        Ok(())
    }
}

/// A tectonic plate
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    /// Plate identifier (0 to plate_count-1)
    pub id: usize,
    /// Tile the plate grew from
    pub seed_tile: usize,
    /// Normalized mean of member tile centers
    pub center: DVec3,
    /// Unit motion vector, tangent to the sphere at the seed tile
    pub motion: DVec3,
    /// Oceanic (true) or continental (false) regime
    pub is_oceanic: bool,
    /// Elevation of the plate interior
    pub base_elevation: f64,
}

/// Result of partitioning tiles into plates
#[derive(Debug, Clone)]
pub struct PlateAssignment {
    /// All plates, indexed by plate id
    pub plates: Vec<Plate>,
    /// Plate id for each tile
    pub tile_plate: Vec<usize>,
    /// Tiles the flood fill never reached (forced onto plate 0)
    pub unassigned: usize,
}

impl PlateAssignment {
    /// Tile ids belonging to a plate, ascending
    pub fn members(&self, plate: usize) -> Vec<usize> {
        self.tile_plate
            .iter()
            .enumerate()
            .filter_map(|(tile, &p)| (p == plate).then_some(tile))
            .collect()
    }
}

/// Partition tiles into `plate_count` plates
///
/// Random draws, in order: seed selection, then motion angle, regime and base
/// elevation for each plate, then the flood fill.
///
/// # Arguments
///
/// * `centers` - Tile centers on the unit sphere
/// * `neighbors` - Symmetric adjacency lists
/// * `plate_count` - Number of plates, in `[1, centers.len()]`
/// * `params` - Seeding and classification parameters
/// * `rng` - Shared random stream
pub fn assign_plates(
    centers: &[DVec3],
    neighbors: &[Vec<usize>],
    plate_count: usize,
    params: &PlateParams,
    rng: &mut SeededRng,
) -> PlateAssignment {
    let seeds = select_seeds(centers.len(), plate_count, rng);

    let mut plates: Vec<Plate> = seeds
        .iter()
        .enumerate()
        .map(|(id, &seed_tile)| {
            let center = centers[seed_tile];
            let motion = random_tangent(center, rng);
            let is_oceanic = rng.next_float() < params.oceanic_probability;
            let (min, max) = if is_oceanic {
                params.oceanic_base
            } else {
                params.continental_base
            };
            Plate {
                id,
                seed_tile,
                center,
                motion,
                is_oceanic,
                base_elevation: rng.next_range(min, max),
            }
        })
        .collect();

    let filled = flood_fill(neighbors, &seeds, rng);

    let mut unassigned = 0;
    let tile_plate: Vec<usize> = filled
        .into_iter()
        .enumerate()
        .map(|(tile, plate)| {
            plate.unwrap_or_else(|| {
                log::warn!("tile {} unreachable by flood fill, assigning plate 0", tile);
                unassigned += 1;
                0
            })
        })
        .collect();

    recompute_centers(&mut plates, centers, &tile_plate);

    log::debug!(
        "assigned {} tiles to {} plates ({} oceanic)",
        tile_plate.len(),
        plates.len(),
        plates.iter().filter(|p| p.is_oceanic).count()
    );

    PlateAssignment {
        plates,
        tile_plate,
        unassigned,
    }
}

/// Select distinct seed tiles uniformly (partial Fisher–Yates)
fn select_seeds(tile_count: usize, plate_count: usize, rng: &mut SeededRng) -> Vec<usize> {
    let plate_count = plate_count.min(tile_count);
    let mut indices: Vec<usize> = (0..tile_count).collect();
    for i in 0..plate_count {
        let j = rng.next_int(i, tile_count - 1);
        indices.swap(i, j);
    }
    indices.truncate(plate_count);
    indices
}

/// Random unit vector in the tangent plane at `normal`
fn random_tangent(normal: DVec3, rng: &mut SeededRng) -> DVec3 {
    let (tangent, bitangent) = tangent_basis(normal);
    let angle = rng.next_float() * TAU;
    (tangent * angle.cos() + bitangent * angle.sin()).normalize()
}

/// Work queue of tiles still to expand
///
/// Items before `head` are processed. Popping picks a uniformly random
/// unprocessed item and swaps it to the head, so removal is O(1).
struct Frontier {
    items: Vec<usize>,
    head: usize,
}

impl Frontier {
    fn new(items: Vec<usize>) -> Self {
        Self { items, head: 0 }
    }

    fn push(&mut self, tile: usize) {
        self.items.push(tile);
    }

    fn pop_random(&mut self, rng: &mut SeededRng) -> Option<usize> {
        if self.head >= self.items.len() {
            return None;
        }
        let pick = rng.next_int(self.head, self.items.len() - 1);
        self.items.swap(self.head, pick);
        let tile = self.items[self.head];
        self.head += 1;
        Some(tile)
    }
}

/// Grow plates from their seeds until the frontier is exhausted
///
/// Returns the plate of each tile, `None` where the fill never arrived.
fn flood_fill(neighbors: &[Vec<usize>], seeds: &[usize], rng: &mut SeededRng) -> Vec<Option<usize>> {
    let mut tile_plate = vec![None; neighbors.len()];
    for (plate, &seed) in seeds.iter().enumerate() {
        tile_plate[seed] = Some(plate);
    }

    let mut queue = seeds.to_vec();
    rng.shuffle(&mut queue);
    let mut frontier = Frontier::new(queue);

    let mut scratch: Vec<usize> = Vec::new();
    while let Some(tile) = frontier.pop_random(rng) {
        let Some(plate) = tile_plate[tile] else {
            continue;
        };

        scratch.clear();
        scratch.extend_from_slice(&neighbors[tile]);
        rng.shuffle(&mut scratch);

        for &neighbor in &scratch {
            if tile_plate[neighbor].is_none() {
                tile_plate[neighbor] = Some(plate);
                frontier.push(neighbor);
            }
        }
    }

    tile_plate
}

/// Move each plate center to the normalized mean of its members
fn recompute_centers(plates: &mut [Plate], centers: &[DVec3], tile_plate: &[usize]) {
    let mut sums = vec![DVec3::ZERO; plates.len()];
    for (tile, &plate) in tile_plate.iter().enumerate() {
        sums[plate] += centers[tile];
    }
    for (plate, sum) in plates.iter_mut().zip(sums) {
        // Members spread evenly over the sphere can cancel out; keep the seed center then
        if let Some(center) = sum.try_normalize() {
            plate.center = center;
        }
    }
}
