//! Ocean connectivity
//!
//! Water tiles reachable through water from an oceanic plate belong to the
//! world ocean. Everything else below sea level is an enclosed lake.
//!
//! The flood starts only from water on oceanic plates, not from every tile
//! below sea level. Lakes therefore form only in basins on continental
//! plates that no oceanic water reaches.

use std::collections::VecDeque;

use crate::tectonics::Plate;

/// Flag tiles connected to the world ocean
///
/// Breadth-first search seeded from every water tile on an oceanic plate,
/// expanding only through water (elevation below `sea_level`).
pub fn ocean_connectivity(
    elevations: &[f64],
    neighbors: &[Vec<usize>],
    tile_plate: &[usize],
    plates: &[Plate],
    sea_level: f64,
) -> Vec<bool> {
    let is_water = |tile: usize| elevations[tile] < sea_level;

    let mut connected = vec![false; elevations.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for tile in 0..elevations.len() {
        if is_water(tile) && plates[tile_plate[tile]].is_oceanic {
            connected[tile] = true;
            queue.push_back(tile);
        }
    }

    while let Some(tile) = queue.pop_front() {
        for &n in &neighbors[tile] {
            if !connected[n] && is_water(n) {
                connected[n] = true;
                queue.push_back(n);
            }
        }
    }

    connected
}
