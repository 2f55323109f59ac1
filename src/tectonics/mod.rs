//! Plate tectonics: plate partition and boundary-driven elevation

pub mod elevation;
pub mod plates;

pub use elevation::{simulate_elevation, BoundaryPriority, ElevationParams};
pub use plates::{assign_plates, Plate, PlateAssignment, PlateParams};
