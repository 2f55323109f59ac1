//! Deterministic per-position noise
//!
//! A seeded integer hash of a quantized position. Same position and seed,
//! same value, on every platform.

use glam::DVec3;

/// Grid resolution used to quantize positions before hashing
const QUANTIZE: f64 = 1.0e6;

/// Hash the three quantized coordinates together with the seed
#[inline]
fn hash(x: i64, y: i64, z: i64, seed: u64) -> u64 {
    let mut h = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    for c in [x, y, z] {
        h ^= (c as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        h = h.rotate_left(27).wrapping_mul(0x94D0_49BB_1331_11EB);
    }
    h ^= h >> 31;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^ (h >> 29)
}

/// Noise in `[-1, 1]` for a position
pub fn position_noise(position: DVec3, seed: u64) -> f64 {
    let q = |v: f64| (v * QUANTIZE).round() as i64;
    let h = hash(q(position.x), q(position.y), q(position.z), seed);
    // Top 53 bits → [0, 1)
    let unit = (h >> 11) as f64 / (1u64 << 53) as f64;
    unit * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_range() {
        for i in 0..1000 {
            let t = i as f64 * 0.37;
            let p = DVec3::new(t.sin(), t.cos(), (t * 0.5).sin()).normalize();
            let n = position_noise(p, 42);
            assert!((-1.0..=1.0).contains(&n), "noise {} out of range", n);
        }
    }

    #[test]
    fn test_noise_deterministic() {
        let p = DVec3::new(0.3, -0.4, 0.866);
        assert_eq!(position_noise(p, 7), position_noise(p, 7));
    }

    #[test]
    fn test_noise_varies_with_seed_and_position() {
        let p = DVec3::new(0.3, -0.4, 0.866);
        let q = DVec3::new(0.3, -0.4, 0.867);
        assert_ne!(position_noise(p, 1), position_noise(p, 2));
        assert_ne!(position_noise(p, 1), position_noise(q, 1));
    }
}
