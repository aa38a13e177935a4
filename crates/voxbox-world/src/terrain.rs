//! Procedural heightmaps.

use noise::{NoiseFn, Perlin};

use crate::heightmap::Heightmap;

/// Scale applied to column coordinates before sampling noise.
const NOISE_SCALE: f64 = 0.06;

/// Every column at height `height`, clamped below `height_limit`.
pub fn flat(width: usize, depth: usize, height_limit: usize, height: u32) -> Heightmap {
    let h = clamp_height(height as f64, height_limit);
    Heightmap::from_fn(width, depth, |_, _| h)
}

/// Rolling hills: `base + amplitude * perlin(x, z)`, rounded and clamped
/// into `[0, height_limit)`. Deterministic for a given seed.
pub fn noise(
    width: usize,
    depth: usize,
    height_limit: usize,
    seed: u32,
    base: f32,
    amplitude: f32,
) -> Heightmap {
    let perlin = Perlin::new(seed);
    Heightmap::from_fn(width, depth, |x, z| {
        let n = perlin.get([x as f64 * NOISE_SCALE, z as f64 * NOISE_SCALE]);
        clamp_height(base as f64 + amplitude as f64 * n, height_limit)
    })
}

fn clamp_height(h: f64, height_limit: usize) -> u32 {
    let top = height_limit.saturating_sub(1) as f64;
    h.round().clamp(0.0, top) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_clamps() {
        let map = flat(4, 5, 10, 3);
        assert_eq!(map.width(), 4);
        assert_eq!(map.depth(), 5);
        assert!(map.validate(4, 5, 10).is_ok());
        assert_eq!(map.get(3, 4), Some(3));

        let tall = flat(4, 4, 10, 50);
        assert_eq!(tall.max_height(), Some(9));
    }

    #[test]
    fn test_noise_is_deterministic_and_in_range() {
        let a = noise(32, 32, 32, 7, 12.0, 6.0);
        let b = noise(32, 32, 32, 7, 12.0, 6.0);
        assert_eq!(a, b);
        assert!(a.validate(32, 32, 32).is_ok());
        for z in 0..32 {
            for x in 0..32 {
                let h = a.get(x, z).unwrap();
                assert!((5..=19).contains(&h), "column ({x}, {z}) at {h}");
            }
        }
    }

    #[test]
    fn test_noise_extreme_amplitude_still_valid() {
        let map = noise(16, 16, 8, 1, 4.0, 1000.0);
        assert!(map.validate(16, 16, 8).is_ok());
    }
}
