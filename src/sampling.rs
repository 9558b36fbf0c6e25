//! Random sampling helpers.
//!
//! All functions take the random source as a parameter, so callers decide
//! between a seeded `StdRng` for reproducible runs and `thread_rng()`.

use crate::bounds::BoundingBox;
use rand::Rng;
use std::f64::consts::PI;

/// Uniformly distributed unit vector.
pub fn uniform_direction<R: Rng + ?Sized>(rng: &mut R) -> [f64; 3] {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi: f64 = rng.gen_range(0.0..2.0 * PI);
    let r = (1.0 - z * z).max(0.0).sqrt();
    [r * phi.cos(), r * phi.sin(), z]
}

/// Uniformly distributed point inside `bounds`. A flat axis yields its single
/// coordinate.
pub fn uniform_point<R: Rng + ?Sized>(rng: &mut R, bounds: &BoundingBox) -> [f64; 3] {
    let mut p = [0.0; 3];
    for i in 0..3 {
        let (lo, hi) = (bounds.min[i], bounds.max[i]);
        p[i] = if hi > lo { rng.gen_range(lo..hi) } else { lo };
    }
    p
}
