//! The celebratory petal burst shown when the gate unlocks.
//!
//! The engine only decides geometry and timing; rendering and cleanup
//! belong to the surface. A seeded RNG makes bursts reproducible in
//! tests.

use rand::Rng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

pub const PETAL_COUNT: usize = 34;

const GLYPHS: [char; 4] = ['❀', '✿', '❁', '✾'];

/// One falling petal: where it starts, how long it falls, how far it
/// drifts sideways.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetalSpec {
    /// Horizontal start position, percent of viewport width.
    pub left_pct: f64,
    /// Fall duration, seconds.
    pub duration_s: f64,
    /// Start delay, seconds.
    pub delay_s: f64,
    /// Total sideways drift over the fall, logical pixels.
    pub drift_px: f64,
    pub glyph: char,
}

/// Generate one burst. Empty under reduced motion, so the caller can
/// pass the specs straight to its surface either way.
pub fn burst(seed: u64, reduce_motion: bool) -> Vec<PetalSpec> {
    if reduce_motion {
        return Vec::new();
    }
    let mut rng = Pcg64Mcg::new(seed as u128);
    (0..PETAL_COUNT)
        .map(|_| PetalSpec {
            left_pct: rng.gen_range(0.0..100.0),
            duration_s: rng.gen_range(5.0..11.0),
            delay_s: rng.gen_range(0.0..2.5),
            drift_px: rng.gen_range(-60.0..60.0),
            glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
        })
        .collect()
}
