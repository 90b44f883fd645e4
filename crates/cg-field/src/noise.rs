//! Deterministic 2D noise sampling.
//!
//! All noise derives from one seed so that the same seed always produces the
//! same fields at every world point, regardless of query order.

use noise::{NoiseFn, Perlin, Simplex};

/// Spread two samplers apart in seed space.  Same (seed, offset) always gives
/// the same derived seed.
#[inline]
fn derived_seed(seed: u32, offset: u32) -> u32 {
    seed.wrapping_add(offset)
        .wrapping_mul(0x9e37_79b9)
        .wrapping_add(offset.wrapping_mul(0x6c07_8965))
}

/// Displacement applied by the warp stage, in the caller's (pre-scaled)
/// coordinate units.
const WARP_STRENGTH: f32 = 0.5;

/// Decorrelation offset between the two warp axes.
const WARP_AXIS_OFFSET: f64 = 31.41;

/// A seeded pair of samplers: simplex for the signal, perlin for warping the
/// domain it is sampled in.
pub struct NoiseField {
    simplex: Simplex,
    warp: Perlin,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        NoiseField {
            simplex: Simplex::new(derived_seed(seed, 0)),
            warp: Perlin::new(derived_seed(seed, 1)),
        }
    }

    /// Raw simplex sample in [-1, 1].
    #[inline]
    pub fn simplex2(&self, x: f32, y: f32) -> f32 {
        (self.simplex.get([x as f64, y as f64]) as f32).clamp(-1.0, 1.0)
    }

    /// Simplex sample remapped to [0, 1].
    #[inline]
    pub fn simplex01(&self, x: f32, y: f32) -> f32 {
        (self.simplex2(x, y) + 1.0) * 0.5
    }

    /// Domain-warped fractal sample in [0, 1].
    ///
    /// A perlin sample pair displaces the input coordinates, then an fBm sum
    /// of `octaves` simplex layers (frequency scaled by `lacunarity`,
    /// amplitude by `gain` per octave) is taken at the displaced point.  The
    /// warp is what bends zone boundaries away from blobby noise contours.
    pub fn sample_warped(&self, x: f32, y: f32, octaves: u32, lacunarity: f32, gain: f32) -> f32 {
        let wx = x + WARP_STRENGTH * self.warp.get([x as f64, y as f64]) as f32;
        let wy = y + WARP_STRENGTH
            * self
                .warp
                .get([x as f64 + WARP_AXIS_OFFSET, y as f64 - WARP_AXIS_OFFSET]) as f32;

        let mut sum = 0.0f32;
        let mut norm = 0.0f32;
        let mut amplitude = 1.0f32;
        let mut frequency = 1.0f32;
        for _ in 0..octaves.max(1) {
            sum += amplitude * self.simplex2(wx * frequency, wy * frequency);
            norm += amplitude;
            amplitude *= gain;
            frequency *= lacunarity;
        }
        (((sum / norm) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
