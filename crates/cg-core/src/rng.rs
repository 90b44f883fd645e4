//! Deterministic seeded RNG for growth and lot placement.
//!
//! # Determinism strategy
//!
//! One `CityRng` is created per generation run and threaded through every
//! stage in a fixed call order: growth jitter, branch probabilities, then the
//! zone-mix sampling and trial positions of lot placement.  The noise seed is
//! itself a draw from this stream, so one seed yields one world.
//!
//! String seeds are hashed with FNV-1a rather than `DefaultHasher`, whose
//! output is randomized per process and would break reproducibility.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── CitySeed ──────────────────────────────────────────────────────────────────

/// A generation seed, accepted as an integer or as free text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CitySeed(pub u64);

impl From<u64> for CitySeed {
    fn from(v: u64) -> Self {
        CitySeed(v)
    }
}

impl From<&str> for CitySeed {
    fn from(s: &str) -> Self {
        CitySeed(fnv1a_64(s))
    }
}

impl From<String> for CitySeed {
    fn from(s: String) -> Self {
        CitySeed::from(s.as_str())
    }
}

/// FNV-1a over the seed text.  Stable across processes and platforms.
fn fnv1a_64(s: &str) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for byte in s.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

// ── CityRng ───────────────────────────────────────────────────────────────────

/// The single per-run deterministic RNG.
///
/// `SmallRng` is not cryptographic and not portable across `rand` major
/// versions; both are fine here, we only need same-binary reproducibility.
pub struct CityRng(SmallRng);

impl CityRng {
    pub fn new(seed: impl Into<CitySeed>) -> Self {
        let CitySeed(seed) = seed.into();
        CityRng(SmallRng::seed_from_u64(seed.wrapping_mul(MIXING_CONSTANT) ^ seed))
    }

    /// Derive the 16-bit noise seed.  A fresh draw, so noise and growth share
    /// provenance without sharing a stream.
    pub fn noise_seed(&mut self) -> u32 {
        self.0.gen_range(0..=u16::MAX as u32)
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Angular jitter in `[-limit, limit]` degrees with a cubic acceptance
    /// bias: a draw `v` survives with probability `|v|^3 / limit^3`, which
    /// pushes road wiggle toward the ends of the range.  Zero draws retry.
    ///
    /// The retry loop is capped; on exhaustion (vanishing probability) the
    /// jitter degrades to straight-ahead.
    pub fn biased_deviation(&mut self, limit_deg: f32) -> f32 {
        if limit_deg <= 0.0 {
            return 0.0;
        }
        for _ in 0..128 {
            let v: f32 = self.0.gen_range(-limit_deg..=limit_deg);
            if v == 0.0 {
                continue;
            }
            let keep = ((v.abs() / limit_deg) as f64).powi(3);
            if self.0.gen_bool(keep.clamp(0.0, 1.0)) {
                return v;
            }
        }
        0.0
    }

    /// Weighted choice over `(item, weight)` pairs, used for zone building
    /// and decor mixes.  Returns `None` on an empty or zero-weight table.
    pub fn pick_weighted<'a, T>(&mut self, entries: &'a [(T, f32)]) -> Option<&'a T> {
        let total: f32 = entries.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }
        let mut x: f32 = self.0.gen_range(0.0..total);
        for (item, w) in entries {
            let w = w.max(0.0);
            if x < w {
                return Some(item);
            }
            x -= w;
        }
        entries.last().map(|(item, _)| item)
    }
}
