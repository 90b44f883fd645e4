//! Land-use classification of world points.
//!
//! Two modes share one interface: `Heatmap` reads the same radial bands as
//! the population field, `Perlin` thresholds a domain-warped noise sample.
//! Results are memoized on a coarse grid because lot placement queries the
//! zone of nearly every point on every segment.

use cg_core::geom::Point;
use cg_core::zone::{ZoneKind, ZoningMode};
use rustc_hash::FxHashMap;

use crate::heatmap::DEFAULT_R_UNIT_M;
use crate::noise::NoiseField;

/// Memo grid cell size.  Zone boundaries are hundreds of metres apart, so a
/// 64 m quantization is invisible in the output.
const CACHE_CELL_M: f32 = 64.0;

/// Full-clear eviction threshold for the memo grid.
const CACHE_CAP: usize = 65_536;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Tunables for the perlin classification mode.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoningParams {
    /// World-metres-to-noise-domain scale.
    pub base_scale: f32,
    pub octaves: u32,
    pub lacunarity: f32,
    pub gain: f32,
    /// Ascending thresholds carving [0, 1] into the five zones.
    pub thresholds: [f32; 4],
}

impl Default for ZoningParams {
    fn default() -> Self {
        ZoningParams {
            base_scale: 1.0 / 4_000.0,
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
            thresholds: [0.3, 0.5, 0.65, 0.8],
        }
    }
}

impl ZoningParams {
    /// Clamp thresholds into [0, 1] and restore ascending order.  Callers may
    /// hand over unsorted values; classification requires monotonicity.
    fn normalized(mut self) -> Self {
        for t in &mut self.thresholds {
            *t = t.clamp(0.0, 1.0);
        }
        self.thresholds.sort_by(f32::total_cmp);
        self
    }
}

// ── Zoning ────────────────────────────────────────────────────────────────────

/// The zone classifier.  Mutable because queries fill the memo grid.
pub struct Zoning {
    mode: ZoningMode,
    params: ZoningParams,
    noise: NoiseField,
    center: Point,
    r_unit: f32,
    cache: FxHashMap<(i32, i32), ZoneKind>,
}

impl Zoning {
    pub fn new(noise_seed: u32, mode: ZoningMode) -> Self {
        Zoning {
            mode,
            params: ZoningParams::default().normalized(),
            noise: NoiseField::new(noise_seed),
            center: Point::ZERO,
            r_unit: DEFAULT_R_UNIT_M,
            cache: FxHashMap::default(),
        }
    }

    pub fn mode(&self) -> ZoningMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ZoningMode) {
        self.mode = mode;
        self.cache.clear();
    }

    pub fn params(&self) -> &ZoningParams {
        &self.params
    }

    pub fn set_params(&mut self, params: ZoningParams) {
        self.params = params.normalized();
        self.cache.clear();
    }

    /// Replace the noise source.  Classifications made before the reseed are
    /// forgotten and may differ afterwards.
    pub fn reseed(&mut self, noise_seed: u32) {
        self.noise = NoiseField::new(noise_seed);
        self.cache.clear();
    }

    /// Post-growth calibration; shared with the heatmap.
    pub fn set_r_unit(&mut self, r_unit: f32) {
        self.r_unit = r_unit;
        self.cache.clear();
    }

    #[cfg(test)]
    pub(crate) fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Land-use class of a world point.
    ///
    /// Memoized per 64 m cell; all points in a cell classify as the cell
    /// centre does.  The grid is fully cleared when it outgrows its cap.
    pub fn zone_at(&mut self, p: Point) -> ZoneKind {
        let key = (
            (p.x / CACHE_CELL_M).floor() as i32,
            (p.y / CACHE_CELL_M).floor() as i32,
        );
        if let Some(&zone) = self.cache.get(&key) {
            return zone;
        }

        let cell_center = Point::new(
            (key.0 as f32 + 0.5) * CACHE_CELL_M,
            (key.1 as f32 + 0.5) * CACHE_CELL_M,
        );
        let zone = self.classify(cell_center);

        if self.cache.len() >= CACHE_CAP {
            self.cache.clear();
        }
        self.cache.insert(key, zone);
        zone
    }

    fn classify(&self, p: Point) -> ZoneKind {
        match self.mode {
            ZoningMode::Heatmap => {
                // Degenerate calibration collapses every band to the centre
                // point, classifying the world rural.
                let band_radius = self.r_unit.max(1.0);
                let r = p.distance(self.center);
                if r < band_radius {
                    ZoneKind::Downtown
                } else if r < 2.0 * band_radius {
                    ZoneKind::Commercial
                } else if r < 3.0 * band_radius {
                    ZoneKind::Residential
                } else if r < 4.0 * band_radius {
                    ZoneKind::Industrial
                } else {
                    ZoneKind::Rural
                }
            }
            ZoningMode::Perlin => {
                let v = self.noise.sample_warped(
                    p.x * self.params.base_scale,
                    p.y * self.params.base_scale,
                    self.params.octaves,
                    self.params.lacunarity,
                    self.params.gain,
                );
                let [r1, r2, r3, r4] = self.params.thresholds;
                if v < r1 {
                    ZoneKind::Rural
                } else if v < r2 {
                    ZoneKind::Residential
                } else if v < r3 {
                    ZoneKind::Commercial
                } else if v < r4 {
                    ZoneKind::Industrial
                } else {
                    ZoneKind::Downtown
                }
            }
        }
    }
}
