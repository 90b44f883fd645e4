//! Immutable generation parameters.
//!
//! `GrowthConfig` is built once, validated, and shared read-only by every
//! stage.  Defaults are tuned for a mid-sized city; override fields with
//! struct-update syntax:
//!
//! ```
//! use cg_core::GrowthConfig;
//!
//! let config = GrowthConfig {
//!     segment_count_limit: 500,
//!     ..GrowthConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{CoreError, CoreResult};
use crate::geom::{Aabb, Point};
use crate::zone::{ZoneTable, ZoningMode};

// ── Quadtree parameters ───────────────────────────────────────────────────────

/// Bounds and caps for the spatial index.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadtreeParams {
    /// World rectangle every inserted box must fit inside.
    pub bounds: Aabb,
    /// Bucket size that triggers a node split.
    pub max_objects: usize,
    /// Depth at which buckets stop splitting and just grow.
    pub max_depth: u32,
}

impl Default for QuadtreeParams {
    fn default() -> Self {
        QuadtreeParams {
            bounds: Aabb::new(Point::new(-20_000.0, -20_000.0), Point::new(20_000.0, 20_000.0)),
            max_objects: 10,
            max_depth: 10,
        }
    }
}

// ── GrowthConfig ──────────────────────────────────────────────────────────────

/// All tunables for road growth and lot placement.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthConfig {
    // ── Segment geometry ──────────────────────────────────────────────────
    /// Street segment length where no zone block length applies, metres.
    pub default_segment_length_m: f32,
    /// Highway segment length, metres.
    pub highway_segment_length_m: f32,
    /// Street corridor width, metres.
    pub street_width_m: f32,
    /// Highway corridor width, metres.
    pub highway_width_m: f32,

    // ── Branching policy ──────────────────────────────────────────────────
    /// Probability of a side-street branch per side of an accepted segment.
    pub default_branch_probability: f64,
    /// Probability of a perpendicular highway branch per side.
    pub highway_branch_probability: f64,
    /// Population below which highways do not spawn branches.
    pub highway_branch_population_threshold: f32,
    /// Population below which streets do not continue or branch.
    pub normal_branch_population_threshold: f32,
    /// Extra growth-time delay for streets branching off a highway.
    pub normal_branch_time_delay_from_highway: u32,
    /// Forward jitter limit for highway continuations, degrees.
    pub forward_deviation_deg: f32,
    /// Jitter limit for perpendicular branches, degrees.
    pub branch_deviation_deg: f32,

    // ── Local constraints ─────────────────────────────────────────────────
    /// Smallest direction difference allowed between segments meeting at a
    /// node, degrees.
    pub minimum_intersection_deviation_deg: f32,
    /// Radius within which a candidate end is pulled to an existing node or
    /// projected onto an existing segment, metres.
    pub road_snap_distance_m: f32,
    /// Lateral gap required beyond the two half-widths, metres.
    pub clearance_extra_m: f32,

    // ── Termination ───────────────────────────────────────────────────────
    /// Hard cap on accepted segments; growth stops when reached.
    pub segment_count_limit: usize,

    // ── Collaborators ─────────────────────────────────────────────────────
    pub quadtree: QuadtreeParams,
    pub zoning_mode: ZoningMode,
    pub zones: ZoneTable,

    // ── Lot placement ─────────────────────────────────────────────────────
    /// Minimum distance between factories in industrial zones, metres.
    pub min_factory_spacing_m: f32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        GrowthConfig {
            default_segment_length_m: 200.0,
            highway_segment_length_m: 260.0,
            street_width_m: 12.0,
            highway_width_m: 18.0,

            default_branch_probability: 0.4,
            highway_branch_probability: 0.05,
            highway_branch_population_threshold: 0.1,
            normal_branch_population_threshold: 0.1,
            normal_branch_time_delay_from_highway: 5,
            forward_deviation_deg: 15.0,
            branch_deviation_deg: 3.0,

            minimum_intersection_deviation_deg: 30.0,
            road_snap_distance_m: 55.0,
            clearance_extra_m: 2.0,

            segment_count_limit: 2_000,

            quadtree: QuadtreeParams::default(),
            zoning_mode: ZoningMode::Heatmap,
            zones: ZoneTable::default(),

            min_factory_spacing_m: 200.0,
        }
    }
}

impl GrowthConfig {
    /// Corridor width for a segment class.
    #[inline]
    pub fn segment_width(&self, highway: bool) -> f32 {
        if highway { self.highway_width_m } else { self.street_width_m }
    }

    /// Nominal segment length for a segment class.
    #[inline]
    pub fn segment_length(&self, highway: bool) -> f32 {
        if highway { self.highway_segment_length_m } else { self.default_segment_length_m }
    }

    /// Widest corridor any segment can have.
    #[inline]
    pub fn max_road_width(&self) -> f32 {
        self.street_width_m.max(self.highway_width_m)
    }

    /// Reject configurations that would make growth meaningless or unsafe.
    pub fn validate(&self) -> CoreResult<()> {
        fn positive(name: &str, v: f32) -> CoreResult<()> {
            if v > 0.0 {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be positive, got {v}")))
            }
        }
        fn probability(name: &str, v: f64) -> CoreResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be in [0, 1], got {v}")))
            }
        }

        positive("default_segment_length_m", self.default_segment_length_m)?;
        positive("highway_segment_length_m", self.highway_segment_length_m)?;
        positive("street_width_m", self.street_width_m)?;
        positive("highway_width_m", self.highway_width_m)?;
        positive("road_snap_distance_m", self.road_snap_distance_m)?;
        positive("minimum_intersection_deviation_deg", self.minimum_intersection_deviation_deg)?;
        probability("default_branch_probability", self.default_branch_probability)?;
        probability("highway_branch_probability", self.highway_branch_probability)?;
        if self.clearance_extra_m < 0.0 {
            return Err(CoreError::Config(format!(
                "clearance_extra_m must be non-negative, got {}",
                self.clearance_extra_m
            )));
        }
        if self.segment_count_limit == 0 {
            return Err(CoreError::Config("segment_count_limit must be at least 1".into()));
        }

        let b = self.quadtree.bounds;
        if b.width() <= 0.0 || b.height() <= 0.0 {
            return Err(CoreError::Config("quadtree bounds are empty".into()));
        }
        if self.quadtree.max_objects == 0 {
            return Err(CoreError::Config("quadtree max_objects must be at least 1".into()));
        }
        for kind in crate::zone::ZoneKind::ALL {
            let spec = self.zones.get(kind);
            positive(&format!("zone {kind} block_length_m"), spec.block_length_m)?;
            if spec.building_mix.is_empty() {
                return Err(CoreError::Config(format!("zone {kind} has an empty building mix")));
            }
        }
        Ok(())
    }
}
