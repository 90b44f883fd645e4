//! Branch candidates grown from an accepted segment.
//!
//! A candidate is a segment that does not exist yet: geometry, growth time,
//! class, and a deferred link action the loop applies if the candidate
//! survives local constraints.  All randomness (continuation wiggle, branch
//! coin flips, branch jitter) draws from the run RNG in the order the code
//! reads below; reordering any call would change every city.

use cg_core::config::GrowthConfig;
use cg_core::geom::{self, Aabb, Point};
use cg_core::ids::SegmentId;
use cg_core::rng::CityRng;
use cg_field::{Heatmap, Zoning};
use cg_graph::{SegmentGraph, SegmentMeta};

// ── Candidate ─────────────────────────────────────────────────────────────────

/// Deferred topology work attached to a pending candidate, applied by the
/// growth loop only when the candidate is accepted.
#[derive(Copy, Clone, Debug)]
pub enum BranchAction {
    /// Cross-link the accepted child to its parent (and mirror to the
    /// parent's existing forward neighbours at the shared node).
    LinkToParent { parent: SegmentId },
}

/// A not-yet-accepted segment waiting in the growth queue.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub start: Point,
    pub end: Point,
    /// Growth time; the queue pops smaller values first.
    pub t: u32,
    pub width: f32,
    pub meta: SegmentMeta,
    pub action: Option<BranchAction>,
}

impl Candidate {
    #[inline]
    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.vector().length()
    }

    pub fn dir_deg(&self) -> f32 {
        geom::heading_deg(self.vector())
    }

    /// Corridor bounding box at the candidate's current endpoints.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.start, self.end).expanded(self.width * 0.5)
    }
}

// ── Global goals ──────────────────────────────────────────────────────────────

/// Candidates branching from the forward end of an accepted segment.
///
/// Severed segments produce nothing; their forward end is fused to the
/// existing network.
pub fn global_goals(
    graph: &SegmentGraph,
    parent: SegmentId,
    heatmap: &Heatmap,
    zoning: &mut Zoning,
    config: &GrowthConfig,
    rng: &mut CityRng,
) -> Vec<Candidate> {
    let prev = graph.get(parent);
    if prev.meta.severed {
        return Vec::new();
    }

    let anchor = prev.end();
    let prev_dir = prev.dir_deg();
    let prev_len = prev.length();
    let prev_t = prev.t;

    let make = |dir: f32, length: f32, highway: bool, extra_delay: u32| Candidate {
        start: anchor,
        end: anchor + geom::unit_from_heading(dir) * length,
        t: prev_t + 1 + extra_delay,
        width: config.segment_width(highway),
        meta: SegmentMeta { highway, severed: false, color: None },
        action: Some(BranchAction::LinkToParent { parent }),
    };

    let mut out = Vec::new();

    if prev.meta.highway {
        // Straight on or wiggle; the more populated alignment wins.
        let straight = make(prev_dir, prev_len, true, 0);
        let wiggled = make(
            prev_dir + rng.biased_deviation(config.forward_deviation_deg),
            prev_len,
            true,
            0,
        );
        let straight_pop = heatmap.population_on_road(straight.start, straight.end);
        let wiggled_pop = heatmap.population_on_road(wiggled.start, wiggled.end);
        let (kept, kept_pop) = if wiggled_pop > straight_pop {
            (wiggled, wiggled_pop)
        } else {
            (straight, straight_pop)
        };
        out.push(kept);

        // Perpendicular highway spurs where enough people live.
        if kept_pop > config.highway_branch_population_threshold {
            for side in [-90.0f32, 90.0] {
                if rng.gen_bool(config.highway_branch_probability) {
                    let dir = prev_dir + side + rng.biased_deviation(config.branch_deviation_deg);
                    out.push(make(dir, config.segment_length(true), true, 0));
                }
            }
        }
    } else {
        // Streets only push on into populated ground.
        let straight = make(prev_dir, prev_len, false, 0);
        if heatmap.population_on_road(straight.start, straight.end)
            > config.normal_branch_population_threshold
        {
            out.push(straight);
        }
    }

    // Side streets off either class, at the local block length.
    if heatmap.population_on_road(prev.start(), prev.end())
        > config.normal_branch_population_threshold
    {
        let block_length = config.zones.get(zoning.zone_at(anchor)).block_length_m;
        let delay = if prev.meta.highway {
            config.normal_branch_time_delay_from_highway
        } else {
            0
        };
        for side in [-90.0f32, 90.0] {
            if rng.gen_bool(config.default_branch_probability) {
                let dir = prev_dir + side + rng.biased_deviation(config.branch_deviation_deg);
                out.push(make(dir, block_length, false, delay));
            }
        }
    }

    out
}
