//! Local constraints: resolve a candidate against the existing network.
//!
//! Split into a read-only planning pass and a mutation pass so the growth
//! loop can insert the candidate before any graph surgery runs:
//!
//! - [`check`] scans the quadtree, picks the winning action (intersect-split
//!   beats end-snap beats extend-to-line), enforces lateral clearance, and
//!   returns an [`Acceptance`] or `None`.
//! - [`commit`] executes the planned action once the accepted candidate has
//!   an id in the arena.
//!
//! The planning pass evaluates the action's own rejection rules (deviation
//! angle, duplicate edge) up front, so a returned `Acceptance` always
//! commits cleanly.

use cg_core::config::GrowthConfig;
use cg_core::geom::{
    self, Aabb, Point, angle_between, distance_to_line, min_degree_difference,
    point_segment_distance2, segment_intersection, segment_segment_distance2,
};
use cg_core::ids::SegmentId;
use cg_graph::{Segment, SegmentGraph};
use cg_spatial::Quadtree;

use crate::debug::DebugData;
use crate::goals::Candidate;

/// Cone around parallel (or anti-parallel) within which two segments are
/// subject to lateral clearance, degrees.
const NEAR_PARALLEL_DEG: f32 = 20.0;

/// Samples this close to a segment end are not tested; corridors may touch
/// at their shared nodes.  Metres of arc length.
const INTERIOR_MARGIN_M: f32 = 0.25;

// ── Planned outcome ───────────────────────────────────────────────────────────

/// Graph mutation to run after the accepted candidate is in the arena.
#[derive(Copy, Clone, Debug)]
pub enum CommitAction {
    /// Split `other` at `point`, cross-linking the new segment to both
    /// halves.
    SplitOther { other: SegmentId, point: Point },
    /// Splice the new segment into the node at `other`'s forward end.
    JoinAtNode { other: SegmentId },
}

/// A candidate that survived local constraints.
#[derive(Copy, Clone, Debug)]
pub struct Acceptance {
    /// Final forward endpoint (moved by snap, split, or extend).
    pub end: Point,
    /// Whether the forward end fused to the existing network.
    pub severed: bool,
    pub action: Option<CommitAction>,
}

// ── Pass 1 bookkeeping ────────────────────────────────────────────────────────

enum Proposal {
    Intersect { other: SegmentId, point: Point, t: f32 },
    Snap { other: SegmentId },
    Extend { other: SegmentId, point: Point },
}

impl Proposal {
    fn priority(&self) -> u8 {
        match self {
            Proposal::Intersect { .. } => 4,
            Proposal::Snap { .. } => 3,
            Proposal::Extend { .. } => 2,
        }
    }
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Resolve `cand` against the network.  Returns the acceptance plan, or
/// `None` when the candidate must be dropped.
pub fn check(
    cand: &Candidate,
    graph: &SegmentGraph,
    qtree: &Quadtree<SegmentId>,
    config: &GrowthConfig,
    debug: &mut DebugData,
) -> Option<Acceptance> {
    // The world rectangle is finite; a candidate reaching past it is dropped
    // here so the index's bounds precondition can never be violated.
    if !qtree.bounds().contains(cand.aabb()) {
        log::trace!("candidate at t={} rejected: outside world bounds", cand.t);
        return None;
    }

    // ── Pass 1: best action among retrieved neighbours ────────────────────
    //
    // The query box is padded by the snap radius so snap targets near the
    // candidate end are guaranteed to be in the scanned buckets; the exact
    // distance tests below do the real filtering.
    let snap2 = config.road_snap_distance_m * config.road_snap_distance_m;
    let mut best: Option<Proposal> = None;

    for other_id in qtree.retrieve(cand.aabb().expanded(config.road_snap_distance_m)) {
        let other = graph.get(other_id);
        let current = best.as_ref().map_or(0, Proposal::priority);

        // Priority 4: a true crossing.  The earliest crossing along the
        // candidate wins among all priority-4 proposals.
        if let Some(hit) =
            segment_intersection(cand.start, cand.end, other.start(), other.end(), false)
        {
            let closer = match &best {
                Some(Proposal::Intersect { t, .. }) => hit.t < *t,
                _ => true,
            };
            if closer {
                best = Some(Proposal::Intersect { other: other_id, point: hit.point, t: hit.t });
            }
            continue;
        }

        // Priority 3: candidate end within snap radius of an existing node.
        if current < 3 && cand.end.distance2(other.end()) <= snap2 {
            best = Some(Proposal::Snap { other: other_id });
            continue;
        }

        // Priority 2: candidate end projects into the interior of `other`
        // within the snap radius.
        if current < 2 {
            let d = distance_to_line(cand.end, other.start(), other.end());
            if d.distance2 < snap2 && d.line_proj2 > 0.0 && d.line_proj2 < d.length2 {
                best = Some(Proposal::Extend { other: other_id, point: d.point_on_line });
            }
        }
    }

    // ── Pass 2: lateral clearance at the would-be final geometry ──────────
    let planned_end = match &best {
        Some(Proposal::Intersect { point, .. }) | Some(Proposal::Extend { point, .. }) => *point,
        Some(Proposal::Snap { other }) => graph.get(*other).end(),
        None => cand.end,
    };

    let pad = config.max_road_width() + config.clearance_extra_m;
    let clearance_box = Aabb::from_points(cand.start, planned_end).expanded(pad);
    for other_id in qtree.retrieve(clearance_box) {
        let other = graph.get(other_id);
        if !lateral_clearance_ok(cand.start, planned_end, cand.width, other, config) {
            log::trace!("candidate at t={} rejected: clearance against {other_id}", cand.t);
            return None;
        }
    }

    // ── Plan the winning action's commit ──────────────────────────────────
    match best {
        None => Some(Acceptance { end: cand.end, severed: cand.meta.severed, action: None }),

        Some(Proposal::Intersect { other, point, .. }) => {
            let final_dir = geom::heading_deg(point - cand.start);
            if min_degree_difference(graph.get(other).dir_deg(), final_dir)
                < config.minimum_intersection_deviation_deg
            {
                log::trace!("candidate at t={} rejected: shallow crossing of {other}", cand.t);
                return None;
            }
            debug.note_intersection(point);
            Some(Acceptance {
                end: point,
                severed: true,
                action: Some(CommitAction::SplitOther { other, point }),
            })
        }

        Some(Proposal::Snap { other }) => {
            let node = graph.get(other).end();
            // Refuse to create a second edge across an existing node pair, in
            // either direction.  Compare against every segment at the node:
            // the target itself and all its links there.
            let node_links = if graph.start_is_backwards(other) {
                &graph.get(other).links.forward
            } else {
                &graph.get(other).links.back
            };
            let duplicate = node_links
                .iter()
                .chain(std::iter::once(&other))
                .any(|&l| graph.get(l).same_edge(cand.start, node));
            if duplicate {
                log::trace!("candidate at t={} rejected: duplicate edge at snap node", cand.t);
                return None;
            }
            debug.note_snap(node);
            Some(Acceptance {
                end: node,
                severed: true,
                action: Some(CommitAction::JoinAtNode { other }),
            })
        }

        Some(Proposal::Extend { other, point }) => {
            let final_dir = geom::heading_deg(point - cand.start);
            if min_degree_difference(graph.get(other).dir_deg(), final_dir)
                < config.minimum_intersection_deviation_deg
            {
                log::trace!("candidate at t={} rejected: shallow projection onto {other}", cand.t);
                return None;
            }
            debug.note_extend(point);
            Some(Acceptance {
                end: point,
                severed: true,
                action: Some(CommitAction::SplitOther { other, point }),
            })
        }
    }
}

// ── commit ────────────────────────────────────────────────────────────────────

/// Execute the planned graph surgery for an accepted candidate that now
/// lives in the arena as `new_id`.
pub fn commit(
    action: &CommitAction,
    new_id: SegmentId,
    graph: &mut SegmentGraph,
    qtree: &mut Quadtree<SegmentId>,
) {
    match action {
        CommitAction::SplitOther { other, point } => {
            graph.split(*other, *point, new_id, qtree);
        }
        CommitAction::JoinAtNode { other } => {
            let backwards = graph.start_is_backwards(*other);
            let node_links: Vec<SegmentId> = if backwards {
                graph.get(*other).links.forward.clone()
            } else {
                graph.get(*other).links.back.clone()
            };
            // Cross-link to every segment already meeting at the node.
            for link in node_links {
                if let Some(set) = graph.link_set_containing_mut(link, *other) {
                    if !set.contains(&new_id) {
                        set.push(new_id);
                    }
                }
                graph.get_mut(new_id).links.add_forward(link);
            }
            // And to the snap target itself.
            if backwards {
                graph.get_mut(*other).links.add_forward(new_id);
            } else {
                graph.get_mut(*other).links.add_back(new_id);
            }
            graph.get_mut(new_id).links.add_forward(*other);
        }
    }
}

// ── Lateral clearance ─────────────────────────────────────────────────────────

/// Whether the corridor `a1 -> a2` (width `width_a`) keeps its lateral
/// distance from `other`.
///
/// Only near-parallel pairs are constrained.  A pair sharing a node is a
/// legal continuation when it is colinear *through* that node: head-to-tail
/// with matching directions, or departing the node in opposite directions.
/// Anything else near-parallel is checked with tapered interior samples (if
/// the pair touches or crosses) or the plain closest-pair distance.
pub fn lateral_clearance_ok(
    a1: Point,
    a2: Point,
    width_a: f32,
    other: &Segment,
    config: &GrowthConfig,
) -> bool {
    let v_a = a2 - a1;
    let v_b = other.vector();
    let ang = angle_between(v_a, v_b);
    if ang >= NEAR_PARALLEL_DEG && ang <= 180.0 - NEAR_PARALLEL_DEG {
        return true;
    }

    let (b1, b2, width_b) = (other.start(), other.end(), other.width);

    // Shared node?
    let shared = [a1, a2]
        .into_iter()
        .find(|p| p.approx_eq(b1) || p.approx_eq(b2));
    if let Some(node) = shared {
        let head_to_tail = a1.approx_eq(b2) || a2.approx_eq(b1);
        let colinear_through = if head_to_tail {
            ang < NEAR_PARALLEL_DEG
        } else {
            ang > 180.0 - NEAR_PARALLEL_DEG
        };
        if colinear_through {
            return true;
        }
        // Sharing a node exempts only pairs colinear through it.  Two roads
        // leaving the node the same way, or one doubling back along the
        // other, stack their corridors beside the node; such pairs are not
        // treated as continuations and must still clear the tapered samples,
        // even though they meet at a legal shared endpoint.
        return interior_samples_clear(a1, a2, width_a, b1, b2, width_b, node, config);
    }

    // Near-parallel crossing that pass 1 did not claim.
    if let Some(hit) = segment_intersection(a1, a2, b1, b2, true) {
        return interior_samples_clear(a1, a2, width_a, b1, b2, width_b, hit.point, config);
    }

    // Disjoint: classical closest-pair distance against the full clearance.
    let required = 0.5 * (width_a + width_b) + config.clearance_extra_m;
    segment_segment_distance2(a1, a2, b1, b2) >= required * required
}

/// Sample both corridors near a touching point `i` and test the tapered
/// clearance there.  Widths decay linearly to zero within a taper length
/// equal to the opposing corridor's width, so meeting exactly at a node is
/// legal while running alongside is not.
#[allow(clippy::too_many_arguments)]
fn interior_samples_clear(
    a1: Point,
    a2: Point,
    width_a: f32,
    b1: Point,
    b2: Point,
    width_b: f32,
    i: Point,
    config: &GrowthConfig,
) -> bool {
    samples_clear_one_way(a1, a2, width_a, b1, b2, width_b, i, config)
        && samples_clear_one_way(b1, b2, width_b, a1, a2, width_a, i, config)
}

#[allow(clippy::too_many_arguments)]
fn samples_clear_one_way(
    s1: Point,
    s2: Point,
    w_self: f32,
    o1: Point,
    o2: Point,
    w_other: f32,
    i: Point,
    config: &GrowthConfig,
) -> bool {
    let len = (s2 - s1).length();
    if len < INTERIOR_MARGIN_M * 2.0 {
        return true;
    }
    let u = (s2 - s1) * (1.0 / len);
    let i_arc = (i - s1).dot(u);
    let step = (0.5 * len).min((w_other * 0.5).max(2.0));

    for offset in [-step, step] {
        let arc = i_arc + offset;
        // Strictly interior samples only; the node itself may touch.
        if arc <= INTERIOR_MARGIN_M || arc >= len - INTERIOR_MARGIN_M {
            continue;
        }
        let sample = s1 + u * arc;
        let from_node = offset.abs();
        let w_self_eff = w_self * (from_node / w_other.max(1e-3)).min(1.0);
        let w_other_eff = w_other * (from_node / w_self.max(1e-3)).min(1.0);
        let required = 0.5 * (w_self_eff + w_other_eff) + config.clearance_extra_m;
        if point_segment_distance2(sample, o1, o2) < required * required {
            return false;
        }
    }
    true
}
