//! The generation entry point and its result bundle.

use cg_core::config::GrowthConfig;
use cg_core::geom::Point;
use cg_core::ids::SegmentId;
use cg_core::rng::{CityRng, CitySeed};
use cg_field::{Heatmap, Zoning};
use cg_graph::{Segment, SegmentGraph, SegmentMeta};
use cg_spatial::Quadtree;

use crate::constraints;
use crate::debug::DebugData;
use crate::error::GrowthResult;
use crate::goals::{self, BranchAction};
use crate::queue::GrowthQueue;

// ── CityPlan ──────────────────────────────────────────────────────────────────

/// Everything `generate` produces.
///
/// The heatmap and zoning come back calibrated to the network extent.  The
/// RNG is returned mid-stream on purpose: lot placement continues the same
/// draw sequence, so one seed still means one city after buildings go in.
pub struct CityPlan {
    pub graph: SegmentGraph,
    pub qtree: Quadtree<SegmentId>,
    pub heatmap: Heatmap,
    pub zoning: Zoning,
    pub debug: DebugData,
    pub rng: CityRng,
}

impl CityPlan {
    /// Radial band unit the fields were calibrated with.
    pub fn r_unit(&self) -> f32 {
        self.heatmap.r_unit()
    }
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Grow a road network from a seed.
///
/// Deterministic: the same seed and configuration produce an identical plan,
/// segment for segment, link for link.
pub fn generate(seed: impl Into<CitySeed>, config: &GrowthConfig) -> GrowthResult<CityPlan> {
    config.validate()?;

    let mut rng = CityRng::new(seed);
    let noise_seed = rng.noise_seed();
    let mut heatmap = Heatmap::new(noise_seed);
    let mut zoning = Zoning::new(noise_seed, config.zoning_mode);

    let mut graph = SegmentGraph::new();
    let mut qtree = Quadtree::new(&config.quadtree);
    let mut queue = GrowthQueue::new();
    let mut debug = DebugData::default();

    // ── Root pair: two opposed highways out of the origin ─────────────────
    let root_len = config.segment_length(true);
    let root_width = config.segment_width(true);
    let east = graph.push(Segment::new(
        Point::ZERO,
        Point::new(root_len, 0.0),
        0,
        root_width,
        SegmentMeta::highway(),
    ));
    let west = graph.push(Segment::new(
        Point::ZERO,
        Point::new(-root_len, 0.0),
        0,
        root_width,
        SegmentMeta::highway(),
    ));
    qtree.insert(graph.get(east).aabb(), east);
    qtree.insert(graph.get(west).aabb(), west);
    graph.get_mut(east).links.add_back(west);
    graph.get_mut(west).links.add_back(east);

    for root in [east, west] {
        for child in goals::global_goals(&graph, root, &heatmap, &mut zoning, config, &mut rng) {
            queue.push(child);
        }
    }

    // ── Expansion loop ────────────────────────────────────────────────────
    while let Some(cand) = queue.pop() {
        if graph.len() >= config.segment_count_limit {
            break;
        }

        let Some(acceptance) = constraints::check(&cand, &graph, &qtree, config, &mut debug)
        else {
            continue;
        };

        let mut segment =
            Segment::new(cand.start, acceptance.end, cand.t, cand.width, cand.meta);
        segment.meta.severed = cand.meta.severed || acceptance.severed;
        let id = graph.push(segment);
        qtree.insert(graph.get(id).aabb(), id);

        if let Some(action) = &acceptance.action {
            constraints::commit(action, id, &mut graph, &mut qtree);
        }
        if let Some(BranchAction::LinkToParent { parent }) = cand.action {
            apply_branch_links(&mut graph, id, parent);
        }

        for child in goals::global_goals(&graph, id, &heatmap, &mut zoning, config, &mut rng) {
            queue.push(child);
        }
    }
    log::debug!(
        "growth finished: {} segments, {} pending candidates discarded",
        graph.len(),
        queue.len()
    );

    // ── Calibrate the fields to the grown extent ──────────────────────────
    let mut max_dist2 = 0.0f32;
    for (_, segment) in graph.iter() {
        max_dist2 = max_dist2.max(segment.start().length2()).max(segment.end().length2());
    }
    if max_dist2 > 0.0 {
        let r_unit = max_dist2.sqrt() / 5.0;
        heatmap.set_r_unit(r_unit);
        zoning.set_r_unit(r_unit);
    }

    Ok(CityPlan { graph, qtree, heatmap, zoning, debug, rng })
}

/// Wire an accepted child to its parent's forward node, mirroring to every
/// neighbour already attached there.  All insertions deduplicate, so a
/// neighbour present on both sides never double-links.
fn apply_branch_links(graph: &mut SegmentGraph, child: SegmentId, parent: SegmentId) {
    let existing: Vec<SegmentId> = graph.get(parent).links.forward.clone();
    for link in existing {
        graph.get_mut(child).links.add_back(link);
        if let Some(set) = graph.link_set_containing_mut(link, parent) {
            if !set.contains(&child) {
                set.push(child);
            }
        }
    }
    graph.get_mut(parent).links.add_forward(child);
    graph.get_mut(child).links.add_back(parent);
}
