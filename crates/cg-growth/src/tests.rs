//! Unit tests for cg-growth.

#[cfg(test)]
mod helpers {
    use cg_core::config::GrowthConfig;
    use cg_core::geom::Point;
    use cg_core::ids::SegmentId;
    use cg_graph::{Segment, SegmentGraph, SegmentMeta};
    use cg_spatial::Quadtree;

    use crate::goals::Candidate;

    pub fn config() -> GrowthConfig {
        GrowthConfig { segment_count_limit: 400, ..GrowthConfig::default() }
    }

    pub fn world(config: &GrowthConfig) -> (SegmentGraph, Quadtree<SegmentId>) {
        (SegmentGraph::new(), Quadtree::new(&config.quadtree))
    }

    pub fn add_road(
        graph: &mut SegmentGraph,
        qtree: &mut Quadtree<SegmentId>,
        a: (f32, f32),
        b: (f32, f32),
        width: f32,
        highway: bool,
    ) -> SegmentId {
        let meta = if highway { SegmentMeta::highway() } else { SegmentMeta::street() };
        let id = graph.push(Segment::new(
            Point::new(a.0, a.1),
            Point::new(b.0, b.1),
            0,
            width,
            meta,
        ));
        qtree.insert(graph.get(id).aabb(), id);
        id
    }

    pub fn street_candidate(a: (f32, f32), b: (f32, f32), width: f32) -> Candidate {
        Candidate {
            start: Point::new(a.0, a.1),
            end: Point::new(b.0, b.1),
            t: 1,
            width,
            meta: SegmentMeta::street(),
            action: None,
        }
    }

    /// Insert an accepted candidate the way the growth loop does, then run
    /// its commit.  Returns the new segment's id.
    pub fn accept(
        cand: &Candidate,
        acceptance: &crate::constraints::Acceptance,
        graph: &mut SegmentGraph,
        qtree: &mut Quadtree<SegmentId>,
    ) -> SegmentId {
        let mut segment =
            Segment::new(cand.start, acceptance.end, cand.t, cand.width, cand.meta);
        segment.meta.severed = cand.meta.severed || acceptance.severed;
        let id = graph.push(segment);
        qtree.insert(graph.get(id).aabb(), id);
        if let Some(action) = &acceptance.action {
            crate::constraints::commit(action, id, graph, qtree);
        }
        id
    }
}

// ── GrowthQueue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::helpers::street_candidate;
    use crate::queue::GrowthQueue;

    #[test]
    fn pops_smallest_time_first() {
        let mut queue = GrowthQueue::new();
        for (t, x) in [(5u32, 1.0f32), (1, 2.0), (3, 3.0)] {
            let mut cand = street_candidate((x, 0.0), (x + 10.0, 0.0), 12.0);
            cand.t = t;
            queue.push(cand);
        }
        let order: Vec<u32> = std::iter::from_fn(|| queue.pop().map(|c| c.t)).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }

    #[test]
    fn ties_preserve_insertion_order() {
        let mut queue = GrowthQueue::new();
        for x in [10.0f32, 20.0, 30.0] {
            queue.push(street_candidate((x, 0.0), (x + 10.0, 0.0), 12.0));
        }
        let xs: Vec<f32> = std::iter::from_fn(|| queue.pop().map(|c| c.start.x)).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn len_tracks_push_and_pop() {
        let mut queue = GrowthQueue::new();
        assert!(queue.is_empty());
        queue.push(street_candidate((0.0, 0.0), (10.0, 0.0), 12.0));
        queue.push(street_candidate((0.0, 0.0), (20.0, 0.0), 12.0));
        assert_eq!(queue.len(), 2);
        let _ = queue.pop();
        assert_eq!(queue.len(), 1);
        let _ = queue.pop();
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }
}

// ── Local constraints ─────────────────────────────────────────────────────────

#[cfg(test)]
mod constraints {
    use super::helpers::{accept, add_road, config, street_candidate, world};
    use crate::constraints::{self, CommitAction};
    use crate::debug::DebugData;
    use cg_core::geom::Point;

    #[test]
    fn crossing_splits_the_other_segment() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        let crossed = add_road(&mut graph, &mut qtree, (50.0, -30.0), (50.0, 30.0), 12.0, false);
        let mut debug = DebugData::default();

        let cand = street_candidate((0.0, 0.0), (100.0, 0.0), 12.0);
        let acceptance = constraints::check(&cand, &graph, &qtree, &config, &mut debug)
            .expect("perpendicular crossing is accepted");

        assert!(acceptance.end.approx_eq(Point::new(50.0, 0.0)));
        assert!(acceptance.severed);
        assert!(matches!(acceptance.action, Some(CommitAction::SplitOther { .. })));
        assert_eq!(debug.intersections.len(), 1);

        let new_id = accept(&cand, &acceptance, &mut graph, &mut qtree);

        // The crossed segment is partitioned at the crossing point and the
        // new segment is linked to both halves.
        let half = cg_core::SegmentId(2);
        assert!(graph.get(half).start().approx_eq(Point::new(50.0, -30.0)));
        assert!(graph.get(half).end().approx_eq(Point::new(50.0, 0.0)));
        assert!(graph.get(crossed).start().approx_eq(Point::new(50.0, 0.0)));
        assert!(graph.get(new_id).links.forward.contains(&half));
        assert!(graph.get(new_id).links.forward.contains(&crossed));
    }

    #[test]
    fn shallow_crossing_is_rejected() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        // Crosses the candidate at roughly 11 degrees.
        add_road(&mut graph, &mut qtree, (0.0, 10.0), (100.0, -10.0), 12.0, false);
        let mut debug = DebugData::default();

        let cand = street_candidate((0.0, 0.0), (100.0, 0.0), 12.0);
        assert!(constraints::check(&cand, &graph, &qtree, &config, &mut debug).is_none());
    }

    #[test]
    fn end_snaps_to_existing_node() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        let target = add_road(&mut graph, &mut qtree, (54.9, 80.0), (54.9, 0.0), 12.0, false);
        let mut debug = DebugData::default();

        let cand = street_candidate((0.0, 0.0), (55.0, 0.0), 12.0);
        let acceptance = constraints::check(&cand, &graph, &qtree, &config, &mut debug)
            .expect("node within snap radius");

        assert!(acceptance.end.approx_eq(Point::new(54.9, 0.0)));
        assert!(acceptance.severed);
        assert!(matches!(acceptance.action, Some(CommitAction::JoinAtNode { .. })));
        assert_eq!(debug.snaps.len(), 1);

        let new_id = accept(&cand, &acceptance, &mut graph, &mut qtree);
        assert!(graph.get(new_id).links.forward.contains(&target));
        assert!(graph.get(target).links.contains(new_id));
    }

    #[test]
    fn end_extends_to_segment_interior() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        let target = add_road(&mut graph, &mut qtree, (200.0, -100.0), (200.0, 100.0), 12.0, false);
        let mut debug = DebugData::default();

        let cand = street_candidate((0.0, 0.0), (150.0, 0.0), 12.0);
        let acceptance = constraints::check(&cand, &graph, &qtree, &config, &mut debug)
            .expect("projection inside segment within snap radius");

        assert!(acceptance.end.approx_eq(Point::new(200.0, 0.0)));
        assert!(acceptance.severed);
        assert_eq!(debug.intersections_radius.len(), 1);

        let new_id = accept(&cand, &acceptance, &mut graph, &mut qtree);
        // Split happened at the foot of the projection.
        let half = cg_core::SegmentId(2);
        assert!(graph.get(half).end().approx_eq(Point::new(200.0, 0.0)));
        assert!(graph.get(target).start().approx_eq(Point::new(200.0, 0.0)));
        assert!(graph.get(new_id).links.forward.contains(&half));
        assert!(graph.get(new_id).links.forward.contains(&target));
    }

    #[test]
    fn near_parallel_too_close_is_rejected() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        add_road(&mut graph, &mut qtree, (0.0, 0.0), (200.0, 0.0), 12.0, false);
        let mut debug = DebugData::default();

        // Same class: required gap is 12 + 2 m.  Offset 13 m, closest pair
        // 13.9 m, disjoint (no snap or projection applies).
        let cand = street_candidate((205.0, 13.0), (405.0, 13.0), 12.0);
        assert!(constraints::check(&cand, &graph, &qtree, &config, &mut debug).is_none());
    }

    #[test]
    fn near_parallel_with_margin_is_accepted() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        add_road(&mut graph, &mut qtree, (0.0, 0.0), (200.0, 0.0), 12.0, false);
        let mut debug = DebugData::default();

        let cand = street_candidate((205.0, 15.0), (405.0, 15.0), 12.0);
        let acceptance = constraints::check(&cand, &graph, &qtree, &config, &mut debug)
            .expect("15.8 m closest pair clears the 14 m requirement");
        assert!(acceptance.action.is_none());
        assert!(!acceptance.severed);
    }

    #[test]
    fn colinear_continuation_through_a_shared_node_is_allowed() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        let west = add_road(&mut graph, &mut qtree, (0.0, 0.0), (-260.0, 0.0), 18.0, true);

        // Departing the shared node the opposite way, half a degree off the
        // shared line: a legal continuation.
        let ok = constraints::lateral_clearance_ok(
            Point::ZERO,
            Point::new(259.99, 2.27),
            18.0,
            graph.get(west),
            &config,
        );
        assert!(ok, "opposed colinear highways may share a node");

        // Departing the node in the same direction overlaps the corridor.
        let east = add_road(&mut graph, &mut qtree, (0.0, 0.0), (260.0, 0.0), 18.0, true);
        let overlapping = constraints::lateral_clearance_ok(
            Point::ZERO,
            Point::new(259.99, 2.27),
            18.0,
            graph.get(east),
            &config,
        );
        assert!(!overlapping, "same-direction departure must be rejected");
    }

    #[test]
    fn duplicate_of_an_existing_edge_is_rejected() {
        let config = config();
        let (mut graph, mut qtree) = world(&config);
        add_road(&mut graph, &mut qtree, (0.0, 0.0), (100.0, 0.0), 12.0, false);
        let mut debug = DebugData::default();

        let cand = street_candidate((0.0, 0.0), (99.0, 0.0), 12.0);
        assert!(constraints::check(&cand, &graph, &qtree, &config, &mut debug).is_none());
    }

    #[test]
    fn candidate_outside_world_bounds_is_rejected() {
        let config = config();
        let (graph, qtree) = world(&config);
        let mut debug = DebugData::default();

        let cand = street_candidate((19_990.0, 0.0), (20_300.0, 0.0), 12.0);
        assert!(constraints::check(&cand, &graph, &qtree, &config, &mut debug).is_none());
    }
}

// ── generate ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate {
    use super::helpers::config;
    use crate::generate::generate;
    use cg_core::GrowthConfig;
    use cg_core::geom::Point;

    #[test]
    fn seed_zero_boots_the_root_highway_pair() {
        let plan = generate("0", &config()).unwrap();
        assert!(plan.graph.len() >= 2);

        let east = plan.graph.get(cg_core::SegmentId(0));
        let west = plan.graph.get(cg_core::SegmentId(1));
        assert!(east.start().approx_eq(Point::ZERO));
        assert!(east.end().approx_eq(Point::new(260.0, 0.0)));
        assert!(west.end().approx_eq(Point::new(-260.0, 0.0)));
        assert!(east.meta.highway && west.meta.highway);
        assert!(east.links.back.contains(&cg_core::SegmentId(1)));
        assert!(west.links.back.contains(&cg_core::SegmentId(0)));
    }

    #[test]
    fn same_seed_reproduces_the_city_exactly() {
        let a = generate("determinism", &config()).unwrap();
        let b = generate("determinism", &config()).unwrap();

        assert_eq!(a.graph.len(), b.graph.len());
        for ((_, sa), (_, sb)) in a.graph.iter().zip(b.graph.iter()) {
            assert_eq!(sa.start(), sb.start());
            assert_eq!(sa.end(), sb.end());
            assert_eq!(sa.t, sb.t);
            assert_eq!(sa.meta, sb.meta);
            assert_eq!(sa.links.back, sb.links.back);
            assert_eq!(sa.links.forward, sb.links.forward);
        }
        assert_eq!(a.debug.intersections.len(), b.debug.intersections.len());
        assert_eq!(a.debug.snaps.len(), b.debug.snaps.len());
        assert_eq!(a.r_unit(), b.r_unit());
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate("city-a", &config()).unwrap();
        let b = generate("city-b", &config()).unwrap();
        let same = a.graph.len() == b.graph.len()
            && a.graph
                .iter()
                .zip(b.graph.iter())
                .all(|((_, sa), (_, sb))| sa.end() == sb.end());
        assert!(!same, "two seeds produced byte-identical networks");
    }

    #[test]
    fn growth_stops_at_the_segment_limit() {
        let config = GrowthConfig { segment_count_limit: 50, ..GrowthConfig::default() };
        let plan = generate(7u64, &config).unwrap();
        assert!(plan.graph.len() <= 50);
        assert!(plan.graph.len() >= 2);
    }

    #[test]
    fn no_duplicate_edges() {
        let config = GrowthConfig { segment_count_limit: 300, ..GrowthConfig::default() };
        let plan = generate("dedup", &config).unwrap();
        let segments: Vec<_> = plan.graph.iter().map(|(_, s)| s).collect();
        for (i, a) in segments.iter().enumerate() {
            for b in segments.iter().skip(i + 1) {
                assert!(
                    !a.same_edge(b.start(), b.end()),
                    "two segments span the same node pair"
                );
            }
        }
    }

    #[test]
    fn links_are_symmetric_and_touch_the_right_ends() {
        let config = GrowthConfig { segment_count_limit: 300, ..GrowthConfig::default() };
        let plan = generate("topology", &config).unwrap();
        for (id, seg) in plan.graph.iter() {
            let backwards = plan.graph.start_is_backwards(id);
            let back_node = if backwards { seg.start() } else { seg.end() };
            let forward_node = if backwards { seg.end() } else { seg.start() };
            for &link in &seg.links.back {
                assert!(plan.graph.get(link).links.contains(id), "asymmetric link");
                assert!(plan.graph.get(link).touches(back_node), "back link at wrong node");
            }
            for &link in &seg.links.forward {
                assert!(plan.graph.get(link).links.contains(id), "asymmetric link");
                assert!(plan.graph.get(link).touches(forward_node), "forward link at wrong node");
            }
        }
    }

    #[test]
    fn every_segment_is_retrievable_from_the_quadtree() {
        let config = GrowthConfig { segment_count_limit: 200, ..GrowthConfig::default() };
        let plan = generate("coverage", &config).unwrap();
        for (id, seg) in plan.graph.iter() {
            assert!(
                plan.qtree.retrieve(seg.aabb()).contains(&id),
                "segment {id} invisible to the index"
            );
        }
    }

    #[test]
    fn r_unit_is_a_fifth_of_the_maximum_extent() {
        let plan = generate("calibration", &config()).unwrap();
        let mut max_dist = 0.0f32;
        for (_, seg) in plan.graph.iter() {
            max_dist = max_dist.max(seg.start().length()).max(seg.end().length());
        }
        assert!((plan.r_unit() - max_dist / 5.0).abs() < 1e-3);
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = GrowthConfig { segment_count_limit: 0, ..GrowthConfig::default() };
        assert!(generate(1u64, &config).is_err());
    }
}
