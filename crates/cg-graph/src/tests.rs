//! Unit tests for cg-graph.

#[cfg(test)]
mod helpers {
    use cg_core::config::QuadtreeParams;
    use cg_core::geom::{Aabb, Point};
    use cg_spatial::Quadtree;

    use crate::graph::SegmentGraph;
    use crate::segment::{Segment, SegmentMeta};

    pub fn seg(ax: f32, ay: f32, bx: f32, by: f32) -> Segment {
        Segment::new(Point::new(ax, ay), Point::new(bx, by), 0, 12.0, SegmentMeta::street())
    }

    pub fn qtree() -> Quadtree<cg_core::SegmentId> {
        Quadtree::new(&QuadtreeParams {
            bounds: Aabb::new(Point::new(-1_000.0, -1_000.0), Point::new(1_000.0, 1_000.0)),
            max_objects: 8,
            max_depth: 6,
        })
    }

    /// Property 3 of the network: every link is mutual.
    pub fn assert_link_symmetry(graph: &SegmentGraph) {
        for (id, seg) in graph.iter() {
            for &link in seg.links.back.iter().chain(seg.links.forward.iter()) {
                assert!(
                    graph.get(link).links.contains(id),
                    "link {link} does not point back at {id}"
                );
            }
        }
    }
}

// ── Segment basics ────────────────────────────────────────────────────────────

#[cfg(test)]
mod segment {
    use super::helpers::seg;
    use cg_core::geom::Point;

    #[test]
    fn heading_and_length() {
        let s = seg(0.0, 0.0, 100.0, 0.0);
        assert!((s.dir_deg() - 90.0).abs() < 1e-3);
        assert!((s.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn endpoint_setters_invalidate_the_cache() {
        let mut s = seg(0.0, 0.0, 100.0, 0.0);
        let _ = s.dir_deg(); // warm the cache
        s.set_end(Point::new(0.0, 100.0));
        assert!(s.dir_deg().abs() < 1e-3, "direction should now be +y");
        assert!((s.length() - 100.0).abs() < 1e-3);
        s.set_start(Point::new(0.0, 50.0));
        assert!((s.length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn aabb_tracks_current_endpoints() {
        let mut s = seg(0.0, 0.0, 100.0, 0.0);
        s.set_end(Point::new(40.0, 0.0));
        let bb = s.aabb();
        assert!((bb.max.x - 46.0).abs() < 1e-3, "box should reflect the new end plus half-width");
    }

    #[test]
    fn class_derived_attributes() {
        let street = seg(0.0, 0.0, 10.0, 0.0);
        assert_eq!(street.max_speed(), 800.0);
        assert_eq!(street.capacity(), 6);
        let mut highway = seg(0.0, 0.0, 10.0, 0.0);
        highway.meta.highway = true;
        assert_eq!(highway.max_speed(), 1_200.0);
        assert_eq!(highway.capacity(), 12);
    }

    #[test]
    fn same_edge_is_direction_blind() {
        let s = seg(0.0, 0.0, 100.0, 0.0);
        assert!(s.same_edge(Point::new(100.0, 0.0), Point::new(0.0, 0.0)));
        assert!(!s.same_edge(Point::new(0.0, 0.0), Point::new(50.0, 0.0)));
    }
}

// ── Orientation queries ───────────────────────────────────────────────────────

#[cfg(test)]
mod orientation {
    use super::helpers::seg;
    use crate::graph::{LinkEnd, SegmentGraph};

    #[test]
    fn unlinked_segment_defaults_to_normal() {
        let mut graph = SegmentGraph::new();
        let id = graph.push(seg(0.0, 0.0, 100.0, 0.0));
        assert!(graph.start_is_backwards(id));
    }

    #[test]
    fn back_neighbour_at_start_is_normal() {
        let mut graph = SegmentGraph::new();
        let a = graph.push(seg(0.0, 0.0, 100.0, 0.0));
        let n = graph.push(seg(0.0, 0.0, -100.0, 0.0));
        graph[a].links.add_back(n);
        graph[n].links.add_back(a);
        assert!(graph.start_is_backwards(a));
        assert_eq!(graph.end_containing(a, n), Some(LinkEnd::Start));
    }

    #[test]
    fn back_neighbour_at_end_is_reversed() {
        let mut graph = SegmentGraph::new();
        let a = graph.push(seg(0.0, 0.0, 100.0, 0.0));
        let n = graph.push(seg(100.0, 0.0, 200.0, 0.0));
        graph[a].links.add_back(n);
        assert!(!graph.start_is_backwards(a));
        assert_eq!(graph.end_containing(a, n), Some(LinkEnd::End));
    }

    #[test]
    fn forward_fallback_when_back_is_empty() {
        let mut graph = SegmentGraph::new();
        let a = graph.push(seg(0.0, 0.0, 100.0, 0.0));
        let n = graph.push(seg(100.0, 0.0, 200.0, 0.0));
        graph[a].links.add_forward(n);
        assert!(graph.start_is_backwards(a));
        assert_eq!(graph.end_containing(a, n), Some(LinkEnd::End));
    }

    #[test]
    fn unrelated_segment_is_not_contained() {
        let mut graph = SegmentGraph::new();
        let a = graph.push(seg(0.0, 0.0, 100.0, 0.0));
        let stranger = graph.push(seg(500.0, 500.0, 600.0, 500.0));
        assert_eq!(graph.end_containing(a, stranger), None);
    }
}

// ── Split ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod split {
    use super::helpers::{assert_link_symmetry, qtree, seg};
    use crate::graph::SegmentGraph;
    use cg_core::geom::Point;

    #[test]
    fn split_partitions_at_the_point() {
        let mut graph = SegmentGraph::new();
        let mut qt = qtree();
        let b = graph.push(seg(50.0, -30.0, 50.0, 30.0));
        let a = graph.push(seg(0.0, 0.0, 50.0, 0.0));
        qt.insert(graph[b].aabb(), b);
        qt.insert(graph[a].aabb(), a);

        let half = graph.split(b, Point::new(50.0, 0.0), a, &mut qt);

        // New half keeps the original start; target keeps the original end.
        assert!(graph[half].start().approx_eq(Point::new(50.0, -30.0)));
        assert!(graph[half].end().approx_eq(Point::new(50.0, 0.0)));
        assert!(graph[b].start().approx_eq(Point::new(50.0, 0.0)));
        assert!(graph[b].end().approx_eq(Point::new(50.0, 30.0)));

        // Inserter is cross-linked to both halves.
        assert!(graph[a].links.forward.contains(&half));
        assert!(graph[a].links.forward.contains(&b));
        assert_link_symmetry(&graph);
    }

    #[test]
    fn split_preserves_growth_time_and_meta() {
        let mut graph = SegmentGraph::new();
        let mut qt = qtree();
        let mut target = seg(0.0, 0.0, 0.0, 100.0);
        target.t = 9;
        target.meta.highway = true;
        let b = graph.push(target);
        let a = graph.push(seg(-50.0, 50.0, 0.0, 50.0));
        qt.insert(graph[b].aabb(), b);
        qt.insert(graph[a].aabb(), a);

        let half = graph.split(b, Point::new(0.0, 50.0), a, &mut qt);
        assert_eq!(graph[half].t, 9);
        assert!(graph[half].meta.highway);
        assert_eq!(graph[half].width, graph[b].width);
    }

    #[test]
    fn split_rewires_neighbours_at_the_moved_end() {
        let mut graph = SegmentGraph::new();
        let mut qt = qtree();
        // n -> b chain sharing node (50, -30); a will split b in the middle.
        let b = graph.push(seg(50.0, -30.0, 50.0, 30.0));
        let n = graph.push(seg(0.0, -30.0, 50.0, -30.0));
        let a = graph.push(seg(0.0, 0.0, 50.0, 0.0));
        graph[b].links.add_back(n);
        graph[n].links.add_forward(b);
        for id in [b, n, a] {
            qt.insert(graph[id].aabb(), id);
        }

        let half = graph.split(b, Point::new(50.0, 0.0), a, &mut qt);

        // n's link moved from b to the half that still touches it.
        assert!(graph[n].links.forward.contains(&half));
        assert!(!graph[n].links.forward.contains(&b));
        assert!(graph[half].links.back.contains(&n));
        assert_link_symmetry(&graph);
    }

    #[test]
    fn split_neighbour_union_matches_pre_split() {
        let mut graph = SegmentGraph::new();
        let mut qt = qtree();
        let b = graph.push(seg(50.0, -30.0, 50.0, 30.0));
        let n = graph.push(seg(0.0, -30.0, 50.0, -30.0));
        let a = graph.push(seg(0.0, 0.0, 50.0, 0.0));
        graph[b].links.add_back(n);
        graph[n].links.add_forward(b);
        for id in [b, n, a] {
            qt.insert(graph[id].aabb(), id);
        }

        let half = graph.split(b, Point::new(50.0, 0.0), a, &mut qt);

        // neighbours(half) ∪ neighbours(b) = pre-split neighbours ∪ {a},
        // modulo the halves referring to each other.
        let mut union: Vec<_> = graph[half]
            .links
            .back
            .iter()
            .chain(graph[half].links.forward.iter())
            .chain(graph[b].links.back.iter())
            .chain(graph[b].links.forward.iter())
            .copied()
            .filter(|&id| id != b && id != half)
            .collect();
        union.sort();
        union.dedup();
        assert_eq!(union, vec![n, a]);
    }

    #[test]
    fn split_half_is_registered_in_the_quadtree() {
        let mut graph = SegmentGraph::new();
        let mut qt = qtree();
        let b = graph.push(seg(50.0, -30.0, 50.0, 30.0));
        let a = graph.push(seg(0.0, 0.0, 50.0, 0.0));
        qt.insert(graph[b].aabb(), b);
        qt.insert(graph[a].aabb(), a);

        let half = graph.split(b, Point::new(50.0, 0.0), a, &mut qt);
        let hits = qt.retrieve(graph[half].aabb());
        assert!(hits.contains(&half));
    }

    #[test]
    #[should_panic(expected = "not in graph")]
    fn split_of_foreign_segment_fails_fast() {
        let mut graph = SegmentGraph::new();
        let mut qt = qtree();
        let a = graph.push(seg(0.0, 0.0, 50.0, 0.0));
        qt.insert(graph[a].aabb(), a);
        graph.split(cg_core::SegmentId(99), Point::new(0.0, 0.0), a, &mut qt);
    }
}
