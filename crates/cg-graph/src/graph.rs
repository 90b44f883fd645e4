//! The segment arena and its topology operations.

use cg_core::geom::Point;
use cg_core::ids::SegmentId;
use cg_spatial::Quadtree;

use crate::segment::Segment;

/// Which endpoint of a segment a neighbour attaches to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkEnd {
    Start,
    End,
}

/// Arena of all accepted segments.  `SegmentId`s are indices in insertion
/// order and remain stable forever (splits append, nothing is removed).
#[derive(Default)]
pub struct SegmentGraph {
    segments: Vec<Segment>,
}

impl SegmentGraph {
    pub fn new() -> Self {
        SegmentGraph::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment, returning its id.
    pub fn push(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId(self.segments.len() as u32);
        self.segments.push(segment);
        id
    }

    pub fn get(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.index()]
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        id.index() < self.segments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentId(i as u32), s))
    }

    // ── Orientation queries ───────────────────────────────────────────────

    /// Whether the `back` link set attaches at `start` (the normal, as-grown
    /// orientation).
    ///
    /// Deduced from the first back neighbour's endpoints, falling back to the
    /// first forward neighbour.  A segment with no links at all reports the
    /// normal orientation.
    pub fn start_is_backwards(&self, id: SegmentId) -> bool {
        let seg = self.get(id);
        if let Some(&first) = seg.links.back.first() {
            self.get(first).touches(seg.start())
        } else if let Some(&first) = seg.links.forward.first() {
            self.get(first).touches(seg.end())
        } else {
            true
        }
    }

    /// The endpoint of `id` that `other` attaches to, or `None` when the two
    /// are not linked.
    pub fn end_containing(&self, id: SegmentId, other: SegmentId) -> Option<LinkEnd> {
        let seg = self.get(id);
        let backwards = self.start_is_backwards(id);
        if seg.links.back.contains(&other) {
            Some(if backwards { LinkEnd::Start } else { LinkEnd::End })
        } else if seg.links.forward.contains(&other) {
            Some(if backwards { LinkEnd::End } else { LinkEnd::Start })
        } else {
            None
        }
    }

    // ── Link surgery ──────────────────────────────────────────────────────

    /// The link set of `of` that currently holds `neighbor`, for splicing a
    /// new segment into the same node.
    pub fn link_set_containing_mut(
        &mut self,
        of: SegmentId,
        neighbor: SegmentId,
    ) -> Option<&mut Vec<SegmentId>> {
        let links = &mut self.segments[of.index()].links;
        if links.back.contains(&neighbor) {
            Some(&mut links.back)
        } else if links.forward.contains(&neighbor) {
            Some(&mut links.forward)
        } else {
            None
        }
    }

    /// Replace every occurrence of `old` in `of`'s link sets with `new`.
    pub fn replace_link(&mut self, of: SegmentId, old: SegmentId, new: SegmentId) {
        let links = &mut self.segments[of.index()].links;
        for slot in links.back.iter_mut().chain(links.forward.iter_mut()) {
            if *slot == old {
                *slot = new;
            }
        }
    }

    // ── Split ─────────────────────────────────────────────────────────────

    /// Split `target` at `point`, splicing `inserter` into the new node.
    ///
    /// The new half (keeping the original start) is appended to the arena and
    /// the quadtree; `target` is shortened in place to `point -> end`.  Each
    /// half retains the links at its surviving endpoint, the neighbours at
    /// the moved endpoint are rewired to the new half, and `inserter` is
    /// cross-linked to both halves at the split node.
    ///
    /// Returns the id of the new half.
    ///
    /// # Panics
    ///
    /// If `target` or `inserter` is not in this graph.
    pub fn split(
        &mut self,
        target: SegmentId,
        point: Point,
        inserter: SegmentId,
        qtree: &mut Quadtree<SegmentId>,
    ) -> SegmentId {
        assert!(self.contains(target), "split target {target} not in graph");
        assert!(self.contains(inserter), "inserter {inserter} not in graph");

        let backwards = self.start_is_backwards(target);

        let split_part = {
            let seg = self.get(target);
            let mut part = Segment::new(seg.start(), point, seg.t, seg.width, seg.meta);
            part.links = seg.links.clone();
            part
        };
        let split_id = self.push(split_part);
        qtree.insert(self.get(split_id).aabb(), split_id);

        self.get_mut(target).set_start(point);

        // Neighbours at the endpoint that moved to the new half still point
        // at `target`; rewire them.
        let fix_links: Vec<SegmentId> = if backwards {
            self.get(split_id).links.back.clone()
        } else {
            self.get(split_id).links.forward.clone()
        };
        for link in fix_links {
            self.replace_link(link, target, split_id);
        }

        // Wire the new node: inserter joins both halves, the halves join
        // each other.
        let (first, second) = if backwards { (split_id, target) } else { (target, split_id) };
        self.segments[first.index()].links.forward = vec![inserter, second];
        self.segments[second.index()].links.back = vec![inserter, first];
        let inserter_links = &mut self.segments[inserter.index()].links;
        inserter_links.add_forward(first);
        inserter_links.add_forward(second);

        split_id
    }
}

impl std::ops::Index<SegmentId> for SegmentGraph {
    type Output = Segment;
    fn index(&self, id: SegmentId) -> &Segment {
        self.get(id)
    }
}

impl std::ops::IndexMut<SegmentId> for SegmentGraph {
    fn index_mut(&mut self, id: SegmentId) -> &mut Segment {
        self.get_mut(id)
    }
}
