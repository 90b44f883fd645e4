//! Bounded-region quadtree over axis-aligned bounding rectangles.
//!
//! # Why not an R-tree
//!
//! Growth inserts thousands of small boxes one at a time and queries with
//! boxes of similar scale; it never deletes (a split shortens a segment in
//! place, leaving its stale, larger box behind).  A fixed-bounds quadtree with
//! bucket retrieval handles that access pattern with no rebalancing, at the
//! cost of false positives in every query result.  Callers re-test candidates
//! against exact geometry, so the only contract that matters is: no false
//! negatives for any object whose bucket node touches the query rectangle.
//!
//! Objects are stored in exactly one node: the deepest node whose quadrant
//! fully contains their box.  Boxes spanning a quadrant boundary stay in the
//! parent bucket.

use cg_core::config::QuadtreeParams;
use cg_core::geom::Aabb;

/// Quadtree over `(Aabb, owner)` entries.  `T` is a cheap owner handle,
/// typically an arena id.
pub struct Quadtree<T: Copy> {
    root: Node<T>,
    max_objects: usize,
    max_depth: u32,
    len: usize,
}

struct Node<T> {
    bounds: Aabb,
    depth: u32,
    bucket: Vec<(Aabb, T)>,
    children: Option<Box<[Node<T>; 4]>>,
}

impl<T: Copy> Quadtree<T> {
    pub fn new(params: &QuadtreeParams) -> Self {
        Quadtree {
            root: Node {
                bounds: params.bounds,
                depth: 0,
                bucket: Vec::new(),
                children: None,
            },
            max_objects: params.max_objects.max(1),
            max_depth: params.max_depth,
            len: 0,
        }
    }

    /// World rectangle every inserted box must fit inside.
    pub fn bounds(&self) -> Aabb {
        self.root.bounds
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an object's bounding box.
    ///
    /// # Panics
    ///
    /// If `bbox` is not fully inside the tree bounds.  That is a programmer
    /// error (the configured world rectangle is too small), not a recoverable
    /// condition.
    pub fn insert(&mut self, bbox: Aabb, owner: T) {
        assert!(
            self.root.bounds.contains(bbox),
            "quadtree bounds {:?} do not contain inserted box {:?}",
            self.root.bounds,
            bbox,
        );
        self.root.insert(bbox, owner, self.max_objects, self.max_depth);
        self.len += 1;
    }

    /// All owners whose bucket node touches `query`.
    ///
    /// May contain false positives (bucket-mates far from the query box);
    /// never false negatives.  Order is deterministic: depth-first over
    /// quadrants in a fixed order, insertion order within a bucket.
    pub fn retrieve(&self, query: Aabb) -> Vec<T> {
        let mut out = Vec::new();
        self.root.retrieve(query, &mut out);
        out
    }

    /// Drop every stored object, keeping the configured bounds.  O(N).
    pub fn clear(&mut self) {
        self.root.bucket.clear();
        self.root.children = None;
        self.len = 0;
    }
}

impl<T: Copy> Node<T> {
    fn insert(&mut self, bbox: Aabb, owner: T, max_objects: usize, max_depth: u32) {
        if let Some(children) = &mut self.children {
            if let Some(q) = quadrant_containing(children, bbox) {
                children[q].insert(bbox, owner, max_objects, max_depth);
                return;
            }
            // Spans a quadrant boundary: lives here.
            self.bucket.push((bbox, owner));
            return;
        }

        self.bucket.push((bbox, owner));

        if self.bucket.len() > max_objects && self.depth < max_depth {
            self.subdivide();
            if let Some(children) = &mut self.children {
                let entries = std::mem::take(&mut self.bucket);
                for (bb, o) in entries {
                    match quadrant_containing(children, bb) {
                        Some(q) => children[q].insert(bb, o, max_objects, max_depth),
                        None => self.bucket.push((bb, o)),
                    }
                }
            }
        }
    }

    fn subdivide(&mut self) {
        let min = self.bounds.min;
        let max = self.bounds.max;
        let mid = self.bounds.center();
        let depth = self.depth + 1;
        let child = |bb: Aabb| Node {
            bounds: bb,
            depth,
            bucket: Vec::new(),
            children: None,
        };
        self.children = Some(Box::new([
            child(Aabb::from_points(min, mid)),
            child(Aabb::from_points(cg_core::Point::new(mid.x, min.y), cg_core::Point::new(max.x, mid.y))),
            child(Aabb::from_points(cg_core::Point::new(min.x, mid.y), cg_core::Point::new(mid.x, max.y))),
            child(Aabb::from_points(mid, max)),
        ]));
    }

    fn retrieve(&self, query: Aabb, out: &mut Vec<T>) {
        if !self.bounds.intersects(query) {
            return;
        }
        out.extend(self.bucket.iter().map(|(_, o)| *o));
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.retrieve(query, out);
            }
        }
    }
}

/// Index of the child quadrant fully containing `bbox`, if any.
fn quadrant_containing<T>(children: &[Node<T>; 4], bbox: Aabb) -> Option<usize> {
    children.iter().position(|c| c.bounds.contains(bbox))
}
