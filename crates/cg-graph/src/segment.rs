//! The road segment entity.
//!
//! A segment is directed by construction (`start` is where it grew from) but
//! the network it forms is undirected; the `back`/`forward` link sets record
//! which neighbours share which endpoint.  Link-set iteration order is
//! insertion order, which the generator relies on for determinism.

use std::cell::Cell;

use cg_core::geom::{self, Aabb, Point};
use cg_core::ids::SegmentId;
use cg_spatial::Collider;

// ── Class-derived constants ───────────────────────────────────────────────────

const HIGHWAY_MAX_SPEED: f32 = 1_200.0;
const STREET_MAX_SPEED: f32 = 800.0;
const HIGHWAY_CAPACITY: u32 = 12;
const STREET_CAPACITY: u32 = 6;

// ── Meta and links ────────────────────────────────────────────────────────────

/// Per-segment flags.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentMeta {
    pub highway: bool,
    /// The forward end is attached to the existing network; no further
    /// branches grow from it.
    pub severed: bool,
    /// Renderer hint, carried through untouched.
    pub color: Option<u32>,
}

impl SegmentMeta {
    pub fn highway() -> Self {
        SegmentMeta { highway: true, ..SegmentMeta::default() }
    }

    pub fn street() -> Self {
        SegmentMeta::default()
    }
}

/// Neighbour sets, one per endpoint.  Ordered, deduplicated by the surgery
/// helpers.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Links {
    pub back: Vec<SegmentId>,
    pub forward: Vec<SegmentId>,
}

impl Links {
    /// Append to `back` unless already present.
    pub fn add_back(&mut self, id: SegmentId) {
        if !self.back.contains(&id) {
            self.back.push(id);
        }
    }

    /// Append to `forward` unless already present.
    pub fn add_forward(&mut self, id: SegmentId) {
        if !self.forward.contains(&id) {
            self.forward.push(id);
        }
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.back.contains(&id) || self.forward.contains(&id)
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone)]
struct GeomCache {
    revision: u32,
    heading_deg: f32,
    length: f32,
}

/// One straight road edge.
///
/// Endpoints are private: the setters bump a revision counter that
/// invalidates the cached heading/length, so stale geometry can never be
/// observed after link surgery moves an endpoint.
#[derive(Clone, Debug)]
pub struct Segment {
    start: Point,
    end: Point,
    /// Corridor width, metres.
    pub width: f32,
    /// Growth time; the priority key that ordered this segment's insertion.
    pub t: u32,
    pub meta: SegmentMeta,
    pub links: Links,
    revision: u32,
    cache: Cell<Option<GeomCache>>,
}

impl std::fmt::Debug for GeomCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeomCache").field("revision", &self.revision).finish()
    }
}

impl Segment {
    pub fn new(start: Point, end: Point, t: u32, width: f32, meta: SegmentMeta) -> Self {
        Segment {
            start,
            end,
            width,
            t,
            meta,
            links: Links::default(),
            revision: 0,
            cache: Cell::new(None),
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn set_start(&mut self, p: Point) {
        self.start = p;
        self.revision += 1;
    }

    pub fn set_end(&mut self, p: Point) {
        self.end = p;
        self.revision += 1;
    }

    /// Direction vector from start to end.
    #[inline]
    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    fn geom(&self) -> GeomCache {
        if let Some(cache) = self.cache.get() {
            if cache.revision == self.revision {
                return cache;
            }
        }
        let v = self.vector();
        let cache = GeomCache {
            revision: self.revision,
            heading_deg: geom::heading_deg(v),
            length: v.length(),
        };
        self.cache.set(Some(cache));
        cache
    }

    /// Heading in degrees, cached until an endpoint moves.
    #[inline]
    pub fn dir_deg(&self) -> f32 {
        self.geom().heading_deg
    }

    /// Length in metres, cached until an endpoint moves.
    #[inline]
    pub fn length(&self) -> f32 {
        self.geom().length
    }

    /// The corridor shape for collision queries.  Rebuilt from the current
    /// endpoints, so its box always reflects them.
    pub fn collider(&self) -> Collider {
        Collider::line(self.start, self.end, self.width)
    }

    pub fn aabb(&self) -> Aabb {
        self.collider().aabb()
    }

    /// True when `p` is one of the two endpoints (node tolerance).
    pub fn touches(&self, p: Point) -> bool {
        self.start.approx_eq(p) || self.end.approx_eq(p)
    }

    /// True when this segment spans the same node pair, in either direction.
    pub fn same_edge(&self, a: Point, b: Point) -> bool {
        (self.start.approx_eq(a) && self.end.approx_eq(b))
            || (self.start.approx_eq(b) && self.end.approx_eq(a))
    }

    pub fn max_speed(&self) -> f32 {
        if self.meta.highway { HIGHWAY_MAX_SPEED } else { STREET_MAX_SPEED }
    }

    pub fn capacity(&self) -> u32 {
        if self.meta.highway { HIGHWAY_CAPACITY } else { STREET_CAPACITY }
    }
}
