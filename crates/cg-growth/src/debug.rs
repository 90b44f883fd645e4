//! Decision sinks exposed alongside the generated network.
//!
//! The renderer overlays these points to show where the constraint resolver
//! cut, snapped, or projected candidates.  Recording is append-only and has
//! no effect on growth.

use cg_core::geom::Point;

/// Where each local-constraints action fired.
#[derive(Clone, Debug, Default)]
pub struct DebugData {
    /// Intersect-split points (a candidate was cut at a crossing).
    pub intersections: Vec<Point>,
    /// Node snaps (a candidate end was pulled onto an existing node).
    pub snaps: Vec<Point>,
    /// Extend-to-line feet (a candidate end was projected onto a segment).
    pub intersections_radius: Vec<Point>,
}

impl DebugData {
    pub fn note_intersection(&mut self, p: Point) {
        self.intersections.push(p);
    }

    pub fn note_snap(&mut self, p: Point) {
        self.snaps.push(p);
    }

    pub fn note_extend(&mut self, p: Point) {
        self.intersections_radius.push(p);
    }
}
