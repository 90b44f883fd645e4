//! Collision shapes with a recomputable bounding box and SAT response.
//!
//! Two shapes cover everything the generator places: a road corridor is a
//! line with a width, a building or furniture footprint is an oriented
//! rectangle.  Both reduce to an oriented box for the separating-axis test,
//! which also yields the minimum-translation vector used as the collision
//! response during lot placement.

use cg_core::geom::{Aabb, Point};

// ── Shape ─────────────────────────────────────────────────────────────────────

/// Geometric footprint of a placed object.
#[derive(Clone, Debug)]
pub enum Shape {
    /// A road corridor: centre line `a -> b` swept to `width` metres.
    Line { a: Point, b: Point, width: f32 },
    /// An oriented rectangle given by its four corners in winding order.
    Rect { corners: [Point; 4] },
}

/// A shape plus the derived queries the spatial index and the placement
/// pipeline need.
#[derive(Clone, Debug)]
pub struct Collider {
    pub shape: Shape,
}

impl Collider {
    pub fn line(a: Point, b: Point, width: f32) -> Self {
        Collider { shape: Shape::Line { a, b, width } }
    }

    pub fn rect(corners: [Point; 4]) -> Self {
        Collider { shape: Shape::Rect { corners } }
    }

    /// Bounding box of the current shape.  Recompute after mutating the
    /// shape; nothing is cached here.
    pub fn aabb(&self) -> Aabb {
        match &self.shape {
            Shape::Line { a, b, width } => Aabb::from_points(*a, *b).expanded(width * 0.5),
            Shape::Rect { corners } => Aabb::from_corners(corners),
        }
    }

    /// Corners of the shape as an oriented box, in winding order.
    pub fn corners(&self) -> [Point; 4] {
        match &self.shape {
            Shape::Line { a, b, width } => {
                let half = (*b - *a).normalized().perp() * (width * 0.5);
                [*a + half, *b + half, *b - half, *a - half]
            }
            Shape::Rect { corners } => *corners,
        }
    }

    /// Minimum-translation vector moving `self` out of `other`, or `None`
    /// when the shapes are separated.  A zero-area contact counts as
    /// separated.
    pub fn collide(&self, other: &Collider) -> Option<Point> {
        sat_mtv(self.corners(), other.corners())
    }

    pub fn intersects(&self, other: &Collider) -> bool {
        self.collide(other).is_some()
    }
}

// ── Separating-axis test ──────────────────────────────────────────────────────

fn sat_mtv(a: [Point; 4], b: [Point; 4]) -> Option<Point> {
    let mut best_overlap = f32::INFINITY;
    let mut best_axis = Point::ZERO;

    for axis in box_axes(&a).into_iter().chain(box_axes(&b)) {
        let (a_min, a_max) = project(&a, axis);
        let (b_min, b_max) = project(&b, axis);
        let overlap = a_max.min(b_max) - a_min.max(b_min);
        if overlap <= 0.0 {
            return None;
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            best_axis = axis;
        }
    }

    // Point the response from b's centre toward a's centre so the caller can
    // add it to a's position directly.
    let away = centroid(&a) - centroid(&b);
    let axis = if away.dot(best_axis) < 0.0 { -best_axis } else { best_axis };
    Some(axis * best_overlap)
}

/// The two distinct edge normals of an oriented box.
fn box_axes(c: &[Point; 4]) -> [Point; 2] {
    [
        (c[1] - c[0]).perp().normalized(),
        (c[3] - c[0]).perp().normalized(),
    ]
}

fn project(corners: &[Point; 4], axis: Point) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &p in corners {
        let d = p.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

fn centroid(corners: &[Point; 4]) -> Point {
    let sum = corners.iter().fold(Point::ZERO, |acc, &p| acc + p);
    sum * 0.25
}
