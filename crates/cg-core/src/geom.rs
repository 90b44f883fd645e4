//! Flat 2D world-space geometry.
//!
//! Coordinates are metres on a flat plane; the city centre is the origin.
//! `f32` gives sub-millimetre precision across the ~10 km extent a generated
//! city covers, at half the memory of `f64` for the hot segment arrays.
//!
//! # Angle convention
//!
//! Headings are degrees.  Heading 0 points along `+y`; positive headings
//! rotate toward `+x` (so `+x` is heading 90).  The sign comes from the
//! cross-product of `+y` with the direction vector, which keeps segment
//! directions consistent when endpoints are swapped by link surgery.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Tolerance for treating two world points as the same node, metres.
pub const POINT_EPS_M: f32 = 1e-3;

/// Parametric tolerance excluding segment endpoints from interior tests.
const PARAM_EPS: f32 = 1e-4;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A 2D world position or direction vector, metres.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, o: Point) -> f32 {
        self.x * o.x + self.y * o.y
    }

    /// z-component of the 3D cross product; positive when `o` is
    /// counter-clockwise of `self`.
    #[inline]
    pub fn cross(self, o: Point) -> f32 {
        self.x * o.y - self.y * o.x
    }

    #[inline]
    pub fn length2(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length2().sqrt()
    }

    #[inline]
    pub fn distance2(self, o: Point) -> f32 {
        (o - self).length2()
    }

    #[inline]
    pub fn distance(self, o: Point) -> f32 {
        self.distance2(o).sqrt()
    }

    /// Unit vector, or zero if the vector is degenerate.
    pub fn normalized(self) -> Point {
        let len = self.length();
        if len < 1e-12 { Point::ZERO } else { self * (1.0 / len) }
    }

    /// Perpendicular vector, rotated a quarter turn clockwise in heading
    /// terms (heading + 90).
    #[inline]
    pub fn perp(self) -> Point {
        Point::new(self.y, -self.x)
    }

    /// Node-identity test with the shared world tolerance.
    #[inline]
    pub fn approx_eq(self, o: Point) -> bool {
        self.distance2(o) <= POINT_EPS_M * POINT_EPS_M
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, o: Point) {
        self.x += o.x;
        self.y += o.y;
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, k: f32) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Angles ────────────────────────────────────────────────────────────────────

#[inline]
pub fn sin_deg(deg: f32) -> f32 {
    deg.to_radians().sin()
}

#[inline]
pub fn cos_deg(deg: f32) -> f32 {
    deg.to_radians().cos()
}

/// Unit direction vector for a heading in degrees (0 = `+y`, 90 = `+x`).
#[inline]
pub fn unit_from_heading(deg: f32) -> Point {
    Point::new(sin_deg(deg), cos_deg(deg))
}

/// Unsigned angle between two vectors, degrees in [0, 180].
pub fn angle_between(a: Point, b: Point) -> f32 {
    let denom = a.length() * b.length();
    if denom < 1e-12 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Heading of a direction vector, degrees.  Sign derived from the cross
/// product with `+y` so that `+x` maps to +90 and `-x` to -90.
pub fn heading_deg(v: Point) -> f32 {
    let up = Point::new(0.0, 1.0);
    let sign = up.cross(v);
    let sign = if sign < 0.0 { -1.0 } else { 1.0 };
    -sign * angle_between(up, v)
}

/// Smallest unsigned difference between two headings across the 180-degree
/// wrap, in [0, 90].  Opposed directions count as parallel.
pub fn min_degree_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(180.0);
    diff.min(180.0 - diff)
}

// ── Segment intersection ──────────────────────────────────────────────────────

/// Proper intersection of segments `ab` and `cd`.
#[derive(Copy, Clone, Debug)]
pub struct LineIntersection {
    pub point: Point,
    /// Parameter along `ab`, in [0, 1].
    pub t: f32,
    /// Parameter along `cd`, in [0, 1].
    pub u: f32,
}

/// Intersection of segments `ab` and `cd`, or `None` when they miss or are
/// parallel.  With `include_endpoints = false`, contacts at either segment's
/// endpoints are not reported.
pub fn segment_intersection(
    a: Point,
    b: Point,
    c: Point,
    d: Point,
    include_endpoints: bool,
) -> Option<LineIntersection> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() < 1e-9 {
        // Parallel (collinear overlap is resolved by snapping, not here).
        return None;
    }
    let qp = c - a;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    let (lo, hi) = if include_endpoints {
        (0.0, 1.0)
    } else {
        (PARAM_EPS, 1.0 - PARAM_EPS)
    };
    if t >= lo && t <= hi && u >= lo && u <= hi {
        Some(LineIntersection { point: a + r * t, t, u })
    } else {
        None
    }
}

// ── Point-to-line projection ──────────────────────────────────────────────────

/// Result of projecting a point onto the infinite line through `a` and `b`.
#[derive(Copy, Clone, Debug)]
pub struct DistanceToLine {
    /// Squared distance from the query point to the foot of the projection.
    pub distance2: f32,
    /// Foot of the perpendicular on the infinite line.
    pub point_on_line: Point,
    /// Signed squared length of the projection along `ab`.  The foot lies
    /// inside the segment exactly when `0 < line_proj2 < length2`.
    pub line_proj2: f32,
    /// Squared length of `ab`.
    pub length2: f32,
}

pub fn distance_to_line(p: Point, a: Point, b: Point) -> DistanceToLine {
    let ap = p - a;
    let ab = b - a;
    let length2 = ab.length2();
    if length2 < 1e-12 {
        return DistanceToLine {
            distance2: ap.length2(),
            point_on_line: a,
            line_proj2: 0.0,
            length2: 0.0,
        };
    }
    let dot = ap.dot(ab);
    let foot = a + ab * (dot / length2);
    DistanceToLine {
        distance2: p.distance2(foot),
        point_on_line: foot,
        line_proj2: dot.signum() * dot * dot / length2,
        length2,
    }
}

/// Squared distance from `p` to the closed segment `ab`.
pub fn point_segment_distance2(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len2 = ab.length2();
    if len2 < 1e-12 {
        return p.distance2(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance2(a + ab * t)
}

/// Squared closest-pair distance between segments `ab` and `cd`.
/// Zero when they touch or cross.
pub fn segment_segment_distance2(a: Point, b: Point, c: Point, d: Point) -> f32 {
    if segment_intersection(a, b, c, d, true).is_some() {
        return 0.0;
    }
    point_segment_distance2(a, c, d)
        .min(point_segment_distance2(b, c, d))
        .min(point_segment_distance2(c, a, b))
        .min(point_segment_distance2(d, a, b))
}

// ── Aabb ──────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding rectangle, world metres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest box containing both points, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box containing every corner.  Empty input yields a degenerate
    /// box at the origin.
    pub fn from_corners(corners: &[Point]) -> Self {
        let mut it = corners.iter();
        let Some(&first) = it.next() else {
            return Self::new(Point::ZERO, Point::ZERO);
        };
        it.fold(Self::from_points(first, first), |bb, &p| {
            Self {
                min: Point::new(bb.min.x.min(p.x), bb.min.y.min(p.y)),
                max: Point::new(bb.max.x.max(p.x), bb.max.y.max(p.y)),
            }
        })
    }

    /// Grow the box by `m` metres on every side.
    pub fn expanded(self, m: f32) -> Self {
        Self {
            min: Point::new(self.min.x - m, self.min.y - m),
            max: Point::new(self.max.x + m, self.max.y + m),
        }
    }

    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(self) -> Point {
        Point::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    pub fn intersects(self, o: Aabb) -> bool {
        !(self.max.x < o.min.x
            || self.min.x > o.max.x
            || self.max.y < o.min.y
            || self.min.y > o.max.y)
    }

    pub fn contains(self, o: Aabb) -> bool {
        self.min.x <= o.min.x && self.min.y <= o.min.y && self.max.x >= o.max.x && self.max.y >= o.max.y
    }

    pub fn contains_point(self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
