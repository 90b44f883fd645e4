//! Oriented footprints for placed structures.
//!
//! A building stores its pose plus the polar form of its rectangle (half
//! diagonal and aspect angle); the corner rectangle and collider derive from
//! those on demand, so sliding a building during placement is a plain centre
//! update.

use cg_core::geom::{self, Aabb, Point};
use cg_core::zone::{BuildingKind, DecorKind};
use cg_spatial::Collider;

// ── Building ──────────────────────────────────────────────────────────────────

/// A placed building footprint.
#[derive(Clone, Debug)]
pub struct Building {
    pub center: Point,
    /// Heading of the street-front edge, degrees.
    pub dir_deg: f32,
    /// Half the footprint diagonal, metres.
    pub diagonal: f32,
    /// `atan(front / depth)` in degrees; fixes the aspect ratio.
    pub aspect_deg: f32,
    pub kind: BuildingKind,
}

impl Building {
    /// Build from explicit front/depth extents.
    pub fn footprint(
        kind: BuildingKind,
        center: Point,
        dir_deg: f32,
        front_m: f32,
        depth_m: f32,
    ) -> Self {
        Building {
            center,
            dir_deg,
            diagonal: 0.5 * front_m.hypot(depth_m),
            aspect_deg: (front_m / depth_m).atan().to_degrees(),
            kind,
        }
    }

    /// Street-front width, metres.
    pub fn front_m(&self) -> f32 {
        2.0 * self.diagonal * geom::sin_deg(self.aspect_deg)
    }

    /// Depth perpendicular to the street, metres.
    pub fn depth_m(&self) -> f32 {
        2.0 * self.diagonal * geom::cos_deg(self.aspect_deg)
    }

    /// Same footprint at a different centre.
    pub fn at(&self, center: Point) -> Self {
        Building { center, ..self.clone() }
    }

    /// Corner rectangle in winding order; front edges run along `dir_deg`.
    pub fn corners(&self) -> [Point; 4] {
        let u = geom::unit_from_heading(self.dir_deg);
        let v = u.perp();
        let half_front = u * (self.front_m() * 0.5);
        let half_depth = v * (self.depth_m() * 0.5);
        [
            self.center + half_front + half_depth,
            self.center - half_front + half_depth,
            self.center - half_front - half_depth,
            self.center + half_front - half_depth,
        ]
    }

    pub fn collider(&self) -> Collider {
        Collider::rect(self.corners())
    }

    pub fn aabb(&self) -> Aabb {
        self.collider().aabb()
    }
}

// ── Furniture ─────────────────────────────────────────────────────────────────

/// A piece of street furniture: small, axis-locked to its street.
#[derive(Clone, Debug)]
pub struct Furniture {
    pub kind: DecorKind,
    pub center: Point,
    pub dir_deg: f32,
    /// Footprint width along the street, metres.
    pub width_m: f32,
    /// Footprint depth away from the street, metres.
    pub depth_m: f32,
}

impl Furniture {
    pub fn new(kind: DecorKind, center: Point, dir_deg: f32, depth_factor: f32) -> Self {
        let side = kind.footprint_m();
        Furniture { kind, center, dir_deg, width_m: side, depth_m: side * depth_factor }
    }

    pub fn corners(&self) -> [Point; 4] {
        let u = geom::unit_from_heading(self.dir_deg);
        let v = u.perp();
        let half_w = u * (self.width_m * 0.5);
        let half_d = v * (self.depth_m * 0.5);
        [
            self.center + half_w + half_d,
            self.center - half_w + half_d,
            self.center - half_w - half_d,
            self.center + half_w - half_d,
        ]
    }

    pub fn collider(&self) -> Collider {
        Collider::rect(self.corners())
    }

    pub fn aabb(&self) -> Aabb {
        self.collider().aabb()
    }
}
