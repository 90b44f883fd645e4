//! `cg-spatial` — spatial index and collision shapes for the citygen framework.
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`quadtree`] | `Quadtree<T>` over axis-aligned bounding rectangles |
//! | [`collider`] | `Collider`/`Shape` with SAT collision response      |
//!
//! The quadtree trades precision for speed: retrieval returns whole node
//! buckets, so callers always re-test candidates geometrically.  Both road
//! growth and lot placement index their objects here.

pub mod collider;
pub mod quadtree;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use collider::{Collider, Shape};
pub use quadtree::Quadtree;
