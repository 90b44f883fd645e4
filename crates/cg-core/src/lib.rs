//! `cg-core` — foundational types for the `citygen` procedural city framework.
//!
//! This crate is a dependency of every other `cg-*` crate.  It intentionally
//! has no `cg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`geom`]   | `Point`, `Aabb`, angles, intersections, distances       |
//! | [`rng`]    | `CityRng`, `CitySeed` (one seed, one world)             |
//! | [`ids`]    | `SegmentId`, `BuildingId`                               |
//! | [`zone`]   | `ZoneKind`, `BuildingKind`, `DecorKind`, zone table     |
//! | [`config`] | `GrowthConfig`, `QuadtreeParams`                        |
//! | [`error`]  | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod zone;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{GrowthConfig, QuadtreeParams};
pub use error::{CoreError, CoreResult};
pub use geom::{Aabb, Point};
pub use ids::{BuildingId, SegmentId};
pub use rng::{CityRng, CitySeed};
pub use zone::{BuildingKind, DecorKind, ZoneKind, ZoneTable, ZoningMode};
