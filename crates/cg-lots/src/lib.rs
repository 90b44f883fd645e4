//! `cg-lots` — buildings and street furniture along the generated network.
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`building`] | `Building`, `Furniture` oriented footprints           |
//! | [`placer`]   | `place_lots`: the collision/spacing placement pipeline|
//!
//! Placement runs after growth, continuing the plan's RNG stream so a seed
//! fully determines the built city.  Buildings go in first (all segments,
//! insertion order), furniture second, because furniture must dodge every
//! building but never the other way round.

pub mod building;
pub mod placer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use building::{Building, Furniture};
pub use placer::{CityLots, place_lots};
