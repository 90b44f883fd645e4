//! `cg-field` — the scalar fields that give a generated city its shape.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`noise`]   | `NoiseField`: seeded simplex + perlin domain warping  |
//! | [`heatmap`] | `Heatmap`: radial-band population density             |
//! | [`zoning`]  | `Zoning`: land-use classification with a memo grid    |
//!
//! All three are deterministic functions of the 16-bit noise seed drawn from
//! the run's `CityRng`.  The heatmap biases road branching during growth and
//! is calibrated afterwards from the network's extent; zoning reads either
//! those same radial bands or a warped-noise field.

pub mod heatmap;
pub mod noise;
pub mod zoning;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use heatmap::{DEFAULT_R_UNIT_M, Heatmap};
pub use noise::NoiseField;
pub use zoning::{Zoning, ZoningParams};
