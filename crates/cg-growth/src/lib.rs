//! `cg-growth` — the road-network growth engine.
//!
//! | Module          | Contents                                           |
//! |-----------------|----------------------------------------------------|
//! | [`queue`]       | `GrowthQueue`: stable min-queue over growth time   |
//! | [`goals`]       | `Candidate`, branch generation from accepted roads |
//! | [`constraints`] | snap / intersect-split / extend / clearance        |
//! | [`generate`]    | the `generate()` entry point and `CityPlan`        |
//! | [`debug`]       | `DebugData` sinks for constraint decisions         |
//! | [`error`]       | `GrowthError`                                      |
//!
//! # The loop
//!
//! Growth pops the candidate with the smallest growth time `t`, resolves it
//! against the existing network (read-only `check`), and on acceptance
//! inserts it, applies the planned graph mutation (`commit`), wires it to its
//! parent, and enqueues its children.  Everything is sequential on the shared
//! graph; determinism falls out of the seeded RNG plus stable iteration
//! orders everywhere.

pub mod constraints;
pub mod debug;
pub mod error;
pub mod generate;
pub mod goals;
pub mod queue;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use debug::DebugData;
pub use error::{GrowthError, GrowthResult};
pub use generate::{CityPlan, generate};
pub use goals::{BranchAction, Candidate};
pub use queue::GrowthQueue;
