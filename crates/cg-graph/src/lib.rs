//! `cg-graph` — the road network as a mutable planar graph.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`segment`] | `Segment`, `SegmentMeta`, `Links`                     |
//! | [`graph`]   | `SegmentGraph` arena: topology queries and `split`    |
//!
//! # Ownership model
//!
//! Segments live in an arena (`Vec<Segment>`) and refer to their neighbours
//! by `SegmentId` index, never by reference.  Link surgery rewires indices by
//! scanning and replacing; there is no interior mutability across segments
//! and no cyclic ownership.  Segments are never deleted: a split appends the
//! new half and shortens the original in place, so ids stay stable and equal
//! to insertion order.

pub mod graph;
pub mod segment;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use graph::{LinkEnd, SegmentGraph};
pub use segment::{Links, Segment, SegmentMeta};
