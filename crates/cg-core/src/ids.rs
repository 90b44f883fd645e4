//! Strongly typed identifier wrappers.
//!
//! Ids are indices into insertion-ordered arenas, so they double as the
//! stable integer ids the generation result exposes.

use std::fmt;

macro_rules! arena_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid id".
            pub const INVALID: $name = $name(u32::MAX);

            /// Cast to `usize` for direct use as an arena index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

arena_id! {
    /// Index of a road segment in the segment arena; equals its insertion
    /// order in the generated network.
    pub struct SegmentId;
}

arena_id! {
    /// Index of a placed building footprint.
    pub struct BuildingId;
}
