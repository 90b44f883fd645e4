//! Land-use classes and the per-zone parameter table.
//!
//! Zones drive two different consumers: street-branch length during growth
//! (block length) and the building/decor mix during lot placement.  Both read
//! the same `ZoneTable` so a city's character is configured in one place.

// ── ZoneKind ──────────────────────────────────────────────────────────────────

/// One of the five land-use classes every world point maps to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneKind {
    Downtown,
    Commercial,
    Residential,
    Industrial,
    Rural,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::Downtown,
        ZoneKind::Commercial,
        ZoneKind::Residential,
        ZoneKind::Industrial,
        ZoneKind::Rural,
    ];
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ZoneKind::Downtown => "downtown",
            ZoneKind::Commercial => "commercial",
            ZoneKind::Residential => "residential",
            ZoneKind::Industrial => "industrial",
            ZoneKind::Rural => "rural",
        };
        f.write_str(name)
    }
}

/// How the zoning field classifies points: radial bands from the calibrated
/// heatmap, or warped-noise thresholds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoningMode {
    Heatmap,
    Perlin,
}

// ── BuildingKind ──────────────────────────────────────────────────────────────

/// Footprint archetype for a placed building.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    Tower,
    Office,
    Shop,
    Apartment,
    House,
    Factory,
    Warehouse,
    Barn,
}

impl BuildingKind {
    /// Street-front width range (metres) this kind samples from.
    pub fn front_range_m(self) -> (f32, f32) {
        match self {
            BuildingKind::Tower => (18.0, 26.0),
            BuildingKind::Office => (14.0, 22.0),
            BuildingKind::Shop => (8.0, 14.0),
            BuildingKind::Apartment => (12.0, 18.0),
            BuildingKind::House => (8.0, 12.0),
            BuildingKind::Factory => (30.0, 50.0),
            BuildingKind::Warehouse => (24.0, 40.0),
            BuildingKind::Barn => (12.0, 18.0),
        }
    }

    /// Depth range (metres), perpendicular to the street.
    pub fn depth_range_m(self) -> (f32, f32) {
        match self {
            BuildingKind::Tower => (18.0, 26.0),
            BuildingKind::Office => (14.0, 20.0),
            BuildingKind::Shop => (10.0, 16.0),
            BuildingKind::Apartment => (12.0, 18.0),
            BuildingKind::House => (8.0, 12.0),
            BuildingKind::Factory => (24.0, 40.0),
            BuildingKind::Warehouse => (20.0, 32.0),
            BuildingKind::Barn => (10.0, 14.0),
        }
    }

    /// Large kinds get an extra 6 m end-of-segment margin when snapped.
    pub fn is_large(self) -> bool {
        matches!(self, BuildingKind::Tower | BuildingKind::Factory | BuildingKind::Warehouse)
    }

    pub fn is_factory(self) -> bool {
        matches!(self, BuildingKind::Factory)
    }
}

// ── DecorKind ─────────────────────────────────────────────────────────────────

/// Street furniture placed between buildings and the kerb.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecorKind {
    Tree,
    Streetlight,
    Bench,
    Hydrant,
}

impl DecorKind {
    /// Square footprint side, metres.
    pub fn footprint_m(self) -> f32 {
        match self {
            DecorKind::Tree => 2.5,
            DecorKind::Streetlight => 0.8,
            DecorKind::Bench => 1.6,
            DecorKind::Hydrant => 0.6,
        }
    }
}

// ── Per-zone parameters ───────────────────────────────────────────────────────

/// Lot geometry for the deterministic grid strategy.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotSpec {
    /// Minimum centre-to-centre spacing along the street, metres.
    pub base_spacing_m: f32,
    /// Gap between the road edge and the building front, metres.
    pub front_setback_m: f32,
    /// Half the gap required between neighbouring fronts, metres.
    pub side_setback_m: f32,
    /// Offset of the first lot from the segment margin, metres.
    pub start_offset_m: f32,
    /// Shift the opposite side by half a spacing.
    pub stagger: bool,
}

/// Street furniture parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecorSpec {
    pub mix: Vec<(DecorKind, f32)>,
    /// Spacing between furniture slots along the kerb, metres.
    pub spacing_m: f32,
    /// Probability that a slot is actually populated.
    pub density: f64,
    /// Transverse gap between the road edge and the furniture, metres.
    pub offset_m: f32,
    /// Scales the footprint depth of each piece.
    pub depth_factor: f32,
}

/// Everything the generator knows about one land-use class.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSpec {
    /// Preferred street-branch length inside the zone, metres.
    pub block_length_m: f32,
    /// Weighted building whitelist for lot placement.
    pub building_mix: Vec<(BuildingKind, f32)>,
    /// Consumed by the renderer only; carried through untouched.
    pub street_width_multiplier: f32,
    pub lot: LotSpec,
    pub decor: DecorSpec,
}

/// The five zone specs, indexable by [`ZoneKind`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneTable {
    pub downtown: ZoneSpec,
    pub commercial: ZoneSpec,
    pub residential: ZoneSpec,
    pub industrial: ZoneSpec,
    pub rural: ZoneSpec,
}

impl ZoneTable {
    pub fn get(&self, kind: ZoneKind) -> &ZoneSpec {
        match kind {
            ZoneKind::Downtown => &self.downtown,
            ZoneKind::Commercial => &self.commercial,
            ZoneKind::Residential => &self.residential,
            ZoneKind::Industrial => &self.industrial,
            ZoneKind::Rural => &self.rural,
        }
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        use BuildingKind::*;
        use DecorKind::*;
        ZoneTable {
            downtown: ZoneSpec {
                block_length_m: 120.0,
                building_mix: vec![(Tower, 0.5), (Office, 0.3), (Shop, 0.2)],
                street_width_multiplier: 1.2,
                lot: LotSpec {
                    base_spacing_m: 26.0,
                    front_setback_m: 3.0,
                    side_setback_m: 2.0,
                    start_offset_m: 0.0,
                    stagger: false,
                },
                decor: DecorSpec {
                    mix: vec![(Streetlight, 0.5), (Bench, 0.3), (Hydrant, 0.2)],
                    spacing_m: 24.0,
                    density: 0.8,
                    offset_m: 1.5,
                    depth_factor: 1.0,
                },
            },
            commercial: ZoneSpec {
                block_length_m: 160.0,
                building_mix: vec![(Office, 0.4), (Shop, 0.4), (Apartment, 0.2)],
                street_width_multiplier: 1.1,
                lot: LotSpec {
                    base_spacing_m: 24.0,
                    front_setback_m: 4.0,
                    side_setback_m: 2.0,
                    start_offset_m: 6.0,
                    stagger: true,
                },
                decor: DecorSpec {
                    mix: vec![(Streetlight, 0.4), (Tree, 0.3), (Bench, 0.3)],
                    spacing_m: 28.0,
                    density: 0.7,
                    offset_m: 1.5,
                    depth_factor: 1.0,
                },
            },
            residential: ZoneSpec {
                block_length_m: 200.0,
                building_mix: vec![(House, 0.6), (Apartment, 0.3), (Shop, 0.1)],
                street_width_multiplier: 1.0,
                lot: LotSpec {
                    base_spacing_m: 20.0,
                    front_setback_m: 6.0,
                    side_setback_m: 3.0,
                    start_offset_m: 4.0,
                    stagger: true,
                },
                decor: DecorSpec {
                    mix: vec![(Tree, 0.7), (Streetlight, 0.3)],
                    spacing_m: 32.0,
                    density: 0.6,
                    offset_m: 2.0,
                    depth_factor: 1.0,
                },
            },
            industrial: ZoneSpec {
                block_length_m: 260.0,
                building_mix: vec![(Factory, 0.7), (Warehouse, 0.3)],
                street_width_multiplier: 1.1,
                lot: LotSpec {
                    base_spacing_m: 48.0,
                    front_setback_m: 10.0,
                    side_setback_m: 6.0,
                    start_offset_m: 10.0,
                    stagger: false,
                },
                decor: DecorSpec {
                    mix: vec![(Streetlight, 0.8), (Hydrant, 0.2)],
                    spacing_m: 48.0,
                    density: 0.4,
                    offset_m: 2.0,
                    depth_factor: 1.0,
                },
            },
            rural: ZoneSpec {
                block_length_m: 320.0,
                building_mix: vec![(House, 0.7), (Barn, 0.3)],
                street_width_multiplier: 1.0,
                lot: LotSpec {
                    base_spacing_m: 60.0,
                    front_setback_m: 12.0,
                    side_setback_m: 8.0,
                    start_offset_m: 10.0,
                    stagger: false,
                },
                decor: DecorSpec {
                    mix: vec![(Tree, 1.0)],
                    spacing_m: 60.0,
                    density: 0.3,
                    offset_m: 3.0,
                    depth_factor: 1.2,
                },
            },
        }
    }
}
