//! Building and furniture placement along accepted segments.
//!
//! Two strategies feed one shared pipeline.  Residential and rural streets
//! scatter lots at random parameters (`around_segment` style); denser zones
//! walk a deterministic grid (`lots_along_segment`).  Either way every
//! candidate goes through the same stages:
//!
//! 1. transverse offset off the street: `w/2 + setback + max(2, depth/2)`
//! 2. iterative collision resolution along the responder's push vector
//! 3. snap back onto the segment frame with a clamped street parameter
//! 4. slide search in `k * step` hops until a clear slot appears
//! 5. per-side spacing ledger and the industrial factory exclusion
//!
//! Failures drop the candidate and move on; placement never errors.

use cg_core::config::GrowthConfig;
use cg_core::geom::{self, Point};
use cg_core::ids::SegmentId;
use cg_core::rng::CityRng;
use cg_core::zone::ZoneKind;
use cg_field::Zoning;
use cg_graph::SegmentGraph;
use cg_growth::CityPlan;
use cg_spatial::Quadtree;

use crate::building::{Building, Furniture};

/// Keep-out from both segment ends, metres.
const SEGMENT_MARGIN_M: f32 = 10.0;

/// Extra end margin for large footprints.
const LARGE_EXTRA_MARGIN_M: f32 = 6.0;

/// Rounds of response-vector walking before snapping.
const COLLISION_RESOLVE_ROUNDS: usize = 8;

/// Slide multipliers tried after the snap, in preference order.
const BASE_SLIDES: [f32; 7] = [0.0, 1.0, -1.0, 2.0, -2.0, 3.0, -3.0];

/// Factories get extra reach before giving up, to satisfy their spacing rule.
const FACTORY_SLIDES: [f32; 11] =
    [0.0, 1.0, -1.0, 2.0, -2.0, 3.0, -3.0, 4.0, -4.0, 5.0, -5.0];

// ── Result ────────────────────────────────────────────────────────────────────

/// Everything placement produces.
pub struct CityLots {
    pub buildings: Vec<Building>,
    pub furniture: Vec<Furniture>,
}

/// Place buildings and street furniture along every segment of the plan.
///
/// Continues the plan's RNG stream; deterministic for a given plan state.
pub fn place_lots(plan: &mut CityPlan, config: &GrowthConfig) -> CityLots {
    let CityPlan { ref graph, ref qtree, ref mut zoning, ref mut rng, .. } = *plan;
    let mut placer = Placer {
        graph,
        roads: qtree,
        zoning,
        config,
        rng,
        buildings: Vec::new(),
        built_index: Quadtree::new(&config.quadtree),
        furniture: Vec::new(),
        furniture_index: Quadtree::new(&config.quadtree),
        factory_sites: Vec::new(),
    };

    for i in 0..graph.len() {
        placer.place_buildings_along(SegmentId(i as u32));
    }
    // Furniture dodges buildings, so all buildings must exist first.
    for i in 0..graph.len() {
        placer.place_furniture_along(SegmentId(i as u32));
    }

    log::debug!(
        "lot placement finished: {} buildings, {} furniture pieces",
        placer.buildings.len(),
        placer.furniture.len()
    );
    CityLots { buildings: placer.buildings, furniture: placer.furniture }
}

// ── Placer ────────────────────────────────────────────────────────────────────

struct Placer<'a> {
    graph: &'a SegmentGraph,
    roads: &'a Quadtree<SegmentId>,
    zoning: &'a mut Zoning,
    config: &'a GrowthConfig,
    rng: &'a mut CityRng,
    buildings: Vec<Building>,
    built_index: Quadtree<usize>,
    furniture: Vec<Furniture>,
    furniture_index: Quadtree<usize>,
    /// Centres of every placed factory, for the industrial exclusion radius.
    factory_sites: Vec<Point>,
}

impl Placer<'_> {
    // ── Strategy selection ────────────────────────────────────────────────

    fn place_buildings_along(&mut self, id: SegmentId) {
        let graph = self.graph;
        let seg = graph.get(id);
        let mid = seg.start() + seg.vector() * 0.5;
        let zone = self.zoning.zone_at(mid);
        match zone {
            ZoneKind::Residential | ZoneKind::Rural => self.around_segment(id, zone),
            _ => self.lots_along_segment(id, zone),
        }
    }

    /// Randomized scatter: one trial per nominal lot width of street.
    fn around_segment(&mut self, id: SegmentId, zone: ZoneKind) {
        let graph = self.graph;
        let config = self.config;
        let seg = graph.get(id);
        let spec = config.zones.get(zone);
        let len = seg.length();
        if len <= 2.0 * SEGMENT_MARGIN_M + 1.0 {
            return;
        }

        let mut ledger: [Vec<f32>; 2] = [Vec::new(), Vec::new()];
        let trials = (len / spec.lot.base_spacing_m.max(4.0)).ceil() as usize;
        for _ in 0..trials {
            let t = self.rng.gen_range(SEGMENT_MARGIN_M..(len - SEGMENT_MARGIN_M));
            let side = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let Some(&kind) = self.rng.pick_weighted(&spec.building_mix) else { continue };
            let (f_lo, f_hi) = kind.front_range_m();
            let (d_lo, d_hi) = kind.depth_range_m();
            let front = self.rng.gen_range(f_lo..=f_hi);
            let depth = self.rng.gen_range(d_lo..=d_hi);
            self.try_place(id, zone, &mut ledger, kind, front, depth, t, side, true);
        }
    }

    /// Deterministic grid: step both sides at the lot spacing.
    fn lots_along_segment(&mut self, id: SegmentId, zone: ZoneKind) {
        let graph = self.graph;
        let config = self.config;
        let seg = graph.get(id);
        let spec = config.zones.get(zone);
        let len = seg.length();
        if len <= 2.0 * SEGMENT_MARGIN_M + 1.0 {
            return;
        }

        let mut ledger: [Vec<f32>; 2] = [Vec::new(), Vec::new()];
        let mut pos = SEGMENT_MARGIN_M + spec.lot.start_offset_m;
        while pos < len - SEGMENT_MARGIN_M {
            let mut widest_front = 0.0f32;
            for side in [1.0f32, -1.0] {
                let Some(&kind) = self.rng.pick_weighted(&spec.building_mix) else { continue };
                let (f_lo, f_hi) = kind.front_range_m();
                let (d_lo, d_hi) = kind.depth_range_m();
                let front = self.rng.gen_range(f_lo..=f_hi);
                let depth = self.rng.gen_range(d_lo..=d_hi);
                widest_front = widest_front.max(front);

                let stagger = if spec.lot.stagger && side < 0.0 {
                    spec.lot.base_spacing_m * 0.5
                } else {
                    0.0
                };
                let t = pos + stagger;
                if t > len - SEGMENT_MARGIN_M {
                    continue;
                }
                self.try_place(id, zone, &mut ledger, kind, front, depth, t, side, false);
            }
            // Advance by the wider of the sampled fronts; the floor keeps the
            // walk finite for degenerate configurations.
            let spacing = (widest_front + 2.0 * spec.lot.side_setback_m)
                .max(spec.lot.base_spacing_m)
                .max(4.0);
            pos += spacing;
        }
    }

    // ── The shared pipeline ───────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn try_place(
        &mut self,
        seg_id: SegmentId,
        zone: ZoneKind,
        ledger: &mut [Vec<f32>; 2],
        kind: cg_core::BuildingKind,
        front: f32,
        depth: f32,
        t0: f32,
        side: f32,
        jitter: bool,
    ) -> bool {
        let graph = self.graph;
        let config = self.config;
        let seg = graph.get(seg_id);
        let len = seg.length();
        let spec = config.zones.get(zone);
        let u = geom::unit_from_heading(seg.dir_deg());
        let v = u.perp();

        // Highways keep buildings further off the carriageway.
        let setback = spec.lot.front_setback_m * if seg.meta.highway { 2.0 } else { 1.0 };
        let offset = seg.width * 0.5 + setback + (depth * 0.5).max(2.0);

        let (t, lateral) = if jitter {
            (
                t0 + self.rng.gen_range(-3.0..=3.0),
                self.rng.gen_range(-1.5f32..=1.5),
            )
        } else {
            (t0, 0.0)
        };
        let center = seg.start() + u * t + v * (side * (offset + lateral));
        let mut building = Building::footprint(kind, center, seg.dir_deg(), front, depth);

        // Walk out of collisions before snapping back to the street frame.
        for _ in 0..COLLISION_RESOLVE_ROUNDS {
            match self.collision_response(&building) {
                None => break,
                Some(push) => building = building.at(building.center + push),
            }
        }

        let end_margin =
            SEGMENT_MARGIN_M + if kind.is_large() { LARGE_EXTRA_MARGIN_M } else { 0.0 };
        if len <= 2.0 * end_margin {
            return false;
        }
        let along = (building.center - seg.start()).dot(u);
        let t_snapped = along.clamp(end_margin, len - end_margin);

        let step = (0.6 * front).max(6.0);
        let spacing = (front + 2.0 * spec.lot.side_setback_m).max(10.0);
        let factory_rules = kind.is_factory() && zone == ZoneKind::Industrial;
        let slides: &[f32] = if factory_rules { &FACTORY_SLIDES } else { &BASE_SLIDES };
        let ledger_side = if side > 0.0 { 0 } else { 1 };

        for &k in slides {
            let tk = t_snapped + k * step;
            if tk < end_margin || tk > len - end_margin {
                continue;
            }
            let candidate = building.at(seg.start() + u * tk + v * (side * offset));
            if ledger[ledger_side].iter().any(|&prev| (prev - tk).abs() < spacing) {
                continue;
            }
            if factory_rules
                && self
                    .factory_sites
                    .iter()
                    .any(|p| p.distance(candidate.center) < config.min_factory_spacing_m)
            {
                continue;
            }
            if self.collision_response(&candidate).is_some() {
                continue;
            }
            let bbox = candidate.aabb();
            if !self.built_index.bounds().contains(bbox) {
                // Segment hugs the world edge; nothing fits here.
                return false;
            }

            ledger[ledger_side].push(tk);
            if kind.is_factory() {
                self.factory_sites.push(candidate.center);
            }
            self.built_index.insert(bbox, self.buildings.len());
            self.buildings.push(candidate);
            return true;
        }

        log::trace!("dropped {kind:?} on {seg_id}: no clear slot");
        false
    }

    /// First collision response against roads, then against placed
    /// buildings.  `None` means the footprint sits clear.
    fn collision_response(&self, building: &Building) -> Option<Point> {
        let bbox = building.aabb();
        let collider = building.collider();
        for road in self.roads.retrieve(bbox) {
            if let Some(push) = collider.collide(&self.graph.get(road).collider()) {
                return Some(push);
            }
        }
        for idx in self.built_index.retrieve(bbox) {
            if let Some(push) = collider.collide(&self.buildings[idx].collider()) {
                return Some(push);
            }
        }
        None
    }

    // ── Street furniture ──────────────────────────────────────────────────

    fn place_furniture_along(&mut self, id: SegmentId) {
        let graph = self.graph;
        let config = self.config;
        let seg = graph.get(id);
        let mid = seg.start() + seg.vector() * 0.5;
        let zone = self.zoning.zone_at(mid);
        let decor = &config.zones.get(zone).decor;
        if decor.mix.is_empty() {
            return;
        }

        let len = seg.length();
        let margin = 4.0;
        if len <= 2.0 * margin {
            return;
        }
        let u = geom::unit_from_heading(seg.dir_deg());
        let v = u.perp();

        let mut pos = margin;
        while pos <= len - margin {
            for side in [1.0f32, -1.0] {
                if !self.rng.gen_bool(decor.density) {
                    continue;
                }
                let Some(&kind) = self.rng.pick_weighted(&decor.mix) else { continue };
                let template = Furniture::new(kind, Point::ZERO, seg.dir_deg(), decor.depth_factor);
                // Between the kerb and the building fronts.
                let offset = seg.width * 0.5 + decor.offset_m + template.depth_m * 0.5;
                let piece = Furniture {
                    center: seg.start() + u * pos + v * (side * offset),
                    ..template
                };
                if self.furniture_collides(&piece) {
                    continue;
                }
                let bbox = piece.aabb();
                if !self.furniture_index.bounds().contains(bbox) {
                    continue;
                }
                self.furniture_index.insert(bbox, self.furniture.len());
                self.furniture.push(piece);
            }
            pos += decor.spacing_m.max(2.0);
        }
    }

    /// Furniture must dodge buildings and other furniture.  Roads are clear
    /// by construction: the offset starts beyond the half-width.
    fn furniture_collides(&self, piece: &Furniture) -> bool {
        let bbox = piece.aabb();
        let collider = piece.collider();
        for idx in self.built_index.retrieve(bbox) {
            if collider.intersects(&self.buildings[idx].collider()) {
                return true;
            }
        }
        for idx in self.furniture_index.retrieve(bbox) {
            if collider.intersects(&self.furniture[idx].collider()) {
                return true;
            }
        }
        false
    }
}
