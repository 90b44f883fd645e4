//! small-city — smallest end-to-end run of the citygen framework.
//!
//! Grows a road network from a seed, zones it, fills the lots, and prints a
//! summary.  Pass a seed as the first argument (integer or free text):
//!
//! ```text
//! cargo run -p small-city -- septembertown
//! ```

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::Result;

use cg_core::GrowthConfig;
use cg_growth::{CityPlan, generate};
use cg_lots::place_lots;

fn main() -> Result<()> {
    env_logger::init();

    let seed = std::env::args().nth(1).unwrap_or_else(|| "septembertown".to_string());
    let config = GrowthConfig::default();

    println!("=== small-city — citygen ===");
    println!("Seed: {seed}  |  Segment limit: {}", config.segment_count_limit);
    println!();

    // 1. Grow the road network.
    let t0 = Instant::now();
    let mut plan: CityPlan = match seed.parse::<u64>() {
        Ok(n) => generate(n, &config)?,
        Err(_) => generate(seed.as_str(), &config)?,
    };
    let grow_secs = t0.elapsed().as_secs_f64();

    let highways = plan.graph.iter().filter(|(_, s)| s.meta.highway).count();
    let total_km: f32 =
        plan.graph.iter().map(|(_, s)| s.length()).sum::<f32>() / 1_000.0;
    println!("Road network in {grow_secs:.3} s:");
    println!("  segments : {} ({} highway, {} street)",
        plan.graph.len(), highways, plan.graph.len() - highways);
    println!("  length   : {total_km:.1} km");
    println!("  r_unit   : {:.0} m", plan.r_unit());
    println!(
        "  actions  : {} splits, {} snaps, {} projections",
        plan.debug.intersections.len(),
        plan.debug.snaps.len(),
        plan.debug.intersections_radius.len()
    );
    println!();

    // 2. Zone census over segment midpoints.
    let mut zone_counts: BTreeMap<String, usize> = BTreeMap::new();
    let midpoints: Vec<_> = plan
        .graph
        .iter()
        .map(|(_, s)| s.start() + s.vector() * 0.5)
        .collect();
    for mid in midpoints {
        *zone_counts.entry(plan.zoning.zone_at(mid).to_string()).or_default() += 1;
    }
    println!("{:<14} {:>8}", "Zone", "Streets");
    println!("{}", "-".repeat(24));
    for (zone, count) in &zone_counts {
        println!("{zone:<14} {count:>8}");
    }
    println!();

    // 3. Fill the lots.
    let t1 = Instant::now();
    let lots = place_lots(&mut plan, &config);
    let lots_secs = t1.elapsed().as_secs_f64();

    let mut kind_counts: BTreeMap<String, usize> = BTreeMap::new();
    for building in &lots.buildings {
        *kind_counts.entry(format!("{:?}", building.kind)).or_default() += 1;
    }
    println!("Lots in {lots_secs:.3} s:");
    println!("  buildings : {}", lots.buildings.len());
    println!("  furniture : {}", lots.furniture.len());
    for (kind, count) in &kind_counts {
        println!("    {kind:<12} {count:>6}");
    }

    Ok(())
}
