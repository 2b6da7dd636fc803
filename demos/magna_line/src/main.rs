//! magna_line — demo run of the hallsim manipulant simulator.
//!
//! Two manipulants move pallets from three presses to two warehouses in a
//! 120 × 60 m hall.  Results go to `output/magna_line/` as CSV and are
//! printed as JSON.
//!
//! Set `RUST_LOG=debug` to see dispatch decisions and per-pair routes.

mod layout;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::info;

use hs_core::{RunConfig, SpeedMultiplier};
use hs_orders::{DispatchPolicy, load_orders_reader};
use hs_output::{CsvWriter, OutputWriter, ResultsObserver};
use hs_sim::{DroppedOrder, SessionBuilder, SimObserver, SimResults, TickSummary};

use layout::build_layout;

// ── Constants ─────────────────────────────────────────────────────────────────

const MANIPULANTS:    u32   = 2;
const WALKING_SPEED:  f32   = 4.0;
const MAX_SIM_SECS:   f64   = 3_600.0;
const PROGRESS_EVERY: u64   = 500;
const OUTPUT_DIR:     &str  = "output/magna_line";

// ── Orders CSV ────────────────────────────────────────────────────────────────

// Objects: 0..=2 presses, 10 and 11 warehouses.
const ORDERS_CSV: &str = "\
id,source,dest,product,quantity,priority,pieces_per_pallet,pallet_weight_kg\n\
1,0,10,136333150100 F40 VODICI PROFIL,480,0,16,10\n\
2,1,10,136333150200 F40 KRYT,96,0,,\n\
3,2,11,136333150300 F40 LISTA,160,2,20,12.5\n\
4,0,11,136333150100 F40 VODICI PROFIL,240,0,16,10\n\
5,1,11,136333150400 F40 DRZAK,64,5,8,\n\
6,2,10,136333150300 F40 LISTA,80,0,20,12.5\n\
";

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs progress and forwards everything to the results writer.
struct ProgressObserver<W: OutputWriter> {
    inner:   ResultsObserver<W>,
    dropped: usize,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_order_dropped(&mut self, dropped: &DroppedOrder) {
        self.dropped += 1;
        self.inner.on_order_dropped(dropped);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        if summary.tick.0 % PROGRESS_EVERY == 0 {
            info!(
                "{}: {} busy, {} queued, {} delivered",
                summary.tick, summary.busy_agents, summary.queued, summary.completed
            );
        }
        self.inner.on_tick_end(summary);
    }

    fn on_finish(&mut self, results: &SimResults) {
        self.inner.on_finish(results);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    println!("=== magna_line — hallsim ===");

    // 1. Hall, corridors, orders.
    let (layout, corridors) = build_layout();
    let orders = load_orders_reader(Cursor::new(ORDERS_CSV))?;
    println!(
        "Hall {} × {}: {} objects, {} corridors, {} orders",
        layout.width,
        layout.height,
        layout.object_count(),
        corridors.len(),
        orders.len()
    );

    // 2. Run config.
    let config = RunConfig {
        manipulant_count: MANIPULANTS,
        walking_speed:    WALKING_SPEED,
        speed_multiplier: SpeedMultiplier::X5,
        max_sim_secs:     MAX_SIM_SECS,
        ..RunConfig::default()
    };

    // 3. Build the session (routes are computed here).
    let t0 = Instant::now();
    let mut session = SessionBuilder::new(layout, corridors, orders, config.clone())
        .dispatch_policy(DispatchPolicy::Priority)
        .build()?;
    println!(
        "Routes: {} pairs ({} unreachable) in {:.3} s",
        session.routes().len(),
        session.routes().unreachable().len(),
        t0.elapsed().as_secs_f64()
    );

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = ProgressObserver {
        inner:   ResultsObserver::new(writer, &config).summary_every(10),
        dropped: 0,
    };

    // 5. Run.
    let t0 = Instant::now();
    let results = session.run(&mut obs)?;
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    println!(
        "Finished ({:?}) after {} ticks / {} in {:.3} s wall",
        results.stop_reason,
        results.ticks,
        session.clock(),
        t0.elapsed().as_secs_f64()
    );
    println!();

    // 6. Per-agent table.
    println!("{:<8} {:>6} {:>12} {:>12} {:>8}", "Agent", "Trips", "Distance m", "Weight kg", "Share");
    println!("{}", "-".repeat(50));
    for a in &results.agents {
        let share = if results.aggregate.trips == 0 {
            0.0
        } else {
            100.0 * f64::from(a.trips) / results.aggregate.trips as f64
        };
        println!(
            "{:<8} {:>6} {:>12.2} {:>12.1} {:>7.0}%",
            a.id.0,
            a.trips,
            results.to_metres(f64::from(a.distance)),
            a.weight_kg,
            share
        );
    }
    println!(
        "Total: {} trips, {:.2} m, {:.1} kg, {} dropped",
        results.aggregate.trips,
        results.to_metres(results.aggregate.distance),
        results.aggregate.weight_kg,
        obs.dropped
    );
    println!();

    // 7. Full results as JSON.
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
