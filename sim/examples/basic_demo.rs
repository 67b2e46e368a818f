//! Basic demonstration of the Arena Wager simulation.
//!
//! Run with: cargo run --example basic_demo
//! Set RUST_LOG=arena_sim=debug to see every hit.

use arena_sim::{snapshot_to_json_pretty, EncounterConfig, SimWorld};

const FRAME: f32 = 1.0 / 60.0;
/// Stop after five simulated minutes even if nobody has won.
const MAX_FRAMES: u32 = 60 * 300;

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Arena Wager - Simulation Demo ===\n");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2024);

    let mut sim = match SimWorld::new(EncounterConfig::showcase(800.0, 600.0, seed)) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid encounter: {err}");
            std::process::exit(1);
        }
    };

    println!("Opening line (seed {seed}):");
    print_board(&sim);

    let mut frames = 0;
    while !sim.is_decided() && frames < MAX_FRAMES {
        sim.advance(FRAME);
        frames += 1;

        // Every five seconds
        if frames % 300 == 0 {
            println!("\n--- t={:.1}s, {} alive ---", sim.elapsed(), sim.alive_count());
            print_board(&sim);
        }
    }

    println!("\n=== Result after {} ticks ({:.1}s) ===", sim.current_tick(), sim.elapsed());
    match sim.winner() {
        Some(w) => println!("Winner: {} ({}) with {:.0} hp", w.name, w.kind.as_str(), w.display_hp()),
        None => println!("No winner yet"),
    }

    if std::env::var_os("ARENA_DUMP_JSON").is_some() {
        println!("\n=== Final State (JSON) ===\n");
        match snapshot_to_json_pretty(&sim.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("snapshot serialization failed: {err}"),
        }
    }
}

fn print_board(sim: &SimWorld) {
    let fighters = sim.live_fighters();
    for (fighter, (_, odds)) in fighters.iter().zip(sim.odds_board()) {
        let status = if fighter.alive { "" } else { " [down]" };
        let filled = (fighter.hp_fraction() * 10.0).round() as usize;
        println!(
            "  {:<8} {:<13} [{:<10}] hp={:>5.0} pos=({:>5.1}, {:>5.1}) odds={:.2}x{}",
            fighter.name,
            fighter.kind.as_str(),
            "#".repeat(filled),
            fighter.display_hp(),
            fighter.position.x,
            fighter.position.y,
            odds,
            status
        );
    }
}
