// --- File: main.rs ---
// Headless driver: advances a simulated clock at a fixed timestep and logs
// population counts once per simulated second. Usage:
//
//     revier [ticks] [seed]

use revier::{SimulationConfig, World};

// ~30 ticks per simulated second, matching the cadence the default speeds
// and millisecond intervals were tuned for.
const TICK_MS: u64 = 33;
const DEFAULT_TICKS: u64 = 9_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_TICKS);
    let seed: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random);

    let config = SimulationConfig::default();
    let mut world = World::new(config, seed);
    let counts = world.population_counts();
    log::info!(
        "seed {seed}: starting with {} plants, {} preys, {} predators, {} obstacles",
        counts.plants,
        counts.preys,
        counts.predators,
        counts.obstacles
    );

    let mut now_ms: u64 = 0;
    let mut next_report_ms: u64 = 1000;
    for _ in 0..ticks {
        now_ms += TICK_MS;
        world.tick(now_ms);

        if now_ms >= next_report_ms {
            next_report_ms += 1000;
            let counts = world.population_counts();
            log::info!(
                "t={:>6}ms plants: {:>4} preys: {:>4} predators: {:>4}",
                now_ms,
                counts.plants,
                counts.preys,
                counts.predators
            );
            // Extinction is allowed and not auto-corrected; with no creatures
            // left there is nothing more to watch.
            if counts.preys == 0 && counts.predators == 0 {
                log::info!("both species extinct at t={now_ms}ms, stopping");
                break;
            }
        }
    }

    let counts = world.population_counts();
    println!(
        "final populations after {}ms: plants {}, preys {}, predators {}",
        now_ms, counts.plants, counts.preys, counts.predators
    );
}
// --- End of File: main.rs ---
