//! Orbit headless runner
//!
//! Spawns a random population, runs the tick loop and prints the final
//! snapshot as JSON.
//!
//! Usage: `orbit-sim [settings.json]`

use std::process::ExitCode;

use orbit_sim::spawn::RandomSpawner;
use orbit_sim::{Settings, Simulation};

fn run() -> orbit_sim::Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    let mut sim = Simulation::new(&settings)?;
    let mut spawner = RandomSpawner::from_settings(&settings);
    for _ in 0..settings.initial_particles {
        sim.spawn_from(&mut spawner, &settings)?;
    }
    log::info!(
        "Orbit starting: {} particles in {}x{}",
        settings.initial_particles,
        settings.world_width,
        settings.world_height
    );

    let mut snapshot = sim.snapshot();
    for _ in 0..settings.ticks {
        snapshot = sim.step();
        if settings.log_every > 0 && snapshot.tick % settings.log_every == 0 {
            log::info!(
                "Tick {}: particles={} energy={:.4}",
                snapshot.tick,
                snapshot.particles.len(),
                snapshot.total_energy
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
