//! Orbit - discrete-tick 2D elastic collisions between circular particles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vector math, detection, rewind, impulses, tick)
//! - `spawn`: Particle factories feeding the simulation between ticks
//! - `settings`: World and spawn configuration
//! - `error`: Crate-wide error type

pub mod error;
pub mod settings;
pub mod sim;
pub mod spawn;

pub use error::{Error, Result};
pub use settings::Settings;
pub use sim::{ParticleId, Simulation, Snapshot};

use glam::DVec2;

/// Simulation configuration defaults
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f64 = 1000.0;
    pub const WORLD_HEIGHT: f64 = 800.0;

    /// Minimum interpenetration depth that triggers a rewind
    pub const OVERLAP_TOLERANCE: f64 = 0.1;

    /// One tick moves a particle by exactly its velocity
    pub const TIME_STEP: f64 = 1.0;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f64 = 7.0;
    pub const PARTICLE_MASS: f64 = 10.0;
    /// Spawn velocity range per axis is [-MAX, MAX)
    pub const PARTICLE_MAX_SPAWN_SPEED: f64 = 0.5;

    /// Demo runner defaults
    pub const INITIAL_PARTICLES: usize = 40;
    pub const DEMO_TICKS: u64 = 2_000;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
