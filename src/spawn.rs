//! Particle factories
//!
//! The simulation never decides where particles come from. A factory hands
//! it spawn requests; the simulation validates and queues them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::Vector2d;

/// Initial state for one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub position: Vector2d,
    pub velocity: Vector2d,
    pub radius: f64,
    pub mass: f64,
}

impl SpawnRequest {
    pub fn new(position: Vector2d, velocity: Vector2d, radius: f64, mass: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass,
        }
    }
}

/// Source of spawn requests
pub trait ParticleFactory {
    fn next_request(&mut self, settings: &Settings) -> SpawnRequest;
}

/// Uniformly random placement inside the world, seeded for reproducibility
#[derive(Debug, Clone)]
pub struct RandomSpawner {
    rng: Pcg32,
}

impl RandomSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from settings, falling back to entropy
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Random spawner seed: {}", seed);
        Self::new(seed)
    }

    /// Uniform in [lo, hi), or `lo` when the range is empty
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }
}

impl ParticleFactory for RandomSpawner {
    fn next_request(&mut self, settings: &Settings) -> SpawnRequest {
        let r = settings.particle_radius;
        let max = settings.max_spawn_speed;
        let position = Vector2d::new(
            self.uniform(r, settings.world_width - r),
            self.uniform(r, settings.world_height - r),
        );
        let velocity = Vector2d::new(self.uniform(-max, max), self.uniform(-max, max));
        SpawnRequest::new(position, velocity, r, settings.particle_mass)
    }
}

/// Replays a fixed list of requests, then repeats the last one
#[derive(Debug, Clone)]
pub struct FixedSpawner {
    requests: Vec<SpawnRequest>,
    cursor: usize,
}

impl FixedSpawner {
    pub fn new(requests: Vec<SpawnRequest>) -> Self {
        Self {
            requests,
            cursor: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.requests.len().saturating_sub(self.cursor)
    }
}

impl ParticleFactory for FixedSpawner {
    fn next_request(&mut self, settings: &Settings) -> SpawnRequest {
        let fallback = SpawnRequest::new(
            Vector2d::new(settings.world_width / 2.0, settings.world_height / 2.0),
            Vector2d::ZERO,
            settings.particle_radius,
            settings.particle_mass,
        );
        let request = self
            .requests
            .get(self.cursor)
            .or_else(|| self.requests.last())
            .copied()
            .unwrap_or(fallback);
        self.cursor += 1;
        request
    }
}
