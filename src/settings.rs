//! Simulation settings
//!
//! Loaded from JSON; any field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// World, contact and spawn configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// World width (x extent)
    pub world_width: f64,
    /// World height (y extent)
    pub world_height: f64,

    // === Contacts ===
    /// Interpenetration depth at or below which no rewind happens
    pub overlap_tolerance: f64,
    /// Euler step per tick
    pub time_step: f64,

    // === Spawning ===
    /// Radius of spawned particles
    pub particle_radius: f64,
    /// Mass of spawned particles
    pub particle_mass: f64,
    /// Spawn velocity components are drawn from [-max, max)
    pub max_spawn_speed: f64,
    /// RNG seed for random spawns (None = seeded from entropy)
    pub seed: Option<u64>,

    // === Demo runner ===
    pub initial_particles: usize,
    pub ticks: u64,
    /// Log energy every N ticks (0 = never)
    pub log_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            overlap_tolerance: OVERLAP_TOLERANCE,
            time_step: TIME_STEP,

            particle_radius: PARTICLE_RADIUS,
            particle_mass: PARTICLE_MASS,
            max_spawn_speed: PARTICLE_MAX_SPAWN_SPEED,
            seed: None,

            initial_particles: INITIAL_PARTICLES,
            ticks: DEMO_TICKS,
            log_every: 200,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidSettings(format!("{name} must be finite and > 0, got {v}")))
            }
        }

        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("time_step", self.time_step)?;
        positive("particle_radius", self.particle_radius)?;
        positive("particle_mass", self.particle_mass)?;

        if !self.overlap_tolerance.is_finite() || self.overlap_tolerance < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "overlap_tolerance must be finite and >= 0, got {}",
                self.overlap_tolerance
            )));
        }
        if !self.max_spawn_speed.is_finite() || self.max_spawn_speed < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "max_spawn_speed must be finite and >= 0, got {}",
                self.max_spawn_speed
            )));
        }

        let diameter = 2.0 * self.particle_radius;
        if self.world_width <= diameter || self.world_height <= diameter {
            return Err(Error::InvalidSettings(
                "world must be larger than one particle diameter in both axes".into(),
            ));
        }
        Ok(())
    }
}
