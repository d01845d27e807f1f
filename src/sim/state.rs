//! Simulation state and host-facing snapshots
//!
//! `Simulation` owns every piece of mutable state: the particle collection,
//! the tick parity, the id counter and the spawn queue. Spawns wait in the
//! queue until the next tick starts, so the collection never changes shape
//! while a tick's pairwise bookkeeping is in flight.

use serde::{Deserialize, Serialize};

use super::collision::WorldBounds;
use super::particle::{Particle, ParticleId, TickParity};
use super::tick::{TickReport, tick};
use super::vector::Vector2d;
use crate::error::Result;
use crate::settings::Settings;
use crate::spawn::{ParticleFactory, SpawnRequest};

/// Per-particle state handed to the host after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub id: ParticleId,
    pub position: Vector2d,
    pub velocity: Vector2d,
    pub radius: f64,
    pub mass: f64,
}

impl From<&Particle> for ParticleSnapshot {
    fn from(p: &Particle) -> Self {
        Self {
            id: p.id,
            position: p.position,
            velocity: p.velocity,
            radius: p.radius,
            mass: p.mass,
        }
    }
}

/// Whole-world state after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub total_energy: f64,
    pub particles: Vec<ParticleSnapshot>,
}

/// The simulation context
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) bounds: WorldBounds,
    pub(crate) overlap_tolerance: f64,
    pub(crate) dt: f64,
    pub(crate) parity: TickParity,
    pub(crate) tick: u64,
    pub(crate) total_energy: f64,
    /// Stable collection order; pairwise scans follow it
    pub(crate) particles: Vec<Particle>,
    /// Spawned but not yet merged
    pending: Vec<Particle>,
    next_id: u32,
}

impl Simulation {
    /// Create an empty world from validated settings
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            bounds: WorldBounds::new(settings.world_width, settings.world_height),
            overlap_tolerance: settings.overlap_tolerance,
            dt: settings.time_step,
            parity: TickParity::default(),
            tick: 0,
            total_energy: 0.0,
            particles: Vec::new(),
            pending: Vec::new(),
            next_id: 0,
        })
    }

    /// Queue a particle; it takes part in physics from the next tick on.
    ///
    /// Invalid parameters fail here and the particle is never queued.
    pub fn spawn(&mut self, request: SpawnRequest) -> Result<ParticleId> {
        let id = ParticleId(self.next_id);
        let particle = Particle::new(
            id,
            request.position,
            request.velocity,
            request.radius,
            request.mass,
            self.parity,
        )?;
        self.next_id += 1;
        self.pending.push(particle);
        Ok(id)
    }

    /// Pull one request from `factory` and queue it
    pub fn spawn_from<F: ParticleFactory + ?Sized>(
        &mut self,
        factory: &mut F,
        settings: &Settings,
    ) -> Result<ParticleId> {
        let request = factory.next_request(settings);
        self.spawn(request)
    }

    /// Move queued spawns into the live collection (between ticks only)
    pub(crate) fn merge_pending(&mut self) {
        for mut particle in self.pending.drain(..) {
            particle.mark_unchecked(self.parity);
            log::debug!(
                "Merged particle {:?} at ({:.2}, {:.2})",
                particle.id,
                particle.position.x(),
                particle.position.y()
            );
            self.particles.push(particle);
        }
    }

    /// Advance one tick and report the new state
    pub fn step(&mut self) -> Snapshot {
        let report = tick(self);
        log::trace!(
            "Tick {}: energy={:.4} contacts={} skipped={}",
            report.tick,
            report.total_energy,
            report.contacts,
            report.skipped
        );
        self.snapshot()
    }

    /// Advance one tick and return the counters instead of a snapshot
    pub fn step_report(&mut self) -> TickReport {
        tick(self)
    }

    /// Current state without stepping
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            total_energy: self.total_energy,
            particles: self.particles.iter().map(ParticleSnapshot::from).collect(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live particles (queued spawns excluded)
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn queued_count(&self) -> usize {
        self.pending.len()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn parity(&self) -> TickParity {
        self.parity
    }

    /// Σ speed² · mass as of the last tick
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Mass-weighted mean position, `None` for an empty world
    pub fn center_of_mass(&self) -> Option<Vector2d> {
        let total_mass: f64 = self.particles.iter().map(|p| p.mass).sum();
        let weighted = self
            .particles
            .iter()
            .fold(Vector2d::ZERO, |acc, p| acc + p.position * p.mass);
        weighted.divide(total_mass).ok()
    }
}
