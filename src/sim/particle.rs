//! Physical particle state
//!
//! Plain data: anything that draws a particle keys on its `ParticleId`.

use serde::{Deserialize, Serialize};

use super::vector::Vector2d;
use crate::error::{Error, Result};

/// Stable particle identifier, allocated by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// One-bit tick clock
///
/// A particle is "checked" when its toggle equals the current parity. Flipping
/// the parity un-checks every particle at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickParity(bool);

impl TickParity {
    pub fn flip(&mut self) {
        self.0 = !self.0;
    }

    pub fn opposite(self) -> Self {
        Self(!self.0)
    }
}

/// A rigid circular body
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vector2d,
    pub velocity: Vector2d,
    pub radius: f64,
    pub mass: f64,
    impact_check: TickParity,
    /// Velocity to adopt once this tick's contacts are resolved
    pub(crate) impact_velocity: Option<Vector2d>,
}

impl Particle {
    /// Create a particle after validating its parameters.
    ///
    /// The particle starts unchecked relative to `parity`.
    pub fn new(
        id: ParticleId,
        position: Vector2d,
        velocity: Vector2d,
        radius: f64,
        mass: f64,
        parity: TickParity,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParticleParameters(format!(
                "radius must be finite and > 0, got {radius}"
            )));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParticleParameters(format!(
                "mass must be finite and > 0, got {mass}"
            )));
        }
        if !position.is_finite() {
            return Err(Error::InvalidParticleParameters(
                "position must be finite".into(),
            ));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParticleParameters(
                "velocity must be finite".into(),
            ));
        }
        Ok(Self {
            id,
            position,
            velocity,
            radius,
            mass,
            impact_check: parity.opposite(),
            impact_velocity: None,
        })
    }

    /// Explicit Euler step
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    #[inline]
    pub fn is_checked(&self, parity: TickParity) -> bool {
        self.impact_check == parity
    }

    #[inline]
    pub fn mark_checked(&mut self, parity: TickParity) {
        self.impact_check = parity;
    }

    /// Re-arm as unchecked for `parity` (used when merging between ticks)
    #[inline]
    pub(crate) fn mark_unchecked(&mut self, parity: TickParity) {
        self.impact_check = parity.opposite();
    }

    pub fn pending_impulse(&self) -> Option<Vector2d> {
        self.impact_velocity
    }

    /// Superpose `v` onto the pending impulse (empty counts as zero)
    pub(crate) fn add_impulse(&mut self, v: Vector2d) {
        self.impact_velocity = Some(self.impact_velocity.unwrap_or(Vector2d::ZERO) + v);
    }

    /// speed² · mass (diagnostic, no ½ factor)
    #[inline]
    pub fn energy(&self) -> f64 {
        self.velocity.length_squared() * self.mass
    }
}
