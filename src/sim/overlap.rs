//! Overlap rewind
//!
//! After a full Euler step two particles can end up interpenetrating. Before
//! resolving the impact we move both back along their current velocities to
//! the instant they were exactly tangent. With relative position `d`,
//! relative velocity `v` and contact distance `r`, the rewind time `t`
//! satisfies `|d - t·v| = r`:
//!
//! ```text
//! (v·v) t² - 2 (d·v) t + (d·d - r²) = 0
//! ```
//!
//! The larger root is the one that separates the pair.

use super::collision::particle_distance;
use super::particle::Particle;
use crate::error::{Error, Result};

/// Outcome of an overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rewind {
    /// Interpenetration at or below tolerance, nothing moved
    Negligible,
    /// Both particles moved back by `velocity * time`
    Rewound { time: f64 },
}

/// Solve for the rewind time of two overlapping particles
pub fn rewind_time(p1: &Particle, p2: &Particle) -> Result<f64> {
    let d = p1.position - p2.position;
    let v = p1.velocity - p2.velocity;
    let r = p1.radius + p2.radius;

    let a = v.length_squared();
    if a == 0.0 {
        return Err(Error::DegenerateCollision(format!(
            "zero relative velocity between {:?} and {:?}",
            p1.id, p2.id
        )));
    }
    let b = -2.0 * d.dot(v);
    let c = d.length_squared() - r * r;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Err(Error::DegenerateCollision(format!(
            "{:?} and {:?} are not on a collision trajectory (discriminant {discriminant})",
            p1.id, p2.id
        )));
    }

    Ok((-b + discriminant.sqrt()) / (2.0 * a))
}

/// Move two colliding particles back to first contact.
///
/// Positions only; velocities are left for the impact resolver.
pub fn remove_overlap(p1: &mut Particle, p2: &mut Particle, tolerance: f64) -> Result<Rewind> {
    let depth = ((p1.radius + p2.radius) - particle_distance(p1, p2)) / 2.0;
    if depth <= tolerance {
        return Ok(Rewind::Negligible);
    }

    let time = rewind_time(p1, p2)?;
    p1.position = p1.position - p1.velocity * time;
    p2.position = p2.position - p2.velocity * time;

    Ok(Rewind::Rewound { time })
}
