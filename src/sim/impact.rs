//! Elastic impact response
//!
//! The collision axis is the direction of the relative velocity `v1 - v2`,
//! not the center-to-center normal. Both velocities are rotated so that axis
//! becomes x, the 1D elastic formula is applied to the x components, y is
//! carried through, and the result is rotated back.

use super::particle::Particle;
use super::vector::Vector2d;

/// 1D elastic collision: post-impact velocities along the collision axis
#[inline]
pub fn elastic_exchange(m1: f64, u1: f64, m2: f64, u2: f64) -> (f64, f64) {
    let total = m1 + m2;
    let v1 = ((m1 - m2) * u1 + 2.0 * m2 * u2) / total;
    let v2 = (2.0 * m1 * u1 - (m1 - m2) * u2) / total;
    (v1, v2)
}

/// Angle of the relative velocity, used as the collision axis
#[inline]
pub fn impact_angle(p1: &Particle, p2: &Particle) -> f64 {
    (p1.velocity - p2.velocity).to_polar().phi
}

/// Post-impact velocities for a pair, without touching either particle
pub fn impact_velocities(p1: &Particle, p2: &Particle) -> (Vector2d, Vector2d) {
    let angle = impact_angle(p1, p2);
    let u1 = p1.velocity.rotate(-angle);
    let u2 = p2.velocity.rotate(-angle);

    let (v1x, v2x) = elastic_exchange(p1.mass, u1.x(), p2.mass, u2.x());

    (
        Vector2d::new(v1x, u1.y()).rotate(angle),
        Vector2d::new(v2x, u2.y()).rotate(angle),
    )
}

/// Resolve the impact and superpose the result onto both pending impulses
pub fn resolve_impact(p1: &mut Particle, p2: &mut Particle) {
    let (v1, v2) = impact_velocities(p1, p2);
    p1.add_impulse(v1);
    p2.add_impulse(v2);
}
