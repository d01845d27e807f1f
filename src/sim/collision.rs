//! Contact detection between particles and against the world edges
//!
//! Center distance is rounded to the nearest integer before comparing against
//! the sum of radii. This coarsening keeps near-tangent pairs from flapping
//! between "touching" and "apart" from one tick to the next.

use serde::{Deserialize, Serialize};

use super::particle::Particle;
use super::vector::Vector2d;

/// Rectangular world extents, origin at (0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which world edges a particle is touching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryContact {
    /// Left or right edge
    pub horizontal: bool,
    /// Top or bottom edge
    pub vertical: bool,
}

impl BoundaryContact {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Euclidean distance rounded to the nearest integer (ties to even)
#[inline]
pub fn point_distance(a: Vector2d, b: Vector2d) -> f64 {
    (a - b).length().round_ties_even()
}

#[inline]
pub fn particle_distance(p1: &Particle, p2: &Particle) -> f64 {
    point_distance(p1.position, p2.position)
}

/// True if the two particles touch or overlap
#[inline]
pub fn collides(p1: &Particle, p2: &Particle) -> bool {
    particle_distance(p1, p2) <= p1.radius + p2.radius
}

/// Per-axis test: within `radius` of either extent on that axis
pub fn touches_boundary(p: &Particle, bounds: WorldBounds) -> BoundaryContact {
    let (x, y) = p.position.coords();
    let r = p.radius;
    BoundaryContact {
        horizontal: x <= r || x >= bounds.width - r,
        vertical: y <= r || y >= bounds.height - r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particle::{ParticleId, TickParity};

    fn at(x: f64, y: f64) -> Particle {
        Particle::new(
            ParticleId(0),
            Vector2d::new(x, y),
            Vector2d::ZERO,
            7.0,
            10.0,
            TickParity::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_point_distance_rounds() {
        assert_eq!(point_distance(Vector2d::ZERO, Vector2d::new(3.0, 4.0)), 5.0);
        assert_eq!(point_distance(Vector2d::ZERO, Vector2d::new(13.9, 0.0)), 14.0);
        assert_eq!(point_distance(Vector2d::ZERO, Vector2d::new(14.4, 0.0)), 14.0);
        // Ties go to even
        assert_eq!(point_distance(Vector2d::ZERO, Vector2d::new(14.5, 0.0)), 14.0);
        assert_eq!(point_distance(Vector2d::ZERO, Vector2d::new(15.5, 0.0)), 16.0);
    }

    #[test]
    fn test_collides() {
        let a = at(100.0, 100.0);
        assert!(collides(&a, &at(112.0, 100.0)));
        // Exactly tangent counts
        assert!(collides(&a, &at(114.0, 100.0)));
        // 14.4 rounds down to tangent
        assert!(collides(&a, &at(114.4, 100.0)));
        assert!(!collides(&a, &at(115.0, 100.0)));
    }

    #[test]
    fn test_touches_boundary() {
        let bounds = WorldBounds::new(1000.0, 800.0);

        assert!(!touches_boundary(&at(500.0, 400.0), bounds).any());

        let c = touches_boundary(&at(7.0, 400.0), bounds);
        assert!(c.horizontal && !c.vertical);

        let c = touches_boundary(&at(500.0, 795.0), bounds);
        assert!(!c.horizontal && c.vertical);

        let c = touches_boundary(&at(995.0, 3.0), bounds);
        assert!(c.horizontal && c.vertical);
    }
}
