//! Fixed timestep simulation tick
//!
//! One tick, in order:
//! 1. Merge particles spawned since the last tick
//! 2. Euler-integrate every particle with its incoming velocity
//! 3. For each particle in collection order: mark it checked, test the world
//!    edges, scan every still-unchecked particle for contact (rewind, then
//!    impact), adopt any pending impulse and integrate again
//! 4. Sum speed² · mass
//! 5. Flip the parity
//!
//! Pairs are visited exactly once per tick: a particle only scans partners
//! that have not been checked yet. Results depend on collection order when
//! three or more particles meet in the same tick.

use serde::Serialize;

use super::collision::{collides, touches_boundary};
use super::impact::resolve_impact;
use super::overlap::{Rewind, remove_overlap};
use super::particle::Particle;
use super::state::Simulation;
use super::vector::Vector2d;

/// Counters for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub total_energy: f64,
    /// Particle pairs whose impact was resolved
    pub contacts: u32,
    /// Pairs skipped because their rewind was degenerate
    pub skipped: u32,
    /// Particles reflected off a world edge
    pub wall_hits: u32,
}

/// Mutable references to two distinct elements
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Advance the simulation by one fixed timestep
pub fn tick(sim: &mut Simulation) -> TickReport {
    sim.merge_pending();

    let dt = sim.dt;
    let parity = sim.parity;
    let bounds = sim.bounds;
    let tolerance = sim.overlap_tolerance;
    let mut report = TickReport::default();

    for particle in &mut sim.particles {
        particle.advance(dt);
    }
    sim.total_energy = 0.0;

    let n = sim.particles.len();
    for i in 0..n {
        let p = &mut sim.particles[i];
        p.mark_checked(parity);

        // Walls: a vertical-edge hit overwrites a horizontal one at a corner
        let contact = touches_boundary(p, bounds);
        if contact.horizontal {
            p.impact_velocity = Some(p.velocity.flip_x());
        }
        if contact.vertical {
            p.impact_velocity = Some(p.velocity.flip_y());
        }
        if contact.any() {
            report.wall_hits += 1;
        }

        for j in 0..n {
            if j == i {
                continue;
            }
            let (p, q) = pair_mut(&mut sim.particles, i, j);
            if q.is_checked(parity) || !collides(p, q) {
                continue;
            }

            match remove_overlap(p, q, tolerance) {
                Ok(Rewind::Rewound { time }) => {
                    log::debug!("Rewound {:?} and {:?} by {:.4}", p.id, q.id, time);
                }
                Ok(Rewind::Negligible) => {}
                Err(e) => {
                    log::warn!("Skipping pair {:?}/{:?}: {}", p.id, q.id, e);
                    report.skipped += 1;
                    continue;
                }
            }

            p.impact_velocity = Some(Vector2d::ZERO);
            q.impact_velocity = Some(Vector2d::ZERO);
            resolve_impact(p, q);
            report.contacts += 1;
        }

        let p = &mut sim.particles[i];
        if let Some(velocity) = p.impact_velocity.take() {
            p.velocity = velocity;
            p.advance(dt);
        }
    }

    debug_assert!(sim.particles.iter().all(|p| p.pending_impulse().is_none()));

    sim.total_energy = sim.particles.iter().map(Particle::energy).sum();
    sim.parity.flip();
    sim.tick += 1;

    report.tick = sim.tick;
    report.total_energy = sim.total_energy;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OVERLAP_TOLERANCE;
    use crate::settings::Settings;
    use crate::sim::particle::ParticleId;
    use crate::spawn::SpawnRequest;
    use proptest::prelude::*;

    fn world() -> Simulation {
        Simulation::new(&Settings::default()).unwrap()
    }

    fn spawn(sim: &mut Simulation, pos: (f64, f64), vel: (f64, f64)) -> ParticleId {
        sim.spawn(SpawnRequest::new(pos.into(), vel.into(), 7.0, 10.0))
            .unwrap()
    }

    fn close(a: Vector2d, b: Vector2d) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_head_on_equal_masses_exchange() {
        let mut sim = world();
        spawn(&mut sim, (100.0, 400.0), (1.0, 0.0));
        spawn(&mut sim, (114.0, 400.0), (-1.0, 0.0));

        let snap = sim.step();
        let (a, b) = (&snap.particles[0], &snap.particles[1]);
        assert!(close(a.velocity, Vector2d::new(-1.0, 0.0)), "v1 = {:?}", a.velocity);
        assert!(close(b.velocity, Vector2d::new(1.0, 0.0)), "v2 = {:?}", b.velocity);

        // Rewound to contact, then moved apart with the new velocities
        assert!(close(a.position, Vector2d::new(99.0, 400.0)));
        assert!(close(b.position, Vector2d::new(115.0, 400.0)));

        let gap = (a.position - b.position).length();
        assert!(gap >= 14.0 - 2.0 * OVERLAP_TOLERANCE);
    }

    #[test]
    fn test_head_on_conserves_energy_and_momentum() {
        let mut sim = world();
        sim.spawn(SpawnRequest::new((300.0, 300.0).into(), (2.0, 0.0).into(), 7.0, 5.0))
            .unwrap();
        sim.spawn(SpawnRequest::new((315.0, 300.0).into(), (-1.0, 0.0).into(), 7.0, 15.0))
            .unwrap();

        // 5·4 + 15·1
        let e0 = 35.0;
        let p0 = Vector2d::new(5.0 * 2.0 - 15.0, 0.0);

        let report = sim.step_report();
        assert_eq!(report.contacts, 1);
        assert!((report.total_energy - e0).abs() <= 1e-6 * e0);

        let p1 = sim
            .particles()
            .iter()
            .fold(Vector2d::ZERO, |acc, p| acc + p.velocity * p.mass);
        assert!((p1 - p0).length() <= 1e-6 * 25.0);
    }

    #[test]
    fn test_left_wall_reflects_x_only() {
        let mut sim = world();
        spawn(&mut sim, (7.0, 400.0), (-2.0, 3.0));

        let snap = sim.step();
        let p = &snap.particles[0];
        assert_eq!(p.velocity, Vector2d::new(2.0, 3.0));
        // Integrated out to x=5, then back with the reflected velocity
        assert!(close(p.position, Vector2d::new(7.0, 406.0)));
    }

    #[test]
    fn test_corner_keeps_only_vertical_reflection() {
        let mut sim = world();
        spawn(&mut sim, (8.0, 8.0), (-2.0, -2.0));

        let snap = sim.step();
        // Both edges touched; the top/bottom reflection wins
        assert_eq!(snap.particles[0].velocity, Vector2d::new(-2.0, 2.0));
    }

    #[test]
    fn test_resting_particle_is_fixed_point() {
        let mut sim = world();
        spawn(&mut sim, (500.0, 400.0), (0.0, 0.0));

        for _ in 0..50 {
            sim.step();
        }
        let p = &sim.particles()[0];
        assert_eq!(p.position, Vector2d::new(500.0, 400.0));
        assert_eq!(p.velocity, Vector2d::ZERO);
        assert_eq!(sim.total_energy(), 0.0);
    }

    #[test]
    fn test_sub_tolerance_overlap_untouched() {
        // Centers 13.9 apart after integration (overlap 0.05 of 14): no rewind,
        // but the contact still resolves as an impact
        let mut sim = world();
        spawn(&mut sim, (200.0, 200.0), (0.0, 0.0));
        spawn(&mut sim, (213.9, 200.0), (0.0, 0.0));

        let snap = sim.step();
        assert_eq!(snap.particles[0].position, Vector2d::new(200.0, 200.0));
        assert_eq!(snap.particles[1].position, Vector2d::new(213.9, 200.0));
        assert_eq!(snap.particles[0].velocity, Vector2d::ZERO);
        assert_eq!(snap.particles[1].velocity, Vector2d::ZERO);
    }

    #[test]
    fn test_degenerate_pair_is_skipped() {
        // Deep overlap, identical velocity: no rewind time exists
        let mut sim = world();
        spawn(&mut sim, (300.0, 300.0), (0.5, 0.5));
        spawn(&mut sim, (305.0, 300.0), (0.5, 0.5));

        let report = sim.step_report();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.contacts, 0);
        assert_eq!(sim.particles()[0].velocity, Vector2d::new(0.5, 0.5));
        assert_eq!(sim.particles()[1].velocity, Vector2d::new(0.5, 0.5));
    }

    #[test]
    fn test_parity_flips_once_per_tick() {
        let mut sim = world();
        spawn(&mut sim, (100.0, 100.0), (1.0, 0.0));
        let start = sim.parity();

        sim.step();
        assert_ne!(sim.parity(), start);
        // Every live particle was checked against the parity of the tick just run
        assert!(sim.particles().iter().all(|p| p.is_checked(start)));

        sim.step();
        assert_eq!(sim.parity(), start);
        assert_eq!(sim.tick(), 2);
    }

    #[test]
    fn test_spawn_between_ticks_joins_unchecked() {
        let mut sim = world();
        spawn(&mut sim, (100.0, 400.0), (1.0, 0.0));
        sim.step();

        // Spawned after one tick: must still collide on the next
        spawn(&mut sim, (116.0, 400.0), (-1.0, 0.0));
        let report = sim.step_report();
        assert_eq!(report.contacts, 1);
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut sim = world();
        spawn(&mut sim, (100.0, 100.0), (0.0, 0.0));
        spawn(&mut sim, (300.0, 100.0), (0.0, 0.0));
        sim.step();

        let (a, b) = pair_mut(&mut sim.particles, 1, 0);
        assert_eq!(a.id, ParticleId(1));
        assert_eq!(b.id, ParticleId(0));
    }

    proptest! {
        #[test]
        fn prop_open_space_pair_stays_separated(
            gap in 14.5f64..30.0,
            theta in -3.14f64..3.14,
            m1 in 1.0f64..50.0,
            m2 in 1.0f64..50.0,
            v1 in (-2.0f64..2.0, -2.0f64..2.0),
            v2 in (-2.0f64..2.0, -2.0f64..2.0),
        ) {
            let mut sim = world();
            let a = Vector2d::new(500.0, 400.0);
            let b = a + Vector2d::new(gap * theta.cos(), gap * theta.sin());
            sim.spawn(SpawnRequest::new(a, v1.into(), 7.0, m1)).unwrap();
            sim.spawn(SpawnRequest::new(b, v2.into(), 7.0, m2)).unwrap();

            let e0 = m1 * Vector2d::from(v1).length_squared() + m2 * Vector2d::from(v2).length_squared();
            let report = sim.step_report();
            prop_assert_eq!(report.wall_hits, 0);
            prop_assert_eq!(report.skipped, 0);

            let ps = sim.particles();
            let dist = (ps[0].position - ps[1].position).length();
            prop_assert!(dist >= 14.0 - 2.0 * OVERLAP_TOLERANCE, "distance {}", dist);
            prop_assert!((report.total_energy - e0).abs() <= 1e-6 * (e0 + 1e-9));
        }
    }
}
