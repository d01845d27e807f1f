//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No ambient state (parity and ids live on `Simulation`)
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod impact;
pub mod overlap;
pub mod particle;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{BoundaryContact, WorldBounds, collides, point_distance, touches_boundary};
pub use impact::{elastic_exchange, impact_velocities, resolve_impact};
pub use overlap::{Rewind, remove_overlap};
pub use particle::{Particle, ParticleId, TickParity};
pub use state::{ParticleSnapshot, Simulation, Snapshot};
pub use tick::{TickReport, tick};
pub use vector::{Vector2d, VectorPolar};
