//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through a caller-supplied RNG
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, hits_obstacle, out_of_bounds};
pub use obstacle::random_gap_top;
pub use particles::{age_particles, emit_burst};
pub use state::{
    CrashCause, GameEvent, GamePhase, GameState, Obstacle, Particle, ParticleKind, Player,
};
pub use tick::{TickInput, jump, reset, restart, tick};
