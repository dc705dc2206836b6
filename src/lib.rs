//! Flappy Senac - a branded Flappy Bird variant for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `game`: Lifecycle controller driving the simulation from frame callbacks
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, haptics, timing)
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven gameplay constants

pub mod best_score;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep; tuning values are per step at 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical drawing surface
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// The player never moves horizontally
    pub const PLAYER_X: f32 = FIELD_WIDTH / 3.0;

    /// Decorative ground strip painted last
    pub const GROUND_STRIP_HEIGHT: f32 = 10.0;
    /// Spacing of the graph-paper background grid
    pub const GRID_SPACING: f32 = 20.0;

    /// Hard cap on live particles; oldest are dropped first
    pub const MAX_PARTICLES: usize = 256;

    /// Vibration length on game over (ms)
    pub const HAPTIC_PULSE_MS: u32 = 200;
}
