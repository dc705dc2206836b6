//! Gameplay tuning
//!
//! Every number that shapes how the game feels lives here, in per-step units
//! (one step = [`SIM_DT`](crate::consts::SIM_DT)).

use serde::{Deserialize, Serialize};

use crate::consts::FIELD_HEIGHT;

/// Gameplay constants carried by the session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to velocity each step
    pub gravity: f32,
    /// Velocity assigned by a jump (negative = upward)
    pub jump_impulse: f32,
    /// Leftward obstacle movement per step
    pub scroll_speed: f32,
    /// Horizontal distance between consecutive obstacles
    pub obstacle_spacing: f32,
    /// Extra distance beyond the right edge for the first obstacle
    pub first_obstacle_offset: f32,
    pub obstacle_width: f32,
    /// Vertical opening the player flies through
    pub gap_height: f32,
    /// Smallest allowed gap top (also applied above the ground margin)
    pub min_gap_top: f32,
    /// Extra clearance kept between the lowest gap and the ground
    pub ground_margin: f32,
    /// Visual sprite size (square bounding box)
    pub player_size: f32,
    /// How much smaller the circular hitbox is than the sprite radius
    pub hitbox_inset: f32,
    /// Rotation per unit of velocity (radians)
    pub rotation_factor: f32,
    /// Rotation limit either way (radians)
    pub max_rotation: f32,
    /// Idle bob amplitude on the start screen
    pub idle_amplitude: f32,
    /// Idle bob time divisor (ms per radian)
    pub idle_period_ms: f32,
    /// Particles per burst
    pub burst_count: usize,
    /// Width of the uniform range each particle velocity component is drawn from
    pub particle_spread: f32,
    /// Life lost per step
    pub particle_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.4,
            jump_impulse: -7.0,
            scroll_speed: 3.0,
            obstacle_spacing: 220.0,
            first_obstacle_offset: 100.0,
            obstacle_width: 60.0,
            gap_height: 160.0,
            min_gap_top: 50.0,
            ground_margin: 50.0,
            player_size: 34.0,
            hitbox_inset: 4.0,
            rotation_factor: 0.1,
            max_rotation: std::f32::consts::FRAC_PI_4,
            idle_amplitude: 10.0,
            idle_period_ms: 300.0,
            burst_count: 8,
            particle_spread: 6.0,
            particle_decay: 0.05,
        }
    }
}

impl Tuning {
    /// Radius of the circular hitbox
    pub fn hitbox_radius(&self) -> f32 {
        self.player_size / 2.0 - self.hitbox_inset
    }

    /// Largest gap top that still leaves the gap clear of the ground margin
    pub fn max_gap_top(&self) -> f32 {
        FIELD_HEIGHT - self.gap_height - self.min_gap_top - self.ground_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hitbox_is_smaller_than_sprite() {
        let tuning = Tuning::default();
        assert_eq!(tuning.hitbox_radius(), 13.0);
        assert!(tuning.hitbox_radius() < tuning.player_size / 2.0);
    }

    #[test]
    fn test_default_gap_range() {
        let tuning = Tuning::default();
        assert_eq!(tuning.min_gap_top, 50.0);
        assert_eq!(tuning.max_gap_top(), 340.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"gravity": 0.5}"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.jump_impulse, -7.0);
        assert_eq!(tuning.burst_count, 8);
    }
}
