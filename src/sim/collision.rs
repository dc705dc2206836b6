//! Collision detection
//!
//! The player is tested as a circle shrunk inside its sprite, checked against
//! each obstacle as an axis-aligned band. Field bounds use the full sprite.

use glam::Vec2;

use super::state::{CrashCause, Obstacle, Player};
use crate::consts::FIELD_HEIGHT;
use crate::tuning::Tuning;

/// Simplified collision shape for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub center: Vec2,
    pub radius: f32,
}

impl Hitbox {
    pub fn for_player(player: &Player, tuning: &Tuning) -> Self {
        Self {
            center: player.position(),
            radius: tuning.hitbox_radius(),
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }
}

/// True if the hitbox overlaps the obstacle horizontally and pokes out of its gap
pub fn hits_obstacle(hitbox: &Hitbox, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let overlaps_x = hitbox.right() > obstacle.x && hitbox.left() < obstacle.right_edge(tuning);
    if !overlaps_x {
        return false;
    }
    hitbox.top() < obstacle.gap_top || hitbox.bottom() > obstacle.gap_bottom(tuning)
}

/// Ground/ceiling test against the full sprite
pub fn out_of_bounds(player: &Player, tuning: &Tuning) -> Option<CrashCause> {
    let half = tuning.player_size / 2.0;
    if player.y + half >= FIELD_HEIGHT {
        Some(CrashCause::Ground)
    } else if player.y - half <= 0.0 {
        Some(CrashCause::Ceiling)
    } else {
        None
    }
}
