//! Obstacle geometry and procedural gap placement

use rand::Rng;

use super::state::Obstacle;
use crate::tuning::Tuning;

impl Obstacle {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    /// Horizontal position of the trailing (right) edge
    pub fn right_edge(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width
    }

    /// Where the bottom segment begins
    pub fn gap_bottom(&self, tuning: &Tuning) -> f32 {
        self.gap_top + tuning.gap_height
    }

    /// True once the obstacle has scrolled fully past the left edge
    pub fn is_offscreen(&self, tuning: &Tuning) -> bool {
        self.right_edge(tuning) < 0.0
    }
}

/// Pick a whole-unit gap top, uniformly, so the whole gap fits above the ground margin
pub fn random_gap_top<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    let min = tuning.min_gap_top.round() as i32;
    let max = tuning.max_gap_top().floor() as i32;
    if max <= min {
        return min as f32;
    }
    rng.random_range(min..=max) as f32
}
