//! Game state and core simulation types
//!
//! Everything the frame step mutates lives in one owned [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Coarse lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle screen, player bobs in place, waiting for the first jump
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended; frozen until an explicit restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle,
    Ground,
    Ceiling,
}

/// Things that happened during a step, drained by the lifecycle layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Jump impulse applied (also fires for the jump that starts a run)
    Jumped,
    /// An obstacle was passed; carries the new score
    Scored { score: u64 },
    /// Run ended with the given final score
    Crashed { score: u64, cause: CrashCause },
}

/// The player sprite. Horizontal position is fixed at [`PLAYER_X`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Vertical centre (y grows downward)
    pub y: f32,
    /// Vertical velocity per step (negative = upward)
    pub vel: f32,
    /// Sprite rotation in radians
    pub rotation: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::centered()
    }
}

impl Player {
    /// Player at mid-field, at rest
    pub fn centered() -> Self {
        Self {
            y: FIELD_HEIGHT / 2.0,
            vel: 0.0,
            rotation: 0.0,
        }
    }

    /// Integrate one step of gravity: velocity first, then position
    pub fn integrate(&mut self, gravity: f32) {
        self.vel += gravity;
        self.y += self.vel;
    }

    /// Tilt proportionally to velocity, nose-up when rising
    pub fn update_rotation(&mut self, tuning: &Tuning) {
        self.rotation = (self.vel * tuning.rotation_factor)
            .clamp(-tuning.max_rotation, tuning.max_rotation);
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(PLAYER_X, self.y)
    }
}

/// A gapped obstacle pair scrolling right to left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the top segment, i.e. where the gap begins
    pub gap_top: f32,
    /// Set the first step the obstacle is fully behind the player
    pub passed: bool,
}

/// Which burst a particle came from (selects its colour)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// White puff on every in-flight jump
    Flap,
    /// Brand-orange sparkle when an obstacle is passed
    Reward,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every step
    pub life: f32,
    pub kind: ParticleKind,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Gameplay constants for this session
    pub tuning: Tuning,
    /// Current lifecycle phase
    pub phase: GamePhase,
    /// Obstacles passed this session
    pub score: u64,
    /// Simulation steps since the session began
    pub time_ticks: u64,
    pub player: Player,
    /// Obstacles in spawn order (last = most recently spawned)
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh state on the start screen with default tuning
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: GamePhase::Start,
            score: 0,
            time_ticks: 0,
            player: Player::centered(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Most recently spawned obstacle
    pub fn newest_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::centered());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_rotation_clamped_to_quarter_turn() {
        let tuning = Tuning::default();
        let mut player = Player::centered();

        player.vel = 100.0;
        player.update_rotation(&tuning);
        assert_eq!(player.rotation, std::f32::consts::FRAC_PI_4);

        player.vel = -100.0;
        player.update_rotation(&tuning);
        assert_eq!(player.rotation, -std::f32::consts::FRAC_PI_4);

        player.vel = 2.0;
        player.update_rotation(&tuning);
        assert!((player.rotation - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new();
        state.events.push(GameEvent::Jumped);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(state.events.is_empty());
    }
}
