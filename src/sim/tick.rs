//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, plus the two
//! discrete player actions (jump, restart).

use glam::Vec2;
use rand::Rng;

use super::collision::{Hitbox, hits_obstacle, out_of_bounds};
use super::obstacle::random_gap_top;
use super::particles::{age_particles, emit_burst};
use super::state::{CrashCause, GameEvent, GamePhase, GameState, Obstacle, ParticleKind, Player};
use crate::consts::*;

/// Per-step input from the host
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock time (ms), drives the start screen idle animation only
    pub time_ms: f64,
}

/// Advance the game state by one fixed timestep
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Start => {
            let tuning = &state.tuning;
            let phase = input.time_ms / tuning.idle_period_ms as f64;
            state.player.y = FIELD_HEIGHT / 2.0 + phase.sin() as f32 * tuning.idle_amplitude;
        }
        GamePhase::Playing => step_playing(state, rng),
        GamePhase::GameOver => {}
    }

    // Particles keep fading in every phase
    age_particles(&mut state.particles, state.tuning.particle_decay);
}

fn step_playing<R: Rng>(state: &mut GameState, rng: &mut R) {
    let tuning = &state.tuning;

    state.player.integrate(tuning.gravity);
    state.player.update_rotation(tuning);

    // Spawn at the right edge once the newest obstacle has cleared the spacing
    let spawn_due = state
        .newest_obstacle()
        .is_none_or(|newest| FIELD_WIDTH - newest.x >= tuning.obstacle_spacing);
    if spawn_due {
        let gap_top = random_gap_top(rng, tuning);
        state.obstacles.push(Obstacle::new(FIELD_WIDTH, gap_top));
    }

    for obstacle in &mut state.obstacles {
        obstacle.x -= tuning.scroll_speed;
    }
    state.obstacles.retain(|o| !o.is_offscreen(tuning));

    let hitbox = Hitbox::for_player(&state.player, tuning);
    let mut crash = state
        .obstacles
        .iter()
        .any(|o| hits_obstacle(&hitbox, o, tuning))
        .then_some(CrashCause::Obstacle);

    if crash.is_none() {
        for obstacle in &mut state.obstacles {
            if !obstacle.passed && obstacle.right_edge(tuning) < PLAYER_X {
                obstacle.passed = true;
                state.score += 1;
                state.events.push(GameEvent::Scored { score: state.score });
                emit_burst(
                    &mut state.particles,
                    state.player.position(),
                    ParticleKind::Reward,
                    tuning,
                    rng,
                );
            }
        }
        crash = out_of_bounds(&state.player, tuning);
    }

    if let Some(cause) = crash {
        end_game(state, cause);
    }
}

/// Move to GameOver; only the first crash of a session counts
fn end_game(state: &mut GameState, cause: CrashCause) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.phase = GamePhase::GameOver;
    log::info!("Game over ({:?}) with score {}", cause, state.score);
    state.events.push(GameEvent::Crashed {
        score: state.score,
        cause,
    });
}

/// The single player action: flap, or start a run from the idle screen
pub fn jump<R: Rng>(state: &mut GameState, rng: &mut R) {
    match state.phase {
        GamePhase::Playing => {
            state.player.vel = state.tuning.jump_impulse;
            let origin = Vec2::new(PLAYER_X - 10.0, state.player.y + 10.0);
            emit_burst(
                &mut state.particles,
                origin,
                ParticleKind::Flap,
                &state.tuning,
                rng,
            );
            state.events.push(GameEvent::Jumped);
        }
        GamePhase::Start => {
            reset(state, rng);
            state.phase = GamePhase::Playing;
            state.player.vel = state.tuning.jump_impulse;
            state.events.push(GameEvent::Jumped);
            log::info!("Run started");
        }
        // Restarting is a separate, explicit action
        GamePhase::GameOver => {}
    }
}

/// Leave GameOver for the start screen. Returns false (and does nothing) in any other phase.
pub fn restart<R: Rng>(state: &mut GameState, rng: &mut R) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }
    reset(state, rng);
    state.phase = GamePhase::Start;
    log::info!("Back to start screen");
    true
}

/// Fresh session contents: centred player, one far-off obstacle, no particles, zero score
pub fn reset<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.player = Player::centered();
    let gap_top = random_gap_top(rng, &state.tuning);
    state.obstacles = vec![Obstacle::new(
        FIELD_WIDTH + state.tuning.first_obstacle_offset,
        gap_top,
    )];
    state.particles.clear();
    state.score = 0;
    state.time_ticks = 0;
}
