//! Scene composition
//!
//! Turns a read-only view of the session into one back-to-front triangle
//! list: sky, grid, obstacles, particles, player, ground.

use glam::{Affine2, Vec2};

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Obstacle, Particle, ParticleKind, Player};
use crate::tuning::Tuning;

const CAP_HEIGHT: f32 = 10.0;
const CAP_OVERHANG: f32 = 2.0;
const STRIPE_OFFSET: f32 = 10.0;
const STRIPE_WIDTH: f32 = 5.0;
const PARTICLE_RADIUS: f32 = 4.0;
const GRID_LINE_WIDTH: f32 = 1.0;

/// Body height relative to the player size
const BODY_ASPECT: f32 = 0.7;
const BODY_RADIUS: f32 = 4.0;
const PAGES_INSET: f32 = 4.0;
const PAGES_RADIUS: f32 = 2.0;
const EYE_CENTER: Vec2 = Vec2::new(6.0, -2.0);
const EYE_RADIUS: f32 = 2.0;
const GLASSES_RADIUS: f32 = 4.0;
const GLASSES_STROKE: f32 = 1.5;

/// Build the full frame for `state`
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::with_capacity(1024);

    vertices.extend(sky());
    if settings.quality.grid_enabled() {
        vertices.extend(grid());
    }
    for obstacle in &state.obstacles {
        vertices.extend(obstacle_vertices(obstacle, &state.tuning));
    }
    vertices.extend(particle_vertices(
        &state.particles,
        settings.max_particles(),
        segments,
    ));
    vertices.extend(player_vertices(&state.player, &state.tuning, segments));
    vertices.extend(ground());

    vertices
}

fn sky() -> Vec<Vertex> {
    shapes::vertical_gradient_rect(
        Vec2::ZERO,
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    )
}

/// Faint graph-paper lines every [`GRID_SPACING`] units
fn grid() -> Vec<Vertex> {
    let half = GRID_LINE_WIDTH * 0.5;
    let mut vertices = Vec::new();

    let mut x = 0.0;
    while x < FIELD_WIDTH {
        vertices.extend(shapes::rect(
            Vec2::new(x - half, 0.0),
            Vec2::new(GRID_LINE_WIDTH, FIELD_HEIGHT),
            colors::GRID,
        ));
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < FIELD_HEIGHT {
        vertices.extend(shapes::rect(
            Vec2::new(0.0, y - half),
            Vec2::new(FIELD_WIDTH, GRID_LINE_WIDTH),
            colors::GRID,
        ));
        y += GRID_SPACING;
    }
    vertices
}

fn obstacle_vertices(obstacle: &Obstacle, tuning: &Tuning) -> Vec<Vertex> {
    let width = tuning.obstacle_width;
    let gap_bottom = obstacle.gap_bottom(tuning);
    let bottom_height = FIELD_HEIGHT - gap_bottom;
    let stops = [
        (0.0, colors::SENAC_BLUE),
        (0.8, colors::SENAC_BLUE_LIGHT),
        (1.0, colors::SENAC_BLUE),
    ];

    let mut vertices = Vec::with_capacity(48);

    vertices.extend(shapes::horizontal_gradient_rect(
        Vec2::new(obstacle.x, 0.0),
        Vec2::new(width, obstacle.gap_top),
        &stops,
    ));
    vertices.extend(shapes::rect(
        Vec2::new(obstacle.x - CAP_OVERHANG, obstacle.gap_top - CAP_HEIGHT),
        Vec2::new(width + CAP_OVERHANG * 2.0, CAP_HEIGHT),
        colors::SENAC_ORANGE,
    ));

    vertices.extend(shapes::horizontal_gradient_rect(
        Vec2::new(obstacle.x, gap_bottom),
        Vec2::new(width, bottom_height),
        &stops,
    ));
    vertices.extend(shapes::rect(
        Vec2::new(obstacle.x - CAP_OVERHANG, gap_bottom),
        Vec2::new(width + CAP_OVERHANG * 2.0, CAP_HEIGHT),
        colors::SENAC_ORANGE,
    ));

    // Stripes run over the caps
    let stripe_x = obstacle.x + STRIPE_OFFSET;
    vertices.extend(shapes::rect(
        Vec2::new(stripe_x, 0.0),
        Vec2::new(STRIPE_WIDTH, obstacle.gap_top),
        colors::OBSTACLE_STRIPE,
    ));
    vertices.extend(shapes::rect(
        Vec2::new(stripe_x, gap_bottom),
        Vec2::new(STRIPE_WIDTH, bottom_height),
        colors::OBSTACLE_STRIPE,
    ));

    vertices
}

/// Newest `limit` particles, faded by remaining life
fn particle_vertices(particles: &[Particle], limit: usize, segments: u32) -> Vec<Vertex> {
    let skip = particles.len().saturating_sub(limit);
    particles
        .iter()
        .skip(skip)
        .flat_map(|p| {
            let base = match p.kind {
                ParticleKind::Flap => colors::WHITE,
                ParticleKind::Reward => colors::SENAC_ORANGE,
            };
            shapes::circle(
                p.pos,
                PARTICLE_RADIUS,
                colors::faded(base, p.life),
                segments,
            )
        })
        .collect()
}

/// Book-shaped sprite, rotated around its center
fn player_vertices(player: &Player, tuning: &Tuning, segments: u32) -> Vec<Vertex> {
    let w = tuning.player_size;
    let h = tuning.player_size * BODY_ASPECT;
    let corner_segments = (segments / 4).max(2);

    let mut vertices = shapes::rounded_rect(
        Vec2::ZERO,
        Vec2::new(w, h),
        BODY_RADIUS,
        colors::SENAC_BLUE,
        corner_segments,
    );
    vertices.extend(shapes::rounded_rect(
        Vec2::ZERO,
        Vec2::new(w - PAGES_INSET * 2.0, h - PAGES_INSET * 2.0),
        PAGES_RADIUS,
        colors::WHITE,
        corner_segments,
    ));
    vertices.extend(shapes::triangle(
        Vec2::new(w / 2.0 - 4.0, h / 2.0 - 4.0),
        Vec2::new(0.0, h / 2.0 - 4.0),
        Vec2::new(w / 2.0 - 4.0, 0.0),
        colors::SENAC_ORANGE,
    ));
    vertices.extend(shapes::circle(
        EYE_CENTER,
        EYE_RADIUS,
        colors::BLACK,
        segments,
    ));
    vertices.extend(shapes::ring(
        EYE_CENTER,
        GLASSES_RADIUS,
        GLASSES_STROKE,
        colors::SENAC_BLUE,
        segments,
    ));
    // Bridge
    vertices.extend(shapes::line(
        Vec2::new(2.0, -2.0),
        Vec2::new(-4.0, -2.0),
        GLASSES_STROKE,
        colors::SENAC_BLUE,
    ));

    shapes::transform(
        &mut vertices,
        Affine2::from_angle_translation(player.rotation, player.position()),
    );
    vertices
}

fn ground() -> Vec<Vertex> {
    shapes::rect(
        Vec2::new(0.0, FIELD_HEIGHT - GROUND_STRIP_HEIGHT),
        Vec2::new(FIELD_WIDTH, GROUND_STRIP_HEIGHT),
        colors::GROUND,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    fn particle(kind: ParticleKind, life: f32) -> Particle {
        Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life,
            kind,
        }
    }

    #[test]
    fn test_sky_first_ground_last() {
        let state = GameState::new();
        let verts = build_scene(&state, &Settings::default());

        assert_eq!(verts[0].color, colors::SKY_TOP);
        assert!(verts[..6].iter().any(|v| v.color == colors::SKY_BOTTOM));

        let tail = &verts[verts.len() - 6..];
        for v in tail {
            assert_eq!(v.color, colors::GROUND);
            assert!(v.position[1] >= FIELD_HEIGHT - GROUND_STRIP_HEIGHT);
        }
    }

    #[test]
    fn test_grid_follows_quality() {
        let state = GameState::new();
        let low = build_scene(&state, &Settings::from_preset(QualityPreset::Low));
        let medium = build_scene(&state, &Settings::from_preset(QualityPreset::Medium));

        assert!(!low.iter().any(|v| v.color == colors::GRID));
        // 20 vertical + 30 horizontal lines
        let grid_verts = medium.iter().filter(|v| v.color == colors::GRID).count();
        assert_eq!(grid_verts, 50 * 6);
    }

    #[test]
    fn test_obstacle_caps_and_gap() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(200.0, 100.0);
        let verts = obstacle_vertices(&obstacle, &tuning);

        // Top cap hangs above the gap, 2 units wider on each side
        assert!(
            verts
                .iter()
                .any(|v| v.position == [198.0, 90.0] && v.color == colors::SENAC_ORANGE)
        );
        // Nothing opaque inside the gap band below the top cap
        let gap_bottom = obstacle.gap_bottom(&tuning);
        for v in &verts {
            let y = v.position[1];
            assert!(y <= 100.0 || y >= gap_bottom, "vertex inside gap at y = {}", y);
        }
    }

    #[test]
    fn test_particles_faded_by_life() {
        let verts = particle_vertices(&[particle(ParticleKind::Reward, 0.25)], 10, 8);
        assert_eq!(verts.len(), 24);
        for v in &verts {
            assert_eq!(v.color[3], 0.25);
            assert_eq!(v.color[0], colors::SENAC_ORANGE[0]);
        }
    }

    #[test]
    fn test_particle_draw_cap_keeps_newest() {
        let mut particles: Vec<Particle> = (0..5)
            .map(|_| particle(ParticleKind::Flap, 0.5))
            .collect();
        particles.push(particle(ParticleKind::Reward, 1.0));

        let verts = particle_vertices(&particles, 1, 8);
        assert_eq!(verts.len(), 24);
        assert_eq!(verts[0].color, colors::SENAC_ORANGE);

        assert!(particle_vertices(&particles, 0, 8).is_empty());
    }

    #[test]
    fn test_disabling_particles_hides_them() {
        let mut state = GameState::new();
        state.particles.push(particle(ParticleKind::Flap, 1.0));
        let on = build_scene(&state, &Settings::default());
        let off = build_scene(
            &state,
            &Settings {
                particles: false,
                ..Settings::default()
            },
        );
        let segments = Settings::default().quality.circle_segments() as usize;
        assert_eq!(on.len() - off.len(), segments * 3);
    }

    #[test]
    fn test_player_rotates_around_center() {
        let tuning = Tuning::default();
        let mut player = Player::centered();
        let level = player_vertices(&player, &tuning, 16);

        player.rotation = std::f32::consts::FRAC_PI_4;
        let tilted = player_vertices(&player, &tuning, 16);
        assert_eq!(level.len(), tilted.len());

        let center = player.position();
        // Whole sprite stays within half a diagonal of the body
        let reach = Vec2::new(tuning.player_size, tuning.player_size * BODY_ASPECT).length() / 2.0;
        for v in &tilted {
            assert!(Vec2::from(v.position).distance(center) <= reach + 1e-3);
        }
        // Distances to the pivot are preserved
        for (a, b) in level.iter().zip(&tilted) {
            let da = Vec2::from(a.position).distance(center);
            let db = Vec2::from(b.position).distance(center);
            assert!((da - db).abs() < 1e-3);
        }
    }

    #[test]
    fn test_scene_is_pure() {
        let mut state = GameState::new();
        state.obstacles.push(Obstacle::new(300.0, 150.0));
        state.particles.push(particle(ParticleKind::Flap, 0.7));
        let before = state.clone();

        let a = build_scene(&state, &Settings::default());
        let b = build_scene(&state, &Settings::default());
        assert_eq!(a, b);
        assert_eq!(state.particles, before.particles);
        assert_eq!(state.obstacles, before.obstacles);
    }
}
