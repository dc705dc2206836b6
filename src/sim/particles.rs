//! Cosmetic particle bursts

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleKind};
use crate::consts::MAX_PARTICLES;
use crate::tuning::Tuning;

/// Spawn a burst of particles at `origin`, flying in random directions
pub fn emit_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    kind: ParticleKind,
    tuning: &Tuning,
    rng: &mut R,
) {
    for _ in 0..tuning.burst_count {
        if particles.len() >= MAX_PARTICLES {
            // Remove oldest particles to make room
            particles.remove(0);
        }
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * tuning.particle_spread,
            (rng.random::<f32>() - 0.5) * tuning.particle_spread,
        );
        particles.push(Particle {
            pos: origin,
            vel,
            life: 1.0,
            kind,
        });
    }
}

/// Move every particle one step and drop the ones that burned out
pub fn age_particles(particles: &mut Vec<Particle>, decay: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = (particle.life - decay).max(0.0);
    }
    particles.retain(|p| p.life > 0.0);
}
