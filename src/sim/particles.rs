//! Visual-effect particles
//!
//! Particles are plain kinematic records. Spawn volume is bounded by discrete
//! game events, so there is no pooling and no cap.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Downward acceleration applied to every particle (pixels/tick²)
pub const PARTICLE_GRAVITY: f32 = 0.1;

pub const HEART_COLOR: u32 = 0xe74c3c;
pub const DUST_COLOR: u32 = 0xc8b898;
pub const CONFETTI_COLORS: [u32; 8] = [
    0xff6b6b, 0x4ecdc4, 0x45b7d1, 0xf7b731, 0x5f27cd, 0x00d2d3, 0xff9ff3, 0xfeca57,
];

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: f32,
    /// Life the particle was spawned with (for fading)
    pub max_life: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
    /// Drawn as a pixel heart instead of a square
    pub heart: bool,
}

impl Particle {
    /// Opacity: fully opaque until the last 30% of its life
    pub fn alpha(&self) -> f32 {
        (self.life / (self.max_life * 0.3)).clamp(0.0, 1.0)
    }
}

/// Live particle collection
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Advance every particle one tick and drop the expired ones
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Generic colored burst (pickups, rescues, respawns)
    pub fn burst<R: Rng>(&mut self, rng: &mut R, at: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 4.0,
                    -rng.random::<f32>() * 5.0 - 1.0,
                ),
                life: 40.0 + rng.random::<f32>() * 30.0,
                max_life: 70.0,
                color,
                size: 2.0 + rng.random::<f32>() * 3.0,
                heart: false,
            });
        }
    }

    /// Rising red hearts
    pub fn hearts<R: Rng>(&mut self, rng: &mut R, at: Vec2, count: usize) {
        for _ in 0..count {
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 3.0,
                    -rng.random::<f32>() * 3.0 - 1.0,
                ),
                life: 50.0 + rng.random::<f32>() * 40.0,
                max_life: 90.0,
                color: HEART_COLOR,
                size: 4.0,
                heart: true,
            });
        }
    }

    /// Small puff at the player's feet after a landing
    pub fn dust<R: Rng>(&mut self, rng: &mut R, at: Vec2) {
        for _ in 0..4 {
            self.particles.push(Particle {
                pos: Vec2::new(at.x + (rng.random::<f32>() - 0.5) * 8.0, at.y),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 2.0,
                    -rng.random::<f32>() * 1.5,
                ),
                life: 15.0 + rng.random::<f32>() * 10.0,
                max_life: 25.0,
                color: DUST_COLOR,
                size: 1.0 + rng.random::<f32>() * 2.0,
                heart: false,
            });
        }
    }

    /// Radial confetti for a newly reached checkpoint
    pub fn confetti<R: Rng>(&mut self, rng: &mut R, at: Vec2) {
        for _ in 0..25 {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 2.0 + rng.random::<f32>() * 4.0;
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                life: 40.0 + rng.random::<f32>() * 30.0,
                max_life: 70.0,
                color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
                size: 2.0 + rng.random::<f32>() * 2.0,
                heart: false,
            });
        }
    }
}
