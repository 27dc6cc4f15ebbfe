//! Background decorations
//!
//! Parallax scenery sampled once per session. None of it affects gameplay.

use glam::Vec2;
use rand::Rng;

use crate::consts::TILE;
use super::level::LEVEL_W;

const BUTTERFLY_COLORS: [u32; 5] = [0xe74c3c, 0xff69b4, 0xf1c40f, 0x9b59b6, 0x3498db];
const MOUNTAIN_COLORS: [u32; 3] = [0x5a7a9a, 0x4a6a8a, 0x6a8aaa];

#[derive(Debug, Clone)]
pub struct Cloud {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    /// Drift speed (pixels/tick)
    pub speed: f32,
    /// Parallax factor (0 = fixed to screen, 1 = moves with world)
    pub depth: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct Mountain {
    pub x: f32,
    pub w: f32,
    pub h: f32,
    pub color: u32,
    pub snow_cap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    Pine,
    Oak,
    Bush,
}

#[derive(Debug, Clone)]
pub struct Tree {
    pub x: f32,
    pub kind: TreeKind,
    pub h: f32,
    /// Darkening amount (0-0.3)
    pub shade: f32,
}

#[derive(Debug, Clone)]
pub struct Butterfly {
    pub pos: Vec2,
    pub color: u32,
    pub phase: f32,
    pub speed: f32,
}

/// All background scenery for one session
#[derive(Debug, Clone, Default)]
pub struct Decorations {
    pub clouds: Vec<Cloud>,
    pub mountains: Vec<Mountain>,
    pub trees: Vec<Tree>,
    pub butterflies: Vec<Butterfly>,
}

impl Decorations {
    /// Sample a fresh set of decorations
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let level_px = LEVEL_W as f32 * TILE;

        let clouds = (0..20)
            .map(|_| Cloud {
                pos: Vec2::new(
                    rng.random::<f32>() * level_px,
                    10.0 + rng.random::<f32>() * 60.0,
                ),
                w: 30.0 + rng.random::<f32>() * 50.0,
                h: 12.0 + rng.random::<f32>() * 10.0,
                speed: 0.1 + rng.random::<f32>() * 0.15,
                depth: 0.1 + rng.random::<f32>() * 0.3,
                opacity: 0.4 + rng.random::<f32>() * 0.4,
            })
            .collect();

        let mountains = (0..12)
            .map(|i| Mountain {
                x: i as f32 * 250.0 + rng.random::<f32>() * 80.0,
                w: 120.0 + rng.random::<f32>() * 100.0,
                h: 50.0 + rng.random::<f32>() * 40.0,
                color: MOUNTAIN_COLORS[i % MOUNTAIN_COLORS.len()],
                snow_cap: rng.random::<f32>() > 0.4,
            })
            .collect();

        let trees = (0..30)
            .map(|i| Tree {
                x: i as f32 * 100.0 + rng.random::<f32>() * 60.0,
                kind: match rng.random_range(0..3) {
                    0 => TreeKind::Pine,
                    1 => TreeKind::Oak,
                    _ => TreeKind::Bush,
                },
                h: 20.0 + rng.random::<f32>() * 25.0,
                shade: rng.random::<f32>() * 0.3,
            })
            .collect();

        let butterflies = (0..8)
            .map(|_| Butterfly {
                pos: Vec2::new(
                    rng.random::<f32>() * level_px,
                    100.0 + rng.random::<f32>() * 100.0,
                ),
                color: BUTTERFLY_COLORS[rng.random_range(0..BUTTERFLY_COLORS.len())],
                phase: rng.random::<f32>() * std::f32::consts::TAU,
                speed: 0.3 + rng.random::<f32>() * 0.5,
            })
            .collect();

        Self {
            clouds,
            mountains,
            trees,
            butterflies,
        }
    }

    /// Flutter butterflies along their looping paths
    pub fn update(&mut self, frame: u64) {
        let t = frame as f32;
        for b in &mut self.butterflies {
            b.pos.x += (t * 0.03 + b.phase).sin() * b.speed;
            b.pos.y += (t * 0.02 + b.phase).cos() * 0.3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generate_counts_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let d = Decorations::generate(&mut rng);
        assert_eq!(d.clouds.len(), 20);
        assert_eq!(d.mountains.len(), 12);
        assert_eq!(d.trees.len(), 30);
        assert_eq!(d.butterflies.len(), 8);
        for c in &d.clouds {
            assert!((10.0..70.0).contains(&c.pos.y));
            assert!((0.1..0.4).contains(&c.depth));
        }
        for t in &d.trees {
            assert!((20.0..45.0).contains(&t.h));
        }
    }

    #[test]
    fn test_butterflies_move() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut d = Decorations::generate(&mut rng);
        let before: Vec<Vec2> = d.butterflies.iter().map(|b| b.pos).collect();
        d.update(10);
        let moved = d
            .butterflies
            .iter()
            .zip(&before)
            .any(|(b, p)| (b.pos - *p).length() > 0.0);
        assert!(moved);
    }
}
