//! World camera and visible-area bookkeeping

use glam::Vec2;

use crate::consts::{GAME_H, GAME_W};

/// Part of the logical 480x270 canvas actually visible on screen.
///
/// Landscape shows all of it; portrait zoom crops the sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for VisibleArea {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: GAME_W,
            top: 0.0,
            bottom: GAME_H,
        }
    }
}

impl VisibleArea {
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width() / 2.0
    }
}

/// Camera offset in world pixels (top-left of the view)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Center on `target`, clamped so the view never leaves the map
    pub fn follow(&mut self, target: Vec2, map_w: f32, map_h: f32) {
        let x = target.x - GAME_W / 2.0;
        let y = target.y - GAME_H / 2.0;
        self.pos.x = x.clamp(0.0, (map_w - GAME_W).max(0.0));
        self.pos.y = y.clamp(0.0, (map_h - GAME_H).max(0.0));
    }

    /// World to logical-screen coordinates
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_in_open_space() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(1000.0, 200.0), 2880.0, 272.0);
        assert_eq!(cam.pos.x, 1000.0 - GAME_W / 2.0);
        assert_eq!(cam.pos.y, 2.0);
    }

    #[test]
    fn test_follow_clamps_to_map_edges() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(10.0, 0.0), 2880.0, 272.0);
        assert_eq!(cam.pos, Vec2::ZERO);
        cam.follow(Vec2::new(2875.0, 500.0), 2880.0, 272.0);
        assert_eq!(cam.pos, Vec2::new(2880.0 - GAME_W, 272.0 - GAME_H));
    }

    #[test]
    fn test_small_map_pins_to_origin() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(100.0, 100.0), 100.0, 100.0);
        assert_eq!(cam.pos, Vec2::ZERO);
    }

    #[test]
    fn test_visible_area_defaults_to_full_canvas() {
        let v = VisibleArea::default();
        assert_eq!(v.width(), GAME_W);
        assert_eq!(v.center_x(), GAME_W / 2.0);
    }
}
