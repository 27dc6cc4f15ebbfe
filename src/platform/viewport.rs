//! Canvas geometry: logical-to-device mapping and on-screen controls
//!
//! The game is authored at 480x270. Landscape screens letterbox that canvas;
//! portrait screens zoom in past a width fit (cropping the sides), split the
//! spare height into sky above and ground below, and reserve a strip at the
//! bottom for the touch controls.

use glam::Vec2;

use crate::Rect;
use crate::consts::{GAME_H, GAME_W};
use crate::sim::VisibleArea;

/// Extra zoom applied on top of a width fit in portrait
pub const PORTRAIT_ZOOM: f32 = 1.4;
/// Portrait control button edge (CSS pixels)
pub const PORTRAIT_BUTTON: f32 = 70.0;
/// Portrait control padding (CSS pixels)
pub const PORTRAIT_PAD: f32 = 20.0;
/// Landscape control button edge (game pixels)
pub const LANDSCAPE_BUTTON: f32 = 52.0;
/// Landscape control padding (game pixels)
pub const LANDSCAPE_PAD: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Screen metrics for the current window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub dpr: f32,
    /// Backing store size in device pixels
    pub canvas_w: f32,
    pub canvas_h: f32,
    pub orientation: Orientation,
    /// Device pixels per game pixel
    pub scale: f32,
    /// Device-pixel position of game (0, 0)
    pub offset: Vec2,
    /// Height of the portrait control strip (device pixels, 0 in landscape)
    pub controls_h: f32,
    /// Portrait filler above and below the game area (device pixels)
    pub sky_h: f32,
    pub ground_h: f32,
    /// Part of the game canvas that is on screen
    pub visible: VisibleArea,
}

impl Viewport {
    pub fn compute(css_w: f32, css_h: f32, dpr: f32) -> Self {
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        let css_w = css_w.max(1.0);
        let css_h = css_h.max(1.0);
        let canvas_w = css_w * dpr;
        let canvas_h = css_h * dpr;

        if css_h > css_w {
            let controls_h = (PORTRAIT_BUTTON + PORTRAIT_PAD * 2.0) * dpr;
            let available_h = canvas_h - controls_h;
            let scale = canvas_w / GAME_W * PORTRAIT_ZOOM;
            let offset_x = (canvas_w - GAME_W * scale) / 2.0;
            let extra = available_h - GAME_H * scale;
            let sky_h = (extra * 0.35).max(0.0);
            let ground_h = (extra * 0.65).max(0.0);

            let visible_w = canvas_w / scale;
            let left = (GAME_W - visible_w) / 2.0;
            Self {
                dpr,
                canvas_w,
                canvas_h,
                orientation: Orientation::Portrait,
                scale,
                offset: Vec2::new(offset_x, sky_h),
                controls_h,
                sky_h,
                ground_h,
                visible: VisibleArea {
                    left,
                    right: left + visible_w,
                    top: -sky_h / scale,
                    bottom: (available_h - sky_h) / scale,
                },
            }
        } else {
            let scale = (canvas_w / GAME_W).min(canvas_h / GAME_H);
            Self {
                dpr,
                canvas_w,
                canvas_h,
                orientation: Orientation::Landscape,
                scale,
                offset: Vec2::new(
                    (canvas_w - GAME_W * scale) / 2.0,
                    (canvas_h - GAME_H * scale) / 2.0,
                ),
                controls_h: 0.0,
                sky_h: 0.0,
                ground_h: 0.0,
                visible: VisibleArea::default(),
            }
        }
    }

    #[inline]
    pub fn is_portrait(&self) -> bool {
        self.orientation == Orientation::Portrait
    }

    /// CSS-pixel client position to game coordinates
    #[inline]
    pub fn to_game(&self, css: Vec2) -> Vec2 {
        (css * self.dpr - self.offset) / self.scale
    }

    /// CSS-pixel client position to device pixels
    #[inline]
    pub fn to_device(&self, css: Vec2) -> Vec2 {
        css * self.dpr
    }

    /// Game coordinates to device pixels
    #[inline]
    pub fn game_to_device(&self, game: Vec2) -> Vec2 {
        game * self.scale + self.offset
    }

    /// Device pixels to clip space (y up)
    #[inline]
    pub fn device_to_ndc(&self, device: Vec2) -> [f32; 2] {
        [
            device.x / self.canvas_w * 2.0 - 1.0,
            1.0 - device.y / self.canvas_h * 2.0,
        ]
    }
}

/// Coordinate space the control rectangles are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSpace {
    /// Logical game pixels (landscape, drawn over the game)
    Game,
    /// Device pixels (portrait, drawn in the control strip)
    Device,
}

/// Which controls a point is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonHits {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// On-screen control rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchButtons {
    pub left: Rect,
    pub right: Rect,
    pub jump: Rect,
    pub space: ButtonSpace,
}

impl TouchButtons {
    /// Test a CSS-pixel client position against all three buttons
    pub fn hit(&self, viewport: &Viewport, css: Vec2) -> ButtonHits {
        let p = match self.space {
            ButtonSpace::Game => viewport.to_game(css),
            ButtonSpace::Device => viewport.to_device(css),
        };
        ButtonHits {
            left: self.left.contains(p),
            right: self.right.contains(p),
            jump: self.jump.contains(p),
        }
    }
}

/// Control layout for a viewport
pub fn touch_buttons(viewport: &Viewport) -> TouchButtons {
    match viewport.orientation {
        Orientation::Portrait => {
            let b = PORTRAIT_BUTTON * viewport.dpr;
            let p = PORTRAIT_PAD * viewport.dpr;
            let y = viewport.canvas_h - viewport.controls_h + p;
            TouchButtons {
                left: Rect::new(p, y, b, b),
                right: Rect::new(p + b + 12.0 * viewport.dpr, y, b, b),
                jump: Rect::new(viewport.canvas_w - b - p, y, b, b),
                space: ButtonSpace::Device,
            }
        }
        Orientation::Landscape => {
            let b = LANDSCAPE_BUTTON;
            let p = LANDSCAPE_PAD;
            let y = GAME_H - b - p;
            TouchButtons {
                left: Rect::new(p, y, b, b),
                right: Rect::new(p + b + 8.0, y, b, b),
                jump: Rect::new(GAME_W - b - p, y, b, b),
                space: ButtonSpace::Game,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_landscape_exact_fit() {
        let vp = Viewport::compute(960.0, 540.0, 1.0);
        assert_eq!(vp.orientation, Orientation::Landscape);
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.offset, Vec2::ZERO);
        assert_eq!(vp.visible, VisibleArea::default());
        assert_eq!(vp.to_game(Vec2::new(480.0, 270.0)), Vec2::new(240.0, 135.0));
    }

    #[test]
    fn test_landscape_letterbox_centers() {
        let vp = Viewport::compute(1000.0, 540.0, 2.0);
        assert_eq!(vp.scale, 4.0);
        assert_eq!(vp.offset, Vec2::new(40.0, 0.0));
        let g = vp.to_game(Vec2::new(20.0, 0.0));
        assert_eq!(g, Vec2::ZERO);
    }

    #[test]
    fn test_portrait_zoom_and_split() {
        let vp = Viewport::compute(390.0, 844.0, 3.0);
        assert!(vp.is_portrait());
        assert_eq!(vp.controls_h, 330.0);
        assert!(approx(vp.scale, 1170.0 / 480.0 * 1.4));
        // Zoom crops the sides equally
        assert!(vp.offset.x < 0.0);
        assert!(approx(vp.visible.left + vp.visible.right, GAME_W));
        assert!(approx(vp.visible.width(), 1170.0 / vp.scale));
        // 35/65 split of the leftover height
        let extra = 2532.0 - 330.0 - GAME_H * vp.scale;
        assert!(approx(vp.sky_h, extra * 0.35));
        assert!(approx(vp.ground_h, extra * 0.65));
        assert!(vp.visible.top < 0.0);
        assert!(vp.visible.bottom > GAME_H);
    }

    #[test]
    fn test_game_device_round_trip() {
        let vp = Viewport::compute(390.0, 844.0, 3.0);
        let g = Vec2::new(123.0, 45.0);
        let css = vp.game_to_device(g) / vp.dpr;
        let back = vp.to_game(css);
        assert!(approx(back.x, g.x) && approx(back.y, g.y));
    }

    #[test]
    fn test_degenerate_sizes_do_not_divide_by_zero() {
        let vp = Viewport::compute(0.0, 0.0, 0.0);
        assert!(vp.scale.is_finite() && vp.scale > 0.0);
        assert_eq!(vp.dpr, 1.0);
    }

    #[test]
    fn test_landscape_buttons() {
        let vp = Viewport::compute(960.0, 540.0, 1.0);
        let b = touch_buttons(&vp);
        assert_eq!(b.space, ButtonSpace::Game);
        assert_eq!(b.left, Rect::new(12.0, 206.0, 52.0, 52.0));
        assert_eq!(b.right, Rect::new(72.0, 206.0, 52.0, 52.0));
        assert_eq!(b.jump, Rect::new(416.0, 206.0, 52.0, 52.0));
    }

    #[test]
    fn test_portrait_buttons_in_device_pixels() {
        let vp = Viewport::compute(390.0, 844.0, 3.0);
        let b = touch_buttons(&vp);
        assert_eq!(b.space, ButtonSpace::Device);
        assert_eq!(b.left, Rect::new(60.0, 2262.0, 210.0, 210.0));
        assert_eq!(b.right, Rect::new(306.0, 2262.0, 210.0, 210.0));
        assert_eq!(b.jump, Rect::new(900.0, 2262.0, 210.0, 210.0));
    }

    #[test]
    fn test_hit_uses_button_space() {
        let land = Viewport::compute(960.0, 540.0, 1.0);
        let hits = touch_buttons(&land).hit(&land, Vec2::new(2.0 * 440.0, 2.0 * 230.0));
        assert_eq!(hits, ButtonHits { jump: true, ..Default::default() });

        let port = Viewport::compute(390.0, 844.0, 3.0);
        // CSS (40, 780) -> device (120, 2340): inside the left button
        let hits = touch_buttons(&port).hit(&port, Vec2::new(40.0, 780.0));
        assert_eq!(hits, ButtonHits { left: true, ..Default::default() });
        let miss = touch_buttons(&port).hit(&port, Vec2::new(195.0, 100.0));
        assert_eq!(miss, ButtonHits::default());
    }
}
