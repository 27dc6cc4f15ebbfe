//! Shape generation for 2D primitives
//!
//! Every helper appends triangles to an existing vertex list so a whole
//! frame is built into one buffer.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;
use crate::{Rect, lerp_color, rgba};

/// Axis-aligned quad
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    quad(out, x, y, w, h, [color; 4]);
}

/// Quad with per-corner colors (top-left, top-right, bottom-right, bottom-left)
pub fn quad(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, colors: [[f32; 4]; 4]) {
    let [tl, tr, br, bl] = colors;
    out.push(Vertex::new(x, y, tl));
    out.push(Vertex::new(x + w, y, tr));
    out.push(Vertex::new(x + w, y + h, br));

    out.push(Vertex::new(x, y, tl));
    out.push(Vertex::new(x + w, y + h, br));
    out.push(Vertex::new(x, y + h, bl));
}

/// Vertical gradient through `(offset, color)` stops (offsets ascending in 0..=1)
pub fn gradient_rect(out: &mut Vec<Vertex>, area: Rect, stops: &[(f32, u32)], alpha: f32) {
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t1 <= t0 {
            continue;
        }
        let y0 = area.y + area.h * t0;
        let y1 = area.y + area.h * t1;
        let top = rgba(c0, alpha);
        let bottom = rgba(c1, alpha);
        quad(out, area.x, y0, area.w, y1 - y0, [top, top, bottom, bottom]);
    }
}

/// Color of a gradient at offset `t`
pub fn gradient_at(stops: &[(f32, u32)], t: f32) -> u32 {
    let Some(&(first_t, first)) = stops.first() else {
        return 0;
    };
    if t <= first_t {
        return first;
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 && t1 > t0 {
            return lerp_color(c0, c1, (t - t0) / (t1 - t0));
        }
    }
    stops.last().map_or(first, |&(_, c)| c)
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    ellipse(out, center, radius, radius, color, segments);
}

/// Filled ellipse
pub fn ellipse(
    out: &mut Vec<Vertex>,
    center: Vec2,
    rx: f32,
    ry: f32,
    color: [f32; 4],
    segments: u32,
) {
    fan(out, center, Vec2::new(rx, ry), 0.0, 2.0 * PI, color, segments);
}

/// Upper half of an ellipse whose flat side sits on `base`
pub fn dome(out: &mut Vec<Vertex>, base: Vec2, rx: f32, ry: f32, color: [f32; 4], segments: u32) {
    fan(out, base, Vec2::new(rx, ry), PI, 2.0 * PI, color, segments);
}

/// Triangle fan over the angle range `start..end` (radians, y down)
fn fan(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radii: Vec2,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(1);
    let step = (end - start) / segments as f32;

    for i in 0..segments {
        let theta1 = start + i as f32 * step;
        let theta2 = theta1 + step;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }
}

/// Ring (hollow ellipse) blending from `inner_color` to `outer_color`
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner: Vec2,
    outer: Vec2,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();

        let inner1 = center + Vec2::new(inner.x * c1, inner.y * s1);
        let inner2 = center + Vec2::new(inner.x * c2, inner.y * s2);
        let outer1 = center + Vec2::new(outer.x * c1, outer.y * s1);
        let outer2 = center + Vec2::new(outer.x * c2, outer.y * s2);

        out.push(Vertex::new(inner1.x, inner1.y, inner_color));
        out.push(Vertex::new(outer1.x, outer1.y, outer_color));
        out.push(Vertex::new(outer2.x, outer2.y, outer_color));

        out.push(Vertex::new(inner1.x, inner1.y, inner_color));
        out.push(Vertex::new(outer2.x, outer2.y, outer_color));
        out.push(Vertex::new(inner2.x, inner2.y, inner_color));
    }
}

pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Thick line segment
pub fn line(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let (a1, a2, b1, b2) = (a + perp, a - perp, b + perp, b - perp);
    triangle(out, a1, a2, b1, color);
    triangle(out, b1, a2, b2, color);
}

/// Rectangle with rounded corners (no overlapping triangles, so alpha stays even)
pub fn rounded_rect(out: &mut Vec<Vertex>, area: Rect, radius: f32, color: [f32; 4]) {
    let r = radius.min(area.w / 2.0).min(area.h / 2.0).max(0.0);
    let Rect { x, y, w, h } = area;
    rect(out, x + r, y, w - 2.0 * r, h, color);
    rect(out, x, y + r, r, h - 2.0 * r, color);
    rect(out, x + w - r, y + r, r, h - 2.0 * r, color);
    if r > 0.0 {
        let rr = Vec2::splat(r);
        let corners = [
            (Vec2::new(x + r, y + r), PI),
            (Vec2::new(x + w - r, y + r), 1.5 * PI),
            (Vec2::new(x + w - r, y + h - r), 0.0),
            (Vec2::new(x + r, y + h - r), FRAC_PI_2),
        ];
        for (c, start) in corners {
            fan(out, c, rr, start, start + FRAC_PI_2, color, 4);
        }
    }
}

/// Rectangular border drawn inside `area`
pub fn outline(out: &mut Vec<Vertex>, area: Rect, thickness: f32, color: [f32; 4]) {
    let t = thickness.min(area.w / 2.0).min(area.h / 2.0);
    let Rect { x, y, w, h } = area;
    rect(out, x, y, w, t, color);
    rect(out, x, y + h - t, w, t, color);
    rect(out, x, y + t, t, h - 2.0 * t, color);
    rect(out, x + w - t, y + t, t, h - 2.0 * t, color);
}

/// 7x6 pixel heart, one bit per cell (bit 6 is the leftmost column)
const HEART_ROWS: [u8; 6] = [
    0b0110110, 0b1111111, 0b1111111, 0b0111110, 0b0011100, 0b0001000,
];

/// Pixel-art heart with its top-left at (x, y); `s` is the cell size
pub fn pixel_heart(out: &mut Vec<Vertex>, x: f32, y: f32, s: f32, color: [f32; 4]) {
    for (row, bits) in HEART_ROWS.iter().enumerate() {
        // Merge horizontal runs into single quads
        let mut col = 0;
        while col < 7 {
            if bits & (1 << (6 - col)) == 0 {
                col += 1;
                continue;
            }
            let start = col;
            while col < 7 && bits & (1 << (6 - col)) != 0 {
                col += 1;
            }
            rect(
                out,
                x + start as f32 * s,
                y + row as f32 * s,
                (col - start) as f32 * s,
                s,
                color,
            );
        }
    }
}

/// Local coordinate frame for pixel-art sprites
///
/// Sprites are authored on a small integer grid; `px` places one cell
/// relative to `origin`, scaled and optionally mirrored around `width`.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub origin: Vec2,
    pub scale: f32,
    /// Mirror horizontally
    pub flip: bool,
    /// Authoring width used as the mirror axis
    pub width: f32,
}

impl Sprite {
    pub fn new(origin: Vec2, scale: f32) -> Self {
        Self {
            origin,
            scale,
            flip: false,
            width: 16.0,
        }
    }

    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Fill one authored rectangle with an opaque 0xRRGGBB color
    pub fn px(&self, out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, hex: u32) {
        self.px_rgba(out, x, y, w, h, rgba(hex, 1.0));
    }

    /// Fill one authored rectangle with an explicit RGBA color
    pub fn px_rgba(&self, out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let lx = if self.flip { self.width - x - w } else { x };
        rect(
            out,
            self.origin.x + lx * self.scale,
            self.origin.y + y * self.scale,
            w * self.scale,
            h * self.scale,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_emit_whole_triangles() {
        let mut out = Vec::new();
        rect(&mut out, 0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        circle(&mut out, Vec2::ZERO, 4.0, [1.0; 4], 10);
        dome(&mut out, Vec2::ZERO, 4.0, 2.0, [1.0; 4], 7);
        rounded_rect(&mut out, Rect::new(0.0, 0.0, 40.0, 20.0), 4.0, [1.0; 4]);
        outline(&mut out, Rect::new(0.0, 0.0, 40.0, 20.0), 2.0, [1.0; 4]);
        pixel_heart(&mut out, 0.0, 0.0, 1.0, [1.0; 4]);
        assert_eq!(out.len() % 3, 0);
    }

    #[test]
    fn test_pixel_heart_has_27_cells() {
        let cells: u32 = HEART_ROWS.iter().map(|r| r.count_ones()).sum();
        assert_eq!(cells, 27);

        let mut out = Vec::new();
        pixel_heart(&mut out, 10.0, 20.0, 2.0, [1.0; 4]);
        let area: f32 = out
            .chunks(6)
            .map(|q| {
                let w = q[1].position[0] - q[0].position[0];
                let h = q[2].position[1] - q[1].position[1];
                w * h
            })
            .sum();
        assert_eq!(area, 27.0 * 4.0);
    }

    #[test]
    fn test_gradient_lookup() {
        let stops = [(0.0, 0x000000), (0.5, 0x0000ff), (1.0, 0xffffff)];
        assert_eq!(gradient_at(&stops, -1.0), 0x000000);
        assert_eq!(gradient_at(&stops, 0.5), 0x0000ff);
        assert_eq!(gradient_at(&stops, 2.0), 0xffffff);

        let mut out = Vec::new();
        gradient_rect(&mut out, Rect::new(0.0, 0.0, 10.0, 100.0), &stops, 1.0);
        assert_eq!(out.len(), 12);
        assert_eq!(out[2].position, [10.0, 50.0]);
    }

    #[test]
    fn test_sprite_flip_mirrors_cells() {
        let mut out = Vec::new();
        let sprite = Sprite::new(Vec2::new(100.0, 0.0), 2.0).flipped(true);
        sprite.px(&mut out, 0.0, 0.0, 3.0, 1.0, 0xffffff);
        // Authored x 0..3 mirrors to 13..16, scaled by 2
        assert_eq!(out[0].position, [126.0, 0.0]);
        assert_eq!(out[1].position, [132.0, 0.0]);
    }
}
