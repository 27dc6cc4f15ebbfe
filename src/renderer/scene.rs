//! Scene building: game state -> colored triangles
//!
//! Pure and GPU-free. A `Frame` carries two triangle lists: `world` in
//! logical game coordinates (scaled and letterboxed by the pipeline) and
//! `screen` in device pixels for overlays that ignore the game transform,
//! such as the portrait control strip. Text is not drawn here; the browser
//! driver shows it through DOM overlays.

use glam::Vec2;
use std::f32::consts::TAU;

use super::shapes::{
    circle, dome, ellipse, gradient_at, gradient_rect, line, outline, pixel_heart, rect, ring,
    rounded_rect, triangle,
};
use super::sprites;
use super::tiles::{self, TileContext, TileRegistry};
use super::vertex::{Vertex, colors};
use crate::consts::{GAME_H, GAME_W, ROOM_FLOOR_Y, TILE};
use crate::platform::{ButtonHits, TouchButtons, Viewport, touch_buttons};
use crate::sim::decor::TreeKind;
use crate::sim::{Facing, Game, GameMode, Particle, VisibleArea, proposal_buttons};
use crate::{ANIMALS, Rect, Settings, lerp_color, rgba};

/// Touch-control presentation for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    /// Controls are drawn at all (settings resolved against the device)
    pub visible: bool,
    /// Buttons currently held, drawn highlighted
    pub pressed: ButtonHits,
}

/// One frame's worth of geometry
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Color behind everything (letterbox and portrait filler)
    pub clear: [f32; 4],
    /// Triangles in logical game coordinates
    pub world: Vec<Vertex>,
    /// Triangles in device pixels, drawn on top
    pub screen: Vec<Vertex>,
}

impl Frame {
    pub fn vertex_count(&self) -> usize {
        self.world.len() + self.screen.len()
    }
}

/// Scene builder holding the tile painters
#[derive(Clone, Default)]
pub struct Scene {
    tiles: TileRegistry,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiles(tiles: TileRegistry) -> Self {
        Self { tiles }
    }

    pub fn build(
        &self,
        game: &Game,
        settings: &Settings,
        viewport: &Viewport,
        controls: &Controls,
    ) -> Frame {
        let mut frame = Frame {
            clear: clear_color(&game.mode, viewport),
            world: Vec::with_capacity(8192),
            screen: Vec::new(),
        };
        let out = &mut frame.world;

        match game.mode {
            GameMode::Title { .. } => title(out, game),
            GameMode::Playing => self.playing(out, game, settings, viewport, controls),
            GameMode::Room { .. } => room(out, game, settings),
            GameMode::Proposal => proposal(out, game, settings),
            GameMode::Win { .. } => win(out, game, settings),
        }

        if viewport.is_portrait() {
            portrait_controls(&mut frame.screen, viewport, controls);
        }
        frame
    }

    fn playing(
        &self,
        out: &mut Vec<Vertex>,
        game: &Game,
        settings: &Settings,
        viewport: &Viewport,
        controls: &Controls,
    ) {
        let session = &game.session;
        let vis = &game.visible;
        let camera = &session.camera;
        let cam = camera.pos;
        let t = game.frame as f32;

        day_sky(out, vis, cam.x, t);
        backdrop(out, game, cam.x);

        // Tiles in view (portrait can see past the map edges)
        let map = &session.map;
        let first_x = (((cam.x + vis.left) / TILE).floor() as i32 - 1).max(0);
        let last_x = (((cam.x + vis.right) / TILE).ceil() as i32 + 1).min(map.width() as i32);
        let first_y = (((cam.y + vis.top) / TILE).floor() as i32 - 1).max(0);
        let last_y = (((cam.y + vis.bottom) / TILE).ceil() as i32 + 1).min(map.height() as i32);
        for ty in first_y..last_y {
            for tx in first_x..last_x {
                let tile = map.get(tx, ty);
                let ctx = TileContext {
                    at: camera.to_screen(Vec2::new(tx as f32 * TILE, ty as f32 * TILE)),
                    tile,
                    tx,
                    ty,
                    map,
                    frame: game.frame,
                    door_open: session.progress.door_open,
                };
                self.tiles.paint(out, &ctx);
            }
        }

        // Continue the dirt below the level when the portrait view reaches it
        let level_bottom = map.pixel_height();
        if viewport.is_portrait() && cam.y + vis.bottom > level_bottom {
            let start_y = (level_bottom / TILE).floor() as i32;
            let end_y = ((cam.y + vis.bottom) / TILE).ceil() as i32;
            for ty in start_y..=end_y {
                for tx in first_x..=last_x {
                    let at = camera.to_screen(Vec2::new(tx as f32 * TILE, ty as f32 * TILE));
                    tiles::underground(out, at);
                }
            }
        }

        for b in &session.decor.butterflies {
            if b.pos.x < cam.x - 10.0 || b.pos.x > cam.x + GAME_W + 10.0 {
                continue;
            }
            let x = b.pos.x - cam.x;
            let y = b.pos.y - cam.y + (t * 0.05 + b.phase).sin() * 10.0;
            let wing = (t * 0.15 + b.phase).sin() * 0.5;
            let c = rgba(b.color, 1.0);
            rect(out, x - 2.0 - wing, y - 1.0, 2.0, 2.0, c);
            rect(out, x - 3.0 - wing, y, 2.0, 1.0, c);
            rect(out, x + 1.0 + wing, y - 1.0, 2.0, 2.0, c);
            rect(out, x + 2.0 + wing, y, 2.0, 1.0, c);
            rect(out, x, y - 1.0, 1.0, 3.0, rgba(0x333333, 1.0));
        }

        for f in &session.progress.followers {
            sprites::animal(out, camera.to_screen(f.pos), f.animal, 1.0, game.frame);
        }

        let player = &session.player;
        sprites::girl(
            out,
            camera.to_screen(Vec2::new(player.pos.x - 2.0, player.pos.y)),
            player.facing,
            player.walk_frame,
            !player.on_ground,
            1.0,
        );

        if settings.particles {
            particles(out, session.particles.iter(), cam, 1.0, Particle::alpha);
        }

        if settings.vignette {
            let center = Vec2::new(GAME_W / 2.0, GAME_H / 2.0);
            ring(
                out,
                center,
                Vec2::splat(GAME_W * 0.35),
                Vec2::splat(GAME_W * 0.75),
                rgba(colors::BLACK, 0.0),
                rgba(colors::BLACK, 0.25),
                48,
            );
        }

        hud(out, game);

        if controls.visible && !viewport.is_portrait() {
            landscape_controls(out, &touch_buttons(viewport), controls.pressed);
        }

        let mc = vis.center_x();
        if let Some(msg) = &session.progress.rescue_message {
            let alpha = (msg.ticks as f32 / 30.0).min(1.0);
            rounded_rect(
                out,
                Rect::new(mc - 85.0, 46.0, 170.0, 24.0),
                6.0,
                rgba(colors::BLACK, 0.6 * alpha),
            );
        }
        let wrong = session.progress.wrong_key_ticks;
        if wrong > 0 {
            let alpha = (wrong as f32 / 20.0).min(1.0);
            rounded_rect(
                out,
                Rect::new(mc - 55.0, 70.0, 110.0, 20.0),
                4.0,
                rgba(colors::BLACK, 0.5 * alpha),
            );
        }
    }
}

fn clear_color(mode: &GameMode, viewport: &Viewport) -> [f32; 4] {
    if !viewport.is_portrait() {
        return rgba(colors::BLACK, 1.0);
    }
    let hex = match mode {
        GameMode::Playing => colors::PORTRAIT_PLAYING,
        GameMode::Title { .. } | GameMode::Room { .. } | GameMode::Proposal => {
            colors::PORTRAIT_NIGHT
        }
        GameMode::Win { .. } => colors::PORTRAIT_WIN,
    };
    rgba(hex, 1.0)
}

/// Full-height backdrop covering the visible area (with a little bleed)
fn backdrop_rect(vis: &VisibleArea) -> Rect {
    Rect::new(vis.left - 10.0, vis.top, vis.width() + 20.0, vis.height())
}

/// Star `i` of the shared twinkling pattern
fn star(i: usize, x_span: usize, y_span: usize) -> Vec2 {
    Vec2::new(((i * 97 + 13) % x_span) as f32, ((i * 53 + 7) % y_span) as f32)
}

fn particles<'a>(
    out: &mut Vec<Vertex>,
    list: impl Iterator<Item = &'a Particle>,
    offset: Vec2,
    heart_scale: f32,
    fade: fn(&Particle) -> f32,
) {
    for p in list {
        let at = p.pos - offset;
        let color = rgba(p.color, fade(p));
        if p.heart {
            pixel_heart(out, at.x, at.y, heart_scale, color);
        } else {
            rect(out, at.x.floor(), at.y.floor(), p.size, p.size, color);
        }
    }
}

fn linear_fade(p: &Particle) -> f32 {
    if p.max_life > 0.0 {
        (p.life / p.max_life).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn title(out: &mut Vec<Vertex>, game: &Game) {
    let t = game.frame as f32;
    gradient_rect(out, backdrop_rect(&game.visible), &colors::NIGHT_SKY, 1.0);

    for i in 0..80 {
        let s = star(i, GAME_W as usize, (GAME_H - 60.0) as usize);
        let b = ((t * 0.05 + i as f32).sin() + 1.0) * 0.5;
        let size = if i % 3 == 0 { 2.0 } else { 1.0 };
        rect(out, s.x, s.y, size, size, rgba(colors::WHITE, 0.2 + b * 0.8));
        if i % 5 == 0 && b > 0.7 {
            let c = rgba(colors::WHITE, b * 0.4);
            rect(out, s.x - 1.0, s.y, 3.0, 1.0, c);
            rect(out, s.x, s.y - 1.0, 1.0, 3.0, c);
        }
    }

    // Shooting star for the first second of every five
    let cycle = game.frame % 300;
    if cycle < 60 {
        let x = (game.frame * 2 % (GAME_W as u64 + 100)) as f32 - 50.0;
        let y = 30.0 + (t * 0.01).sin() * 20.0;
        let c = rgba(colors::WHITE, 1.0 - cycle as f32 / 60.0);
        rect(out, x, y, 3.0, 1.0, c);
        rect(out, x - 5.0, y + 1.0, 3.0, 1.0, c);
        rect(out, x - 10.0, y + 2.0, 2.0, 1.0, c);
    }

    let moon = Vec2::new(GAME_W - 80.0, 40.0);
    ring(
        out,
        moon,
        Vec2::splat(8.0),
        Vec2::splat(50.0),
        rgba(0xffffc8, 0.15),
        rgba(0xffffc8, 0.0),
        32,
    );
    circle(out, moon, 12.0, rgba(colors::MOON, 1.0), 24);
    circle(out, moon + Vec2::new(-3.0, -2.0), 3.0, rgba(0xe8e0c0, 1.0), 10);
    circle(out, moon + Vec2::new(4.0, 3.0), 2.0, rgba(0xe8e0c0, 1.0), 8);

    let bob = (t * 0.04).sin() * 3.0;
    let mid = GAME_W / 2.0;
    pixel_heart(out, mid - 115.0, 72.0 + bob, 3.0, rgba(colors::HEART_RED, 1.0));
    pixel_heart(out, mid + 95.0, 72.0 - bob, 3.0, rgba(colors::HEART_RED, 1.0));
    pixel_heart(out, mid - 95.0, 100.0 - bob, 2.0, rgba(colors::HOT_PINK, 1.0));
    pixel_heart(out, mid + 80.0, 100.0 + bob, 2.0, rgba(colors::HOT_PINK, 1.0));

    let ground = GAME_H - 40.0;
    rect(out, 0.0, ground, GAME_W, 40.0, rgba(colors::TITLE_GROUND, 1.0));
    rect(out, 0.0, ground - 2.0, GAME_W, 4.0, rgba(colors::TITLE_GRASS, 1.0));
    let blade = rgba(0x4a8a4a, 1.0);
    for x in (0..GAME_W as u32).step_by(8) {
        let lean = (x % 3) as f32;
        let x = x as f32;
        rect(out, x + 2.0, ground - 4.0 - lean, 1.0, 3.0 + lean, blade);
        rect(out, x + 5.0, ground - 3.0, 1.0, 2.0, blade);
    }

    sprites::girl(
        out,
        Vec2::new(mid - 45.0, GAME_H - 100.0),
        Facing::Right,
        ((game.frame / 12) % 4) as u8,
        false,
        1.5,
    );
    for (i, dx) in [-5.0, 18.0, 40.0].into_iter().enumerate() {
        sprites::animal(out, Vec2::new(mid + dx, GAME_H - 90.0), i, 1.3, game.frame);
    }

    for x in (20..(GAME_W as u32 - 20)).step_by(30) {
        let petal = if x % 60 == 0 {
            colors::HEART_RED
        } else {
            colors::HOT_PINK
        };
        let x = x as f32;
        rect(out, x, ground - 6.0, 3.0, 3.0, rgba(petal, 1.0));
        rect(out, x + 1.0, ground - 5.0, 1.0, 1.0, rgba(0xffff99, 1.0));
        rect(out, x + 1.0, ground - 3.0, 1.0, 3.0, rgba(0x33aa66, 1.0));
    }
}

fn day_sky(out: &mut Vec<Vertex>, vis: &VisibleArea, cam_x: f32, t: f32) {
    // Top band drifts with distance travelled
    let tod = 0.5 + (cam_x * 0.0005).sin() * 0.15;
    let mut stops = vec![
        (0.0, lerp_color(0xff5070, 0xff6b8a, tod)),
        (0.15, lerp_color(0xff6b8a, 0xff8fa3, tod)),
    ];
    stops.extend_from_slice(&colors::DAY_SKY_LOW);

    // The gradient spans the visible top down to the canvas bottom
    let bleed = backdrop_rect(vis);
    let sky = Rect::new(bleed.x, vis.top, bleed.w, GAME_H - vis.top);
    gradient_rect(out, sky, &stops, 1.0);
    if vis.bottom > GAME_H {
        let tail = gradient_at(&stops, 1.0);
        rect(out, bleed.x, GAME_H, bleed.w, vis.bottom - GAME_H, rgba(tail, 1.0));
    }

    let sun = Vec2::new(GAME_W - 60.0, 35.0);
    ring(
        out,
        sun,
        Vec2::splat(6.0),
        Vec2::splat(28.0),
        rgba(0xfff096, 0.4),
        rgba(0xffdc64, 0.1),
        24,
    );
    ring(
        out,
        sun,
        Vec2::splat(28.0),
        Vec2::splat(50.0),
        rgba(0xffdc64, 0.1),
        rgba(0xffc832, 0.0),
        24,
    );
    circle(out, sun, 10.0, rgba(colors::SUN, 1.0), 20);
    let ray = rgba(0xfff096, 0.15);
    for i in 0..8 {
        let angle = i as f32 / 8.0 * TAU + t * 0.005;
        let dir = Vec2::from_angle(angle);
        line(out, sun + dir * 12.0, sun + dir * 22.0, 1.0, ray);
    }
}

/// Parallax layers between the sky and the tiles
fn backdrop(out: &mut Vec<Vertex>, game: &Game, cam_x: f32) {
    let decor = &game.session.decor;
    let t = game.frame as f32;

    for c in &decor.clouds {
        let scroll = cam_x * c.depth + t * c.speed;
        let span = GAME_W + c.w * 2.0;
        let x = (c.pos.x - scroll + GAME_W + c.w).rem_euclid(span) - c.w;
        let col = rgba(colors::WHITE, c.opacity);
        let y = c.pos.y;
        ellipse(out, Vec2::new(x + c.w * 0.3, y + c.h * 0.5), c.w * 0.25, c.h * 0.45, col, 14);
        ellipse(out, Vec2::new(x + c.w * 0.55, y + c.h * 0.35), c.w * 0.3, c.h * 0.55, col, 14);
        ellipse(out, Vec2::new(x + c.w * 0.75, y + c.h * 0.5), c.w * 0.22, c.h * 0.4, col, 14);
    }

    let base = GAME_H - 15.0;
    let scroll = cam_x * 0.08;
    for m in &decor.mountains {
        let x = m.x - scroll;
        if x + m.w < -50.0 || x > GAME_W + 50.0 {
            continue;
        }
        let peak = Vec2::new(x + m.w * 0.5, base - m.h);
        triangle(out, Vec2::new(x, base), peak, Vec2::new(x + m.w, base), rgba(m.color, 1.0));
        if m.snow_cap {
            let cap = base - m.h * 0.65;
            triangle(
                out,
                Vec2::new(x + m.w * 0.4, cap),
                peak,
                Vec2::new(x + m.w * 0.6, cap),
                rgba(colors::WHITE, 0.6),
            );
        }
        triangle(
            out,
            peak,
            Vec2::new(x + m.w, base),
            Vec2::new(x + m.w * 0.5, base),
            rgba(colors::BLACK, 0.08),
        );
    }

    let ground = GAME_H - 18.0;
    let scroll = cam_x * 0.15;
    for tree in &decor.trees {
        let x = tree.x - scroll;
        if !(-30.0..=GAME_W + 30.0).contains(&x) {
            continue;
        }
        let h = tree.h;
        let fade = |a: f32| (a - tree.shade).max(0.0);
        match tree.kind {
            TreeKind::Pine => {
                let c = rgba(0x285028, fade(0.7));
                rect(out, x + 3.0, ground - h * 0.3, 3.0, h * 0.3, c);
                for layer in 0..3 {
                    let top = ground - h + layer as f32 * h * 0.25;
                    let half = (6.0 + layer as f32 * 4.0) / 2.0;
                    triangle(
                        out,
                        Vec2::new(x + 4.5 - half, top + h * 0.25),
                        Vec2::new(x + 4.5, top),
                        Vec2::new(x + 4.5 + half, top + h * 0.25),
                        c,
                    );
                }
            }
            TreeKind::Oak => {
                rect(out, x + 4.0, ground - h * 0.4, 4.0, h * 0.4, rgba(0x3c321e, fade(0.6)));
                circle(out, Vec2::new(x + 6.0, ground - h * 0.55), h * 0.35, rgba(0x326432, fade(0.7)), 16);
                circle(out, Vec2::new(x + 4.0, ground - h * 0.6), h * 0.2, rgba(0x508c3c, fade(0.3)), 12);
            }
            TreeKind::Bush => {
                ellipse(out, Vec2::new(x + 5.0, ground - 4.0), 8.0, 6.0, rgba(0x326e32, fade(0.6)), 12);
                ellipse(out, Vec2::new(x + 3.0, ground - 5.0), 5.0, 4.0, rgba(0x46823c, fade(0.3)), 10);
            }
        }
    }

    // Hill rows: (count, spacing, width, base height, height step, scroll, baseline, color)
    let rows = [
        (10, 100.0, 120.0, 30.0, 12.0, 0.12, GAME_H - 12.0, rgba(0x64a064, 0.5)),
        (8, 130.0, 150.0, 35.0, 15.0, 0.2, GAME_H - 8.0, rgba(0x508c50, 0.6)),
    ];
    for (count, spacing, w, h0, dh, factor, baseline, color) in rows {
        let scroll = (cam_x * factor).rem_euclid(spacing);
        for i in 0..count {
            let x = i as f32 * spacing - scroll - spacing / 2.0;
            let h = h0 + (i % 3) as f32 * dh;
            dome(out, Vec2::new(x + w / 2.0, baseline), w / 2.0, h, color, 20);
        }
    }
    let scroll = (cam_x * 0.25).rem_euclid(160.0);
    for i in 0..6 {
        let x = i as f32 * 160.0 + 40.0 - scroll - 80.0;
        dome(out, Vec2::new(x, GAME_H - 5.0), 30.0, 18.0, rgba(0x3c783c, 0.4), 12);
    }
}

fn hud(out: &mut Vec<Vertex>, game: &Game) {
    let vis = &game.visible;
    let left = vis.left + 4.0;
    let right = vis.right - 4.0;
    let panel = rgba(colors::BLACK, 0.55);
    let edge = rgba(colors::WHITE, 0.15);

    let rescued = Rect::new(left, 4.0, 95.0, 20.0);
    rounded_rect(out, rescued, 4.0, panel);
    outline(out, rescued, 1.0, edge);
    pixel_heart(out, left + 4.0, 8.0, 1.5, rgba(colors::HEART_RED, 1.0));

    let key = Rect::new(right - 68.0, 4.0, 68.0, 20.0);
    rounded_rect(out, key, 4.0, panel);
    outline(out, key, 1.0, edge);
    if let Some(index) = game.session.progress.held_key {
        sprites::mini_key(out, right - 26.0, 7.0, index);
    }
}

fn arrow(out: &mut Vec<Vertex>, button: &Rect, dir: Vec2, color: [f32; 4]) {
    let c = button.center();
    let r = button.w.min(button.h) * 0.2;
    let side = Vec2::new(-dir.y, dir.x);
    triangle(out, c + dir * r, c - dir * r + side * r, c - dir * r - side * r, color);
}

const BUTTON_DIRS: [Vec2; 3] = [Vec2::NEG_X, Vec2::X, Vec2::NEG_Y];

fn landscape_controls(out: &mut Vec<Vertex>, buttons: &TouchButtons, pressed: ButtonHits) {
    let states = [pressed.left, pressed.right, pressed.jump];
    for ((button, dir), active) in [buttons.left, buttons.right, buttons.jump]
        .iter()
        .zip(BUTTON_DIRS)
        .zip(states)
    {
        let fill = if active { 0.4 } else { 0.25 };
        rounded_rect(out, *button, 8.0, rgba(colors::BLACK, fill));
        outline(out, *button, 1.5, rgba(colors::WHITE, 0.4));
        arrow(out, button, dir, rgba(colors::WHITE, 0.5));
    }
}

fn portrait_controls(out: &mut Vec<Vertex>, viewport: &Viewport, controls: &Controls) {
    let top = viewport.canvas_h - viewport.controls_h;
    rect(
        out,
        0.0,
        top,
        viewport.canvas_w,
        viewport.controls_h,
        rgba(colors::BLACK, 0.25),
    );
    if !controls.visible {
        return;
    }

    let dpr = viewport.dpr;
    let radius = 14.0 * dpr;
    let buttons = touch_buttons(viewport);
    let pressed = controls.pressed;
    let states = [pressed.left, pressed.right, pressed.jump];
    for ((button, dir), active) in [buttons.left, buttons.right, buttons.jump]
        .iter()
        .zip(BUTTON_DIRS)
        .zip(states)
    {
        let shadow = Rect::new(button.x + 2.0 * dpr, button.y + 2.0 * dpr, button.w, button.h);
        rounded_rect(out, shadow, radius, rgba(colors::BLACK, 0.2));
        let (fill, alpha, border, icon) = if active {
            (0x333333, 0.5, 0.7, 0.9)
        } else {
            (colors::BLACK, 0.3, 0.4, 0.65)
        };
        rounded_rect(out, *button, radius, rgba(fill, alpha));
        outline(out, *button, 2.0 * dpr, rgba(colors::WHITE, border));
        arrow(out, button, dir, rgba(colors::WHITE, icon));
    }
}

/// Purple backdrop, twinkling stars and the tiled floor shared by room and proposal
fn night_room(out: &mut Vec<Vertex>, game: &Game, sky: &[(f32, u32)], stars: usize, star_h: usize) {
    let t = game.frame as f32;
    gradient_rect(out, backdrop_rect(&game.visible), sky, 1.0);
    for i in 0..stars {
        let s = star(i, GAME_W as usize, star_h);
        let b = ((t * 0.03 + i as f32).sin() + 1.0) * 0.5;
        let size = if stars > 30 && i % 4 == 0 { 2.0 } else { 1.0 };
        rect(out, s.x, s.y, size, size, rgba(colors::WHITE, 0.2 + b * 0.6));
        if stars > 30 && b > 0.8 && i % 3 == 0 {
            let c = rgba(colors::WHITE, b * 0.3);
            rect(out, s.x - 1.0, s.y, 3.0, 1.0, c);
            rect(out, s.x, s.y - 1.0, 1.0, 3.0, c);
        }
    }

    rect(out, 0.0, ROOM_FLOOR_Y, GAME_W, 40.0, rgba(colors::ROOM_FLOOR, 1.0));
    let tile = rgba(colors::ROOM_FLOOR_TILE, 1.0);
    for x in (0..GAME_W as u32).step_by(24) {
        rect(out, x as f32, ROOM_FLOOR_Y, 12.0, 40.0, tile);
    }
    rect(out, 0.0, ROOM_FLOOR_Y, GAME_W, 1.0, rgba(colors::ROOM_FLOOR_EDGE, 1.0));
}

/// Boyfriend standing on the floor with a pulsing heart above him
fn boyfriend(out: &mut Vec<Vertex>, x: f32, heart_x: f32, t: f32) {
    sprites::boy(out, Vec2::new(x, ROOM_FLOOR_Y - 28.0), 1.0);
    let scale = 2.0 + (t * 0.08).sin() * 0.5;
    let y = ROOM_FLOOR_Y - 50.0 + (t * 0.05).sin() * 3.0;
    pixel_heart(out, heart_x, y, scale, rgba(colors::HEART_RED, 1.0));
}

fn room(out: &mut Vec<Vertex>, game: &Game, settings: &Settings) {
    let t = game.frame as f32;
    night_room(out, game, &colors::ROOM_SKY, 30, (GAME_H - 60.0) as usize);

    let boy_x = game.visible.right - 50.0;
    boyfriend(out, boy_x, boy_x + 6.0, t);

    let session = &game.session;
    let player = &session.player;
    sprites::girl(
        out,
        Vec2::new(player.pos.x - 2.0, player.pos.y),
        player.facing,
        player.walk_frame,
        false,
        1.0,
    );
    for (i, f) in session.progress.followers.iter().enumerate() {
        let at = Vec2::new(player.pos.x - 18.0 - i as f32 * 16.0, player.pos.y + 4.0);
        sprites::animal(out, at, f.animal, 0.8, game.frame);
    }

    if settings.particles {
        particles(out, session.particles.iter(), Vec2::ZERO, 2.0, linear_fade);
    }
}

fn proposal(out: &mut Vec<Vertex>, game: &Game, settings: &Settings) {
    let t = game.frame as f32;
    let vis = &game.visible;
    let vc = vis.center_x();
    night_room(out, game, &colors::PROPOSAL_SKY, 50, 80);

    for i in 0..10 {
        let x = ((i * 50 + 15) % GAME_W as usize) as f32;
        let y = 25.0 + (t * 0.02 + i as f32 * 1.3).sin() * 15.0;
        let c = match i % 3 {
            0 => colors::HEART_RED,
            1 => colors::HOT_PINK,
            _ => colors::LIGHT_PINK,
        };
        pixel_heart(out, x, y, 2.0, rgba(c, 1.0));
    }

    boyfriend(out, vc - 8.0, vc - 6.0, t);

    let girl_x = (vc - 50.0).min(vis.left + 20.0 + t * 0.5);
    sprites::girl(
        out,
        Vec2::new(girl_x, ROOM_FLOOR_Y - 20.0),
        Facing::Right,
        ((game.frame / 8) % 4) as u8,
        false,
        1.0,
    );
    for (i, f) in game.session.progress.followers.iter().enumerate() {
        let at = Vec2::new(girl_x - 18.0 - i as f32 * 16.0, ROOM_FLOOR_Y - 14.0);
        sprites::animal(out, at, f.animal, 0.8, game.frame);
    }

    let dialog = Rect::new(vc - 132.0, 88.0, 264.0, 124.0);
    rounded_rect(out, dialog, 8.0, rgba(colors::BLACK, 0.88));
    outline(out, dialog, 2.0, rgba(colors::HOT_PINK, 1.0));
    outline(
        out,
        Rect::new(vc - 128.0, 92.0, 256.0, 116.0),
        1.0,
        rgba(colors::HEART_RED, 1.0),
    );
    pixel_heart(out, vc - 122.0, 95.0, 2.0, rgba(colors::HEART_RED, 1.0));
    pixel_heart(out, vc + 108.0, 95.0, 2.0, rgba(colors::HEART_RED, 1.0));

    let [yes, red] = proposal_buttons(vis);
    rounded_rect(out, yes, 4.0, rgba(colors::YES_FILL, 1.0));
    outline(out, yes, 2.0, rgba(colors::YES_EDGE, 1.0));
    rounded_rect(out, red, 4.0, rgba(colors::RED_FILL, 1.0));
    outline(out, red, 2.0, rgba(colors::HEART_RED, 1.0));

    if settings.particles {
        particles(out, game.session.particles.iter(), Vec2::ZERO, 1.0, Particle::alpha);
    }
}

fn win(out: &mut Vec<Vertex>, game: &Game, settings: &Settings) {
    let t = game.frame as f32;
    let vis = &game.visible;
    let vc = vis.center_x();
    gradient_rect(out, backdrop_rect(vis), &colors::WIN_SKY, 1.0);

    for i in 0..30 {
        let x = ((i * 47 + 23) % GAME_W as usize) as f32;
        let y = ((i * 31 + 11) % GAME_H as usize) as f32;
        let b = ((t * 0.04 + i as f32 * 0.8).sin() + 1.0) * 0.5;
        rect(out, x, y, 1.0, 1.0, rgba(colors::WHITE, b * 0.3));
    }

    for i in 0..6 {
        let angle = i as f32 / 6.0 * TAU + t * 0.02;
        let x = vc + angle.cos() * 80.0 - 6.0;
        let y = 65.0 + angle.sin() * 30.0;
        pixel_heart(out, x, y, 2.0, rgba(colors::WHITE, 1.0));
    }

    // Roster of everyone rescued
    let panel_w = (vis.width() - 20.0).min(GAME_W - 70.0);
    rounded_rect(
        out,
        Rect::new(vc - panel_w / 2.0, 98.0, panel_w, 72.0),
        6.0,
        rgba(colors::BLACK, 0.4),
    );
    let spacing = roster_spacing(panel_w);
    let start = vc - ANIMALS.len() as f32 * spacing / 2.0 + 15.0;
    for i in 0..ANIMALS.len() {
        sprites::animal(out, Vec2::new(start + i as f32 * spacing, 125.0), i, 1.2, game.frame);
    }

    sprites::girl(out, Vec2::new(vc - 25.0, 185.0), Facing::Right, 0, false, 1.2);
    sprites::boy(out, Vec2::new(vc + 5.0, 185.0), 1.2);
    let bob = (t * 0.08).sin() * 3.0;
    pixel_heart(out, vc - 6.0, 173.0 + bob, 2.0, rgba(colors::HEART_RED, 1.0));

    if settings.particles {
        particles(out, game.session.particles.iter(), Vec2::ZERO, 1.0, Particle::alpha);
    }
}

/// Horizontal distance between roster animals for a panel width
pub fn roster_spacing(panel_w: f32) -> f32 {
    ((panel_w - 30.0) / ANIMALS.len() as f32).min(50.0)
}
