//! Rescue My Valentine - a tile-based rescue platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level, physics, pickups, particles, game modes)
//! - `renderer`: Scene building and the WebGPU pipeline
//! - `platform`: Browser input normalization and viewport geometry
//! - `settings`: Presentation options
//! - `hud`: Text overlay contents

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, TouchControls};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Logical canvas resolution
    pub const GAME_W: f32 = 480.0;
    pub const GAME_H: f32 = 270.0;
    /// Tile edge length in logical pixels
    pub const TILE: f32 = 16.0;

    /// Fixed simulation timestep (60 Hz, one tick per frame at 60 fps)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame after a stall
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Vertical acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.55;
    /// Launch velocity of a jump (negative is up)
    pub const JUMP_VEL: f32 = -8.5;
    /// Horizontal walking speed (pixels/tick)
    pub const MOVE_SPEED: f32 = 2.5;
    /// Terminal fall speed
    pub const MAX_FALL: f32 = 10.0;
    /// Horizontal decay factor when no direction is held
    pub const MOVE_DAMPING: f32 = 0.6;
    /// Horizontal speed below which decay snaps to zero
    pub const MOVE_SNAP: f32 = 0.2;
    /// Releasing jump while rising faster than this cuts the jump
    pub const JUMP_CUT_THRESHOLD: f32 = -2.0;
    pub const JUMP_CUT_DAMPING: f32 = 0.7;

    /// Jump press is remembered this many ticks
    pub const JUMP_BUFFER_TICKS: u32 = 8;
    /// Jump is still allowed this many ticks after leaving ground
    pub const COYOTE_TICKS: u32 = 6;
    /// Minimum ticks between landing dust bursts
    pub const DUST_COOLDOWN_TICKS: u32 = 10;
    /// Minimum downward speed for a landing to kick up dust
    pub const DUST_MIN_FALL_SPEED: f32 = 2.0;
    /// Slack (pixels) when deciding whether feet were above a one-way platform
    pub const PLATFORM_TOLERANCE: f32 = 2.0;
    /// Distance below the map after which the player respawns
    pub const FALL_OUT_MARGIN: f32 = 32.0;

    /// Player bounding box
    pub const PLAYER_W: f32 = 12.0;
    pub const PLAYER_H: f32 = 20.0;
    /// Session start position (also the first checkpoint)
    pub const PLAYER_START_X: f32 = 85.0;
    pub const PLAYER_START_Y: f32 = 200.0;

    /// Number of key/cage/animal triples
    pub const KEY_COUNT: usize = 6;

    /// Message durations (ticks)
    pub const RESCUE_MESSAGE_TICKS: u32 = 120;
    pub const WRONG_KEY_TICKS: u32 = 60;

    /// Ticks the win screen must show before a tap returns to title
    pub const WIN_REPLAY_DELAY_TICKS: u32 = 90;

    /// Room floor line (the room is drawn 40 px above the bottom edge)
    pub const ROOM_FLOOR_Y: f32 = GAME_H - 40.0;
}

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive point test (edges count as inside)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Key/cage color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyColor {
    pub name: &'static str,
    pub fill: u32,
    pub dark: u32,
}

pub const KEY_COLORS: [KeyColor; consts::KEY_COUNT] = [
    KeyColor { name: "Red", fill: 0xe74c3c, dark: 0xc0392b },
    KeyColor { name: "Blue", fill: 0x3498db, dark: 0x2980b9 },
    KeyColor { name: "Green", fill: 0x2ecc71, dark: 0x27ae60 },
    KeyColor { name: "Yellow", fill: 0xf1c40f, dark: 0xd4ac0f },
    KeyColor { name: "Purple", fill: 0x9b59b6, dark: 0x8e44ad },
    KeyColor { name: "Orange", fill: 0xe67e22, dark: 0xd35400 },
];

/// Body shape used when drawing an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalShape {
    Spaniel,
    TuxedoCat,
    Shepherd,
    AussieShepherd,
    Bulldog,
    TortieCat,
}

/// A rescuable animal and its fixed palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animal {
    pub name: &'static str,
    pub breed: &'static str,
    pub shape: AnimalShape,
    pub body: u32,
    pub patches: u32,
    pub ear: u32,
    pub nose: u32,
}

/// Animal `i` sits in cage `i` and needs key `i`
pub const ANIMALS: [Animal; consts::KEY_COUNT] = [
    Animal {
        name: "Awice",
        breed: "King Charles Spaniel",
        shape: AnimalShape::Spaniel,
        body: 0xffffff,
        patches: 0x222222,
        ear: 0x222222,
        nose: 0x222222,
    },
    Animal {
        name: "Ella",
        breed: "Tuxedo Cat",
        shape: AnimalShape::TuxedoCat,
        body: 0x222222,
        patches: 0xffffff,
        ear: 0x222222,
        nose: 0xffaaaa,
    },
    Animal {
        name: "Malmoo",
        breed: "German Shepherd",
        shape: AnimalShape::Shepherd,
        body: 0xc8a24e,
        patches: 0x3d2b1f,
        ear: 0x3d2b1f,
        nose: 0x222222,
    },
    Animal {
        name: "Parm",
        breed: "Australian Shepherd",
        shape: AnimalShape::AussieShepherd,
        body: 0x8b5e3c,
        patches: 0xffffff,
        ear: 0x6b3a2a,
        nose: 0x222222,
    },
    Animal {
        name: "Frito",
        breed: "French Bulldog",
        shape: AnimalShape::Bulldog,
        body: 0xd4a76a,
        patches: 0xc8955a,
        ear: 0xd4a76a,
        nose: 0x333333,
    },
    Animal {
        name: "Lil Lady",
        breed: "Tortoiseshell Cat",
        shape: AnimalShape::TortieCat,
        body: 0x000000,
        patches: 0xe67e22,
        ear: 0x333333,
        nose: 0xffaaaa,
    },
];

/// Convert a 0xRRGGBB color and alpha into normalized RGBA
#[inline]
pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Linear blend between two 0xRRGGBB colors
pub fn lerp_color(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let ca = ((a >> shift) & 0xff) as f32;
        let cb = ((b >> shift) & 0xff) as f32;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 15.0)));
        assert!(!r.contains(Vec2::new(30.1, 12.0)));
        assert!(!r.contains(Vec2::new(9.9, 12.0)));
    }

    #[test]
    fn test_rgba_unpacks_channels() {
        let c = rgba(0xff8000, 0.5);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 0.5);
    }

    #[test]
    fn test_lerp_color_endpoints() {
        assert_eq!(lerp_color(0x000000, 0xffffff, 0.0), 0x000000);
        assert_eq!(lerp_color(0x000000, 0xffffff, 1.0), 0xffffff);
        assert_eq!(lerp_color(0x000000, 0x0000ff, 2.0), 0x0000ff);
    }
}
