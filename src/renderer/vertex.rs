//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Palette for scenery and characters (0xRRGGBB, paired with `crate::rgba`)
pub mod colors {
    pub const HEART_RED: u32 = 0xe74c3c;
    pub const HOT_PINK: u32 = 0xff69b4;
    pub const LIGHT_PINK: u32 = 0xff9999;
    pub const WHITE: u32 = 0xffffff;
    pub const BLACK: u32 = 0x000000;
    pub const GOLD: u32 = 0xffd700;

    // Letterbox fill behind the game area in portrait
    pub const PORTRAIT_PLAYING: u32 = 0x1a0a02;
    pub const PORTRAIT_NIGHT: u32 = 0x050015;
    pub const PORTRAIT_WIN: u32 = 0x8b0000;

    /// Daytime sky below the time-of-day tinted top band
    pub const DAY_SKY_LOW: [(f32, u32); 4] = [
        (0.35, 0xffb0c0),
        (0.55, 0xffd4a8),
        (0.75, 0xffe4b5),
        (1.0, 0xa8d8a8),
    ];
    pub const NIGHT_SKY: [(f32, u32); 4] = [
        (0.0, 0x0a0020),
        (0.3, 0x1a0533),
        (0.7, 0x2d1b4e),
        (1.0, 0x1a0a30),
    ];
    pub const ROOM_SKY: [(f32, u32); 3] = [(0.0, 0x1a0a30), (0.5, 0x2d1b4e), (1.0, 0x1a0533)];
    pub const PROPOSAL_SKY: [(f32, u32); 4] = [
        (0.0, 0x0a0020),
        (0.3, 0x2d1b4e),
        (0.6, 0x4a2060),
        (1.0, 0x1a0533),
    ];
    pub const WIN_SKY: [(f32, u32); 4] = [
        (0.0, 0xff69b4),
        (0.4, 0xe74c3c),
        (0.7, 0xc0392b),
        (1.0, 0x8b0000),
    ];

    pub const SUN: u32 = 0xffe87c;
    pub const MOON: u32 = 0xfffde8;

    pub const SOIL: u32 = 0x5a3820;
    pub const GRASS_DARK: u32 = 0x3d8a30;
    pub const GRASS_LIGHT: u32 = 0x4a9a3f;
    pub const UNDERGROUND: u32 = 0x4a2a12;
    pub const UNDERGROUND_PATCH: u32 = 0x5a3a1a;
    pub const BRICK: u32 = 0x8a4a3a;
    pub const BRICK_MORTAR: u32 = 0x6a3a2a;
    pub const PLANK: u32 = 0x9a7a55;
    pub const PLANK_TOP: u32 = 0xb8976a;
    pub const BRIDGE_ROPE: u32 = 0x6a5030;
    pub const SPIKE_BASE: u32 = 0x5a9a4a;
    pub const SPIKE: u32 = 0x999999;
    pub const LAVA: u32 = 0xcc2200;
    pub const LAVA_TOP: u32 = 0xff3800;
    pub const LAVA_GLOW: u32 = 0xff6633;
    pub const CAGE_BACK: u32 = 0x2a2a2a;
    pub const DOOR_FRAME: u32 = 0xdaa520;
    pub const DOOR_INNER: u32 = 0xfff8dc;
    pub const DOOR_SHUT: u32 = 0x654321;
    pub const POLE: u32 = 0xbbbbbb;
    pub const FLAG: u32 = 0xe74c3c;
    pub const STEM: u32 = 0x3d8a30;

    pub const ROOM_FLOOR: u32 = 0x3a2050;
    pub const ROOM_FLOOR_TILE: u32 = 0x4a2a60;
    pub const ROOM_FLOOR_EDGE: u32 = 0x5a3a70;
    pub const TITLE_GROUND: u32 = 0x2a1a40;
    pub const TITLE_GRASS: u32 = 0x3a6a3a;

    pub const YES_FILL: u32 = 0x1a401a;
    pub const YES_EDGE: u32 = 0x2ecc71;
    pub const RED_FILL: u32 = 0x401a1a;
}
