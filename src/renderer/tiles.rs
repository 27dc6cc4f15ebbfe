//! Tile painters
//!
//! Each tile kind maps to one painter function through `TileRegistry`, so
//! adding a kind means registering a painter rather than growing a branch.

use glam::Vec2;

use super::shapes::{circle, rect, triangle};
use super::sprites;
use super::vertex::{Vertex, colors};
use crate::consts::TILE;
use crate::sim::{Tile, TileKind, TileMap};
use crate::{KEY_COLORS, rgba};

/// Everything a painter may look at
#[derive(Debug, Clone, Copy)]
pub struct TileContext<'a> {
    /// Top-left of the cell after the camera offset
    pub at: Vec2,
    pub tile: Tile,
    pub tx: i32,
    pub ty: i32,
    pub map: &'a TileMap,
    pub frame: u64,
    pub door_open: bool,
}

impl TileContext<'_> {
    fn time(&self) -> f32 {
        self.frame as f32
    }

    /// World-space x of the cell (for per-column animation phase)
    fn world_x(&self) -> f32 {
        self.tx as f32 * TILE
    }
}

pub type TilePainter = fn(&mut Vec<Vertex>, &TileContext);

/// Tile kind -> painter lookup
#[derive(Clone)]
pub struct TileRegistry {
    painters: [Option<TilePainter>; TileKind::COUNT],
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TileRegistry {
    /// Registry with no painters
    pub fn empty() -> Self {
        Self {
            painters: [None; TileKind::COUNT],
        }
    }

    /// Registry with the built-in painter for every kind
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(TileKind::Empty, paint_nothing);
        registry.register(TileKind::Ground, paint_ground);
        registry.register(TileKind::Platform, paint_platform);
        registry.register(TileKind::Spike, paint_spike);
        registry.register(TileKind::Lava, paint_lava);
        registry.register(TileKind::LavaTop, paint_lava_top);
        registry.register(TileKind::Cage, paint_cage);
        registry.register(TileKind::Key, paint_key);
        registry.register(TileKind::FinalDoor, paint_door);
        registry.register(TileKind::Checkpoint, paint_checkpoint);
        registry.register(TileKind::Flower, paint_flower);
        registry.register(TileKind::Grass, paint_grass);
        registry.register(TileKind::Brick, paint_brick);
        registry.register(TileKind::Bridge, paint_bridge);
        registry
    }

    pub fn register(&mut self, kind: TileKind, painter: TilePainter) {
        self.painters[kind.index()] = Some(painter);
    }

    pub fn get(&self, kind: TileKind) -> Option<TilePainter> {
        self.painters[kind.index()]
    }

    /// Paint one cell; kinds without a painter are skipped
    pub fn paint(&self, out: &mut Vec<Vertex>, ctx: &TileContext) {
        if let Some(painter) = self.get(ctx.tile.kind()) {
            painter(out, ctx);
        }
    }
}

fn paint_nothing(_out: &mut Vec<Vertex>, _ctx: &TileContext) {}

fn paint_ground(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let above = ctx.map.get(ctx.tx, ctx.ty - 1);
    if matches!(above, Tile::Ground | Tile::Brick) {
        underground(out, ctx.at);
        return;
    }

    let Vec2 { x, y } = ctx.at;
    let c = |hex| rgba(hex, 1.0);
    rect(out, x, y + 5.0, TILE, TILE - 5.0, c(colors::SOIL));
    rect(out, x, y, TILE, 6.0, c(colors::GRASS_DARK));
    rect(out, x, y, TILE, 3.0, c(colors::GRASS_LIGHT));
    rect(out, x + 1.0, y, 3.0, 2.0, c(0x5aaa4f));
    rect(out, x + 8.0, y, 4.0, 1.0, c(0x5aaa4f));
    // Blades poking above the cell
    for (bx, by, bh) in [(1.0, -2.0, 3.0), (4.0, -1.0, 2.0), (7.0, -2.0, 3.0), (10.0, -1.0, 2.0), (13.0, -2.0, 3.0)] {
        rect(out, x + bx, y + by, 1.0, bh, c(0x5cb850));
    }
    for (bx, by) in [(3.0, -1.0), (9.0, -2.0), (14.0, -1.0)] {
        rect(out, x + bx, y + by, 1.0, 2.0, c(0x3a7a2a));
    }
    rect(out, x + 3.0, y + 7.0, 2.0, 2.0, c(0x4a2815));
    rect(out, x + 10.0, y + 9.0, 2.0, 1.0, c(0x4a2815));
    rect(out, x + 6.0, y + 10.0, 2.0, 1.0, c(0x7a6a5a));
    rect(out, x + 12.0, y + 7.0, 1.0, 1.0, c(0x7a6a5a));
}

/// Dirt below the surface; also used to extend the ground past the map bottom
pub fn underground(out: &mut Vec<Vertex>, at: Vec2) {
    let Vec2 { x, y } = at;
    let c = |hex| rgba(hex, 1.0);
    rect(out, x, y, TILE, TILE, c(colors::UNDERGROUND));
    rect(out, x + 2.0, y + 2.0, 5.0, 4.0, c(colors::UNDERGROUND_PATCH));
    rect(out, x + 9.0, y + 8.0, 4.0, 3.0, c(colors::UNDERGROUND_PATCH));
    rect(out, x + 4.0, y + 6.0, 2.0, 2.0, c(0x3a1a08));
    rect(out, x + 11.0, y + 3.0, 2.0, 2.0, c(0x3a1a08));
    rect(out, x + 7.0, y + 12.0, 3.0, 2.0, c(0x6a5a4a));
    rect(out, x + 1.0, y + 10.0, 2.0, 1.0, c(0x6a5a4a));
    let grid = rgba(colors::BLACK, 0.08);
    rect(out, x, y, 1.0, TILE, grid);
    rect(out, x, y, TILE, 1.0, grid);
}

fn paint_platform(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    let c = |hex| rgba(hex, 1.0);
    rect(out, x, y, TILE, 5.0, c(colors::PLANK));
    rect(out, x, y, TILE, 1.0, c(colors::PLANK_TOP));
    rect(out, x + 2.0, y + 2.0, 4.0, 1.0, c(0x8a6a45));
    rect(out, x + 9.0, y + 3.0, 5.0, 1.0, c(0x8a6a45));
    rect(out, x, y + 4.0, TILE, 1.0, c(0x6a5235));
    rect(out, x + 2.0, y + 1.0, 1.0, 1.0, c(0xc0b0a0));
    rect(out, x + 13.0, y + 1.0, 1.0, 1.0, c(0xc0b0a0));
    // End caps where the run of planks stops
    if ctx.map.get(ctx.tx - 1, ctx.ty) != Tile::Platform {
        rect(out, x, y, 1.0, 5.0, c(0x7a5a3a));
    }
    if ctx.map.get(ctx.tx + 1, ctx.ty) != Tile::Platform {
        rect(out, x + 15.0, y, 1.0, 5.0, c(0x7a5a3a));
    }
    rect(out, x + 7.0, y + 1.0, 2.0, 1.0, rgba(colors::WHITE, 0.15));
}

fn paint_spike(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    rect(out, x, y + TILE - 4.0, TILE, 4.0, rgba(colors::SPIKE_BASE, 1.0));
    rect(out, x, y + TILE - 2.0, TILE, 2.0, rgba(0x4a8a3a, 1.0));
    let base = y + TILE - 3.0;
    for i in 0..3 {
        let sx = x + 1.0 + i as f32 * 5.0;
        triangle(
            out,
            Vec2::new(sx + 1.0, base),
            Vec2::new(sx + 3.0, y + 3.0),
            Vec2::new(sx + 5.0, base),
            rgba(0x555555, 1.0),
        );
        triangle(
            out,
            Vec2::new(sx, base),
            Vec2::new(sx + 2.5, y + 3.0),
            Vec2::new(sx + 5.0, base),
            rgba(colors::SPIKE, 1.0),
        );
        triangle(
            out,
            Vec2::new(sx, base),
            Vec2::new(sx + 2.5, y + 3.0),
            Vec2::new(sx + 1.5, base),
            rgba(0xcccccc, 1.0),
        );
        rect(out, sx + 2.0, y + 4.0, 1.0, 1.0, rgba(colors::WHITE, 1.0));
    }
}

fn paint_lava(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    rect(out, x, y, TILE, TILE, rgba(colors::LAVA, 1.0));
    rect(out, x + 3.0, y + 3.0, 5.0, 5.0, rgba(0xee3300, 1.0));
    rect(out, x + 10.0, y + 7.0, 4.0, 4.0, rgba(0xee3300, 1.0));
    rect(out, x + 5.0, y + 10.0, 3.0, 3.0, rgba(0xff5500, 1.0));
}

fn paint_lava_top(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    let t = ctx.time();
    let wx = ctx.world_x();
    rect(out, x, y, TILE, TILE, rgba(colors::LAVA_TOP, 1.0));
    rect(out, x + 2.0, y + 4.0, TILE - 4.0, TILE - 6.0, rgba(colors::LAVA_GLOW, 1.0));

    // Bubbles step through three positions
    let lava_frame = ((ctx.frame / 10) % 3) as f32;
    let bubble = (lava_frame * 5.0 + wx).rem_euclid(TILE);
    circle(out, Vec2::new(x + bubble + 4.0, y + 5.0), 2.0, rgba(0xff8844, 1.0), 8);
    circle(
        out,
        Vec2::new(x + (bubble + 10.0).rem_euclid(TILE), y + 8.0),
        1.5,
        rgba(0xffaa33, 1.0),
        8,
    );

    let wave = (t * 0.1 + wx * 0.3).sin() * 3.0;
    rect(out, x + 3.0 + wave, y, 8.0, 2.0, rgba(0xffcc00, 1.0));
    rect(out, x + 5.0 + wave, y, 4.0, 1.0, rgba(0xffee66, 1.0));

    let glow = 0.1 + (t * 0.08 + wx).sin() * 0.05;
    rect(out, x, y - 8.0, TILE, 8.0, rgba(0xff6400, glow));
}

fn paint_cage(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Tile::Cage(index) = ctx.tile else {
        return;
    };
    let index = usize::from(index);
    let Some(key) = KEY_COLORS.get(index) else {
        return;
    };
    let Vec2 { x, y } = ctx.at;
    rect(out, x - 5.0, y - 5.0, 26.0, 26.0, rgba(colors::CAGE_BACK, 1.0));
    rect(out, x - 3.0, y - 3.0, 22.0, 22.0, rgba(0x1a1a1a, 1.0));

    sprites::animal(out, ctx.at, index, 0.8, ctx.frame);

    let dark = rgba(key.dark, 1.0);
    let fill = rgba(key.fill, 1.0);
    rect(out, x - 5.0, y - 5.0, 26.0, 3.0, dark);
    rect(out, x - 5.0, y + 18.0, 26.0, 3.0, dark);
    for i in 0..7 {
        rect(out, x - 5.0 + i as f32 * 4.0, y - 5.0, 2.0, 26.0, dark);
    }
    rect(out, x - 5.0, y - 5.0, 26.0, 1.0, fill);
    for i in 0..7 {
        rect(out, x - 5.0 + i as f32 * 4.0, y - 5.0, 1.0, 26.0, fill);
    }

    // Padlock
    rect(out, x + 5.0, y + 18.0, 6.0, 4.0, rgba(colors::GOLD, 1.0));
    rect(out, x + 6.0, y + 15.0, 1.0, 3.0, rgba(colors::DOOR_FRAME, 1.0));
    rect(out, x + 9.0, y + 15.0, 1.0, 3.0, rgba(colors::DOOR_FRAME, 1.0));
    rect(out, x + 6.0, y + 15.0, 4.0, 1.0, rgba(colors::DOOR_FRAME, 1.0));
}

fn paint_key(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Tile::Key(index) = ctx.tile else {
        return;
    };
    let Some(key) = KEY_COLORS.get(usize::from(index)) else {
        return;
    };
    let t = ctx.time();
    let phase = f32::from(index);
    let x = ctx.at.x;
    let y = ctx.at.y + (t * 0.08 + phase * 2.0).sin() * 3.0;
    let dark = rgba(key.dark, 1.0);
    let fill = rgba(key.fill, 1.0);

    let glow = 0.15 + (t * 0.06 + phase).sin() * 0.1;
    circle(out, Vec2::new(x + 8.0, y + 8.0), 10.0, rgba(key.fill, glow), 16);

    circle(out, Vec2::new(x + 9.0, y + 5.0), 4.0, dark, 12);
    rect(out, x + 7.0, y + 8.0, 4.0, 8.0, dark);

    circle(out, Vec2::new(x + 8.0, y + 4.0), 4.0, fill, 12);
    rect(out, x + 6.0, y + 7.0, 4.0, 8.0, fill);
    rect(out, x + 4.0, y + 12.0, 3.0, 2.0, fill);
    rect(out, x + 4.0, y + 9.0, 3.0, 2.0, fill);
    circle(out, Vec2::new(x + 8.0, y + 4.0), 2.0, dark, 8);

    let sparkle = (ctx.frame + u64::from(index) * 15) % 40;
    if sparkle < 10 {
        let sp = sparkle as f32 / 10.0;
        let white = rgba(colors::WHITE, 1.0 - sp);
        rect(out, x + 2.0 - sp * 2.0, y + 1.0, 2.0, 2.0, white);
        rect(out, x + 12.0 + sp * 2.0, y + 3.0, 1.0, 1.0, white);
    }
}

fn paint_door(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    if ctx.door_open {
        let pulse = (ctx.time() * 0.08).sin() * 0.15;
        rect(out, x - 6.0, y - 6.0, TILE + 12.0, TILE + 12.0, rgba(0xffdc00, 0.2 + pulse));
        rect(out, x - 1.0, y - 1.0, TILE + 2.0, TILE + 2.0, rgba(colors::DOOR_FRAME, 1.0));
        rect(out, x + 1.0, y + 1.0, TILE - 2.0, TILE - 2.0, rgba(colors::DOOR_INNER, 1.0));
        let rays = rgba(0xffffc8, 0.4 + pulse);
        rect(out, x + 4.0, y - 3.0, 2.0, 3.0, rays);
        rect(out, x + 10.0, y - 3.0, 2.0, 3.0, rays);
        rect(out, x - 3.0, y + 6.0, 3.0, 2.0, rays);
        rect(out, x + TILE, y + 6.0, 3.0, 2.0, rays);
    } else {
        rect(out, x - 1.0, y - 1.0, TILE + 2.0, TILE + 2.0, rgba(0x543210, 1.0));
        rect(out, x, y, TILE, TILE, rgba(colors::DOOR_SHUT, 1.0));
        rect(out, x + 2.0, y + 2.0, TILE - 4.0, TILE - 4.0, rgba(0x7a5a30, 1.0));
        for gy in [4.0, 8.0, 12.0] {
            rect(out, x + 3.0, y + gy, TILE - 6.0, 1.0, rgba(0x6a4a20, 1.0));
        }
        rect(out, x + 6.0, y + 8.0, 4.0, 4.0, rgba(0xc0c0c0, 1.0));
        rect(out, x + 6.0, y + 5.0, 4.0, 1.0, rgba(0xa0a0a0, 1.0));
        rect(out, x + 7.0, y + 9.0, 2.0, 2.0, rgba(0x222222, 1.0));
    }
}

fn paint_checkpoint(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    rect(out, x + 7.0, y - 10.0, 2.0, TILE + 10.0, rgba(colors::POLE, 1.0));
    rect(out, x + 7.0, y - 10.0, 1.0, TILE + 10.0, rgba(0xdddddd, 1.0));
    let wave = (ctx.time() * 0.1).sin() * 1.5;
    triangle(
        out,
        Vec2::new(x + 9.0, y - 10.0),
        Vec2::new(x + 18.0 + wave, y - 7.0),
        Vec2::new(x + 9.0, y - 3.0),
        rgba(colors::FLAG, 1.0),
    );
    rect(out, x + 6.0, y - 12.0, 4.0, 3.0, rgba(colors::GOLD, 1.0));
}

const FLOWER_COLORS: [u32; 4] = [0xe74c3c, 0xff69b4, 0xf1c40f, 0xe67e22];

fn paint_flower(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    rect(out, x + 7.0, y + 7.0, 2.0, 7.0, rgba(0x2a8a2a, 1.0));
    rect(out, x + 5.0, y + 9.0, 3.0, 2.0, rgba(0x3aa63a, 1.0));
    let petal = rgba(
        FLOWER_COLORS[ctx.tx.rem_euclid(FLOWER_COLORS.len() as i32) as usize],
        1.0,
    );
    rect(out, x + 5.0, y + 3.0, 3.0, 3.0, petal);
    rect(out, x + 9.0, y + 3.0, 3.0, 3.0, petal);
    rect(out, x + 5.0, y + 6.0, 3.0, 2.0, petal);
    rect(out, x + 9.0, y + 6.0, 3.0, 2.0, petal);
    rect(out, x + 6.0, y + 2.0, 5.0, 2.0, petal);
    rect(out, x + 7.0, y + 4.0, 3.0, 3.0, rgba(0xffff99, 1.0));
    if (ctx.frame / 8) % 4 == 0 {
        rect(out, x + 7.0, y + 4.0, 1.0, 1.0, rgba(colors::WHITE, 1.0));
    }
}

fn paint_grass(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    let dark = rgba(0x4a9a40, 1.0);
    let light = rgba(0x5cb850, 1.0);
    for (bx, by) in [(1.0, 7.0), (3.0, 5.0), (5.0, 4.0), (7.0, 6.0), (9.0, 5.0), (11.0, 7.0), (13.0, 6.0)] {
        rect(out, x + bx, y + by, 1.0, 14.0 - by, dark);
    }
    for (bx, by, bh) in [(2.0, 6.0, 5.0), (6.0, 5.0, 4.0), (10.0, 4.0, 5.0), (14.0, 6.0, 4.0)] {
        rect(out, x + bx, y + by, 1.0, bh, light);
    }
    let sway = if (ctx.time() * 0.04 + ctx.world_x() * 0.2).sin() > 0.0 {
        1.0
    } else {
        0.0
    };
    rect(out, x + 5.0 + sway, y + 3.0, 1.0, 2.0, light);
}

fn paint_brick(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    rect(out, x, y, TILE, TILE, rgba(colors::BRICK_MORTAR, 1.0));
    let brick = rgba(colors::BRICK, 1.0);
    // Two courses, the lower one offset by half a brick
    rect(out, x, y + 1.0, 7.0, 6.0, brick);
    rect(out, x + 8.0, y + 1.0, 8.0, 6.0, brick);
    rect(out, x, y + 9.0, 3.0, 6.0, brick);
    rect(out, x + 4.0, y + 9.0, 8.0, 6.0, brick);
    rect(out, x + 13.0, y + 9.0, 3.0, 6.0, brick);
}

fn paint_bridge(out: &mut Vec<Vertex>, ctx: &TileContext) {
    let Vec2 { x, y } = ctx.at;
    rect(out, x, y, TILE, 6.0, rgba(colors::PLANK, 1.0));
    rect(out, x, y, TILE, 1.0, rgba(colors::PLANK_TOP, 1.0));
    rect(out, x + 7.0, y, 1.0, 6.0, rgba(0x6a5235, 1.0));
    rect(out, x + 15.0, y, 1.0, 6.0, rgba(0x6a5235, 1.0));
    rect(out, x, y + 6.0, TILE, 1.0, rgba(colors::BRIDGE_ROPE, 1.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(map: &TileMap, tx: i32, ty: i32) -> TileContext<'_> {
        TileContext {
            at: Vec2::new(tx as f32 * TILE, ty as f32 * TILE),
            tile: map.get(tx, ty),
            tx,
            ty,
            map,
            frame: 0,
            door_open: false,
        }
    }

    #[test]
    fn test_standard_registry_covers_every_kind() {
        let registry = TileRegistry::standard();
        for kind in TileKind::ALL {
            assert!(registry.get(kind).is_some(), "{kind:?} has no painter");
        }
    }

    #[test]
    fn test_register_overrides_painter() {
        fn marker(out: &mut Vec<Vertex>, _ctx: &TileContext) {
            rect(out, 0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        }
        let mut registry = TileRegistry::empty();
        let map = TileMap::from_rows(&[&[1]]).expect("valid map");
        let mut out = Vec::new();
        registry.paint(&mut out, &ctx(&map, 0, 0));
        assert!(out.is_empty());

        registry.register(TileKind::Ground, marker);
        registry.paint(&mut out, &ctx(&map, 0, 0));
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_every_tile_paints_whole_triangles() {
        let map = TileMap::from_rows(&[
            &[0, 1, 2, 3, 4, 36, 10, 20, 30, 31, 32, 33, 34, 35],
            &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ])
        .expect("valid map");
        let registry = TileRegistry::standard();
        for tx in 0..14 {
            let mut out = Vec::new();
            registry.paint(&mut out, &ctx(&map, tx, 0));
            assert_eq!(out.len() % 3, 0);
            assert_eq!(out.is_empty(), map.get(tx, 0) == Tile::Empty);
        }
    }

    #[test]
    fn test_ground_surface_depends_on_cell_above() {
        let map = TileMap::from_rows(&[&[1], &[1]]).expect("valid map");
        let registry = TileRegistry::standard();
        let mut surface = Vec::new();
        let mut buried = Vec::new();
        registry.paint(&mut surface, &ctx(&map, 0, 0));
        registry.paint(&mut buried, &ctx(&map, 0, 1));
        // Grass blades rise above the surface cell only
        let top = |vs: &[Vertex], y0: f32| vs.iter().any(|v| v.position[1] < y0);
        assert!(top(&surface, 0.0));
        assert!(!top(&buried, TILE));
    }
}
