//! Pixel-art characters: the heroine, the boyfriend, the six animals

use glam::Vec2;

use super::shapes::{Sprite, circle, rect};
use super::vertex::Vertex;
use crate::sim::Facing;
use crate::{ANIMALS, Animal, AnimalShape, KEY_COLORS, rgba};

/// Color of one sprite cell
#[derive(Debug, Clone, Copy)]
enum Ink {
    Hex(u32),
    /// Translucent overlay
    Tint(u32, f32),
    Body,
    Patches,
    Ear,
    Nose,
}

type Cell = (f32, f32, f32, f32, Ink);

use Ink::{Body, Ear, Hex, Nose, Patches, Tint};

fn ink_color(ink: Ink, animal: Option<&Animal>) -> [f32; 4] {
    let hex = |h: u32| rgba(h, 1.0);
    match (ink, animal) {
        (Hex(h), _) => hex(h),
        (Tint(h, a), _) => rgba(h, a),
        (Body, Some(a)) => hex(a.body),
        (Patches, Some(a)) => hex(a.patches),
        (Ear, Some(a)) => hex(a.ear),
        (Nose, Some(a)) => hex(a.nose),
        (_, None) => hex(0xff00ff),
    }
}

fn paint(out: &mut Vec<Vertex>, sprite: &Sprite, cells: &[Cell], animal: Option<&Animal>) {
    for &(x, y, w, h, ink) in cells {
        sprite.px_rgba(out, x, y, w, h, ink_color(ink, animal));
    }
}

const GIRL_SKIN: u32 = 0xfdbcb4;
const GIRL_SHOE: u32 = 0xff69b4;
const GIRL_SHOE_BOW: u32 = 0xff1493;
const LEG_OFFSETS: [f32; 4] = [0.0, 1.0, 0.0, -1.0];

const GIRL: &[Cell] = &[
    // Hair
    (1.0, 0.0, 14.0, 6.0, Hex(0x8b4513)),
    (0.0, 2.0, 2.0, 13.0, Hex(0x654321)),
    (14.0, 2.0, 2.0, 13.0, Hex(0x654321)),
    (-1.0, 12.0, 2.0, 3.0, Hex(0x8b4513)),
    (15.0, 11.0, 2.0, 4.0, Hex(0x8b4513)),
    (3.0, 0.0, 3.0, 1.0, Hex(0xa0522d)),
    (10.0, 1.0, 2.0, 1.0, Hex(0xa0522d)),
    (4.0, 1.0, 4.0, 2.0, Hex(0x8b6914)),
    // Bow
    (10.0, -1.0, 5.0, 3.0, Hex(0xff69b4)),
    (9.0, 0.0, 1.0, 2.0, Hex(0xff69b4)),
    (15.0, 0.0, 1.0, 2.0, Hex(0xff69b4)),
    (12.0, 0.0, 2.0, 2.0, Hex(0xff1493)),
    (10.0, -1.0, 1.0, 1.0, Hex(0xffb6d9)),
    // Face
    (3.0, 2.0, 10.0, 8.0, Hex(GIRL_SKIN)),
    (2.0, 4.0, 1.0, 4.0, Hex(GIRL_SKIN)),
    (13.0, 4.0, 1.0, 4.0, Hex(GIRL_SKIN)),
    (2.0, 6.0, 3.0, 2.0, Tint(0xff7896, 0.5)),
    (11.0, 6.0, 3.0, 2.0, Tint(0xff7896, 0.5)),
    (3.0, 5.0, 2.0, 1.0, Tint(0xff6482, 0.3)),
    (11.0, 5.0, 2.0, 1.0, Tint(0xff6482, 0.3)),
    // Eyes
    (5.0, 4.0, 2.0, 3.0, Hex(0x89cff0)),
    (10.0, 4.0, 2.0, 3.0, Hex(0x89cff0)),
    (5.0, 4.0, 2.0, 1.0, Hex(0x1a5276)),
    (10.0, 4.0, 2.0, 1.0, Hex(0x1a5276)),
    (5.0, 6.0, 2.0, 1.0, Hex(0x1a5276)),
    (10.0, 6.0, 2.0, 1.0, Hex(0x1a5276)),
    (5.0, 5.0, 2.0, 1.0, Hex(0x154360)),
    (10.0, 5.0, 2.0, 1.0, Hex(0x154360)),
    (5.0, 4.0, 1.0, 1.0, Hex(0xffffff)),
    (10.0, 4.0, 1.0, 1.0, Hex(0xffffff)),
    (5.0, 3.0, 1.0, 1.0, Hex(0x333333)),
    (10.0, 3.0, 1.0, 1.0, Hex(0x333333)),
    // Mouth
    (7.0, 8.0, 2.0, 1.0, Hex(0xe74c3c)),
    (7.0, 8.0, 1.0, 1.0, Hex(0xff9999)),
    // Dress
    (4.0, 10.0, 8.0, 7.0, Hex(0xff69b4)),
    (5.0, 10.0, 6.0, 2.0, Hex(0xff85c1)),
    (4.0, 10.0, 2.0, 7.0, Hex(0xff5aa5)),
    (10.0, 10.0, 2.0, 7.0, Hex(0xff5aa5)),
    (7.0, 11.0, 2.0, 1.0, Hex(0xff1493)),
    (6.0, 12.0, 4.0, 1.0, Hex(0xff1493)),
    (7.0, 13.0, 2.0, 1.0, Hex(0xff1493)),
    (3.0, 16.0, 10.0, 1.0, Hex(0xffb6d9)),
    (4.0, 16.0, 1.0, 1.0, Hex(0xffffff)),
    (6.0, 16.0, 1.0, 1.0, Hex(0xffffff)),
    (8.0, 16.0, 1.0, 1.0, Hex(0xffffff)),
    (10.0, 16.0, 1.0, 1.0, Hex(0xffffff)),
];

/// The player character, 16x20 authored; `pos` is the top-left of that box
pub fn girl(
    out: &mut Vec<Vertex>,
    pos: Vec2,
    facing: Facing,
    walk_frame: u8,
    jumping: bool,
    scale: f32,
) {
    // Scaling happens around the sprite's horizontal center
    let origin = Vec2::new(pos.x + 8.0 * (1.0 - scale), pos.y);
    let sprite = Sprite::new(origin, scale).flipped(facing == Facing::Left);
    paint(out, &sprite, GIRL, None);

    let skin = rgba(GIRL_SKIN, 1.0);
    if jumping {
        sprite.px_rgba(out, 2.0, 8.0, 2.0, 2.0, skin);
        sprite.px_rgba(out, 12.0, 8.0, 2.0, 2.0, skin);
        sprite.px(out, 1.0, 7.0, 2.0, 2.0, 0xfac8c0);
        sprite.px(out, 13.0, 7.0, 2.0, 2.0, 0xfac8c0);

        sprite.px_rgba(out, 4.0, 17.0, 3.0, 3.0, skin);
        sprite.px_rgba(out, 9.0, 17.0, 3.0, 3.0, skin);
        sprite.px(out, 4.0, 19.0, 3.0, 1.0, GIRL_SHOE);
        sprite.px(out, 9.0, 19.0, 3.0, 1.0, GIRL_SHOE);
        sprite.px(out, 5.0, 19.0, 1.0, 1.0, GIRL_SHOE_BOW);
        sprite.px(out, 10.0, 19.0, 1.0, 1.0, GIRL_SHOE_BOW);
        return;
    }

    // Arms swing only while walking
    let arm = if walk_frame % 2 == 0 { 0.0 } else { 1.0 };
    let (left_arm, right_arm) = if walk_frame > 0 { (arm, 1.0 - arm) } else { (0.0, 0.0) };
    sprite.px_rgba(out, 2.0, 10.0 + left_arm, 2.0, 4.0, skin);
    sprite.px_rgba(out, 12.0, 10.0 + right_arm, 2.0, 4.0, skin);

    let leg = LEG_OFFSETS[usize::from(walk_frame) % LEG_OFFSETS.len()];
    sprite.px_rgba(out, 4.0, 17.0 + leg, 3.0, 3.0, skin);
    sprite.px_rgba(out, 9.0, 17.0 - leg, 3.0, 3.0, skin);
    sprite.px(out, 4.0, 19.0 + leg, 3.0, 1.0, GIRL_SHOE);
    sprite.px(out, 9.0, 19.0 - leg, 3.0, 1.0, GIRL_SHOE);
    sprite.px(out, 5.0, 19.0 + leg, 1.0, 1.0, GIRL_SHOE_BOW);
    sprite.px(out, 10.0, 19.0 - leg, 1.0, 1.0, GIRL_SHOE_BOW);
}

const SKIN_SHADE: u32 = 0xb47850;

const BOY: &[Cell] = &[
    // Hair
    (2.0, -1.0, 12.0, 7.0, Hex(0x5a3a1a)),
    (1.0, 1.0, 2.0, 8.0, Hex(0x5a3a1a)),
    (13.0, 1.0, 2.0, 8.0, Hex(0x5a3a1a)),
    (0.0, 4.0, 1.0, 4.0, Hex(0x5a3a1a)),
    (15.0, 4.0, 1.0, 4.0, Hex(0x5a3a1a)),
    (2.0, 6.0, 1.0, 3.0, Hex(0x5a3a1a)),
    (13.0, 6.0, 1.0, 3.0, Hex(0x5a3a1a)),
    (3.0, 5.0, 2.0, 2.0, Hex(0x5a3a1a)),
    (11.0, 5.0, 2.0, 2.0, Hex(0x5a3a1a)),
    (4.0, -1.0, 4.0, 2.0, Hex(0x7a5a3a)),
    (9.0, 0.0, 3.0, 2.0, Hex(0x7a5a3a)),
    (2.0, 3.0, 3.0, 2.0, Hex(0x7a5a3a)),
    (5.0, -1.0, 2.0, 1.0, Hex(0x8a6a4a)),
    (10.0, 1.0, 2.0, 1.0, Hex(0x8a6a4a)),
    (1.0, 6.0, 1.0, 2.0, Hex(0x4a2a0a)),
    (14.0, 6.0, 1.0, 2.0, Hex(0x4a2a0a)),
    // Face
    (3.0, 1.0, 10.0, 9.0, Hex(0xebbd8f)),
    (2.0, 3.0, 1.0, 5.0, Hex(0xebbd8f)),
    (13.0, 3.0, 1.0, 5.0, Hex(0xebbd8f)),
    (4.0, 8.0, 8.0, 2.0, Tint(SKIN_SHADE, 0.2)),
    (5.0, 4.0, 2.0, 3.0, Hex(0x3d2817)),
    (9.0, 4.0, 2.0, 3.0, Hex(0x3d2817)),
    (5.0, 4.0, 2.0, 2.0, Hex(0xffffff)),
    (9.0, 4.0, 2.0, 2.0, Hex(0xffffff)),
    (5.0, 5.0, 2.0, 1.0, Hex(0x1a0f08)),
    (9.0, 5.0, 2.0, 1.0, Hex(0x1a0f08)),
    (6.0, 4.0, 1.0, 1.0, Hex(0xffffff)),
    (10.0, 4.0, 1.0, 1.0, Hex(0xffffff)),
    (5.0, 3.0, 2.0, 1.0, Hex(0x4a2a0a)),
    (9.0, 3.0, 2.0, 1.0, Hex(0x4a2a0a)),
    (7.0, 6.0, 2.0, 1.0, Tint(SKIN_SHADE, 0.35)),
    (6.0, 8.0, 4.0, 1.0, Hex(0xe74c3c)),
    (6.0, 8.0, 1.0, 1.0, Hex(0xc0392b)),
    (9.0, 8.0, 1.0, 1.0, Hex(0xc0392b)),
    // Beard
    (4.0, 9.0, 8.0, 3.0, Hex(0x5a3a1a)),
    (3.0, 8.0, 1.0, 2.0, Hex(0x5a3a1a)),
    (12.0, 8.0, 1.0, 2.0, Hex(0x5a3a1a)),
    (2.0, 8.0, 1.0, 3.0, Hex(0x5a3a1a)),
    (13.0, 8.0, 1.0, 3.0, Hex(0x5a3a1a)),
    (3.0, 10.0, 10.0, 2.0, Hex(0x5a3a1a)),
    (4.0, 10.0, 1.0, 2.0, Hex(0x4a2a0a)),
    (6.0, 11.0, 1.0, 1.0, Hex(0x4a2a0a)),
    (9.0, 11.0, 1.0, 1.0, Hex(0x4a2a0a)),
    (11.0, 10.0, 1.0, 2.0, Hex(0x4a2a0a)),
    (5.0, 9.0, 2.0, 1.0, Hex(0x7a5a3a)),
    (9.0, 9.0, 2.0, 1.0, Hex(0x7a5a3a)),
    (6.0, 10.0, 2.0, 1.0, Hex(0x7a5a3a)),
    // Neck
    (5.0, 10.0, 6.0, 2.0, Hex(0xebbd8f)),
    (5.0, 10.0, 2.0, 1.0, Tint(SKIN_SHADE, 0.2)),
    (9.0, 10.0, 2.0, 1.0, Tint(SKIN_SHADE, 0.2)),
    // Shirt and tie
    (4.0, 12.0, 8.0, 3.0, Hex(0xf5f5f5)),
    (5.0, 12.0, 2.0, 1.0, Hex(0xffffff)),
    (9.0, 12.0, 2.0, 1.0, Hex(0xffffff)),
    (4.0, 12.0, 1.0, 3.0, Hex(0xe8e8e8)),
    (11.0, 12.0, 1.0, 3.0, Hex(0xe8e8e8)),
    (7.0, 12.0, 2.0, 1.0, Hex(0x8b0000)),
    (7.0, 13.0, 2.0, 6.0, Hex(0x8b0000)),
    (6.0, 19.0, 4.0, 1.0, Hex(0x8b0000)),
    (7.0, 20.0, 2.0, 1.0, Hex(0x8b0000)),
    (7.0, 12.0, 2.0, 2.0, Hex(0xa00000)),
    (7.0, 13.0, 1.0, 5.0, Hex(0xb00000)),
    // Jacket
    (3.0, 15.0, 10.0, 6.0, Hex(0x1a1a1a)),
    (2.0, 16.0, 1.0, 4.0, Hex(0x1a1a1a)),
    (13.0, 16.0, 1.0, 4.0, Hex(0x1a1a1a)),
    (3.0, 15.0, 2.0, 4.0, Hex(0x0a0a0a)),
    (11.0, 15.0, 2.0, 4.0, Hex(0x0a0a0a)),
    (5.0, 15.0, 1.0, 5.0, Hex(0x2a2a2a)),
    (10.0, 15.0, 1.0, 5.0, Hex(0x2a2a2a)),
    (6.0, 16.0, 1.0, 1.0, Hex(0x888888)),
    (6.0, 18.0, 1.0, 1.0, Hex(0x888888)),
    (0.0, 14.0, 3.0, 6.0, Hex(0x1a1a1a)),
    (13.0, 14.0, 3.0, 6.0, Hex(0x1a1a1a)),
    (0.0, 14.0, 1.0, 6.0, Hex(0x0a0a0a)),
    (15.0, 14.0, 1.0, 6.0, Hex(0x0a0a0a)),
    (0.0, 19.0, 3.0, 2.0, Hex(0xc49968)),
    (13.0, 19.0, 3.0, 2.0, Hex(0xc49968)),
    // Rose
    (-2.0, 17.0, 1.0, 5.0, Hex(0x228b22)),
    (-1.0, 16.0, 1.0, 1.0, Hex(0x228b22)),
    (-3.0, 18.0, 2.0, 1.0, Hex(0x2e8b2e)),
    (-2.0, 19.0, 1.0, 1.0, Hex(0x2e8b2e)),
    (-2.0, 14.0, 3.0, 3.0, Hex(0xdc143c)),
    (-1.0, 13.0, 2.0, 1.0, Hex(0xdc143c)),
    (-1.0, 17.0, 1.0, 1.0, Hex(0xdc143c)),
    (-1.0, 14.0, 2.0, 2.0, Hex(0xff1744)),
    (-1.0, 14.0, 1.0, 1.0, Hex(0xff6b7a)),
    // Trousers and shoes
    (4.0, 21.0, 3.0, 6.0, Hex(0x1a1a1a)),
    (9.0, 21.0, 3.0, 6.0, Hex(0x1a1a1a)),
    (4.0, 21.0, 1.0, 6.0, Hex(0x0a0a0a)),
    (11.0, 21.0, 1.0, 6.0, Hex(0x0a0a0a)),
    (5.0, 21.0, 1.0, 6.0, Hex(0x0a0a0a)),
    (10.0, 21.0, 1.0, 6.0, Hex(0x0a0a0a)),
    (3.0, 26.0, 4.0, 2.0, Hex(0x000000)),
    (9.0, 26.0, 4.0, 2.0, Hex(0x000000)),
    (4.0, 26.0, 2.0, 1.0, Hex(0x444444)),
    (10.0, 26.0, 2.0, 1.0, Hex(0x444444)),
    (4.0, 26.0, 1.0, 1.0, Hex(0x666666)),
    (10.0, 26.0, 1.0, 1.0, Hex(0x666666)),
];

/// The boyfriend in his suit, holding a rose; 16x28 authored
pub fn boy(out: &mut Vec<Vertex>, pos: Vec2, scale: f32) {
    paint(out, &Sprite::new(pos, scale), BOY, None);
}

const SPANIEL: &[Cell] = &[
    (2.0, 6.0, 12.0, 8.0, Body),
    (3.0, 7.0, 4.0, 4.0, Patches),
    (10.0, 8.0, 3.0, 3.0, Patches),
    (4.0, 1.0, 8.0, 6.0, Body),
    (2.0, 2.0, 3.0, 6.0, Ear),
    (11.0, 2.0, 3.0, 6.0, Ear),
    (6.0, 3.0, 2.0, 2.0, Hex(0x222222)),
    (9.0, 3.0, 2.0, 2.0, Hex(0x222222)),
    (6.0, 3.0, 1.0, 1.0, Hex(0xffffff)),
    (9.0, 3.0, 1.0, 1.0, Hex(0xffffff)),
    (7.0, 5.0, 2.0, 1.0, Nose),
    (8.0, 6.0, 1.0, 1.0, Hex(0xff8888)),
    (3.0, 13.0, 2.0, 3.0, Body),
    (7.0, 13.0, 2.0, 3.0, Body),
    (11.0, 13.0, 2.0, 3.0, Body),
    (13.0, 6.0, 2.0, 2.0, Patches),
];

const TUXEDO_CAT: &[Cell] = &[
    (3.0, 5.0, 10.0, 8.0, Body),
    (5.0, 6.0, 6.0, 6.0, Patches),
    (4.0, 0.0, 8.0, 6.0, Body),
    (4.0, -2.0, 2.0, 3.0, Body),
    (10.0, -2.0, 2.0, 3.0, Body),
    (5.0, -1.0, 1.0, 2.0, Hex(0xff9999)),
    (11.0, -1.0, 1.0, 2.0, Hex(0xff9999)),
    (5.0, 2.0, 2.0, 2.0, Hex(0xffd700)),
    (9.0, 2.0, 2.0, 2.0, Hex(0xffd700)),
    (6.0, 3.0, 1.0, 1.0, Hex(0x222222)),
    (10.0, 3.0, 1.0, 1.0, Hex(0x222222)),
    (5.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (9.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (7.0, 4.0, 2.0, 1.0, Nose),
    (3.0, 4.0, 2.0, 1.0, Hex(0x888888)),
    (11.0, 4.0, 2.0, 1.0, Hex(0x888888)),
    (4.0, 12.0, 2.0, 3.0, Body),
    (10.0, 12.0, 2.0, 3.0, Body),
    (4.0, 14.0, 2.0, 1.0, Patches),
    (10.0, 14.0, 2.0, 1.0, Patches),
    (13.0, 7.0, 2.0, 1.0, Body),
    (14.0, 5.0, 1.0, 3.0, Body),
];

const SHEPHERD: &[Cell] = &[
    (2.0, 6.0, 12.0, 8.0, Body),
    (4.0, 6.0, 8.0, 4.0, Patches),
    (3.0, 0.0, 10.0, 7.0, Body),
    (5.0, 4.0, 6.0, 3.0, Hex(0xd4a76a)),
    (3.0, -2.0, 3.0, 4.0, Ear),
    (10.0, -2.0, 3.0, 4.0, Ear),
    (5.0, 2.0, 2.0, 2.0, Hex(0x5a3a1a)),
    (9.0, 2.0, 2.0, 2.0, Hex(0x5a3a1a)),
    (5.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (9.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (7.0, 5.0, 2.0, 1.0, Nose),
    (3.0, 13.0, 2.0, 3.0, Body),
    (7.0, 13.0, 2.0, 3.0, Body),
    (11.0, 13.0, 2.0, 3.0, Body),
    (13.0, 5.0, 1.0, 3.0, Patches),
    (14.0, 4.0, 1.0, 2.0, Patches),
];

const AUSSIE: &[Cell] = &[
    (2.0, 6.0, 12.0, 8.0, Body),
    (5.0, 7.0, 4.0, 4.0, Patches),
    (10.0, 9.0, 3.0, 2.0, Patches),
    (3.0, 0.0, 10.0, 7.0, Body),
    (6.0, 1.0, 4.0, 5.0, Patches),
    (2.0, 1.0, 3.0, 5.0, Ear),
    (11.0, 1.0, 3.0, 5.0, Ear),
    (5.0, 3.0, 2.0, 2.0, Hex(0x8b4513)),
    (9.0, 3.0, 2.0, 2.0, Hex(0x8b4513)),
    (6.0, 3.0, 1.0, 1.0, Hex(0x222222)),
    (10.0, 3.0, 1.0, 1.0, Hex(0x222222)),
    (5.0, 3.0, 1.0, 1.0, Hex(0xffffff)),
    (9.0, 3.0, 1.0, 1.0, Hex(0xffffff)),
    (7.0, 5.0, 2.0, 1.0, Nose),
    (3.0, 13.0, 2.0, 3.0, Body),
    (7.0, 13.0, 2.0, 3.0, Body),
    (11.0, 13.0, 2.0, 3.0, Body),
    (3.0, 15.0, 2.0, 1.0, Patches),
    (11.0, 15.0, 2.0, 1.0, Patches),
    (13.0, 4.0, 3.0, 4.0, Body),
];

const BULLDOG: &[Cell] = &[
    (2.0, 6.0, 12.0, 8.0, Body),
    (2.0, 0.0, 12.0, 7.0, Body),
    (1.0, -3.0, 3.0, 5.0, Body),
    (12.0, -3.0, 3.0, 5.0, Body),
    (2.0, -2.0, 1.0, 3.0, Hex(0xffaa88)),
    (13.0, -2.0, 1.0, 3.0, Hex(0xffaa88)),
    (4.0, 3.0, 8.0, 4.0, Patches),
    (4.0, 2.0, 3.0, 2.0, Hex(0x333333)),
    (9.0, 2.0, 3.0, 2.0, Hex(0x333333)),
    (5.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (10.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (6.0, 4.0, 4.0, 2.0, Nose),
    (7.0, 5.0, 1.0, 1.0, Hex(0x111111)),
    (9.0, 5.0, 1.0, 1.0, Hex(0x111111)),
    (3.0, 13.0, 3.0, 3.0, Body),
    (10.0, 13.0, 3.0, 3.0, Body),
    (13.0, 8.0, 2.0, 2.0, Body),
];

const TORTIE_CAT: &[Cell] = &[
    (3.0, 5.0, 10.0, 8.0, Body),
    (4.0, 6.0, 3.0, 4.0, Patches),
    (9.0, 8.0, 3.0, 3.0, Patches),
    (7.0, 7.0, 2.0, 3.0, Hex(0x222222)),
    (4.0, 0.0, 8.0, 6.0, Body),
    (4.0, 0.0, 4.0, 3.0, Patches),
    (9.0, 1.0, 3.0, 2.0, Hex(0x222222)),
    (4.0, -2.0, 2.0, 3.0, Ear),
    (10.0, -2.0, 2.0, 3.0, Ear),
    (5.0, -1.0, 1.0, 2.0, Hex(0xff9999)),
    (11.0, -1.0, 1.0, 2.0, Hex(0xff9999)),
    (5.0, 2.0, 2.0, 2.0, Hex(0xf0c040)),
    (9.0, 2.0, 2.0, 2.0, Hex(0xf0c040)),
    (6.0, 3.0, 1.0, 1.0, Hex(0x222222)),
    (10.0, 3.0, 1.0, 1.0, Hex(0x222222)),
    (5.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (9.0, 2.0, 1.0, 1.0, Hex(0xffffff)),
    (7.0, 4.0, 2.0, 1.0, Nose),
    (3.0, 4.0, 2.0, 1.0, Hex(0x888888)),
    (11.0, 4.0, 2.0, 1.0, Hex(0x888888)),
    (4.0, 12.0, 2.0, 3.0, Body),
    (10.0, 12.0, 2.0, 3.0, Body),
    (13.0, 7.0, 1.0, 1.0, Patches),
    (14.0, 5.0, 1.0, 3.0, Patches),
    (14.0, 4.0, 1.0, 2.0, Body),
];

/// Two-frame tail animation: the cell shifts by `on`/`off` along one axis
struct Tail {
    cell: Cell,
    rate: f32,
    horizontal: bool,
    on: f32,
    off: f32,
}

fn animal_parts(shape: AnimalShape) -> (&'static [Cell], Tail) {
    let tail = |cell, rate, horizontal, on, off| Tail {
        cell,
        rate,
        horizontal,
        on,
        off,
    };
    match shape {
        AnimalShape::Spaniel => (
            SPANIEL,
            tail((14.0, 5.0, 1.0, 2.0, Patches), 0.15, false, 1.0, 0.0),
        ),
        AnimalShape::TuxedoCat => (
            TUXEDO_CAT,
            tail((14.0, 4.0, 1.0, 2.0, Body), 0.1, true, 0.0, 1.0),
        ),
        AnimalShape::Shepherd => (
            SHEPHERD,
            tail((14.0, 3.0, 1.0, 2.0, Patches), 0.12, false, 1.0, 0.0),
        ),
        AnimalShape::AussieShepherd => (
            AUSSIE,
            tail((14.0, 3.0, 2.0, 2.0, Body), 0.13, false, 1.0, -1.0),
        ),
        AnimalShape::Bulldog => (
            BULLDOG,
            tail((14.0, 7.0, 1.0, 2.0, Body), 0.2, false, 1.0, 0.0),
        ),
        AnimalShape::TortieCat => (
            TORTIE_CAT,
            tail((14.0, 3.0, 1.0, 2.0, Body), 0.1, true, 0.0, 1.0),
        ),
    }
}

/// Animal `index` (16x16 authored) with its top-left at `pos`
pub fn animal(out: &mut Vec<Vertex>, pos: Vec2, index: usize, scale: f32, frame: u64) {
    let Some(a) = ANIMALS.get(index) else {
        return;
    };
    let sprite = Sprite::new(pos, scale);
    let (cells, tail) = animal_parts(a.shape);
    paint(out, &sprite, cells, Some(a));

    let shift = if (frame as f32 * tail.rate).sin() > 0.0 {
        tail.on
    } else {
        tail.off
    };
    let (x, y, w, h, ink) = tail.cell;
    let (x, y) = if tail.horizontal {
        (x + shift, y)
    } else {
        (x, y + shift)
    };
    paint(out, &sprite, &[(x, y, w, h, ink)], Some(a));
}

/// Small key icon for the HUD
pub fn mini_key(out: &mut Vec<Vertex>, x: f32, y: f32, index: usize) {
    let Some(key) = KEY_COLORS.get(index) else {
        return;
    };
    let fill = rgba(key.fill, 1.0);
    circle(out, Vec2::new(x + 4.0, y + 3.0), 3.0, fill, 10);
    rect(out, x + 2.0, y + 5.0, 4.0, 6.0, fill);
    rect(out, x, y + 8.0, 3.0, 2.0, fill);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vs: &[Vertex]) -> (f32, f32, f32, f32) {
        vs.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(x0, y0, x1, y1), v| {
                (
                    x0.min(v.position[0]),
                    y0.min(v.position[1]),
                    x1.max(v.position[0]),
                    y1.max(v.position[1]),
                )
            },
        )
    }

    #[test]
    fn test_girl_mirrors_around_center() {
        let mut right = Vec::new();
        let mut left = Vec::new();
        girl(&mut right, Vec2::new(100.0, 50.0), Facing::Right, 0, false, 1.0);
        girl(&mut left, Vec2::new(100.0, 50.0), Facing::Left, 0, false, 1.0);
        assert_eq!(right.len(), left.len());
        let (r0, _, r1, _) = bounds(&right);
        let (l0, _, l1, _) = bounds(&left);
        // Hair ends stick out one pixel on either side
        assert_eq!((r0, r1), (99.0, 117.0));
        assert_eq!((l0, l1), (99.0, 117.0));
    }

    #[test]
    fn test_girl_scales_about_center() {
        let mut out = Vec::new();
        girl(&mut out, Vec2::new(100.0, 0.0), Facing::Right, 0, false, 2.0);
        let (x0, _, x1, _) = bounds(&out);
        assert_eq!((x0 + x1) / 2.0, 108.0);
    }

    #[test]
    fn test_every_animal_draws() {
        for i in 0..ANIMALS.len() {
            let mut out = Vec::new();
            animal(&mut out, Vec2::ZERO, i, 1.0, 0);
            assert!(!out.is_empty());
            assert_eq!(out.len() % 3, 0);
            let (x0, _, x1, y1) = bounds(&out);
            assert!(x0 >= 1.0 && x1 <= 16.0 && y1 <= 16.0, "animal {i} out of its box");
        }
        let mut out = Vec::new();
        animal(&mut out, Vec2::ZERO, 99, 1.0, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_tail_wags_between_frames() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        // sin(0) = 0 takes the `off` pose; sin(0.15 * 10) > 0 takes `on`
        animal(&mut a, Vec2::ZERO, 0, 1.0, 0);
        animal(&mut b, Vec2::ZERO, 0, 1.0, 10);
        assert_ne!(a.last(), b.last());
    }

    #[test]
    fn test_boy_fits_rose_and_shoes() {
        let mut out = Vec::new();
        boy(&mut out, Vec2::new(10.0, 10.0), 1.0);
        let (x0, y0, x1, y1) = bounds(&out);
        assert_eq!((x0, y0, x1, y1), (7.0, 9.0, 26.0, 38.0));
    }
}
