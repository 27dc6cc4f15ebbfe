//! Player physics and tile collision
//!
//! Movement is resolved one axis at a time: advance x and push out of solid
//! tiles, then advance y and push out of solid tiles and one-way platforms.
//! Resolving the axes separately keeps the player from slipping diagonally
//! through tile corners.

use glam::Vec2;

use super::level::TileMap;
use super::tick::TickInput;
use crate::consts::*;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
    pub facing: Facing,
    pub on_ground: bool,
    /// Walk cycle frame (0-3)
    pub walk_frame: u8,
    walk_timer: u8,
    /// Ticks left in which a pressed jump still fires
    pub jump_buffer: u32,
    /// Ticks left in which a jump is allowed after leaving ground
    pub coyote: u32,
    dust_cooldown: u32,
}

/// Things the caller must react to after a physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Landing position for a dust puff
    pub dust_at: Option<Vec2>,
    /// The player dropped below the bottom of the map
    pub fell_out: bool,
    /// The player overlaps a hazard tile
    pub hit_hazard: bool,
}

impl StepOutcome {
    pub fn must_respawn(&self) -> bool {
        self.fell_out || self.hit_hazard
    }
}

/// Inclusive tile range covered by a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl TileSpan {
    /// Cells overlapped by a box; the far edges are pulled in by one pixel so
    /// a box resting exactly on a tile boundary does not cover the next cell
    pub fn of(pos: Vec2, w: f32, h: f32) -> Self {
        Self {
            left: (pos.x / TILE).floor() as i32,
            right: ((pos.x + w - 1.0) / TILE).floor() as i32,
            top: (pos.y / TILE).floor() as i32,
            bottom: ((pos.y + h - 1.0) / TILE).floor() as i32,
        }
    }

    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.top..=self.bottom).flat_map(move |ty| (self.left..=self.right).map(move |tx| (tx, ty)))
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            w: PLAYER_W,
            h: PLAYER_H,
            facing: Facing::Right,
            on_ground: false,
            walk_frame: 0,
            walk_timer: 0,
            jump_buffer: 0,
            coyote: 0,
            dust_cooldown: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.w / 2.0, self.h / 2.0)
    }

    #[inline]
    pub fn feet(&self) -> Vec2 {
        self.pos + Vec2::new(self.w / 2.0, self.h)
    }

    #[inline]
    pub fn span(&self) -> TileSpan {
        TileSpan::of(self.pos, self.w, self.h)
    }

    /// Put the player back at `at`, motionless, with jump state cancelled
    pub fn respawn(&mut self, at: Vec2) {
        self.pos = at;
        self.vel = Vec2::ZERO;
        self.jump_buffer = 0;
        self.coyote = 0;
    }

    /// Place the player for a scripted scene (room entry)
    pub fn place(&mut self, at: Vec2) {
        self.pos = at;
        self.vel = Vec2::ZERO;
        self.facing = Facing::Right;
        self.walk_frame = 0;
        self.walk_timer = 0;
    }

    /// Set horizontal velocity straight from the left/right input
    fn apply_walk_input(&mut self, input: &TickInput) {
        if input.left {
            self.vel.x = -MOVE_SPEED;
            self.facing = Facing::Left;
        } else if input.right {
            self.vel.x = MOVE_SPEED;
            self.facing = Facing::Right;
        } else {
            self.vel.x *= MOVE_DAMPING;
            if self.vel.x.abs() < MOVE_SNAP {
                self.vel.x = 0.0;
            }
        }
    }

    /// Advance the walk cycle; `grounded_only` freezes it mid-air
    pub fn animate_walk(&mut self, grounded_only: bool) {
        let can_animate = self.on_ground || !grounded_only;
        if self.vel.x.abs() > 0.3 && can_animate {
            self.walk_timer += 1;
            if self.walk_timer > 6 {
                self.walk_timer = 0;
                self.walk_frame = (self.walk_frame + 1) % 4;
            }
        } else if can_animate {
            self.walk_frame = 0;
            self.walk_timer = 0;
        }
    }

    /// Lateral-only walking used in the room scene, clamped to `[min_x, max_x]`
    pub fn walk_clamped(&mut self, input: &TickInput, min_x: f32, max_x: f32) {
        self.vel.x = 0.0;
        if input.left {
            self.vel.x = -MOVE_SPEED;
        }
        if input.right {
            self.vel.x = MOVE_SPEED;
        }
        if self.vel.x != 0.0 {
            self.facing = if self.vel.x > 0.0 { Facing::Right } else { Facing::Left };
        }
        self.animate_walk(false);
        self.pos.x = (self.pos.x + self.vel.x).clamp(min_x, max_x);
    }

    /// One physics tick against the map
    pub fn step(&mut self, map: &TileMap, input: &TickInput) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        let was_on_ground = self.on_ground;

        self.apply_walk_input(input);

        // Jump buffer and coyote countdowns
        if input.jump_pressed {
            self.jump_buffer = JUMP_BUFFER_TICKS;
        }
        self.jump_buffer = self.jump_buffer.saturating_sub(1);
        if self.on_ground {
            self.coyote = COYOTE_TICKS;
        } else {
            self.coyote = self.coyote.saturating_sub(1);
        }

        // Releasing jump early cuts the rise short
        if !input.jump && self.vel.y < JUMP_CUT_THRESHOLD {
            self.vel.y *= JUMP_CUT_DAMPING;
        }

        self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL);

        // Launch after gravity so a jump leaves exactly JUMP_VEL
        if self.jump_buffer > 0 && self.coyote > 0 {
            self.vel.y = JUMP_VEL;
            self.on_ground = false;
            self.jump_buffer = 0;
            self.coyote = 0;
        }

        self.animate_walk(true);

        self.pos.x += self.vel.x;
        self.resolve_x(map);

        let fall_speed = self.vel.y;
        let prev_bottom = self.pos.y + self.h;
        self.pos.y += self.vel.y;
        self.on_ground = false;
        self.resolve_y(map, prev_bottom);

        self.dust_cooldown = self.dust_cooldown.saturating_sub(1);
        if self.on_ground
            && !was_on_ground
            && self.dust_cooldown == 0
            && fall_speed >= DUST_MIN_FALL_SPEED
        {
            outcome.dust_at = Some(self.feet());
            self.dust_cooldown = DUST_COOLDOWN_TICKS;
        }

        self.pos.x = self.pos.x.clamp(0.0, map.pixel_width() - self.w);
        if self.pos.y > map.pixel_height() + FALL_OUT_MARGIN {
            outcome.fell_out = true;
        } else if self.span().cells().any(|(tx, ty)| map.is_hazard(tx, ty)) {
            outcome.hit_hazard = true;
        }

        outcome
    }

    fn resolve_x(&mut self, map: &TileMap) {
        for (tx, ty) in self.span().cells() {
            if map.is_solid(tx, ty) {
                if self.vel.x > 0.0 {
                    self.pos.x = tx as f32 * TILE - self.w;
                } else if self.vel.x < 0.0 {
                    self.pos.x = (tx + 1) as f32 * TILE;
                }
                self.vel.x = 0.0;
            }
        }
    }

    fn resolve_y(&mut self, map: &TileMap, prev_bottom: f32) {
        for (tx, ty) in self.span().cells() {
            if map.is_solid(tx, ty) {
                if self.vel.y > 0.0 {
                    self.pos.y = ty as f32 * TILE - self.h;
                    self.vel.y = 0.0;
                    self.on_ground = true;
                } else if self.vel.y < 0.0 {
                    self.pos.y = (ty + 1) as f32 * TILE;
                    self.vel.y = 0.0;
                }
            }

            // One-way: land only when falling onto the top from above
            if map.is_platform(tx, ty) && self.vel.y > 0.0 {
                let top = ty as f32 * TILE;
                if prev_bottom <= top + PLATFORM_TOLERANCE {
                    self.pos.y = top - self.h;
                    self.vel.y = 0.0;
                    self.on_ground = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{Tile, build_level};
    use proptest::prelude::*;

    /// 10x8 box: solid floor on row 7, walls at both sides
    fn room() -> TileMap {
        let mut map = TileMap::new(10, 8);
        for x in 0..10 {
            map.set(x, 7, Tile::Ground);
        }
        map
    }

    /// Step with no input until the floor reports contact
    fn settle(p: &mut Player, map: &TileMap) {
        for _ in 0..4 {
            p.step(map, &TickInput::default());
            if p.on_ground {
                return;
            }
        }
        panic!("player never touched the floor");
    }

    fn grounded_player(map: &TileMap, x: f32) -> Player {
        let mut p = Player::new(Vec2::new(x, 7.0 * TILE - PLAYER_H));
        settle(&mut p, map);
        p
    }

    #[test]
    fn test_first_tick_is_pure_gravity() {
        let map = build_level();
        let mut p = Player::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        p.step(&map, &TickInput::default());
        assert_eq!(p.vel.y, GRAVITY);
        assert_eq!(p.pos.y, PLAYER_START_Y + GRAVITY);
        assert_eq!(p.pos.x, PLAYER_START_X);
    }

    #[test]
    fn test_grounded_jump_same_tick() {
        let map = room();
        let mut p = grounded_player(&map, 40.0);
        let jump = TickInput {
            jump: true,
            jump_pressed: true,
            ..Default::default()
        };
        p.step(&map, &jump);
        assert_eq!(p.vel.y, JUMP_VEL);
        assert!(!p.on_ground);
        assert_eq!(p.jump_buffer, 0);
        assert_eq!(p.coyote, 0);
    }

    #[test]
    fn test_jump_buffer_fires_on_landing() {
        let map = room();
        // a little above the floor, falling
        let mut p = Player::new(Vec2::new(40.0, 7.0 * TILE - PLAYER_H - 6.0));
        let press = TickInput {
            jump: true,
            jump_pressed: true,
            ..Default::default()
        };
        p.step(&map, &press);
        let hold = TickInput {
            jump: true,
            ..Default::default()
        };
        let mut jumped = false;
        for _ in 0..JUMP_BUFFER_TICKS {
            p.step(&map, &hold);
            if p.vel.y == JUMP_VEL {
                jumped = true;
                break;
            }
        }
        assert!(jumped, "buffered press should fire once grounded");
    }

    #[test]
    fn test_coyote_allows_late_jump() {
        let mut map = TileMap::new(10, 12);
        // ledge from x=0..4 on row 7, nothing to the right
        for x in 0..4 {
            map.set(x, 7, Tile::Ground);
        }
        let mut p = Player::new(Vec2::new(3.0 * TILE + 4.0, 7.0 * TILE - PLAYER_H));
        settle(&mut p, &map);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        while p.pos.x < 4.0 * TILE {
            p.step(&map, &right);
        }
        // walked off the ledge: still within the coyote window
        assert!(!p.on_ground);
        assert!(p.vel.y > 0.0);
        let jump = TickInput {
            jump: true,
            jump_pressed: true,
            ..Default::default()
        };
        p.step(&map, &jump);
        assert_eq!(p.vel.y, JUMP_VEL);
    }

    #[test]
    fn test_no_jump_without_coyote() {
        let map = room();
        let mut p = Player::new(Vec2::new(40.0, 10.0));
        for _ in 0..COYOTE_TICKS + 1 {
            p.step(&map, &TickInput::default());
        }
        let jump = TickInput {
            jump: true,
            jump_pressed: true,
            ..Default::default()
        };
        p.step(&map, &jump);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn test_released_jump_is_cut() {
        let map = room();
        let mut p = grounded_player(&map, 40.0);
        let tap = TickInput {
            jump: false,
            jump_pressed: true,
            ..Default::default()
        };
        p.step(&map, &tap);
        assert_eq!(p.vel.y, JUMP_VEL);
        p.step(&map, &TickInput::default());
        assert!((p.vel.y - (JUMP_VEL * JUMP_CUT_DAMPING + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_cut_uses_velocity_before_gravity() {
        let map = TileMap::new(10, 12);
        let mut p = Player::new(Vec2::new(40.0, 100.0));
        p.vel.y = -2.3;
        p.step(&map, &TickInput::default());
        assert!((p.vel.y - (-2.3 * JUMP_CUT_DAMPING + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_held_jump_is_not_cut() {
        let map = TileMap::new(10, 12);
        let mut p = Player::new(Vec2::new(40.0, 100.0));
        p.vel.y = -2.3;
        let hold = TickInput {
            jump: true,
            ..Default::default()
        };
        p.step(&map, &hold);
        assert!((p.vel.y - (-2.3 + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_decay_snaps_to_zero() {
        let map = room();
        let mut p = grounded_player(&map, 40.0);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        p.step(&map, &right);
        assert_eq!(p.vel.x, MOVE_SPEED);
        p.step(&map, &TickInput::default());
        assert!((p.vel.x - MOVE_SPEED * MOVE_DAMPING).abs() < 1e-6);
        for _ in 0..10 {
            p.step(&map, &TickInput::default());
        }
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_wall_stops_horizontal_motion() {
        let mut map = room();
        map.set(5, 6, Tile::Ground);
        let mut p = grounded_player(&map, 5.0 * TILE - PLAYER_W - 1.0);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        p.step(&map, &right);
        assert_eq!(p.pos.x, 5.0 * TILE - PLAYER_W);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_platform_catches_falling_player() {
        let mut map = TileMap::new(6, 12);
        map.set(2, 6, Tile::Platform);
        let mut p = Player::new(Vec2::new(2.0 * TILE, 6.0 * TILE - PLAYER_H - 3.0));
        p.vel.y = 5.0;
        p.step(&map, &TickInput::default());
        assert!(p.on_ground);
        assert_eq!(p.pos.y, 6.0 * TILE - PLAYER_H);
    }

    #[test]
    fn test_platform_passes_rising_player() {
        let mut map = TileMap::new(6, 12);
        map.set(2, 6, Tile::Platform);
        // head just below the platform, moving up
        let mut p = Player::new(Vec2::new(2.0 * TILE, 7.0 * TILE + 2.0));
        p.vel.y = -6.0;
        let hold = TickInput {
            jump: true,
            ..Default::default()
        };
        p.step(&map, &hold);
        assert_eq!(p.vel.y, -6.0 + GRAVITY);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_platform_does_not_block_sideways() {
        let mut map = TileMap::new(10, 12);
        map.set(4, 6, Tile::Platform);
        // standing inside the platform row height, walking into it
        let mut p = Player::new(Vec2::new(4.0 * TILE - PLAYER_W - 1.0, 6.0 * TILE - 4.0));
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        p.step(&map, &right);
        assert_eq!(p.vel.x, MOVE_SPEED);
        assert!(p.pos.x > 4.0 * TILE - PLAYER_W);
    }

    #[test]
    fn test_hazard_requests_respawn() {
        let mut map = room();
        map.set(3, 6, Tile::Spike);
        let mut p = Player::new(Vec2::new(3.0 * TILE, 6.0 * TILE - PLAYER_H + 4.0));
        let out = p.step(&map, &TickInput::default());
        assert!(out.hit_hazard);
        assert!(!out.fell_out);
    }

    #[test]
    fn test_falling_below_map_is_not_a_hazard() {
        let map = TileMap::new(10, 8);
        // rows past the map are solid, so the player rests well below the cutoff
        let mut p = Player::new(Vec2::new(40.0, map.pixel_height() + 100.0));
        let out = p.step(&map, &TickInput::default());
        assert!(out.fell_out);
        assert!(!out.hit_hazard);
    }

    #[test]
    fn test_respawn_clears_motion_and_jump_state() {
        let mut p = Player::new(Vec2::new(300.0, 10.0));
        p.vel = Vec2::new(2.5, 9.0);
        p.jump_buffer = 5;
        p.coyote = 3;
        p.respawn(Vec2::new(85.0, 200.0));
        assert_eq!(p.pos, Vec2::new(85.0, 200.0));
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.jump_buffer, 0);
        assert_eq!(p.coyote, 0);
    }

    #[test]
    fn test_landing_dust_once() {
        let map = room();
        let mut p = Player::new(Vec2::new(40.0, 7.0 * TILE - PLAYER_H - 30.0));
        let mut puffs = 0;
        for _ in 0..30 {
            if p.step(&map, &TickInput::default()).dust_at.is_some() {
                puffs += 1;
            }
        }
        assert_eq!(puffs, 1);
    }

    fn overlaps_solid(p: &Player, map: &TileMap) -> bool {
        p.span().cells().any(|(tx, ty)| map.is_solid(tx, ty))
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, jump, jump_pressed)| TickInput {
                left,
                right,
                jump: jump || jump_pressed,
                jump_pressed,
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds_and_out_of_walls(
            inputs in prop::collection::vec(arb_input(), 1..300)
        ) {
            let map = build_level();
            let start = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
            let mut p = Player::new(start);
            for input in &inputs {
                let out = p.step(&map, input);
                if out.must_respawn() {
                    p.respawn(start);
                }
                prop_assert!(p.pos.x >= 0.0);
                prop_assert!(p.pos.x <= map.pixel_width() - p.w);
                prop_assert!(!overlaps_solid(&p, &map));
            }
        }

        #[test]
        fn prop_platform_never_stops_rising(
            speed in 1.0f32..8.0,
            offset in 0.0f32..12.0,
            col_offset in 0.0f32..4.0
        ) {
            let mut map = TileMap::new(8, 16);
            for x in 0..8 {
                map.set(x, 6, Tile::Platform);
            }
            let mut p = Player::new(Vec2::new(2.0 * TILE + col_offset, 7.0 * TILE - offset));
            p.vel.y = -speed;
            let hold = TickInput { jump: true, ..Default::default() };
            p.step(&map, &hold);
            prop_assert_eq!(p.vel.y, -speed + GRAVITY);
        }
    }
}
