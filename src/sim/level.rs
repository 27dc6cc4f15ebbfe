//! Tile map and level construction
//!
//! The level is a fixed grid of typed cells. Only key and cage cells change
//! at runtime (they become empty once consumed).

use serde::{Deserialize, Serialize};

use crate::consts::{KEY_COUNT, TILE};

/// Width of the shipped level in tiles
pub const LEVEL_W: usize = 180;
/// Height of the shipped level in tiles
pub const LEVEL_H: usize = 17;
/// Column of the final door
pub const DOOR_COLUMN: usize = 172;

/// A single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Ground,
    /// One-way platform (solid only when landing on top)
    Platform,
    Spike,
    Lava,
    /// Animated top row of a lava pit
    LavaTop,
    /// Locked cage holding animal `n`, opened by key `n`; `n < KEY_COUNT`
    Cage(u8),
    /// Key `n`; `n < KEY_COUNT`
    Key(u8),
    FinalDoor,
    Checkpoint,
    Flower,
    Grass,
    Brick,
    Bridge,
}

/// Payload-free tile classification (used to index tile painters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Empty,
    Ground,
    Platform,
    Spike,
    Lava,
    LavaTop,
    Cage,
    Key,
    FinalDoor,
    Checkpoint,
    Flower,
    Grass,
    Brick,
    Bridge,
}

impl TileKind {
    pub const COUNT: usize = 14;

    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::Empty,
        TileKind::Ground,
        TileKind::Platform,
        TileKind::Spike,
        TileKind::Lava,
        TileKind::LavaTop,
        TileKind::Cage,
        TileKind::Key,
        TileKind::FinalDoor,
        TileKind::Checkpoint,
        TileKind::Flower,
        TileKind::Grass,
        TileKind::Brick,
        TileKind::Bridge,
    ];

    /// Dense index in `0..COUNT`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Tile {
    const CAGE_BASE: u8 = 10;
    const KEY_BASE: u8 = 20;

    pub fn kind(self) -> TileKind {
        match self {
            Tile::Empty => TileKind::Empty,
            Tile::Ground => TileKind::Ground,
            Tile::Platform => TileKind::Platform,
            Tile::Spike => TileKind::Spike,
            Tile::Lava => TileKind::Lava,
            Tile::LavaTop => TileKind::LavaTop,
            Tile::Cage(_) => TileKind::Cage,
            Tile::Key(_) => TileKind::Key,
            Tile::FinalDoor => TileKind::FinalDoor,
            Tile::Checkpoint => TileKind::Checkpoint,
            Tile::Flower => TileKind::Flower,
            Tile::Grass => TileKind::Grass,
            Tile::Brick => TileKind::Brick,
            Tile::Bridge => TileKind::Bridge,
        }
    }

    /// Stable integer code of the tile. Cage and key indices must be below
    /// `KEY_COUNT`, the only values `from_code` produces.
    pub fn code(self) -> u8 {
        match self {
            Tile::Empty => 0,
            Tile::Ground => 1,
            Tile::Platform => 2,
            Tile::Spike => 3,
            Tile::Lava => 4,
            Tile::Cage(i) => Self::CAGE_BASE + i,
            Tile::Key(i) => Self::KEY_BASE + i,
            Tile::FinalDoor => 30,
            Tile::Checkpoint => 31,
            Tile::Flower => 32,
            Tile::Grass => 33,
            Tile::Brick => 34,
            Tile::Bridge => 35,
            Tile::LavaTop => 36,
        }
    }

    /// Decode an integer tile code; unknown codes yield `None`
    pub fn from_code(code: u8) -> Option<Self> {
        let n = KEY_COUNT as u8;
        Some(match code {
            0 => Tile::Empty,
            1 => Tile::Ground,
            2 => Tile::Platform,
            3 => Tile::Spike,
            4 => Tile::Lava,
            c if (Self::CAGE_BASE..Self::CAGE_BASE + n).contains(&c) => {
                Tile::Cage(c - Self::CAGE_BASE)
            }
            c if (Self::KEY_BASE..Self::KEY_BASE + n).contains(&c) => Tile::Key(c - Self::KEY_BASE),
            30 => Tile::FinalDoor,
            31 => Tile::Checkpoint,
            32 => Tile::Flower,
            33 => Tile::Grass,
            34 => Tile::Brick,
            35 => Tile::Bridge,
            36 => Tile::LavaTop,
            _ => return None,
        })
    }

    /// Blocks movement on both axes
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Ground | Tile::Brick | Tile::Bridge)
    }

    /// Kills the player on contact
    pub fn is_hazard(self) -> bool {
        matches!(self, Tile::Spike | Tile::Lava | Tile::LavaTop)
    }
}

/// Static level grid (row-major, `cells[y * width + x]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileMap {
    /// Empty map of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Tile::Empty; width * height],
        }
    }

    /// Build a map from rows of tile codes (all rows must share a length)
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut map = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (x, &code) in row.iter().enumerate() {
                map.set(x as i32, y as i32, Tile::from_code(code)?);
            }
        }
        Some(map)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Map width in pixels
    #[inline]
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE
    }

    /// Map height in pixels
    #[inline]
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE
    }

    #[inline]
    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            None
        } else {
            Some(ty as usize * self.width + tx as usize)
        }
    }

    /// Tile at (tx, ty); out-of-range cells read as empty
    #[inline]
    pub fn get(&self, tx: i32, ty: i32) -> Tile {
        self.index(tx, ty).map(|i| self.cells[i]).unwrap_or(Tile::Empty)
    }

    /// Write a tile; out-of-range writes are ignored
    pub fn set(&mut self, tx: i32, ty: i32, tile: Tile) {
        if let Some(i) = self.index(tx, ty) {
            self.cells[i] = tile;
        }
    }

    /// Solid for collision; out-of-range cells are solid so the player
    /// cannot leave the map through a boundary gap
    #[inline]
    pub fn is_solid(&self, tx: i32, ty: i32) -> bool {
        self.index(tx, ty).map(|i| self.cells[i].is_solid()).unwrap_or(true)
    }

    #[inline]
    pub fn is_platform(&self, tx: i32, ty: i32) -> bool {
        self.get(tx, ty) == Tile::Platform
    }

    #[inline]
    pub fn is_hazard(&self, tx: i32, ty: i32) -> bool {
        self.get(tx, ty).is_hazard()
    }

    fn fill_row(&mut self, y: i32, x1: i32, x2: i32, tile: Tile) {
        for x in x1..=x2 {
            self.set(x, y, tile);
        }
    }

    /// Iterate all cells as (tx, ty, tile)
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &t)| {
            ((i % self.width) as i32, (i / self.width) as i32, t)
        })
    }
}

/// Build the hand-authored level: six sections with a key, a cage and a
/// checkpoint each, then the final door.
pub fn build_level() -> TileMap {
    use Tile::*;

    let mut m = TileMap::new(LEVEL_W, LEVEL_H);
    let last = LEVEL_W as i32 - 1;

    // Floor across the whole level
    m.fill_row(16, 0, last, Ground);
    m.fill_row(15, 0, 4, Ground);

    // Section 1: start area, red key, Awice
    m.fill_row(15, 0, 28, Ground);
    m.fill_row(12, 5, 9, Platform);
    m.fill_row(10, 11, 15, Platform);
    m.set(13, 9, Key(0));
    m.set(24, 13, Cage(0));
    m.fill_row(14, 22, 26, Ground);
    m.fill_row(15, 22, 26, Ground);
    m.set(27, 14, Checkpoint);
    for (x, deco) in [(2, Flower), (4, Grass), (7, Flower), (18, Grass), (20, Flower)] {
        m.set(x, 14, deco);
    }

    // Section 2: spike gauntlet, blue key, Ella
    m.fill_row(15, 29, 55, Ground);
    m.fill_row(14, 33, 35, Spike);
    m.fill_row(11, 31, 35, Platform);
    m.fill_row(11, 37, 41, Platform);
    m.fill_row(14, 39, 41, Spike);
    m.fill_row(8, 43, 47, Platform);
    m.set(45, 7, Key(1));
    m.fill_row(11, 43, 46, Platform);
    m.set(51, 13, Cage(1));
    m.fill_row(14, 49, 53, Ground);
    m.set(54, 14, Checkpoint);
    m.set(30, 14, Grass);
    m.set(48, 14, Flower);

    // Section 3: lava pit, green key, Malmoo
    m.fill_row(15, 56, 62, Ground);
    m.fill_row(16, 63, 72, Lava);
    m.fill_row(15, 63, 72, LavaTop);
    m.fill_row(13, 61, 62, Platform);
    m.fill_row(12, 63, 67, Platform);
    m.fill_row(12, 69, 73, Platform);
    m.set(71, 10, Key(2));
    m.fill_row(15, 73, 85, Ground);
    m.set(80, 13, Cage(2));
    m.fill_row(14, 78, 82, Ground);
    m.set(84, 14, Checkpoint);
    for (x, deco) in [(57, Grass), (59, Flower), (75, Grass), (77, Flower)] {
        m.set(x, 14, deco);
    }

    // Section 4: vertical climb, yellow key, Parm
    m.fill_row(15, 86, 112, Ground);
    m.fill_row(13, 88, 92, Platform);
    m.fill_row(11, 94, 98, Platform);
    m.fill_row(9, 88, 92, Platform);
    m.fill_row(7, 94, 98, Platform);
    m.fill_row(5, 89, 93, Platform);
    m.set(91, 4, Key(3));
    m.fill_row(14, 93, 97, Spike);
    m.set(106, 13, Cage(3));
    m.fill_row(14, 104, 108, Ground);
    m.set(111, 14, Checkpoint);
    for (x, deco) in [(87, Flower), (100, Grass), (102, Flower)] {
        m.set(x, 14, deco);
    }

    // Section 5: mixed hazards, purple key, Frito
    m.fill_row(15, 113, 121, Ground);
    m.fill_row(14, 119, 121, Spike);
    m.fill_row(16, 122, 126, Lava);
    m.fill_row(15, 122, 126, LavaTop);
    m.fill_row(13, 116, 118, Platform);
    m.fill_row(11, 118, 121, Platform);
    m.fill_row(11, 123, 126, Platform);
    m.set(124, 9, Key(4));
    m.fill_row(15, 127, 142, Ground);
    m.fill_row(14, 130, 132, Spike);
    m.fill_row(11, 130, 134, Platform);
    m.set(137, 13, Cage(4));
    m.fill_row(14, 135, 139, Ground);
    m.set(141, 14, Checkpoint);
    for (x, deco) in [(114, Grass), (116, Flower), (128, Grass)] {
        m.set(x, 14, deco);
    }

    // Section 6: final challenge, orange key, Lil Lady
    m.fill_row(15, 143, 150, Ground);
    m.fill_row(14, 149, 150, Spike);
    m.fill_row(16, 151, 155, Lava);
    m.fill_row(15, 151, 155, LavaTop);
    m.fill_row(12, 148, 151, Platform);
    m.fill_row(12, 153, 156, Platform);
    m.fill_row(10, 154, 158, Platform);
    m.set(156, 9, Key(5));
    m.fill_row(14, 156, 158, Spike);
    m.fill_row(15, 156, 170, Ground);
    m.fill_row(11, 158, 161, Platform);
    m.set(164, 13, Cage(5));
    m.fill_row(14, 162, 166, Ground);
    for (x, deco) in [(144, Flower), (146, Grass), (167, Flower), (169, Grass)] {
        m.set(x, 14, deco);
    }

    // Final door
    let door = DOOR_COLUMN as i32;
    m.set(door, 13, FinalDoor);
    m.set(door, 14, FinalDoor);
    m.fill_row(15, 168, last, Ground);

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_closed_enum() {
        for code in 0..=u8::MAX {
            if let Some(tile) = Tile::from_code(code) {
                assert_eq!(tile.code(), code);
            }
        }
        assert_eq!(Tile::from_code(15), Some(Tile::Cage(5)));
        assert_eq!(Tile::from_code(16), None);
        assert_eq!(Tile::from_code(26), None);
    }

    #[test]
    fn test_out_of_range_conventions() {
        let map = TileMap::new(4, 4);
        assert!(map.is_solid(-1, 0));
        assert!(map.is_solid(4, 0));
        assert!(map.is_solid(0, 4));
        assert!(!map.is_solid(0, 0));
        assert_eq!(map.get(-1, -1), Tile::Empty);
        assert!(!map.is_platform(10, 10));
        assert!(!map.is_hazard(10, 10));
    }

    #[test]
    fn test_level_has_one_key_and_cage_per_color() {
        let map = build_level();
        assert_eq!(map.width(), LEVEL_W);
        assert_eq!(map.height(), LEVEL_H);
        for i in 0..KEY_COUNT as u8 {
            let keys = map.iter().filter(|&(_, _, t)| t == Tile::Key(i)).count();
            let cages = map.iter().filter(|&(_, _, t)| t == Tile::Cage(i)).count();
            assert_eq!(keys, 1, "key {i}");
            assert_eq!(cages, 1, "cage {i}");
        }
    }

    #[test]
    fn test_level_checkpoints_and_door() {
        let map = build_level();
        let checkpoints = map.iter().filter(|&(_, _, t)| t == Tile::Checkpoint).count();
        assert_eq!(checkpoints, 5);
        assert_eq!(map.get(DOOR_COLUMN as i32, 13), Tile::FinalDoor);
        assert_eq!(map.get(DOOR_COLUMN as i32, 14), Tile::FinalDoor);
    }

    #[test]
    fn test_level_is_deterministic() {
        assert_eq!(build_level(), build_level());
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_unknown() {
        assert!(TileMap::from_rows(&[&[0, 0], &[1]]).is_none());
        assert!(TileMap::from_rows(&[&[0, 99]]).is_none());
        let map = TileMap::from_rows(&[&[0, 2], &[1, 1]]).unwrap();
        assert!(map.is_platform(1, 0));
        assert!(map.is_solid(0, 1));
    }
}
