//! Keys, cages, checkpoints and the final door

use glam::Vec2;
use rand::Rng;

use super::level::{Tile, TileMap};
use super::particles::ParticleSystem;
use super::physics::Player;
use crate::consts::*;
use crate::{ANIMALS, KEY_COLORS};

/// A rescued animal trailing the player
#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    /// Index into [`ANIMALS`]
    pub animal: usize,
    pub pos: Vec2,
}

/// Timed "<name> rescued!" banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescueMessage {
    pub animal: usize,
    pub ticks: u32,
}

/// Per-session rescue progress
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub keys_collected: [bool; KEY_COUNT],
    pub cages_opened: [bool; KEY_COUNT],
    /// Key currently carried (at most one)
    pub held_key: Option<usize>,
    /// Rescued animals in rescue order
    pub followers: Vec<Follower>,
    /// Respawn position
    pub checkpoint: Vec2,
    pub door_open: bool,
    pub rescue_message: Option<RescueMessage>,
    /// Remaining ticks of the "wrong key" hint (0 = hidden)
    pub wrong_key_ticks: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            keys_collected: [false; KEY_COUNT],
            cages_opened: [false; KEY_COUNT],
            held_key: None,
            followers: Vec::new(),
            checkpoint: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            door_open: false,
            rescue_message: None,
            wrong_key_ticks: 0,
        }
    }
}

/// What a pickup pass changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupEvent {
    KeyCollected(usize),
    Rescued(usize),
    DoorOpened,
    WrongKey,
    CheckpointReached(Vec2),
    /// Player walked into the open final door
    EnteredDoor,
}

impl Progress {
    pub fn rescued_count(&self) -> usize {
        self.cages_opened.iter().filter(|&&o| o).count()
    }

    /// Count down message timers
    pub fn tick_messages(&mut self) {
        if let Some(msg) = &mut self.rescue_message {
            msg.ticks = msg.ticks.saturating_sub(1);
            if msg.ticks == 0 {
                self.rescue_message = None;
            }
        }
        self.wrong_key_ticks = self.wrong_key_ticks.saturating_sub(1);
    }

    /// Apply every interactive tile the player overlaps.
    ///
    /// Stops early when the player enters the door.
    pub fn resolve<R: Rng>(
        &mut self,
        player: &Player,
        map: &mut TileMap,
        particles: &mut ParticleSystem,
        rng: &mut R,
    ) -> Vec<PickupEvent> {
        let mut events = Vec::new();

        for (tx, ty) in player.span().cells() {
            let tile_center = Vec2::new(tx as f32 * TILE + TILE / 2.0, ty as f32 * TILE + TILE / 2.0);

            match map.get(tx, ty) {
                Tile::Key(k) if usize::from(k) < KEY_COUNT => {
                    let k = usize::from(k);
                    if self.held_key.is_none() {
                        self.held_key = Some(k);
                        self.keys_collected[k] = true;
                        map.set(tx, ty, Tile::Empty);
                        particles.burst(rng, tile_center, KEY_COLORS[k].fill, 10);
                        log::debug!("Picked up {} key", KEY_COLORS[k].name);
                        events.push(PickupEvent::KeyCollected(k));
                    }
                }
                Tile::Cage(c) if usize::from(c) < KEY_COUNT => {
                    let c = usize::from(c);
                    if self.cages_opened[c] {
                        continue;
                    }
                    if self.held_key == Some(c) {
                        self.cages_opened[c] = true;
                        self.held_key = None;
                        map.set(tx, ty, Tile::Empty);
                        self.followers.push(Follower {
                            animal: c,
                            pos: Vec2::new(tx as f32 * TILE, ty as f32 * TILE - 4.0),
                        });
                        self.rescue_message = Some(RescueMessage {
                            animal: c,
                            ticks: RESCUE_MESSAGE_TICKS,
                        });
                        particles.hearts(rng, tile_center, 12);
                        particles.burst(rng, tile_center, KEY_COLORS[c].fill, 15);
                        log::info!("{} rescued ({}/{})", ANIMALS[c].name, self.rescued_count(), KEY_COUNT);
                        events.push(PickupEvent::Rescued(c));

                        if self.rescued_count() == KEY_COUNT && !self.door_open {
                            self.door_open = true;
                            log::info!("All animals rescued, door is open");
                            events.push(PickupEvent::DoorOpened);
                        }
                    } else if self.wrong_key_ticks == 0 {
                        self.wrong_key_ticks = WRONG_KEY_TICKS;
                        events.push(PickupEvent::WrongKey);
                    }
                }
                Tile::Checkpoint => {
                    let at = Vec2::new(tx as f32 * TILE, ty as f32 * TILE - player.h + TILE);
                    if at != self.checkpoint {
                        self.checkpoint = at;
                        particles.confetti(rng, Vec2::new(tx as f32 * TILE + TILE / 2.0, ty as f32 * TILE));
                        log::debug!("Checkpoint at ({}, {})", tx, ty);
                        events.push(PickupEvent::CheckpointReached(at));
                    }
                }
                Tile::FinalDoor if self.door_open => {
                    events.push(PickupEvent::EnteredDoor);
                    return events;
                }
                _ => {}
            }
        }

        events
    }

    /// Pull followers along behind the player, each chasing the one ahead
    pub fn update_followers(&mut self, player: &Player) {
        let mut target = player.pos + Vec2::new(-18.0, 4.0);
        for f in &mut self.followers {
            f.pos.x += (target.x - f.pos.x) * 0.08;
            f.pos.y += (target.y - f.pos.y) * 0.12;
            target = f.pos + Vec2::new(-14.0, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::build_level;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        map: TileMap,
        progress: Progress,
        particles: ParticleSystem,
        rng: Pcg32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                map: build_level(),
                progress: Progress::default(),
                particles: ParticleSystem::new(),
                rng: Pcg32::seed_from_u64(3),
            }
        }

        fn find(&self, tile: Tile) -> (i32, i32) {
            self.map
                .iter()
                .find(|&(_, _, t)| t == tile)
                .map(|(x, y, _)| (x, y))
                .expect("tile present in level")
        }

        /// Place the player over a single tile and resolve
        fn touch(&mut self, (tx, ty): (i32, i32)) -> Vec<PickupEvent> {
            let mut player = Player::new(Vec2::new(tx as f32 * TILE + 2.0, ty as f32 * TILE - 2.0));
            player.h = TILE;
            player.w = 8.0;
            self.progress
                .resolve(&player, &mut self.map, &mut self.particles, &mut self.rng)
        }
    }

    #[test]
    fn test_out_of_range_indices_are_inert() {
        let mut f = Fixture::new();
        f.map.set(2, 2, Tile::Cage(KEY_COUNT as u8));
        f.map.set(4, 2, Tile::Key(250));
        f.progress.held_key = Some(0);
        assert!(f.touch((2, 2)).is_empty());
        assert!(f.touch((4, 2)).is_empty());
        assert_eq!(f.progress.held_key, Some(0));
        assert_eq!(f.map.get(2, 2), Tile::Cage(KEY_COUNT as u8));
        assert_eq!(f.particles.len(), 0);
    }

    #[test]
    fn test_key_pickup_marks_and_clears() {
        let mut f = Fixture::new();
        let at = f.find(Tile::Key(0));
        let events = f.touch(at);
        assert_eq!(events, vec![PickupEvent::KeyCollected(0)]);
        assert_eq!(f.progress.held_key, Some(0));
        assert!(f.progress.keys_collected[0]);
        assert_eq!(f.map.get(at.0, at.1), Tile::Empty);
        assert_eq!(f.particles.len(), 10);
    }

    #[test]
    fn test_second_key_ignored_while_holding() {
        let mut f = Fixture::new();
        let red = f.find(Tile::Key(0));
        let blue = f.find(Tile::Key(1));
        f.touch(red);
        let events = f.touch(blue);
        assert!(events.is_empty());
        assert_eq!(f.progress.held_key, Some(0));
        assert!(!f.progress.keys_collected[1]);
        assert_eq!(f.map.get(blue.0, blue.1), Tile::Key(1));
    }

    #[test]
    fn test_wrong_key_never_opens_cage() {
        let mut f = Fixture::new();
        let red = f.find(Tile::Key(0));
        let blue_cage = f.find(Tile::Cage(1));
        f.touch(red);
        let events = f.touch(blue_cage);
        assert_eq!(events, vec![PickupEvent::WrongKey]);
        assert!(!f.progress.cages_opened[1]);
        assert_eq!(f.progress.held_key, Some(0));
        assert_eq!(f.progress.wrong_key_ticks, WRONG_KEY_TICKS);
        assert_eq!(f.map.get(blue_cage.0, blue_cage.1), Tile::Cage(1));

        // A running hint is not restarted
        f.progress.tick_messages();
        f.touch(blue_cage);
        assert_eq!(f.progress.wrong_key_ticks, WRONG_KEY_TICKS - 1);
    }

    #[test]
    fn test_empty_handed_cage_shows_hint() {
        let mut f = Fixture::new();
        let cage = f.find(Tile::Cage(0));
        assert_eq!(f.touch(cage), vec![PickupEvent::WrongKey]);
    }

    #[test]
    fn test_matching_key_opens_cage_once() {
        let mut f = Fixture::new();
        let key = f.find(Tile::Key(2));
        let cage = f.find(Tile::Cage(2));
        f.touch(key);
        let events = f.touch(cage);
        assert_eq!(events, vec![PickupEvent::Rescued(2)]);
        assert!(f.progress.cages_opened[2]);
        assert_eq!(f.progress.held_key, None);
        assert_eq!(f.progress.followers.len(), 1);
        assert_eq!(
            f.progress.followers[0].pos,
            Vec2::new(cage.0 as f32 * TILE, cage.1 as f32 * TILE - 4.0)
        );
        assert_eq!(
            f.progress.rescue_message,
            Some(RescueMessage { animal: 2, ticks: RESCUE_MESSAGE_TICKS })
        );
        assert_eq!(f.particles.iter().filter(|p| p.heart).count(), 12);

        // Tile is gone: touching again does nothing
        assert!(f.touch(cage).is_empty());
        assert_eq!(f.progress.followers.len(), 1);
    }

    #[test]
    fn test_six_rescues_open_door() {
        let mut f = Fixture::new();
        let door = (172, 14);
        assert!(f.touch(door).is_empty());

        for i in 0..KEY_COUNT as u8 {
            let key = f.find(Tile::Key(i));
            let cage = f.find(Tile::Cage(i));
            f.touch(key);
            let events = f.touch(cage);
            assert!(events.contains(&PickupEvent::Rescued(i as usize)));
            assert_eq!(f.progress.door_open, i as usize == KEY_COUNT - 1);
        }

        let order: Vec<usize> = f.progress.followers.iter().map(|a| a.animal).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(f.touch(door), vec![PickupEvent::EnteredDoor]);
    }

    #[test]
    fn test_checkpoint_retouch_is_noop() {
        let mut f = Fixture::new();
        let cp = f.find(Tile::Checkpoint);
        let events = f.touch(cp);
        let expected = Vec2::new(cp.0 as f32 * TILE, cp.1 as f32 * TILE - TILE + TILE);
        assert_eq!(events, vec![PickupEvent::CheckpointReached(expected)]);
        assert_eq!(f.progress.checkpoint, expected);
        assert_eq!(f.particles.len(), 25);

        assert!(f.touch(cp).is_empty());
        assert_eq!(f.particles.len(), 25);
    }

    #[test]
    fn test_message_timers_count_down() {
        let mut p = Progress {
            rescue_message: Some(RescueMessage { animal: 0, ticks: 2 }),
            wrong_key_ticks: 1,
            ..Default::default()
        };
        p.tick_messages();
        assert_eq!(p.wrong_key_ticks, 0);
        assert!(p.rescue_message.is_some());
        p.tick_messages();
        assert!(p.rescue_message.is_none());
    }

    #[test]
    fn test_followers_trail_player() {
        let mut p = Progress::default();
        for animal in 0..3 {
            p.followers.push(Follower { animal, pos: Vec2::new(0.0, 0.0) });
        }
        let player = Player::new(Vec2::new(300.0, 100.0));
        for _ in 0..600 {
            p.update_followers(&player);
        }
        let lead = p.followers[0].pos;
        assert!((lead - Vec2::new(282.0, 104.0)).length() < 0.5);
        for pair in p.followers.windows(2) {
            assert!((pair[1].pos.x - (pair[0].pos.x - 14.0)).abs() < 0.5);
            assert!((pair[1].pos.y - pair[0].pos.y).abs() < 0.5);
        }
    }
}
