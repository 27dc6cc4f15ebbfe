//! Game state and core simulation types
//!
//! `Game` owns the current mode and the per-run `Session`. A session is
//! rebuilt from scratch every time the player leaves the title screen.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, VisibleArea};
use super::decor::Decorations;
use super::level::{TileMap, build_level};
use super::particles::ParticleSystem;
use super::physics::Player;
use super::pickup::Progress;
use crate::Rect;
use crate::consts::*;

/// Answer picked on the proposal dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalChoice {
    Yes,
    /// "Yes but in Red"
    YesInRed,
}

/// Current game mode; each variant carries only its own transient state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Start screen, waiting for any interaction
    Title { blink: bool },
    /// Platforming through the level
    Playing,
    /// Final room; the latch keeps the proposal from re-triggering
    Room { proposal_triggered: bool },
    /// Proposal dialog with two answers
    Proposal,
    /// Ending screen
    Win { choice: ProposalChoice, ticks: u32 },
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Title { .. } => "title",
            GameMode::Playing => "playing",
            GameMode::Room { .. } => "room",
            GameMode::Proposal => "proposal",
            GameMode::Win { .. } => "win",
        }
    }
}

/// Everything that is reset when a new run starts
#[derive(Debug, Clone)]
pub struct Session {
    pub map: TileMap,
    pub player: Player,
    pub progress: Progress,
    pub particles: ParticleSystem,
    pub decor: Decorations,
    pub camera: Camera,
    pub rng: Pcg32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let decor = Decorations::generate(&mut rng);
        Self {
            map: build_level(),
            player: Player::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y)),
            progress: Progress::default(),
            particles: ParticleSystem::new(),
            decor,
            camera: Camera::default(),
            rng,
        }
    }

    /// Send the player back to the last checkpoint
    pub fn respawn(&mut self) {
        self.player.respawn(self.progress.checkpoint);
        self.particles
            .burst(&mut self.rng, self.player.center(), 0xffffff, 8);
        log::debug!(
            "Respawn at ({:.0}, {:.0})",
            self.progress.checkpoint.x,
            self.progress.checkpoint.y
        );
    }
}

/// Proposal dialog buttons ("Yes", "Yes but in Red"), in game coordinates
pub fn proposal_buttons(visible: &VisibleArea) -> [Rect; 2] {
    let vc = visible.center_x();
    [
        Rect::new(vc - 90.0, 165.0, 80.0, 30.0),
        Rect::new(vc + 10.0, 165.0, 80.0, 30.0),
    ]
}

/// Top-level game: mode plus the active session
#[derive(Debug, Clone)]
pub struct Game {
    pub mode: GameMode,
    pub session: Session,
    /// Base seed; each session derives its own from it
    pub seed: u64,
    /// Ticks since the game was created (drives animation cadence)
    pub frame: u64,
    /// Visible part of the canvas, updated by the platform layer on resize
    pub visible: VisibleArea,
    sessions_started: u64,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            mode: GameMode::Title { blink: false },
            session: Session::new(seed),
            seed,
            frame: 0,
            visible: VisibleArea::default(),
            sessions_started: 0,
        }
    }

    /// Throw away the current run and build a fresh one
    pub fn start_session(&mut self) {
        self.sessions_started += 1;
        self.session = Session::new(self.seed.wrapping_add(self.sessions_started));
        log::info!("Session {} started", self.sessions_started);
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if self.mode.name() != mode.name() {
            log::info!("Mode {} -> {}", self.mode.name(), mode.name());
        }
        self.mode = mode;
    }

    /// Walk through the final door into the room
    pub fn enter_room(&mut self) {
        let at = Vec2::new(self.visible.left + 30.0, ROOM_FLOOR_Y - 22.0);
        self.session.player.place(at);
        self.set_mode(GameMode::Room {
            proposal_triggered: false,
        });
    }

    /// Record the proposal answer and show the ending
    pub fn choose(&mut self, choice: ProposalChoice) {
        self.session.particles.clear();
        log::info!("Proposal answered: {:?}", choice);
        self.set_mode(GameMode::Win { choice, ticks: 0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_on_title() {
        let game = Game::new(42);
        assert_eq!(game.mode, GameMode::Title { blink: false });
        assert_eq!(game.frame, 0);
    }

    #[test]
    fn test_session_initial_state() {
        let s = Session::new(1);
        assert_eq!(s.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(s.player.vel, Vec2::ZERO);
        assert_eq!(s.progress.checkpoint, s.player.pos);
        assert_eq!(s.progress.held_key, None);
        assert!(s.progress.followers.is_empty());
        assert!(s.particles.is_empty());
    }

    #[test]
    fn test_session_decor_is_seeded() {
        let a = Session::new(9);
        let b = Session::new(9);
        let xs = |s: &Session| s.decor.clouds.iter().map(|c| c.pos.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }

    #[test]
    fn test_enter_room_places_player() {
        let mut game = Game::new(1);
        game.visible = VisibleArea {
            left: 40.0,
            right: 440.0,
            ..Default::default()
        };
        game.session.player.vel = Vec2::new(2.5, 3.0);
        game.enter_room();
        assert_eq!(game.mode, GameMode::Room { proposal_triggered: false });
        assert_eq!(game.session.player.pos, Vec2::new(70.0, GAME_H - 62.0));
        assert_eq!(game.session.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_proposal_buttons_follow_visible_center() {
        let [yes, red] = proposal_buttons(&VisibleArea::default());
        assert_eq!(yes, Rect::new(150.0, 165.0, 80.0, 30.0));
        assert_eq!(red, Rect::new(250.0, 165.0, 80.0, 30.0));
    }
}
