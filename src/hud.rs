//! Text overlay model
//!
//! Words are rendered by the page, not the GPU. This module decides what the
//! overlay elements should say for the current game state; the browser
//! driver copies it into the DOM.

use crate::consts::KEY_COUNT;
use crate::sim::{Game, GameMode};
use crate::{ANIMALS, KEY_COLORS};

/// Which overlay panel is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Title,
    Hud,
    Room,
    Proposal,
    Win,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Title,
        Panel::Hud,
        Panel::Room,
        Panel::Proposal,
        Panel::Win,
    ];

    /// DOM id of the panel element
    pub fn element_id(self) -> &'static str {
        match self {
            Panel::Title => "title",
            Panel::Hud => "hud",
            Panel::Room => "room-hint",
            Panel::Proposal => "proposal",
            Panel::Win => "win",
        }
    }
}

/// A fading message
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub opacity: f32,
}

/// Everything the overlay shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub panel: Panel,
    /// Blinking prompt ("Tap to Start" / "Tap to play again") is lit
    pub prompt_on: bool,
    pub rescued: String,
    pub key_label: String,
    /// CSS color for the key label
    pub key_color: String,
    pub rescue: Option<Banner>,
    pub wrong_key: Option<Banner>,
    pub roster: [&'static str; KEY_COUNT],
}

fn css_hex(hex: u32) -> String {
    format!("#{:06x}", hex & 0xff_ffff)
}

impl Overlay {
    pub fn from_game(game: &Game) -> Self {
        let progress = &game.session.progress;
        let (panel, prompt_on) = match game.mode {
            GameMode::Title { blink } => (Panel::Title, !blink),
            GameMode::Playing => (Panel::Hud, false),
            GameMode::Room { .. } => (Panel::Room, false),
            GameMode::Proposal => (Panel::Proposal, false),
            GameMode::Win { .. } => (Panel::Win, (game.frame / 40) % 2 == 0),
        };

        let (key_label, key_color) = match progress.held_key {
            Some(index) if index < KEY_COUNT => {
                ("Key:".to_string(), css_hex(KEY_COLORS[index].fill))
            }
            _ => ("Key: ---".to_string(), css_hex(0x888888)),
        };

        let rescue = progress.rescue_message.as_ref().and_then(|msg| {
            let animal = ANIMALS.get(msg.animal)?;
            Some(Banner {
                text: format!("{} rescued!", animal.name),
                opacity: (msg.ticks as f32 / 30.0).min(1.0),
            })
        });
        let wrong_key = (progress.wrong_key_ticks > 0).then(|| Banner {
            text: "Wrong key!".to_string(),
            opacity: (progress.wrong_key_ticks as f32 / 20.0).min(1.0),
        });

        Self {
            panel,
            prompt_on,
            rescued: format!("{}/{} Rescued", progress.rescued_count(), KEY_COUNT),
            key_label,
            key_color,
            rescue,
            wrong_key,
            roster: ANIMALS.map(|a| a.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ProposalChoice, RescueMessage};

    fn playing() -> Game {
        let mut game = Game::new(5);
        game.start_session();
        game.set_mode(GameMode::Playing);
        game
    }

    #[test]
    fn test_panel_per_mode() {
        let mut game = Game::new(5);
        assert_eq!(Overlay::from_game(&game).panel, Panel::Title);
        game.start_session();
        game.set_mode(GameMode::Playing);
        assert_eq!(Overlay::from_game(&game).panel, Panel::Hud);
        game.enter_room();
        assert_eq!(Overlay::from_game(&game).panel, Panel::Room);
        game.set_mode(GameMode::Proposal);
        assert_eq!(Overlay::from_game(&game).panel, Panel::Proposal);
        game.choose(ProposalChoice::Yes);
        assert_eq!(Overlay::from_game(&game).panel, Panel::Win);
    }

    #[test]
    fn test_title_prompt_follows_blink() {
        let mut game = Game::new(5);
        game.mode = GameMode::Title { blink: false };
        assert!(Overlay::from_game(&game).prompt_on);
        game.mode = GameMode::Title { blink: true };
        assert!(!Overlay::from_game(&game).prompt_on);
    }

    #[test]
    fn test_key_label() {
        let mut game = playing();
        let overlay = Overlay::from_game(&game);
        assert_eq!(overlay.key_label, "Key: ---");
        assert_eq!(overlay.key_color, "#888888");

        game.session.progress.held_key = Some(1);
        let overlay = Overlay::from_game(&game);
        assert_eq!(overlay.key_label, "Key:");
        assert_eq!(overlay.key_color, "#3498db");
    }

    #[test]
    fn test_rescue_banner_fades_out() {
        let mut game = playing();
        assert_eq!(Overlay::from_game(&game).rescue, None);

        game.session.progress.rescue_message = Some(RescueMessage {
            animal: 0,
            ticks: 120,
        });
        let banner = Overlay::from_game(&game).rescue.unwrap();
        assert_eq!(banner.text, format!("{} rescued!", ANIMALS[0].name));
        assert_eq!(banner.opacity, 1.0);

        game.session.progress.rescue_message = Some(RescueMessage {
            animal: 0,
            ticks: 15,
        });
        assert_eq!(Overlay::from_game(&game).rescue.unwrap().opacity, 0.5);
    }

    #[test]
    fn test_wrong_key_banner() {
        let mut game = playing();
        game.session.progress.wrong_key_ticks = 10;
        let banner = Overlay::from_game(&game).wrong_key.unwrap();
        assert_eq!(banner.text, "Wrong key!");
        assert_eq!(banner.opacity, 0.5);
    }

    #[test]
    fn test_rescued_count_text() {
        let game = playing();
        assert_eq!(Overlay::from_game(&game).rescued, "0/6 Rescued");
    }

    #[test]
    fn test_element_ids_unique() {
        let mut ids: Vec<_> = Panel::ALL.iter().map(|p| p.element_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Panel::ALL.len());
    }
}
