//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one 1/60 s step. All per-tick
//! constants (speeds, gravity, timers) are expressed in ticks.

use glam::Vec2;
use rand::Rng;

use super::pickup::PickupEvent;
use super::state::{Game, GameMode, ProposalChoice, proposal_buttons};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move left is held
    pub left: bool,
    /// Move right is held
    pub right: bool,
    /// Jump is held
    pub jump: bool,
    /// Jump went down since the previous tick
    pub jump_pressed: bool,
    /// Any key, click or tap since the previous tick
    pub interact: bool,
    /// Click/tap position in game coordinates since the previous tick
    pub pointer: Option<Vec2>,
    /// Proposal answer picked from the keyboard
    pub choice: Option<ProposalChoice>,
}

/// Room x the player must walk up to for the proposal to start
fn proposal_spot(game: &Game) -> f32 {
    game.visible.right - 70.0
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput) {
    game.frame += 1;

    match game.mode {
        GameMode::Title { .. } => {
            if input.interact || input.pointer.is_some() {
                game.start_session();
                game.set_mode(GameMode::Playing);
                return;
            }
            game.mode = GameMode::Title {
                blink: (game.frame / 30) % 2 == 1,
            };
        }
        GameMode::Playing => tick_playing(game, input),
        GameMode::Room { proposal_triggered } => {
            let (min_x, max_x) = (game.visible.left + 10.0, game.visible.right - 30.0);
            game.session.player.walk_clamped(input, min_x, max_x);

            if !proposal_triggered && (game.session.player.pos.x - proposal_spot(game)).abs() < 25.0 {
                game.mode = GameMode::Room {
                    proposal_triggered: true,
                };
                game.set_mode(GameMode::Proposal);
            }
            game.session.particles.update();
        }
        GameMode::Proposal => {
            let clicked = input.pointer.and_then(|p| {
                let [yes, red] = proposal_buttons(&game.visible);
                if yes.contains(p) {
                    Some(ProposalChoice::Yes)
                } else if red.contains(p) {
                    Some(ProposalChoice::YesInRed)
                } else {
                    None
                }
            });
            if let Some(choice) = input.choice.or(clicked) {
                game.choose(choice);
                return;
            }

            let s = &mut game.session;
            if game.frame % 8 == 0 {
                let x = GAME_W / 2.0 + (s.rng.random::<f32>() - 0.5) * 100.0;
                s.particles.hearts(&mut s.rng, Vec2::new(x, GAME_H / 2.0), 1);
            }
            s.particles.update();
        }
        GameMode::Win { choice, ticks } => {
            if input.pointer.is_some() && ticks > WIN_REPLAY_DELAY_TICKS {
                game.set_mode(GameMode::Title { blink: false });
                return;
            }

            let ticks = ticks + 1;
            game.mode = GameMode::Win { choice, ticks };
            let s = &mut game.session;
            if ticks % 5 == 0 {
                let x = s.rng.random::<f32>() * GAME_W;
                s.particles.hearts(&mut s.rng, Vec2::new(x, -5.0), 1);
            }
            s.particles.update();
        }
    }
}

fn tick_playing(game: &mut Game, input: &TickInput) {
    let s = &mut game.session;

    let outcome = s.player.step(&s.map, input);
    if let Some(at) = outcome.dust_at {
        s.particles.dust(&mut s.rng, at);
    }
    if outcome.hit_hazard {
        s.respawn();
        return;
    }
    if outcome.fell_out {
        s.respawn();
    }

    let events = s
        .progress
        .resolve(&s.player, &mut s.map, &mut s.particles, &mut s.rng);
    if events.contains(&PickupEvent::EnteredDoor) {
        game.enter_room();
        return;
    }

    s.camera
        .follow(s.player.center(), s.map.pixel_width(), s.map.pixel_height());
    s.progress.tick_messages();
    s.progress.update_followers(&s.player);
    s.particles.update();
    s.decor.update(game.frame);
}
