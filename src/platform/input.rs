//! Input normalization
//!
//! Browser events (keyboard codes, mouse clicks, multi-touch) are folded into
//! a single adapter that hands the simulation one `TickInput` per tick.
//! Held state persists across ticks; edge-triggered fields (jump press, taps,
//! proposal answers) are cleared after each tick consumes them.

use std::collections::BTreeMap;

use glam::Vec2;

use super::viewport::{ButtonHits, Viewport, touch_buttons};
use crate::sim::{ProposalChoice, TickInput};

/// Semantic action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
    Choose(ProposalChoice),
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_code(code: &str) -> Option<Action> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Action::Left),
        "ArrowRight" | "KeyD" => Some(Action::Right),
        "Space" | "ArrowUp" | "KeyW" => Some(Action::Jump),
        "Digit1" => Some(Action::Choose(ProposalChoice::Yes)),
        "Digit2" => Some(Action::Choose(ProposalChoice::YesInRed)),
        _ => None,
    }
}

/// Accumulates raw events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    key_left: bool,
    key_right: bool,
    key_jump: bool,
    /// Union of what the active touches are pressing
    touch: ButtonHits,
    /// Active touch points by identifier (CSS pixels)
    touches: BTreeMap<i32, Vec2>,
    jump_pressed: bool,
    interact: bool,
    pointer: Option<Vec2>,
    choice: Option<ProposalChoice>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str, repeat: bool) {
        self.interact = true;
        match action_for_code(code) {
            Some(Action::Left) => self.key_left = true,
            Some(Action::Right) => self.key_right = true,
            Some(Action::Jump) => {
                self.key_jump = true;
                if !repeat {
                    self.jump_pressed = true;
                }
            }
            Some(Action::Choose(choice)) => self.choice = Some(choice),
            None => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        match action_for_code(code) {
            Some(Action::Left) => self.key_left = false,
            Some(Action::Right) => self.key_right = false,
            Some(Action::Jump) => self.key_jump = false,
            _ => {}
        }
    }

    /// Mouse button went down at a CSS-pixel client position
    pub fn mouse_down(&mut self, viewport: &Viewport, css: Vec2) {
        self.interact = true;
        self.pointer = Some(viewport.to_game(css));
    }

    /// New touch points; `changed` holds (identifier, CSS position)
    pub fn touch_start(&mut self, viewport: &Viewport, changed: &[(i32, Vec2)]) {
        let buttons = touch_buttons(viewport);
        for &(id, css) in changed {
            self.touches.insert(id, css);
            if buttons.hit(viewport, css).jump {
                self.jump_pressed = true;
            }
        }
        if let Some(&(_, css)) = changed.first() {
            self.interact = true;
            self.pointer = Some(viewport.to_game(css));
        }
        self.refresh_touch(viewport);
    }

    /// Moved touch points; `touches` holds every active point
    pub fn touch_move(&mut self, viewport: &Viewport, touches: &[(i32, Vec2)]) {
        for &(id, css) in touches {
            self.touches.insert(id, css);
        }
        self.refresh_touch(viewport);
    }

    /// Lifted touch points
    pub fn touch_end(&mut self, viewport: &Viewport, ended: &[i32]) {
        for id in ended {
            self.touches.remove(id);
        }
        self.refresh_touch(viewport);
    }

    pub fn touch_cancel(&mut self) {
        self.touches.clear();
        self.touch = ButtonHits::default();
    }

    /// Re-test all active touches after a layout or touch change
    pub fn refresh_touch(&mut self, viewport: &Viewport) {
        let buttons = touch_buttons(viewport);
        self.touch = self
            .touches
            .values()
            .map(|&css| buttons.hit(viewport, css))
            .fold(ButtonHits::default(), |acc, h| ButtonHits {
                left: acc.left || h.left,
                right: acc.right || h.right,
                jump: acc.jump || h.jump,
            });
    }

    /// Number of fingers currently down
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Controls currently pressed by touches (for highlighting)
    pub fn touch_hits(&self) -> ButtonHits {
        self.touch
    }

    /// Input for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.key_left || self.touch.left,
            right: self.key_right || self.touch.right,
            jump: self.key_jump || self.touch.jump,
            jump_pressed: self.jump_pressed,
            interact: self.interact,
            pointer: self.pointer,
            choice: self.choice,
        }
    }

    /// Forget one-shot events once a tick has seen them
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.interact = false;
        self.pointer = None;
        self.choice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landscape() -> Viewport {
        Viewport::compute(960.0, 540.0, 1.0)
    }

    /// CSS position of a game-space point in the 960x540 landscape viewport
    fn css(x: f32, y: f32) -> Vec2 {
        Vec2::new(x * 2.0, y * 2.0)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for_code("KeyA"), Some(Action::Left));
        assert_eq!(action_for_code("ArrowRight"), Some(Action::Right));
        assert_eq!(action_for_code("KeyW"), Some(Action::Jump));
        assert_eq!(action_for_code("Space"), Some(Action::Jump));
        assert_eq!(
            action_for_code("Digit2"),
            Some(Action::Choose(ProposalChoice::YesInRed))
        );
        assert_eq!(action_for_code("KeyQ"), None);
    }

    #[test]
    fn test_held_keys_survive_clear() {
        let mut input = InputAdapter::new();
        input.key_down("ArrowLeft", false);
        input.key_down("Space", false);
        let snap = input.snapshot();
        assert!(snap.left && snap.jump && snap.jump_pressed && snap.interact);

        input.clear_edges();
        let snap = input.snapshot();
        assert!(snap.left && snap.jump);
        assert!(!snap.jump_pressed && !snap.interact);

        input.key_up("ArrowLeft");
        input.key_up("Space");
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_key_repeat_does_not_rebuffer_jump() {
        let mut input = InputAdapter::new();
        input.key_down("Space", true);
        assert!(!input.snapshot().jump_pressed);
        assert!(input.snapshot().jump);
    }

    #[test]
    fn test_digit_keys_choose() {
        let mut input = InputAdapter::new();
        input.key_down("Digit1", false);
        assert_eq!(input.snapshot().choice, Some(ProposalChoice::Yes));
        input.clear_edges();
        assert_eq!(input.snapshot().choice, None);
    }

    #[test]
    fn test_mouse_down_reports_game_point() {
        let vp = landscape();
        let mut input = InputAdapter::new();
        input.mouse_down(&vp, Vec2::new(480.0, 270.0));
        assert_eq!(input.snapshot().pointer, Some(Vec2::new(240.0, 135.0)));
    }

    #[test]
    fn test_multi_touch_union() {
        let vp = landscape();
        let mut input = InputAdapter::new();
        input.touch_start(&vp, &[(1, css(30.0, 230.0))]);
        input.touch_start(&vp, &[(2, css(440.0, 230.0))]);
        let snap = input.snapshot();
        assert!(snap.left && snap.jump && snap.jump_pressed);
        assert!(!snap.right);
        assert_eq!(input.active_touches(), 2);

        // Sliding the left thumb onto the right button
        input.touch_move(&vp, &[(1, css(90.0, 230.0)), (2, css(440.0, 230.0))]);
        let snap = input.snapshot();
        assert!(!snap.left && snap.right && snap.jump);

        input.touch_end(&vp, &[2]);
        let snap = input.snapshot();
        assert!(snap.right && !snap.jump);

        input.touch_cancel();
        let snap = input.snapshot();
        assert!(!snap.left && !snap.right && !snap.jump);
        assert_eq!(input.active_touches(), 0);
    }

    #[test]
    fn test_touch_outside_buttons_is_a_tap() {
        let vp = landscape();
        let mut input = InputAdapter::new();
        input.touch_start(&vp, &[(7, css(240.0, 100.0))]);
        let snap = input.snapshot();
        assert!(snap.interact);
        assert_eq!(snap.pointer, Some(Vec2::new(240.0, 100.0)));
        assert!(!snap.left && !snap.right && !snap.jump && !snap.jump_pressed);
    }

    #[test]
    fn test_portrait_touch_uses_device_space() {
        let vp = Viewport::compute(390.0, 844.0, 3.0);
        let mut input = InputAdapter::new();
        // CSS (340, 780) -> device (1020, 2340): jump button
        input.touch_start(&vp, &[(0, Vec2::new(340.0, 780.0))]);
        let snap = input.snapshot();
        assert!(snap.jump && snap.jump_pressed);
    }
}
