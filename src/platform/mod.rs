//! Platform abstraction layer
//!
//! Handles browser specifics the simulation must not see:
//! - Input events (keyboard codes, mouse, multi-touch)
//! - Canvas geometry (letterbox/portrait zoom, on-screen controls)

pub mod input;
pub mod viewport;

pub use input::{Action, InputAdapter, action_for_code};
pub use viewport::{ButtonHits, ButtonSpace, Orientation, TouchButtons, Viewport, touch_buttons};
