//! Presentation settings
//!
//! Read once at startup from the canvas `data-settings` attribute (JSON).
//! Settings never change gameplay and are never written back.

use serde::{Deserialize, Serialize};

/// When to draw the on-screen touch controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TouchControls {
    /// Only on touch-capable devices
    #[default]
    Auto,
    Always,
    Never,
}

impl TouchControls {
    pub fn as_str(&self) -> &'static str {
        match self {
            TouchControls::Auto => "auto",
            TouchControls::Always => "always",
            TouchControls::Never => "never",
        }
    }

    /// Resolve against whether the device reports touch support
    pub fn visible(&self, touch_device: bool) -> bool {
        match self {
            TouchControls::Auto => touch_device,
            TouchControls::Always => true,
            TouchControls::Never => false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw particle effects (hearts, dust, confetti)
    pub particles: bool,
    /// Darken the screen edges while playing
    pub vignette: bool,
    pub touch_controls: TouchControls,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            vignette: true,
            touch_controls: TouchControls::Auto,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Attribute on the canvas element holding the settings JSON
    pub const ATTRIBUTE: &'static str = "data-settings";

    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from the canvas attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        match canvas.get_attribute(Self::ATTRIBUTE) {
            Some(json) => {
                let settings = Self::from_json_or_default(&json);
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"vignette": false, "touch_controls": "always"}"#)
            .expect("valid json");
        assert!(!s.vignette);
        assert_eq!(s.touch_controls, TouchControls::Always);
        assert!(s.particles);
        assert!(!s.show_fps);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json_or_default("{not json"), Settings::default());
        assert_eq!(
            Settings::from_json_or_default(r#"{"touch_controls": "sometimes"}"#),
            Settings::default()
        );
    }

    #[test]
    fn test_touch_controls_visibility() {
        assert!(TouchControls::Auto.visible(true));
        assert!(!TouchControls::Auto.visible(false));
        assert!(TouchControls::Always.visible(false));
        assert!(!TouchControls::Never.visible(true));
        assert_eq!(TouchControls::Never.as_str(), "never");
    }
}
