//! Player settings and preferences
//!
//! Persisted as JSON in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::catalog::{ToyConfig, default_toy, find_toy};
use crate::consts::{MAX_TOY_COUNT, MIN_TOY_COUNT};
use crate::renderer::RenderOptions;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0); 0 means silent
    pub volume: f32,
    /// Simultaneous critters (1 - 8)
    pub toy_count: usize,
    /// Catalog id of the selected toy
    pub selected_toy: String,

    // === Visual Effects ===
    /// Trails behind fast critters
    pub trails: bool,
    /// Catch bursts
    pub particles: bool,

    /// Pause when the tab is hidden or the window loses focus
    pub auto_pause: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.5,
            toy_count: 1,
            selected_toy: "mouse_grey".to_string(),
            trails: true,
            particles: true,
            auto_pause: true,
        }
    }
}

impl Settings {
    /// Clamp out-of-range values (hand-edited storage, older versions)
    pub fn sanitized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            Self::default().volume
        };
        self.toy_count = self.toy_count.clamp(MIN_TOY_COUNT, MAX_TOY_COUNT);
        self
    }

    /// The selected catalog toy, or the first one if the id is unknown
    pub fn toy(&self) -> ToyConfig {
        find_toy(&self.selected_toy).unwrap_or_else(default_toy)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            trails: self.trails,
            particles: self.particles,
        }
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Self>(json).ok().map(Self::sanitized)
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "pounce_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Ignoring unreadable settings in LocalStorage");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::debug!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.volume, 0.5);
        assert_eq!(s.toy_count, 1);
        assert_eq!(s.toy().id, "mouse_grey");
        assert_eq!(s.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_json_fills_missing_fields() {
        let s = Settings::from_json(r#"{"volume": 0.2, "toy_count": 3}"#).unwrap();
        assert_eq!(s.volume, 0.2);
        assert_eq!(s.toy_count, 3);
        assert!(s.trails);
        assert_eq!(s.selected_toy, "mouse_grey");
    }

    #[test]
    fn test_json_clamps_and_rejects() {
        let s = Settings::from_json(r#"{"volume": 4.0, "toy_count": 40}"#).unwrap();
        assert_eq!(s.volume, 1.0);
        assert_eq!(s.toy_count, MAX_TOY_COUNT);
        assert!(Settings::from_json("not json").is_none());
    }

    #[test]
    fn test_unknown_toy_falls_back() {
        let s = Settings {
            selected_toy: "dragon".into(),
            ..Default::default()
        };
        assert_eq!(s.toy().id, crate::catalog::default_toys()[0].id);
    }

    #[test]
    fn test_round_trip_through_storage_format() {
        let s = Settings {
            volume: 0.0,
            toy_count: 5,
            selected_toy: "fish_orange".into(),
            trails: false,
            particles: true,
            auto_pause: false,
        };
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), Some(s));
    }
}
