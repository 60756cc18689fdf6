//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen shake on pickups and hits
    pub screen_shake: bool,
    /// Reduced motion (no shake, no hit flash)
    pub reduced_motion: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the on-screen touch buttons
    pub touch_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            reduced_motion: false,
            show_fps: false,
            touch_controls: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "prisci_settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective hit flash (respects reduced_motion)
    pub fn effective_hit_flash(&self) -> bool {
        !self.reduced_motion
    }

    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Discarding stored settings: {}", e);
                Self::default()
            }
        }
    }
}
