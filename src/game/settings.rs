use crate::game::store::Store;
use crate::model::{Difficulty, DisplayMode, SettingsChange};
use serde::{Deserialize, Serialize};

pub const SETTINGS_KEY: &str = "chromaVerseSettings";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub display_mode: DisplayMode,

    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    #[serde(default = "default_true")]
    pub animations_enabled: bool,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            difficulty: Difficulty::default(),
            display_mode: DisplayMode::default(),
            sound_enabled: true,
            animations_enabled: true,
            version: 1,
        }
    }
}

impl Settings {
    pub fn load(store: &dyn Store) -> Self {
        if let Some(contents) = store.get(SETTINGS_KEY) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(e) => {
                    log::warn!(target: "settings", "Ignoring unreadable settings: {}", e);
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, store: &mut dyn Store) -> std::io::Result<()> {
        let contents = serde_json::to_string(self)?;
        store.set(SETTINGS_KEY, &contents)
    }

    pub fn apply(&mut self, change: &SettingsChange) {
        if let Some(sound_enabled) = change.sound_enabled {
            self.sound_enabled = sound_enabled;
        }
        if let Some(animations_enabled) = change.animations_enabled {
            self.animations_enabled = animations_enabled;
        }
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::store::MemoryStore;
    use serial_test::serial;

    #[test]
    fn test_missing_settings_use_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let store = MemoryStore::new().with(SETTINGS_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let store = MemoryStore::new().with(
            SETTINGS_KEY,
            r#"{"version": 0, "difficulty": "hard", "sound_enabled": false}"#,
        );
        let settings = Settings::load(&store);
        assert_eq!(settings.version, 1);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.display_mode, DisplayMode::Rgb);
        assert!(!settings.sound_enabled);
        assert!(settings.animations_enabled);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.display_mode = DisplayMode::Hsl;
        settings.apply(&SettingsChange {
            sound_enabled: None,
            animations_enabled: Some(false),
        });
        settings.save(&mut store).unwrap();

        let loaded = Settings::load(&store);
        assert_eq!(loaded.display_mode, DisplayMode::Hsl);
        assert!(!loaded.animations_enabled);
        assert!(loaded.sound_enabled);
    }

    #[test]
    #[serial]
    fn test_seed_from_env() {
        std::env::set_var("SEED", "1234");
        assert_eq!(Settings::seed_from_env(), Some(1234));
        std::env::set_var("SEED", "not-a-number");
        assert_eq!(Settings::seed_from_env(), None);
        std::env::remove_var("SEED");
        assert_eq!(Settings::seed_from_env(), None);
    }
}
