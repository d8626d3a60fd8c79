//! Game settings and preferences
//!
//! Persisted separately from the profile scalars, under their own key.

use serde::{Deserialize, Serialize};

use crate::persistence::Store;

const SETTINGS_KEY: &str = "debt-dash:settings";

/// Player preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub vibration_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            vibration_enabled: true,
        }
    }
}

impl Settings {
    /// Load from the store; absent or corrupt data yields the defaults
    pub fn load(store: &dyn Store) -> Self {
        store
            .get(SETTINGS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn Store) {
        match serde_json::to_string(self) {
            Ok(raw) => store.set(SETTINGS_KEY, &raw),
            Err(err) => log::warn!("could not encode settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn defaults_when_absent_or_corrupt() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
        store.set(SETTINGS_KEY, "{broken");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn settings_round_trip() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            sound_enabled: false,
            music_enabled: true,
            vibration_enabled: false,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }
}
