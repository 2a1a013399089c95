use crate::error::StoreError;
use crate::kv::KeyValueStore;
use inspection_types::Settings;
use tracing::warn;

pub const SETTINGS_KEY: &str = "inspectorSettings";

pub struct SettingsRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored settings, or defaults when missing or unreadable
    pub fn load(&self) -> Settings {
        let raw = match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Settings::default(),
            Err(e) => {
                warn!(key = SETTINGS_KEY, error = %e, "Failed to read settings");
                return Settings::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = SETTINGS_KEY, error = %e, "Ignoring unreadable settings");
            Settings::default()
        })
    }

    pub fn save(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.store.set(SETTINGS_KEY, &json)
    }
}
