use serde::{
    Deserialize,
    Serialize,
};

use crate::backend::BackendSettings;

/// Persisted app settings (`settings.json` under the platform data dir).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub backend: BackendSettings,
    pub remembered_email: String,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            remembered_email: String::new(),
            dark_mode: true,
        }
    }
}
