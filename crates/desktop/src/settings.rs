//! Application branding settings (`appSettings` slot).

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;
use crate::store::StoreError;

pub const SETTINGS_KEY: &str = "appSettings";

pub const DEFAULT_APP_NAME: &str = "Assetology";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub app_name: String,
    /// Logo as a data URL or remote URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            logo: None,
            theme: Theme::Light,
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub app_name: Option<String>,
    /// `Some(None)` removes the logo.
    pub logo: Option<Option<String>>,
    pub theme: Option<Theme>,
}

/// Reads and merges [`AppSettings`] on top of a [`KeyValueStorage`].
#[derive(Debug)]
pub struct AppSettingsStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> AppSettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current settings; missing or unreadable slots fall back to defaults.
    pub fn load(&self) -> AppSettings {
        let raw = match self.storage.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppSettings::default(),
            Err(err) => {
                tracing::warn!("failed to read app settings: {err}");
                return AppSettings::default();
            }
        };

        match serde_json::from_str::<AppSettings>(&raw) {
            Ok(mut settings) => {
                if settings.app_name.trim().is_empty() {
                    settings.app_name = DEFAULT_APP_NAME.to_string();
                }
                settings
            }
            Err(err) => {
                tracing::warn!("app settings are corrupted ({err}); using defaults");
                AppSettings::default()
            }
        }
    }

    /// Merge `patch` into the stored settings and persist the result.
    pub fn save(&self, patch: SettingsPatch) -> Result<AppSettings, StoreError> {
        let mut settings = self.load();

        if let Some(app_name) = patch.app_name {
            let trimmed = app_name.trim();
            settings.app_name = if trimmed.is_empty() {
                DEFAULT_APP_NAME.to_string()
            } else {
                trimmed.to_string()
            };
        }
        if let Some(logo) = patch.logo {
            settings.logo = logo;
        }
        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }

        let raw = serde_json::to_string(&settings)?;
        self.storage.set(SETTINGS_KEY, &raw)?;
        tracing::debug!(app_name = %settings.app_name, theme = ?settings.theme, "app settings saved");
        Ok(settings)
    }

    pub fn reset(&self) -> Result<(), StoreError> {
        self.storage.remove(SETTINGS_KEY)?;
        Ok(())
    }
}
