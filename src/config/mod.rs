mod file_config;

pub use file_config::{FileSettings, DEFAULT_ROOT_FOLDER_PATH};

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variables that override the persisted settings.
/// Each field lists the variables consulted, first match wins.
const ENV_LIDARR_URL: &[&str] = &["LIDARR_URL"];
const ENV_API_KEY: &[&str] = &["LIDARR_API_KEY", "API_KEY"];
const ENV_ROOT_FOLDER: &[&str] = &["LIDARR_ROOT_FOLDER", "ROOT_FOLDER_PATH"];

/// A required setting is missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Configuration error: {} not configured.", self.missing.join(", "))]
pub struct ConfigurationError {
    pub missing: Vec<&'static str>,
}

/// Values read from the process environment at load time.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub lidarr_url: Option<String>,
    pub api_key: Option<String>,
    pub root_folder_path: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(key));
        Self {
            lidarr_url: first(ENV_LIDARR_URL),
            api_key: first(ENV_API_KEY),
            root_folder_path: first(ENV_ROOT_FOLDER),
        }
    }
}

/// Connection settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub catalog_base_url: String,
    pub api_key: String,
    pub root_folder_path: String,
}

impl Configuration {
    /// Layers the environment over the persisted settings (or defaults when
    /// there is no settings file). The URL's trailing slash is stripped.
    pub fn resolve(file: Option<FileSettings>, env: &EnvOverrides) -> Self {
        let file = file.unwrap_or_default();

        let catalog_base_url = env.lidarr_url.clone().unwrap_or(file.lidarr_url);
        let api_key = env.api_key.clone().unwrap_or(file.api_key);
        let root_folder_path = env
            .root_folder_path
            .clone()
            .unwrap_or(file.root_folder_path);

        Self {
            catalog_base_url: catalog_base_url.trim_end_matches('/').to_string(),
            api_key,
            root_folder_path,
        }
    }

    /// Reads the settings file at `path` and the process environment.
    pub fn load(path: &Path) -> Self {
        Self::resolve(FileSettings::load_lossy(path), &EnvOverrides::from_env())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut missing = Vec::new();
        if self.catalog_base_url.trim().is_empty() {
            missing.push("Lidarr URL");
        }
        if self.api_key.trim().is_empty() {
            missing.push("API Key");
        }
        if self.root_folder_path.trim().is_empty() {
            missing.push("Root Folder Path");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError { missing })
        }
    }

    pub fn is_configured(&self) -> bool {
        self.validate().is_ok()
    }

    /// Settings as shown to a user, with the API key masked.
    pub fn to_view(&self) -> SettingsView {
        let chars: Vec<char> = self.api_key.chars().collect();
        let visible = if chars.len() > 4 { 4 } else { 0 };
        let api_key: String = std::iter::repeat('*')
            .take(chars.len() - visible)
            .chain(chars[chars.len() - visible..].iter().copied())
            .collect();
        SettingsView {
            lidarr_url: self.catalog_base_url.clone(),
            api_key,
            root_folder_path: self.root_folder_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub lidarr_url: String,
    pub api_key: String,
    pub root_folder_path: String,
}

/// A user-submitted settings change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub lidarr_url: String,
    pub api_key: String,
    pub root_folder_path: String,
}

impl SettingsUpdate {
    /// Normalizes the submitted values and rejects blank fields.
    pub fn into_file_settings(self) -> Result<FileSettings, ConfigurationError> {
        let settings = FileSettings {
            lidarr_url: self.lidarr_url.trim().trim_end_matches('/').to_string(),
            api_key: self.api_key.trim().to_string(),
            root_folder_path: self.root_folder_path.trim().to_string(),
        };
        Configuration::resolve(Some(settings.clone()), &EnvOverrides::default()).validate()?;
        Ok(settings)
    }
}
