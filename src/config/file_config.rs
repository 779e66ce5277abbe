use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_ROOT_FOLDER_PATH: &str = "/music";

/// Settings persisted between sessions, stored as a flat JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    #[serde(rename = "LIDARR_URL")]
    pub lidarr_url: String,
    #[serde(rename = "API_KEY")]
    pub api_key: String,
    #[serde(rename = "ROOT_FOLDER_PATH")]
    pub root_folder_path: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            lidarr_url: String::new(),
            api_key: String::new(),
            root_folder_path: DEFAULT_ROOT_FOLDER_PATH.to_string(),
        }
    }
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }

    /// Loads the settings file if present.
    ///
    /// A missing file yields `None`. A file that cannot be read or decoded is
    /// reported and also yields `None`, so callers fall back to defaults and
    /// environment variables.
    pub fn load_lossy(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load(path) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("{:#}. Using defaults/environment variables.", e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut to_save = self.clone();
        to_save.lidarr_url = to_save.lidarr_url.trim_end_matches('/').to_string();

        let content = serde_json::to_string_pretty(&to_save)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {:?}", path))
    }
}
