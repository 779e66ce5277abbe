use std::path::PathBuf;

use super::RequestsLoggingLevel;
use crate::config::EnvOverrides;
use crate::reconcile::RunOptions;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Where settings are read from at the start of each batch and written
    /// to by the settings endpoint.
    pub settings_path: PathBuf,
    /// Environment captured at startup, layered over the settings file.
    pub env: EnvOverrides,
    pub run_options: RunOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 5000,
            settings_path: PathBuf::from("config.json"),
            env: EnvOverrides::default(),
            run_options: RunOptions::default(),
        }
    }
}
