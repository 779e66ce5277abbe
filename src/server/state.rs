use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::{RequestsLoggingLevel, ServerConfig};
use crate::config::{Configuration, FileSettings};

/// Held for the duration of a batch run so runs never overlap.
pub type GuardedBatchLock = Arc<Mutex<()>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub batch_lock: GuardedBatchLock,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            batch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads the current connection settings from disk and environment.
    pub fn load_configuration(&self) -> Configuration {
        Configuration::resolve(
            FileSettings::load_lossy(&self.config.settings_path),
            &self.config.env,
        )
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for RequestsLoggingLevel {
    fn from_ref(input: &ServerState) -> Self {
        input.config.requests_logging_level
    }
}
