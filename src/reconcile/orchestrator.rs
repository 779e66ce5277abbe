//! Runs a batch of names through resolve, dedup and provision.
//!
//! Items are processed one at a time in input order with a fixed pause
//! after each one. Every per-item failure becomes an `Error` outcome; only
//! a configuration problem stops a batch, and it does so before the first
//! remote call.

use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

use super::dedup::is_tracked;
use super::models::{BatchSummary, ItemOutcome};
use super::normalizer::normalize;
use super::provisioner::{build_request, provision};
use super::resolver::{resolve, Resolution};
use crate::catalog::{CatalogClient, ClientTimeouts, LidarrClient};
use crate::config::{Configuration, ConfigurationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    NotStarted,
    Running,
    Complete,
}

/// Fixed pause applied after every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub delay: Duration,
}

impl PacingPolicy {
    pub fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }
}

/// Progress hook for callers that want to display a running batch.
pub trait BatchObserver: Send + Sync {
    fn on_state_change(&self, _state: BatchState) {}

    /// Called once per item, `index` is zero-based.
    fn on_item(&self, _index: usize, _total: usize, _outcome: &ItemOutcome) {}
}

/// Observer that ignores everything.
pub struct NoOpObserver;

impl BatchObserver for NoOpObserver {}

#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions {
    pub timeouts: ClientTimeouts,
    pub pacing: PacingPolicy,
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("No valid artist names found in the input.")]
    NoNames,

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to set up Lidarr client: {0}")]
    ClientSetup(String),
}

/// Processes one name to completion. Never fails; problems become outcomes.
pub async fn process_item(
    client: &dyn CatalogClient,
    config: &Configuration,
    raw_name: &str,
) -> ItemOutcome {
    let artist = match resolve(client, raw_name).await {
        Resolution::Resolved(artist) => artist,
        Resolution::NotFound => {
            return ItemOutcome::NotFound {
                name: raw_name.to_string(),
            }
        }
        Resolution::Failed(message) => {
            return ItemOutcome::Error {
                name: raw_name.to_string(),
                message,
            }
        }
    };

    // Re-fetched for every item so additions earlier in this batch are seen.
    let tracked = match client.list_tracked().await {
        Ok(tracked) => tracked,
        Err(e) => {
            return ItemOutcome::Error {
                name: raw_name.to_string(),
                message: e.user_message(),
            }
        }
    };

    if is_tracked(&artist.display_name, &tracked) {
        warn!("Artist already exists in Lidarr: {}", artist.display_name);
        return ItemOutcome::AlreadyExists {
            name: artist.display_name,
        };
    }

    let request = build_request(&artist, &config.root_folder_path);
    match provision(client, &request).await {
        Ok(()) => ItemOutcome::Added {
            name: artist.display_name,
        },
        Err(message) => ItemOutcome::Error {
            name: raw_name.to_string(),
            message,
        },
    }
}

/// Runs every name in `names` and summarizes the outcomes.
///
/// The configuration is checked first; when it is incomplete no remote call
/// is made and the batch never enters `Running`.
pub async fn run_batch(
    client: &dyn CatalogClient,
    config: &Configuration,
    names: &[String],
    pacing: PacingPolicy,
    observer: &dyn BatchObserver,
) -> Result<BatchSummary, ConfigurationError> {
    observer.on_state_change(BatchState::NotStarted);
    config.validate()?;

    observer.on_state_change(BatchState::Running);
    info!("Processing {} artists...", names.len());

    let total = names.len();
    let mut outcomes = Vec::with_capacity(total);
    for (index, name) in names.iter().enumerate() {
        let outcome = process_item(client, config, name).await;
        if let ItemOutcome::Error { name, message } = &outcome {
            error!("Failed to process {}: {}", name, message);
        }
        info!("Processed {}/{}", index + 1, total);
        observer.on_item(index, total, &outcome);
        outcomes.push(outcome);
        pacing.pause().await;
    }

    let summary = BatchSummary::from_outcomes(outcomes);
    info!("{}", summary.headline());
    if !summary.errors.is_empty() {
        error!("--- Detailed Errors ---");
        for detail in &summary.errors {
            error!("{}: {}", detail.name, detail.message);
        }
    }

    observer.on_state_change(BatchState::Complete);
    Ok(summary)
}

/// Normalizes `raw_text` and reconciles it against the configured Lidarr.
pub async fn reconcile_text(
    raw_text: &str,
    config: &Configuration,
    options: RunOptions,
    observer: &dyn BatchObserver,
) -> Result<BatchSummary, ReconcileError> {
    let names = normalize(raw_text);
    if names.is_empty() {
        return Err(ReconcileError::NoNames);
    }
    config.validate()?;

    let client = LidarrClient::new(config, options.timeouts)
        .map_err(|e| ReconcileError::ClientSetup(format!("{:#}", e)))?;
    Ok(run_batch(&client, config, &names, options.pacing, observer).await?)
}
