//! Lidarr Bulk Adder Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod config;
pub mod reconcile;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{CatalogClient, ClientTimeouts, LidarrClient};
pub use config::Configuration;
pub use reconcile::{reconcile_text, BatchSummary, ItemOutcome, RunOptions};
pub use server::{run_server, RequestsLoggingLevel};
