//! Bulk reconciliation of artist names against the catalog.
//!
//! Input text is split into names, and each name is resolved, checked
//! against the tracked set, and provisioned when missing.

mod dedup;
mod models;
mod normalizer;
mod orchestrator;
mod provisioner;
mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use dedup::is_tracked;
pub use models::{BatchSummary, ErrorDetail, ItemOutcome};
pub use normalizer::{decode_upload, normalize, InputError};
pub use orchestrator::{
    process_item, reconcile_text, run_batch, BatchObserver, BatchState, NoOpObserver,
    PacingPolicy, ReconcileError, RunOptions,
};
pub use provisioner::{build_request, provision, sanitize_folder_name};
pub use resolver::{resolve, Resolution, ResolvedArtist};
