//! Access to the remote catalog service (Lidarr).
//!
//! Every call is bounded by a timeout and reports failures as a
//! [`TransportError`]; nothing here retries.

mod client;
mod error;
mod models;

pub use client::{CatalogClient, ClientTimeouts, LidarrClient};
pub use error::{extract_error_message, TransportError, TransportErrorKind};
pub use models::*;
