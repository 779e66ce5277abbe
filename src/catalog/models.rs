//! Wire shapes exchanged with the Lidarr v1 artist API.

use serde::{Deserialize, Serialize};

/// Metadata profile assigned to newly provisioned artists.
pub const DEFAULT_METADATA_PROFILE_ID: u32 = 1;
/// Quality profile assigned to newly provisioned artists.
pub const DEFAULT_QUALITY_PROFILE_ID: u32 = 1;

/// One result of `GET /api/v1/artist/lookup`.
///
/// Both fields are optional on the wire; the resolver decides whether a
/// candidate is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCandidate {
    #[serde(rename = "foreignArtistId")]
    pub external_id: Option<String>,
    #[serde(rename = "artistName")]
    pub display_name: Option<String>,
}

impl CatalogCandidate {
    pub fn new(external_id: &str, display_name: &str) -> Self {
        Self {
            external_id: Some(external_id.to_string()),
            display_name: Some(display_name.to_string()),
        }
    }
}

/// One artist already managed by Lidarr, from `GET /api/v1/artist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEntry {
    #[serde(rename = "artistName")]
    pub display_name: Option<String>,
}

impl TrackedEntry {
    pub fn named(display_name: &str) -> Self {
        Self {
            display_name: Some(display_name.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOptions {
    pub search_for_missing_albums: bool,
}

/// Body of `POST /api/v1/artist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    pub foreign_artist_id: String,
    pub metadata_profile_id: u32,
    pub quality_profile_id: u32,
    pub monitored: bool,
    pub artist_name: String,
    pub root_folder_path: String,
    pub path: String,
    pub add_options: AddOptions,
}
