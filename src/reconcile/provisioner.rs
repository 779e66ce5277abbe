use std::path::Path;
use tracing::info;

use super::resolver::ResolvedArtist;
use crate::catalog::{
    AddOptions, CatalogClient, ProvisionRequest, DEFAULT_METADATA_PROFILE_ID,
    DEFAULT_QUALITY_PROFILE_ID,
};

/// Folder name for an artist: `:`, `/` and `\` become `_`.
pub fn sanitize_folder_name(display_name: &str) -> String {
    display_name.replace([':', '/', '\\'], "_")
}

pub fn build_request(artist: &ResolvedArtist, root_folder_path: &str) -> ProvisionRequest {
    let folder = sanitize_folder_name(&artist.display_name);
    let path = Path::new(root_folder_path)
        .join(folder)
        .to_string_lossy()
        .into_owned();

    ProvisionRequest {
        foreign_artist_id: artist.external_id.clone(),
        metadata_profile_id: DEFAULT_METADATA_PROFILE_ID,
        quality_profile_id: DEFAULT_QUALITY_PROFILE_ID,
        monitored: true,
        artist_name: artist.display_name.clone(),
        root_folder_path: root_folder_path.to_string(),
        path,
        add_options: AddOptions {
            search_for_missing_albums: true,
        },
    }
}

/// Submits `request`. On failure returns the message to show the user.
pub async fn provision(client: &dyn CatalogClient, request: &ProvisionRequest) -> Result<(), String> {
    client
        .create(request)
        .await
        .map_err(|e| e.user_message())?;
    info!("Added: {}", request.artist_name);
    Ok(())
}
