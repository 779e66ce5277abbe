use tracing::{info, warn};

use crate::catalog::{CatalogCandidate, CatalogClient};

/// A catalog entry chosen for a user-supplied name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtist {
    pub external_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedArtist),
    NotFound,
    Failed(String),
}

/// Looks `raw_name` up in the catalog and picks the first candidate.
///
/// The service already ranks lookup results by relevance, so no further
/// scoring happens here.
pub async fn resolve(client: &dyn CatalogClient, raw_name: &str) -> Resolution {
    info!("Searching for artist: {}", raw_name);
    let candidates = match client.lookup(raw_name).await {
        Ok(candidates) => candidates,
        Err(e) => return Resolution::Failed(e.user_message()),
    };

    match candidates.into_iter().next() {
        None => {
            warn!("Artist not found: {}", raw_name);
            Resolution::NotFound
        }
        Some(first) => match validate_candidate(first) {
            Ok(artist) => Resolution::Resolved(artist),
            Err(missing) => Resolution::Failed(format!(
                "Lookup response missing {} for: {}",
                missing, raw_name
            )),
        },
    }
}

fn validate_candidate(candidate: CatalogCandidate) -> Result<ResolvedArtist, &'static str> {
    let present = |field: Option<String>| field.filter(|value| !value.trim().is_empty());
    match (present(candidate.external_id), present(candidate.display_name)) {
        (Some(external_id), Some(display_name)) => Ok(ResolvedArtist {
            external_id,
            display_name,
        }),
        (None, Some(_)) => Err("foreignArtistId"),
        (Some(_), None) => Err("artistName"),
        (None, None) => Err("foreignArtistId and artistName"),
    }
}
