//! Episodes bundled with the app.

use super::models::Episode;
use std::collections::HashSet;
use thiserror::Error;

const BUNDLED_CATALOG: &str = include_str!("../../assets/episodes.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("episode catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("episode {id} has no audio url")]
    MissingAudio { id: String },
    #[error("episode id {id} appears more than once")]
    DuplicateId { id: String },
}

/// Load the catalog shipped in `assets/episodes.json`.
pub fn load_catalog() -> Result<Vec<Episode>, CatalogError> {
    parse_catalog(BUNDLED_CATALOG)
}

/// Parse a JSON array of episodes, newest first.
pub fn parse_catalog(json: &str) -> Result<Vec<Episode>, CatalogError> {
    let episodes: Vec<Episode> = serde_json::from_str(json)?;

    {
        let mut seen = HashSet::new();
        for episode in &episodes {
            if episode.url().trim().is_empty() {
                return Err(CatalogError::MissingAudio {
                    id: episode.id().to_string(),
                });
            }
            if !seen.insert(episode.id()) {
                return Err(CatalogError::DuplicateId {
                    id: episode.id().to_string(),
                });
            }
        }
    }

    Ok(episodes)
}
