//! HTTP species source backed by PokeAPI's `pokemon-species` endpoint

use async_trait::async_trait;
use tracing::debug;

use super::traits::SpeciesSource;
use crate::errors::{SourceError, SourceResult};
use crate::models::SpeciesRecord;
use crate::utils::{StandardHttpClient, url::UrlUtils};

pub const SERVICE_NAME: &str = "species";

/// Fetches species records with `GET <base>/<name>`
#[derive(Debug, Clone)]
pub struct PokeApiSpeciesSource {
    base_url: String,
    http: StandardHttpClient,
}

impl PokeApiSpeciesSource {
    pub fn new(base_url: impl Into<String>, http: StandardHttpClient) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn species_url(&self, name: &str) -> SourceResult<String> {
        UrlUtils::join(&self.base_url, name)
            .map_err(|e| SourceError::invalid_url(&self.base_url, e))
    }
}

#[async_trait]
impl SpeciesSource for PokeApiSpeciesSource {
    async fn fetch_species(&self, name: &str) -> SourceResult<SpeciesRecord> {
        let url = self.species_url(name)?;
        let record: SpeciesRecord = self.http.get_json(&url).await?;
        debug!(
            species = %record.name,
            descriptions = record.descriptions.len(),
            "Fetched species record"
        );
        Ok(record)
    }
}
