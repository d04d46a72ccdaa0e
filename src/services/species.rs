//! Cache-backed species client

use std::sync::Arc;
use tracing::debug;

use crate::cache::Cache;
use crate::errors::SourceResult;
use crate::models::SpeciesRecord;
use crate::sources::SpeciesSource;

/// Resolves species records, consulting the cache before the upstream
#[derive(Clone)]
pub struct SpeciesClient {
    source: Arc<dyn SpeciesSource>,
    cache: Cache<SpeciesRecord>,
}

impl SpeciesClient {
    pub fn new(source: Arc<dyn SpeciesSource>, cache: Cache<SpeciesRecord>) -> Self {
        Self { source, cache }
    }

    /// Return the record for `name`, fetching and caching it on a miss.
    ///
    /// A cache hit never touches the upstream or rewrites the entry. A failed
    /// fetch caches nothing.
    pub async fn get_species(&self, name: &str) -> SourceResult<SpeciesRecord> {
        if let Some(record) = self.cache.get(name).await {
            debug!(species = name, "Returning cached species record");
            return Ok(record);
        }

        debug!(species = name, "Species cache miss, fetching from upstream");
        let record = self.source.fetch_species(name).await?;

        self.cache.put(name, record.clone()).await;

        Ok(record)
    }
}
