use async_trait::async_trait;
use watchlog_models::{NormalizedRecord, PersistedMovie};

use crate::catalog::CatalogHit;
use crate::error::{SourceError, StoreError};

/// Third-party movie catalog, queried by title
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Raw hits for `query`; an empty result set is `Ok(vec![])`
    async fn search(&self, query: &str) -> Result<Vec<CatalogHit>, SourceError>;
}

/// Record store behind the HTTP API
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist a single record. Creation is atomic per record.
    async fn create(&self, record: &NormalizedRecord) -> Result<PersistedMovie, StoreError>;

    /// Stored records, newest watch date first, up to the store's cap
    async fn list(&self) -> Result<Vec<PersistedMovie>, StoreError>;

    /// Case-insensitive title substring search
    async fn search(&self, terms: &str) -> Result<Vec<PersistedMovie>, StoreError>;
}
