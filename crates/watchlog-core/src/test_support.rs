//! In-memory collaborators for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use watchlog_models::{NormalizedRecord, PersistedMovie};
use watchlog_sources::{CatalogHit, CatalogSearch, MovieStore, SourceError, StoreError};

pub fn hit(id: &str, title: &str, release_date: Option<&str>, poster: Option<&str>) -> CatalogHit {
    CatalogHit {
        id: id.to_string(),
        title: title.to_string(),
        overview: None,
        release_date: release_date.map(str::to_string),
        poster_url: poster.map(str::to_string),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    hits: HashMap<String, Vec<CatalogHit>>,
    delays: HashMap<String, Duration>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, query: &str, hits: Vec<CatalogHit>) -> Self {
        self.hits.insert(query.to_string(), hits);
        self
    }

    /// Answer `query` only after `delay`
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogSearch for FakeCatalog {
    async fn search(&self, query: &str) -> Result<Vec<CatalogHit>, SourceError> {
        self.calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            return Err(SourceError::Status {
                service: "catalog",
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.hits.get(query).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<Vec<PersistedMovie>>,
    fail_create: bool,
    fail_list: bool,
    create_calls: Mutex<usize>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn created(&self) -> Vec<NormalizedRecord> {
        self.records.lock().unwrap().iter().map(|m| m.record.clone()).collect()
    }

    pub fn create_calls(&self) -> usize {
        *self.create_calls.lock().unwrap()
    }
}

#[async_trait]
impl MovieStore for FakeStore {
    async fn create(&self, record: &NormalizedRecord) -> Result<PersistedMovie, StoreError> {
        *self.create_calls.lock().unwrap() += 1;
        if self.fail_create {
            return Err(StoreError::Storage {
                message: "disk full".to_string(),
            });
        }
        let mut records = self.records.lock().unwrap();
        let movie = PersistedMovie {
            id: format!("m{}", records.len() + 1),
            record: record.clone(),
        };
        records.push(movie.clone());
        Ok(movie)
    }

    async fn list(&self) -> Result<Vec<PersistedMovie>, StoreError> {
        if self.fail_list {
            return Err(StoreError::Storage {
                message: "not ready".to_string(),
            });
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn search(&self, terms: &str) -> Result<Vec<PersistedMovie>, StoreError> {
        let terms = terms.to_lowercase();
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.record.title.to_lowercase().contains(&terms))
            .cloned()
            .collect())
    }
}
