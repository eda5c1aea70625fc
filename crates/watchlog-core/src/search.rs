use std::sync::Arc;
use tracing::{debug, warn};
use watchlog_config::{CatalogConfig, EntryConfig};
use watchlog_models::Suggestion;
use watchlog_sources::{CatalogHit, CatalogSearch};

use crate::error::EntryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// Blank query; the catalog was not contacted
    Skipped,
    Completed,
    Failed(String),
}

/// Suggestions plus how they were obtained. Failures carry an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub suggestions: Vec<Suggestion>,
    pub status: SearchStatus,
}

impl SearchOutcome {
    fn skipped() -> Self {
        Self {
            suggestions: Vec::new(),
            status: SearchStatus::Skipped,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, SearchStatus::Failed(_))
    }
}

/// Queries the catalog collaborator and normalizes its hits into suggestions
#[derive(Clone)]
pub struct SearchClient {
    catalog: Arc<dyn CatalogSearch>,
    image_base_url: String,
    max_results: usize,
}

impl SearchClient {
    pub fn new(catalog: Arc<dyn CatalogSearch>) -> Self {
        Self {
            catalog,
            image_base_url: String::new(),
            max_results: EntryConfig::default().max_suggestions,
        }
    }

    pub fn from_config(catalog: Arc<dyn CatalogSearch>, catalog_config: &CatalogConfig, entry: &EntryConfig) -> Self {
        Self::new(catalog)
            .with_image_base_url(catalog_config.image_base_url.clone())
            .with_max_results(entry.max_suggestions)
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Search the catalog for `query`.
    ///
    /// Never fails: errors come back as an empty list with a
    /// [`SearchStatus::Failed`] status.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::skipped();
        }

        match self.catalog.search(query).await {
            Ok(hits) => {
                let suggestions: Vec<Suggestion> = hits
                    .into_iter()
                    .filter_map(|hit| self.to_suggestion(hit))
                    .take(self.max_results)
                    .collect();
                debug!(
                    operation = "suggestion_search",
                    query = query,
                    count = suggestions.len(),
                    "Catalog suggestions ready"
                );
                SearchOutcome {
                    suggestions,
                    status: SearchStatus::Completed,
                }
            }
            Err(e) => {
                warn!(operation = "suggestion_search", query = query, error = %e, "Catalog search failed");
                SearchOutcome {
                    suggestions: Vec::new(),
                    status: SearchStatus::Failed(EntryError::SearchFailed(e.to_string()).to_string()),
                }
            }
        }
    }

    /// Hits without a usable title or id cannot be linked and are dropped
    fn to_suggestion(&self, hit: CatalogHit) -> Option<Suggestion> {
        let id = hit.id.trim();
        let title = hit.title.trim();
        if id.is_empty() || title.is_empty() {
            debug!(operation = "suggestion_search", id = %hit.id, "Skipping incomplete catalog hit");
            return None;
        }

        Some(Suggestion {
            release_year: hit.release_date.as_deref().and_then(release_year),
            poster_url: hit
                .poster_url
                .as_deref()
                .and_then(|path| poster_url(&self.image_base_url, path)),
            id: id.to_string(),
            title: title.to_string(),
        })
    }
}

/// Leading four-digit year of a release date such as "1999-03-30"
pub fn release_year(release_date: &str) -> Option<u32> {
    let token = release_date.trim().split(|c: char| !c.is_ascii_digit()).next()?;
    if token.len() != 4 {
        return None;
    }
    token.parse().ok()
}

/// Absolute poster URL for an image path; relative paths hang off `image_base_url`
pub fn poster_url(image_base_url: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") || image_base_url.is_empty() {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}
