use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;
use watchlog_config::CatalogConfig;

use crate::catalog::api::{CatalogHit, CatalogSearchResponse};
use crate::error::SourceError;
use crate::http::{create_http_client, join_url};
use crate::traits::CatalogSearch;

const SERVICE: &str = "catalog";

#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Arc<Client>,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Arc::new(create_http_client(timeout_secs)),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout_secs)
    }
}

#[async_trait]
impl CatalogSearch for HttpCatalogClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogHit>, SourceError> {
        let url = format!(
            "{}?query={}",
            join_url(&self.base_url, "search"),
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { service: SERVICE, status, body });
        }

        let text = response.text().await?;
        let parsed: CatalogSearchResponse =
            serde_json::from_str(&text).map_err(|e| SourceError::Decode {
                service: SERVICE,
                message: e.to_string(),
            })?;

        debug!(
            operation = "catalog_search",
            query = query,
            hits = parsed.results.len(),
            "Catalog search returned"
        );
        Ok(parsed.results)
    }
}
