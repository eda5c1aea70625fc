use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use watchlog_config::StoreConfig;
use watchlog_models::{NormalizedRecord, PersistedMovie};

use crate::error::{SourceError, StoreError};
use crate::http::{create_http_client, join_url};
use crate::store::api::ErrorBody;
use crate::traits::MovieStore;

const SERVICE: &str = "store";

#[derive(Clone)]
pub struct HttpMovieStore {
    client: Arc<Client>,
    base_url: String,
}

impl HttpMovieStore {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Arc::new(create_http_client(timeout_secs)),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout_secs)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, StoreError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(SourceError::from)?;

        let response = check_status(response).await?;
        decode(response).await
    }
}

/// Map a non-2xx store response onto the store error taxonomy
async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = ErrorBody::parse(&text);
    warn!(
        operation = "store_request",
        status = status.as_u16(),
        details = %body.details_text().unwrap_or_default(),
        "Store returned an error"
    );

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Err(StoreError::Validation {
            reason: body.reason().unwrap_or_else(|| status.to_string()),
        }),
        _ => Err(StoreError::Storage {
            message: body.reason().unwrap_or_else(|| status.to_string()),
        }),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let text = response.text().await.map_err(SourceError::from)?;
    serde_json::from_str(&text).map_err(|e| {
        StoreError::Source(SourceError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })
    })
}

#[async_trait]
impl MovieStore for HttpMovieStore {
    async fn create(&self, record: &NormalizedRecord) -> Result<PersistedMovie, StoreError> {
        let response = self
            .client
            .post(join_url(&self.base_url, "data"))
            .header("Accept", "application/json")
            .json(record)
            .send()
            .await
            .map_err(SourceError::from)?;

        let response = check_status(response).await?;
        let created: PersistedMovie = decode(response).await?;
        debug!(operation = "store_create", id = %created.id, "Record created");
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<PersistedMovie>, StoreError> {
        self.get_json(&join_url(&self.base_url, "data")).await
    }

    async fn search(&self, terms: &str) -> Result<Vec<PersistedMovie>, StoreError> {
        let url = format!(
            "{}?terms={}",
            join_url(&self.base_url, "search"),
            urlencoding::encode(terms)
        );
        self.get_json(&url).await
    }
}
