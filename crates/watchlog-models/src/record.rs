use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link between a record and an external catalog entry.
///
/// The id and the poster always come from the same catalog hit, so they
/// travel together and are cleared together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provenance {
    pub external_id: String,
    pub poster_url: Option<String>,
}

/// Canonical movie-watch record sent to the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub title: String,
    pub rating: Option<f64>,
    pub watched_date: Option<String>,
    pub poster_url: Option<String>,
    pub external_id: Option<String>,
    #[serde(default)]
    pub rewatch: bool,
}

impl NormalizedRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            rating: None,
            watched_date: None,
            poster_url: None,
            external_id: None,
            rewatch: false,
        }
    }

    /// Attach (or detach, with `None`) catalog provenance
    pub fn with_provenance(mut self, provenance: Option<&Provenance>) -> Self {
        match provenance {
            Some(p) => {
                self.external_id = Some(p.external_id.clone());
                self.poster_url = p.poster_url.clone();
            }
            None => {
                self.external_id = None;
                self.poster_url = None;
            }
        }
        self
    }

    pub fn has_provenance(&self) -> bool {
        self.external_id.is_some()
    }
}

/// A record as returned by the store, with its server-assigned id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMovie {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: NormalizedRecord,
}

impl PersistedMovie {
    /// Parsed watch date, if the stored value is a valid RFC 3339 timestamp
    pub fn watched_at(&self) -> Option<DateTime<Utc>> {
        self.record
            .watched_date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}
