use serde::{Deserialize, Serialize};

use crate::record::Provenance;

/// A normalized catalog search hit offered while the user types a title.
///
/// Rebuilt on every search response and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_year: Option<u32>,
}

impl Suggestion {
    /// Provenance of the catalog entry this suggestion was built from
    pub fn provenance(&self) -> Provenance {
        Provenance {
            external_id: self.id.clone(),
            poster_url: self.poster_url.clone(),
        }
    }

    /// Title with the release year appended, e.g. "The Matrix (1999)"
    pub fn label(&self) -> String {
        match self.release_year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}
