use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogSearchResponse {
    #[serde(default, deserialize_with = "skip_malformed_hits")]
    pub results: Vec<CatalogHit>,
}

/// One hit from the catalog search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogHit {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    /// Full URL or path relative to the catalog's image host
    #[serde(default, rename = "posterUrl", alias = "poster_path")]
    pub poster_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

/// Catalog ids arrive as numbers from some backends and strings from others
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(n)) => n.to_string(),
        Some(RawId::Text(s)) => s,
        None => String::new(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode hits one by one; a malformed hit is dropped instead of failing the page
fn skip_malformed_hits<'de, D>(deserializer: D) -> Result<Vec<CatalogHit>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(hit) => Some(hit),
            Err(e) => {
                debug!(operation = "catalog_decode", error = %e, "Skipping malformed catalog hit");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "results": [
                {"id": 603, "title": "The Matrix", "overview": "...", "release_date": "1999-03-30", "poster_path": "/603.jpg"},
                {"id": "604", "title": "The Matrix Reloaded", "release_date": "", "posterUrl": null}
            ]
        }"#;
        let response: CatalogSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].id, "603");
        assert_eq!(response.results[0].poster_url.as_deref(), Some("/603.jpg"));
        assert_eq!(response.results[1].id, "604");
        assert!(response.results[1].poster_url.is_none());
    }

    #[test]
    fn test_bad_hits_do_not_sink_the_page() {
        let json = r#"{
            "results": [
                {"id": 1, "title": "Good", "release_date": "2001-01-01"},
                {"id": 2, "title": null},
                {"id": 3},
                {"id": {"nested": true}, "title": "Broken id"},
                {"id": 4, "title": 42}
            ]
        }"#;
        let response: CatalogSearchResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = response.results.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(response.results[0].title, "Good");
        assert_eq!(response.results[1].title, "");
        assert_eq!(response.results[2].title, "");
    }

    #[test]
    fn test_null_results_is_empty() {
        let response: CatalogSearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response: CatalogSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
