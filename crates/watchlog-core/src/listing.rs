use std::cmp::Reverse;
use tracing::{debug, warn};
use watchlog_models::PersistedMovie;
use watchlog_sources::MovieStore;

use crate::error::EntryError;

pub const EMPTY_MESSAGE: &str = "No movies logged yet.";

/// What the results region shows
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Ready(Vec<PersistedMovie>),
    /// The store answered with no records
    Empty,
    /// The store could not be reached; distinct from an empty store
    Unavailable(String),
}

impl Listing {
    /// Order newest watch first (undated records last) and cap the length
    pub fn from_movies(mut movies: Vec<PersistedMovie>, cap: usize) -> Self {
        if movies.is_empty() {
            return Listing::Empty;
        }
        movies.sort_by_key(|m| Reverse(m.watched_at()));
        movies.truncate(cap);
        Listing::Ready(movies)
    }

    pub fn movies(&self) -> &[PersistedMovie] {
        match self {
            Listing::Ready(movies) => movies,
            Listing::Empty | Listing::Unavailable(_) => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Listing::Unavailable(_))
    }
}

/// Read the listing from the store. Failures become [`Listing::Unavailable`].
pub async fn fetch_listing(store: &dyn MovieStore, cap: usize) -> Listing {
    match store.list().await {
        Ok(movies) => {
            debug!(operation = "listing_refresh", count = movies.len(), "Listing refreshed");
            Listing::from_movies(movies, cap)
        }
        Err(e) => {
            warn!(operation = "listing_refresh", error = %e, "Listing unavailable");
            Listing::Unavailable(EntryError::ListingUnavailable(e).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;
    use watchlog_models::NormalizedRecord;

    fn movie(id: &str, date: Option<&str>) -> PersistedMovie {
        let mut record = NormalizedRecord::new(format!("Movie {}", id));
        record.watched_date = date.map(str::to_string);
        PersistedMovie {
            id: id.to_string(),
            record,
        }
    }

    #[test]
    fn test_newest_first_undated_last() {
        let listing = Listing::from_movies(
            vec![
                movie("a", Some("2023-01-01T00:00:00.000Z")),
                movie("b", None),
                movie("c", Some("2024-06-01T00:00:00.000Z")),
            ],
            10,
        );
        let ids: Vec<&str> = listing.movies().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_cap_applies() {
        let movies = (0..5).map(|i| movie(&i.to_string(), None)).collect();
        assert_eq!(Listing::from_movies(movies, 3).movies().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_and_unavailable_are_distinct() {
        let empty = fetch_listing(&FakeStore::new(), 100).await;
        assert_eq!(empty, Listing::Empty);
        assert!(empty.is_available());

        let down = fetch_listing(&FakeStore::new().failing_list(), 100).await;
        assert!(matches!(down, Listing::Unavailable(_)));
        assert!(!down.is_available());
    }
}
