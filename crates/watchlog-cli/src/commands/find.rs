use super::list::show_listing;
use crate::output::Output;
use color_eyre::Result;
use tracing::warn;
use watchlog_config::Config;
use watchlog_core::{EntryError, Listing};
use watchlog_sources::{HttpMovieStore, MovieStore};

pub async fn run_find(config: &Config, terms: &str, output: &Output) -> Result<()> {
    let terms = terms.trim();
    if terms.is_empty() {
        output.warn("Enter some words to look for.");
        return Ok(());
    }

    let store = HttpMovieStore::from_config(&config.store);
    let spinner = output.spinner(format!("Looking for \"{}\"...", terms));
    let result = store.search(terms).await;
    spinner.finish_and_clear();

    let listing = match result {
        // Keep the store's title order
        Ok(movies) if movies.is_empty() => Listing::Empty,
        Ok(movies) => Listing::Ready(movies),
        Err(e) => {
            warn!(operation = "find", terms = terms, error = %e, "Store search failed");
            Listing::Unavailable(EntryError::ListingUnavailable(e).to_string())
        }
    };

    if listing == Listing::Empty && output.is_human() {
        output.info(format!("No logged movies match \"{}\".", terms));
        return Ok(());
    }
    show_listing(&listing, output);
    Ok(())
}
