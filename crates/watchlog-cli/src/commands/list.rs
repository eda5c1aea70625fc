use super::table::movie_table;
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use std::sync::Arc;
use watchlog_config::Config;
use watchlog_core::listing::EMPTY_MESSAGE;
use watchlog_core::{EntrySession, Listing};
use watchlog_sources::{HttpCatalogClient, HttpMovieStore};

/// Build a session against the configured HTTP collaborators
pub fn session_from_config(config: &Config) -> EntrySession {
    EntrySession::from_config(
        config,
        Arc::new(HttpCatalogClient::from_config(&config.catalog)),
        Arc::new(HttpMovieStore::from_config(&config.store)),
    )
}

/// Print the results region: the movies, the empty message, or the outage
pub fn show_listing(listing: &Listing, output: &Output) {
    if !output.is_human() {
        let (status, message) = match listing {
            Listing::Ready(_) => ("ready", None),
            Listing::Empty => ("empty", Some(EMPTY_MESSAGE.to_string())),
            Listing::Unavailable(message) => ("unavailable", Some(message.clone())),
        };
        output.json(&json!({
            "status": status,
            "movies": listing.movies(),
            "message": message,
        }));
        return;
    }

    match listing {
        Listing::Ready(movies) => {
            if !output.is_quiet() {
                println!("{}", movie_table(movies));
            }
        }
        Listing::Empty => output.info(EMPTY_MESSAGE),
        Listing::Unavailable(message) => output.error(message),
    }
}

pub async fn run_list(config: &Config, output: &Output) -> Result<()> {
    let mut session = session_from_config(config);

    let spinner = output.spinner("Loading your movies...");
    let listing = session.refresh_listing().await;
    spinner.finish_and_clear();

    show_listing(listing, output);
    Ok(())
}
