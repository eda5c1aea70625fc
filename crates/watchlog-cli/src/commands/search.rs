use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use serde_json::json;
use std::sync::Arc;
use watchlog_config::Config;
use watchlog_core::{SearchClient, SearchStatus};
use watchlog_sources::HttpCatalogClient;

pub async fn run_search(config: &Config, query: &str, output: &Output) -> Result<()> {
    let search = SearchClient::from_config(
        Arc::new(HttpCatalogClient::from_config(&config.catalog)),
        &config.catalog,
        &config.entry,
    );

    let spinner = output.spinner(format!("Searching the catalog for \"{}\"...", query.trim()));
    let outcome = search.search(query).await;
    spinner.finish_and_clear();

    if let SearchStatus::Failed(message) = &outcome.status {
        output.error(message);
        return Ok(());
    }

    if !output.is_human() {
        output.json(&json!({ "query": query.trim(), "suggestions": outcome.suggestions }));
        return Ok(());
    }

    if outcome.suggestions.is_empty() {
        output.info("No catalog matches.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Catalog ID").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Poster").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    for suggestion in &outcome.suggestions {
        table.add_row(vec![
            Cell::new(suggestion.label()),
            Cell::new(&suggestion.id),
            Cell::new(suggestion.poster_url.as_deref().unwrap_or("-")),
        ]);
    }
    if !output.is_quiet() {
        println!("{}", table);
    }
    Ok(())
}
