use comfy_table::{Attribute, Cell, Color, Table};
use watchlog_models::{to_stars, PersistedMovie};

fn watched_day(movie: &PersistedMovie) -> String {
    movie
        .watched_at()
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn header(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

/// Table of logged movies in the order given
pub fn movie_table(movies: &[PersistedMovie]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header("Watched"), header("Title"), header("Rating"), header("Rewatch")]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    for movie in movies {
        let record = &movie.record;
        table.add_row(vec![
            Cell::new(watched_day(movie)),
            Cell::new(&record.title),
            Cell::new(record.rating.map(to_stars).unwrap_or_default()).fg(Color::Yellow),
            Cell::new(if record.rewatch { "yes" } else { "" }),
        ]);
    }
    table
}
