use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::debug;
use watchlog_config::{Config, PathManager};

/// Load the config file (or defaults when absent) and validate it
pub fn load_config() -> Result<Config> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

    debug!(operation = "load_config", path = %config_file.display(), exists = config_file.exists(), "Configuration loaded");
    Ok(config)
}

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(output),
        ConfigCommands::Init { force } => init_config(force, output),
    }
}

fn section(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn show_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = load_config()?;

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            if !config_file.exists() {
                output.warn(format!(
                    "No config file at {}; showing defaults. Run 'watchlog config init' to create one.",
                    config_file.display()
                ));
            }

            let files = section(
                "Files",
                vec![
                    ("Config file", config_file.display().to_string()),
                    ("Log file", path_manager.log_file().display().to_string()),
                ],
            );
            let catalog = section(
                "Catalog",
                vec![
                    ("Base URL", config.catalog.base_url.clone()),
                    ("Image base URL", config.catalog.image_base_url.clone()),
                    ("Timeout", format!("{}s", config.catalog.timeout_secs)),
                ],
            );
            let store = section(
                "Store",
                vec![
                    ("Base URL", config.store.base_url.clone()),
                    ("Timeout", format!("{}s", config.store.timeout_secs)),
                    ("Listing cap", config.store.list_cap.to_string()),
                ],
            );
            let entry = section(
                "Entry form",
                vec![
                    ("Debounce", format!("{}ms", config.entry.debounce_ms)),
                    ("Max suggestions", config.entry.max_suggestions.to_string()),
                    ("Rating required", config.entry.variant.requires_rating.to_string()),
                    ("Date required", config.entry.variant.requires_watched_date.to_string()),
                ],
            );

            for table in [files, catalog, store, entry] {
                println!("{}\n", table);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "exists": config_file.exists(),
                "config": config,
            }));
        }
    }

    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {}. Use --force to overwrite.",
            config_file.display()
        ));
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", path_manager.config_dir().display(), e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
