use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, find, list, search};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlog")]
#[command(about = "Watchlog - Keep a diary of the movies you watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a movie you watched
    #[command(long_about = "Log a movie. Without --title an interactive form opens: type part of a title to get catalog suggestions, pick one or keep your own text, then fill in rating and watch date. With --title the entry is submitted directly.")]
    Add {
        /// Movie title (skips the interactive form)
        #[arg(long)]
        title: Option<String>,

        /// Rating from 0.5 to 5 in half steps; also accepts "4/5" or star strings
        #[arg(long)]
        rating: Option<String>,

        /// Date you watched it (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Mark the entry as a rewatch
        #[arg(long, action = ArgAction::SetTrue)]
        rewatch: bool,
    },
    /// Show logged movies, most recent first
    List,
    /// Find logged movies by title
    Find {
        /// Words to look for in titles
        terms: String,
    },
    /// Look up a title in the movie catalog
    Search {
        /// Title or part of a title
        query: String,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Add {
            title,
            rating,
            date,
            rewatch,
        } => {
            let config = config::load_config()?;
            match title {
                Some(title) => add::run_add_direct(&config, title, rating, date, rewatch, &output).await,
                None => add::run_add_interactive(&config, &output).await,
            }
        }
        Commands::List => list::run_list(&config::load_config()?, &output).await,
        Commands::Find { terms } => find::run_find(&config::load_config()?, &terms, &output).await,
        Commands::Search { query } => search::run_search(&config::load_config()?, &query, &output).await,
        Commands::Config { cmd } => config::run_config(cmd.unwrap_or(ConfigCommands::Show), &output),
    }
}
