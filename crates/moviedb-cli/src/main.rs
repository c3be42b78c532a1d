//! moviedb CLI - local movie catalog

mod output;
mod prompt;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use moviedb_core::commands::{catalog, FieldUpdates, NewMovie, Selector};
use moviedb_core::config::Config;
use moviedb_core::storage::{self, Database};

use crate::prompt::Prompter;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "moviedb")]
#[command(author, version, about = "Manage a local movie catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Database file (overrides database.path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (defaults to config.toml in the moviedb config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Catalog(CatalogCommand),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that run against the movie database
#[derive(Subcommand)]
enum CatalogCommand {
    /// Open the interactive menu (default)
    Shell,

    /// Import movies from a JSON array file
    Import {
        /// JSON file (defaults to files.import_path)
        file: Option<PathBuf>,
    },

    /// List movies, optionally filtered by title
    Search {
        /// Partial title to match
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Add a movie
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        director: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        year: String,
        /// Rating between 1.0 and 10.0
        #[arg(long)]
        rating: String,
    },

    /// Modify the first movie whose title contains QUERY
    Modify {
        query: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        rating: Option<String>,
    },

    /// Delete every movie, or the first movie whose title contains QUERY
    Delete {
        #[arg(required_unless_present = "all")]
        query: Option<String>,
        /// Delete every movie
        #[arg(long, conflicts_with = "query")]
        all: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export movies to a JSON file
    Export {
        /// Partial title to match (defaults to every movie)
        #[arg(short, long)]
        title: Option<String>,
        /// Destination file (defaults to files.export_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with listings
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("moviedb=warn,moviedb_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    let command = match cli.command {
        Some(Commands::Config { action }) => return cmd_config(action, config, &config_path),
        Some(Commands::Catalog(command)) => command,
        None => CatalogCommand::Shell,
    };

    config.apply_overrides(|key| std::env::var(key).ok());
    if let Some(db_path) = cli.db {
        config.database.path = db_path;
    }

    let mut prompter = Prompter::new()?;

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(err) => {
            output::print_error(&err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let result = run(&db, &config, &mut prompter, command).await;
    db.close().await;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            output::print_error(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(
    db: &Database,
    config: &Config,
    prompter: &mut Prompter,
    command: CatalogCommand,
) -> moviedb_core::Result<()> {
    match command {
        CatalogCommand::Shell => Shell::new(db, config, prompter).run().await,

        CatalogCommand::Import { file } => {
            let path = file.unwrap_or_else(|| config.files.import_path.clone());
            let report = storage::import_movies(db, &path).await?;
            output::print_import(&report);
        }

        CatalogCommand::Search { title } => {
            let movies = catalog::search(db, &selector(title)).await?;
            output::print_movies(&movies);
        }

        CatalogCommand::Add {
            title,
            director,
            genre,
            year,
            rating,
        } => {
            let movie = NewMovie::parse(&title, &director, &genre, &year, &rating)?;
            let stored = catalog::add(db, movie).await?;
            output::print_added(&stored);
        }

        CatalogCommand::Modify {
            query,
            title,
            director,
            genre,
            year,
            rating,
        } => {
            let updates = FieldUpdates::parse(
                title.as_deref().unwrap_or_default(),
                director.as_deref().unwrap_or_default(),
                genre.as_deref().unwrap_or_default(),
                year.as_deref().unwrap_or_default(),
                rating.as_deref().unwrap_or_default(),
            )?;
            if updates.is_empty() {
                println!("No fields given; nothing to change.");
                return Ok(());
            }
            let outcome = catalog::modify(db, &query, updates).await?;
            output::print_modify(&outcome);
        }

        CatalogCommand::Delete { all: true, .. } => {
            let removed = catalog::delete_all(db).await?;
            output::print_delete_all(removed);
        }

        CatalogCommand::Delete { query, yes, .. } => {
            let query = query.unwrap_or_default();
            let outcome = catalog::delete_matching(db, &query, |matches| {
                output::print_movies(matches);
                yes || prompter.confirm(&format!("Delete \"{}\"? (y/n): ", matches[0].title))
            })
            .await?;
            output::print_delete(&outcome);
        }

        CatalogCommand::Export {
            title,
            output: destination,
        } => {
            let path = destination.unwrap_or_else(|| config.files.export_path.clone());
            let outcome = storage::export_movies(db, &path, &selector(title)).await?;
            output::print_export(&outcome);
        }
    }
    Ok(())
}

fn selector(title: Option<String>) -> Selector {
    title.map_or(Selector::All, Selector::title)
}

fn cmd_config(
    action: ConfigAction,
    mut config: Config,
    config_path: &std::path::Path,
) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Get { key } => println!("{}", config.get(&key)?),
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save_to(config_path)?;
            println!("{key} set to: {}", config.get(&key)?);
        }
        ConfigAction::List => {
            for (key, value) in config.list()? {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Reset => {
            Config::reset(config_path)?;
            println!("Configuration reset to defaults.");
        }
        ConfigAction::Path => println!("{}", config_path.display()),
    }
    Ok(ExitCode::SUCCESS)
}
