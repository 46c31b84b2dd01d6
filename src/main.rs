mod config;
mod database;
mod entities;
mod forms;
mod http_server;
mod logging;
mod ports;
mod seed;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config, database::Database, http_server::app::HttpServerConfig,
    logging::setup_logging,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "SHOWBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level (default: info)
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "SHOWBOOK_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the booking site and GraphQL API
    Serve {
        /// The port to run the server on
        #[arg(short, long, default_value = "3000", env = "SHOWBOOK_HTTP_PORT")]
        port: u16,

        /// Address to bind, overrides the config file
        #[arg(short, long, env = "SHOWBOOK_BIND_ADDRESS")]
        bind: Option<String>,

        /// Allowed CORS origin in release builds
        #[arg(long, env = "SHOWBOOK_ALLOWED_ORIGIN")]
        allowed_origin: Option<String>,
    },
    /// Fill the database with demo venues, artists and shows
    Seed {
        /// Seed even when the database already has venues
        #[arg(short, long)]
        force: bool,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("Showbook starting");
    log::debug!("Loading configuration");

    let config = {
        if let Some(config) = args.config {
            Config::from_file(&config)
        } else {
            Config::load()
        }
    }
    .with_context(|| "Failed to load showbook config")?;

    match args.command {
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = Config::create_default()?;
                log::info!("Default config created at: {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
        Commands::Seed { force } => {
            let database = Database::open(&config.database_path()).await?;
            let summary = seed::seed(&database, force).await?;
            log::info!(
                "Seeded {} venues, {} artists and {} shows",
                summary.venues,
                summary.artists,
                summary.shows
            );
        }
        Commands::Serve {
            port,
            bind,
            allowed_origin,
        } => {
            let database = Database::open(&config.database_path()).await?;
            let bind_address = bind.unwrap_or_else(|| config.bind_address().to_string());

            log::info!("Starting HTTP server on {}:{}", bind_address, port);
            http_server::app::start(HttpServerConfig {
                port,
                bind_address,
                database,
                allowed_origin,
            })
            .await?;
        }
    }

    Ok(())
}
