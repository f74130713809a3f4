//! sigcat CLI - scrape and unify array API documentation catalogues.
//!
//! This is the entry point for the `sigcat` command-line interface. Command
//! implementations live in separate modules under `commands`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    match cli.command {
        Commands::Scrape {
            library,
            engine,
            data_dir,
        } => commands::scrape::execute(&library, engine, &data_dir).await,
        Commands::Join {
            reference,
            data_dir,
        } => commands::join::execute(&reference, &data_dir),
        Commands::Json2Csv { data_dir } => commands::convert::json_to_csv(&data_dir),
        Commands::Csv2Json { data_dir } => commands::convert::csv_to_json(&data_dir),
        Commands::Html {
            data_dir,
            template,
            out,
        } => commands::html::execute(&data_dir, &template, &out),
        Commands::Libraries => commands::libraries::execute(),
    }
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
