//! CLI structure and argument parsing.
//!
//! `sigcat` follows a command-subcommand pattern: one subcommand per pipeline
//! stage, mirroring how the artifacts flow — `scrape` produces per-library
//! catalogues, `join` unifies them, `json2csv`/`csv2json` run the
//! manual-correction loop, and `html` renders the published table.
//!
//! ```bash
//! sigcat scrape cupy --engine chromium --data-dir data
//! sigcat join --reference numpy --data-dir data
//! sigcat json2csv --data-dir data
//! sigcat csv2json --data-dir data/joins
//! sigcat html --data-dir data
//! sigcat libraries
//! ```

use clap::{Parser, Subcommand};
use sigcat_core::Engine;
use std::path::PathBuf;

/// Top-level CLI for the `sigcat` command.
#[derive(Parser, Debug)]
#[command(name = "sigcat")]
#[command(version)]
#[command(about = "sigcat - scrape and unify array API documentation catalogues", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug-level logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape one library's documentation into a catalogue artifact
    Scrape {
        /// Library identifier (see `sigcat libraries`)
        library: String,

        /// Browser engine profile for page rendering
        #[arg(long, default_value_t = Engine::Chromium)]
        engine: Engine,

        /// Directory receiving `{library}.json` and `{library}.csv`
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Join previously scraped catalogues against the reference library
    Join {
        /// Reference library whose naming becomes the join key
        #[arg(long, default_value = "numpy")]
        reference: String,

        /// Directory holding `{reference}.json` and the `joins/` inputs
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Regenerate the `.csv` sibling of every `.json` artifact
    #[command(name = "json2csv")]
    Json2Csv {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Convert hand-edited join `.csv` files back to `.json`
    #[command(name = "csv2json")]
    Csv2Json {
        #[arg(long, default_value = "data/joins")]
        data_dir: PathBuf,
    },

    /// Render the unified join into the HTML template
    Html {
        /// Directory holding `joins/unified_join.json`
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Template file containing a `{{TABLE}}` placeholder
        #[arg(long, default_value = "docs/template.html")]
        template: PathBuf,

        /// Output path for the rendered page
        #[arg(long, default_value = "docs/index.html")]
        out: PathBuf,
    },

    /// List the registered library extractors
    Libraries,
}
