//! Scrape command: build and persist one library's catalogue.

use anyhow::Result;
use sigcat_core::{artifacts, build_catalogue, extract, Engine, HttpRenderer};
use std::path::Path;

/// Scrapes `library` and writes `{data_dir}/{library}.json` + `.csv`.
///
/// Partial extraction is a success: individual page failures are listed on
/// stderr but never change the exit code. Only an unknown library, a failed
/// renderer start, or an unreachable index page are fatal.
pub async fn execute(library: &str, engine: Engine, data_dir: &Path) -> Result<()> {
    let extractor = extract::by_id(library)?;
    let renderer = HttpRenderer::new(engine)?;

    let outcome = build_catalogue(&renderer, extractor.as_ref()).await?;
    artifacts::write_catalogue(data_dir, library, &outcome.records)?;

    println!(
        "{}: {} APIs, {} failures",
        library,
        outcome.records.len(),
        outcome.failures.len()
    );
    for failure in &outcome.failures {
        eprintln!("  failed: {} ({})", failure.url, failure.error);
    }
    Ok(())
}
