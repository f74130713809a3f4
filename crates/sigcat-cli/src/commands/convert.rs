//! Conversion commands: the JSON↔CSV manual-correction loop.

use anyhow::Result;
use sigcat_core::artifacts;
use std::path::Path;

/// Regenerates `.csv` siblings for every `.json` file in `data_dir`.
pub fn json_to_csv(data_dir: &Path) -> Result<()> {
    artifacts::json_dir_to_csv(data_dir)?;
    Ok(())
}

/// Converts hand-edited `.csv` files in `data_dir` back to `.json`.
pub fn csv_to_json(data_dir: &Path) -> Result<()> {
    artifacts::csv_dir_to_json(data_dir)?;
    Ok(())
}
