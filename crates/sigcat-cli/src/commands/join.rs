//! Join command: unify previously serialized catalogues.

use anyhow::{Context, Result};
use sigcat_core::{artifacts, unify};
use std::path::Path;

/// Reads `{data_dir}/{reference}.json` and every auxiliary catalogue under
/// `{data_dir}/joins/`, then writes `unified_join.json` / `unified_join.csv`.
///
/// A missing reference catalogue is fatal (the join cannot start); unreadable
/// auxiliary files and unrecognized anchors are reported and skipped.
pub fn execute(reference: &str, data_dir: &Path) -> Result<()> {
    let reference_path = data_dir.join(format!("{reference}.json"));
    let reference_catalogue = artifacts::read_catalogue(&reference_path)
        .with_context(|| format!("cannot read reference catalogue {}", reference_path.display()))?;

    let joins_dir = data_dir.join("joins");
    let inputs = artifacts::load_join_inputs(&joins_dir, reference)
        .with_context(|| format!("cannot read joins directory {}", joins_dir.display()))?;

    let table = unify(reference, &reference_catalogue, &inputs);
    artifacts::write_joined(&joins_dir, &table)?;

    println!(
        "joined {} libraries over {} {} names",
        table.libraries.len(),
        table.rows.len(),
        reference
    );
    Ok(())
}
