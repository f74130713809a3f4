//! Html command: render the unified join into the page template.

use anyhow::Result;
use sigcat_core::artifacts;
use std::path::Path;

pub fn execute(data_dir: &Path, template: &Path, out: &Path) -> Result<()> {
    let join_json = data_dir.join("joins").join("unified_join.json");
    artifacts::write_html_table(&join_json, template, out)?;
    Ok(())
}
