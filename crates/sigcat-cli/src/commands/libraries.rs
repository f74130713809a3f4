//! Libraries command: list the registered extractors.

use anyhow::Result;
use sigcat_core::extract;

pub fn execute() -> Result<()> {
    for extractor in extract::registry() {
        println!("{}\t{}", extractor.library(), extractor.index_url());
    }
    Ok(())
}
