//! Catalogue builder: drives the renderer and a library's extractor over the
//! candidate pages and collects the results.
//!
//! Rendering is strictly sequential — one render+extract step at a time, no
//! fan-out — so throughput is bounded by page-render latency. A failed render
//! becomes a [`FailureRecord`] and never aborts the run; each URL is attempted
//! exactly once.

use crate::extract::SignatureExtractor;
use crate::render::PageRenderer;
use crate::{sort_by_name, FailureRecord, Result, ScrapeOutcome};
use scraper::Html;
use tracing::{debug, info};

/// Builds one library's catalogue: renders the index, walks the candidate
/// pages in input order, and returns the sorted records plus the failure log.
///
/// Only an unreachable index page is fatal; per-candidate failures are
/// recorded and the run continues.
pub async fn build_catalogue(
    renderer: &dyn PageRenderer,
    extractor: &dyn SignatureExtractor,
) -> Result<ScrapeOutcome> {
    debug!("Navigating to {}.", extractor.index_url());
    let index_content = renderer.render(extractor.index_url()).await?;

    debug!("Searching for applicable APIs...");
    let (mut records, candidates) = {
        let index = Html::parse_document(&index_content);
        (extractor.harvest_index(&index), extractor.candidates(&index))
    };
    debug!("Results: {} candidates.", candidates.len());

    let mut failures = Vec::new();
    let total = candidates.len();
    for (i, url) in candidates.iter().enumerate() {
        debug!("({} of {}) Navigating to {}.", i + 1, total, url);
        let content = match renderer.render(url).await {
            Ok(content) => content,
            Err(err) => {
                failures.push(FailureRecord {
                    error: err.to_string(),
                    url: url.clone(),
                });
                continue;
            },
        };

        debug!("Searching for interface definition...");
        let record = {
            let page = Html::parse_document(&content);
            extractor.extract(&page, url)
        };
        match record {
            Some(record) => records.push(record),
            None => debug!("No record extracted from {}. Skipping...", url),
        }
    }

    debug!("Sorting results...");
    sort_by_name(&mut records);

    info!(
        "Finished {}: {} APIs, {} failures.",
        extractor.library(),
        records.len(),
        failures.len()
    );
    Ok(ScrapeOutcome { records, failures })
}
