//! Signature extraction: turn rendered documentation HTML into [`ApiRecord`]s.
//!
//! Each documentation source uses a different HTML structure (definition-list
//! pages, long-table pages, rendered "devsite" headers), so every library gets
//! its own [`SignatureExtractor`] implementation with its own selector
//! priorities and small deviations. All variants converge on the same
//! four-field output and the same accept/reject rule: a record is only
//! emitted when both signature and description are non-empty.
//!
//! Two layout families exist:
//!
//! - *Per-page* (`cupy`, `tensorflow`): the index page yields candidate URLs
//!   via [`SignatureExtractor::candidates`]; each rendered candidate page
//!   yields zero-or-one record via [`SignatureExtractor::extract`].
//! - *Tabular* (`numpy`, `pytorch`, `sparse`): the index page itself lists
//!   every interface, one per row; [`SignatureExtractor::harvest_index`]
//!   extracts all of them in a single pass.

mod cupy;
mod numpy;
mod pytorch;
mod sparse;
mod tensorflow;

use crate::{ApiRecord, Error, Result};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

pub use cupy::Cupy;
pub use numpy::NumpyMethods;
pub use pytorch::PyTorch;
pub use sparse::Sparse;
pub use tensorflow::TensorFlow;

static RE_EOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").expect("valid EOL regex"));

/// Library-specific extraction of API records from rendered documentation.
pub trait SignatureExtractor {
    /// Library identifier, also used for artifact filenames.
    fn library(&self) -> &'static str;

    /// The hand-curated index page listing candidate interfaces.
    fn index_url(&self) -> &'static str;

    /// Candidate page URLs derived from the rendered index, already filtered
    /// by the library's include/exclude rules. Tabular layouts return an
    /// empty list.
    fn candidates(&self, _index: &Html) -> Vec<String> {
        Vec::new()
    }

    /// Records extracted directly from the index page (tabular layouts).
    fn harvest_index(&self, _index: &Html) -> Vec<ApiRecord> {
        Vec::new()
    }

    /// Extracts zero-or-one record from a rendered candidate page.
    fn extract(&self, _page: &Html, _url: &str) -> Option<ApiRecord> {
        None
    }
}

/// All registered library extractors, in registration order.
pub fn registry() -> Vec<Box<dyn SignatureExtractor>> {
    vec![
        Box::new(Cupy),
        Box::new(NumpyMethods),
        Box::new(PyTorch),
        Box::new(Sparse),
        Box::new(TensorFlow),
    ]
}

/// Identifiers of all registered libraries.
pub fn library_ids() -> Vec<&'static str> {
    registry().iter().map(|e| e.library()).collect()
}

/// Looks up an extractor by library identifier.
pub fn by_id(id: &str) -> Result<Box<dyn SignatureExtractor>> {
    registry()
        .into_iter()
        .find(|e| e.library() == id)
        .ok_or_else(|| Error::UnknownLibrary(id.to_string()))
}

// Shared extraction grammar
//
// The helpers below implement the steps every variant agrees on: anchor/source
// marker stripping, callable-name splitting, the leading line-break guard, and
// line-break collapsing in descriptions.

/// Strips the trailing pilcrow permalink and `[source]` markers by truncating
/// at the first occurrence of either.
pub(crate) fn clean_signature(raw: &str) -> &str {
    let cut = raw.split('¶').next().unwrap_or("");
    cut.split("[source]").next().unwrap_or("")
}

/// The substring before the first `(`, or `None` for non-callables.
pub(crate) fn callable_name(signature: &str) -> Option<&str> {
    signature.find('(').map(|j| &signature[..j])
}

/// Drops a stray leading line break from both name and signature.
///
/// Guards against a parsing artifact where the definition node's text starts
/// with a line break; both fields must stay consistent.
pub(crate) fn strip_leading_newline(name: &mut String, signature: &mut String) {
    if name.starts_with('\n') {
        name.remove(0);
        signature.remove(0);
    }
}

/// Collapses all line breaks to single spaces.
pub(crate) fn collapse_breaks(text: &str) -> String {
    RE_EOL.replace_all(text, " ").into_owned()
}

/// Removes all line breaks outright (PyTorch signature cells embed them).
pub(crate) fn remove_breaks(text: &str) -> String {
    RE_EOL.replace_all(text, "").into_owned()
}

/// Full text content of an element, concatenated across nested nodes.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// The next sibling that is an element, skipping text/comment nodes.
pub(crate) fn next_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Child nodes that are elements.
pub(crate) fn child_elements<'a>(
    el: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

static LONGTABLE_ROWS: LazyLock<scraper::Selector> = LazyLock::new(|| {
    scraper::Selector::parse(".longtable.docutils tr").expect("valid longtable selector")
});
static CELL_LINK: LazyLock<scraper::Selector> =
    LazyLock::new(|| scraper::Selector::parse("a").expect("valid link selector"));

/// Harvests one record per row from a Sphinx "longtable" summary page.
///
/// Shared by the NumPy and sparse variants: the first cell holds the
/// signature and a link to the full documentation page, the second cell the
/// description. Rows without a link (section headers, continuation rows) are
/// skipped, as are rows failing the shared accept rule. Table cells wrap
/// freely, so signatures drop their line breaks and descriptions collapse
/// them to spaces like every other variant.
pub(crate) fn harvest_longtable(index: &Html, root_url: &str) -> Vec<ApiRecord> {
    let mut records = Vec::new();
    for row in index.select(&LONGTABLE_ROWS) {
        let Some(cell) = child_elements(row).next() else {
            continue;
        };
        let signature = remove_breaks(&text_of(cell));
        let name = callable_name(&signature).unwrap_or(&signature).to_string();

        let description = next_element(cell)
            .map(|el| collapse_breaks(&text_of(el)))
            .unwrap_or_default();
        if signature.trim().is_empty() || description.trim().is_empty() {
            tracing::debug!("Row has no signature or description. Skipping...");
            continue;
        }

        let Some(link) = cell
            .select(&CELL_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            tracing::debug!(
                "Interface does not have a documentation link. Interface: {}. Skipping...",
                name
            );
            continue;
        };

        records.push(ApiRecord {
            name,
            description,
            signature,
            url: format!("{root_url}{link}"),
            refs: std::collections::BTreeMap::new(),
        });
    }
    records
}
