//! Cross-library unification join.
//!
//! Merges one reference catalogue with N auxiliary catalogues into a single
//! table keyed by the reference library's naming. Auxiliary records point at
//! the reference via the cross-reference anchor their extractor recorded;
//! anchors naming an unknown reference interface are a data inconsistency —
//! logged and skipped, never fatal.

use crate::{Catalogue, JoinedTable};
use std::collections::HashMap;
use tracing::error;

/// One auxiliary catalogue participating in the join.
#[derive(Debug, Clone)]
pub struct JoinInput {
    /// Library identifier, becomes the column key.
    pub library: String,
    /// Name prefix stripped from matched names (`torch.add` → `add`).
    pub prefix: String,
    /// Where the catalogue came from, for inconsistency messages.
    pub source: String,
    pub records: Catalogue,
}

/// Name prefix convention for a library: its own identifier unless an
/// override applies (`pytorch` names its public interfaces `torch.*`).
pub fn library_prefix(library: &str) -> String {
    match library {
        "pytorch" => "torch".to_string(),
        other => other.to_string(),
    }
}

/// Joins the reference catalogue with the auxiliary catalogues, producing one
/// row per reference name in ascending name order.
///
/// Reference duplicates collapse last-write-wins; auxiliary matches for the
/// same (reference-name, library) pair also resolve last-write-wins in the
/// order the auxiliaries are supplied.
pub fn unify(
    reference_library: &str,
    reference: &Catalogue,
    auxiliaries: &[JoinInput],
) -> JoinedTable {
    let mut matches: HashMap<&str, HashMap<&str, String>> = reference
        .iter()
        .map(|rec| (rec.name.as_str(), HashMap::new()))
        .collect();

    for aux in auxiliaries {
        let strip = format!("{}.", aux.prefix);
        for rec in &aux.records {
            let Some(anchor) = rec.reference_anchor(reference_library) else {
                continue;
            };
            let Some(row) = matches.get_mut(anchor) else {
                error!(
                    "Unrecognized {} API: {}. File: {}.",
                    reference_library, anchor, aux.source
                );
                continue;
            };
            row.insert(aux.library.as_str(), rec.name.replace(&strip, ""));
        }
    }

    let mut names: Vec<&str> = matches.keys().copied().collect();
    names.sort_unstable();

    let mut libraries = Vec::with_capacity(auxiliaries.len() + 1);
    libraries.push(reference_library.to_string());
    libraries.extend(auxiliaries.iter().map(|aux| aux.library.clone()));

    let rows = names
        .iter()
        .map(|name| {
            let row = &matches[name];
            let mut values = Vec::with_capacity(libraries.len());
            values.push((*name).to_string());
            for aux in auxiliaries {
                values.push(row.get(aux.library.as_str()).cloned().unwrap_or_default());
            }
            values
        })
        .collect();

    JoinedTable { libraries, rows }
}
