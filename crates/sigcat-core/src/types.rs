use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One documented interface extracted from a library's documentation.
///
/// Field order matters: the delimited-text header row follows first-record
/// insertion order, so `name` comes first and cross-reference fields last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRecord {
    /// Canonical dotted identifier, e.g. `cupy.add`.
    pub name: String,
    /// First descriptive sentence/paragraph, whitespace-normalized.
    pub description: String,
    /// Raw textual call signature as it appears in the documentation.
    pub signature: String,
    /// Absolute documentation URL for this interface.
    pub url: String,
    /// Cross-library anchors recorded during extraction (e.g. `numpy`,
    /// `numpy_url`). Empty for libraries without a cross-reference rule.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub refs: BTreeMap<String, String>,
}

impl ApiRecord {
    /// Returns the cross-reference anchor recorded for `library`, if any.
    ///
    /// Empty strings count as "no anchor": the extractor emits the key with
    /// an empty value when no satisfying link was found.
    pub fn reference_anchor(&self, library: &str) -> Option<&str> {
        self.refs.get(library).map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Ordered sequence of records for one library, sorted ascending by `name`.
///
/// Duplicate names are possible when the source documentation lists an item
/// twice; they are kept as-is.
pub type Catalogue = Vec<ApiRecord>;

/// Three-way `name` comparison used everywhere a catalogue is sorted.
pub fn compare_by_name(a: &ApiRecord, b: &ApiRecord) -> Ordering {
    a.name.cmp(&b.name)
}

/// Sorts a catalogue ascending by `name`. Stability of equal names is not
/// required.
pub fn sort_by_name(records: &mut [ApiRecord]) {
    records.sort_unstable_by(compare_by_name);
}

/// A page that could not be rendered during a scrape run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub error: String,
    pub url: String,
}

/// Result of one catalogue-builder run: extracted records plus the pages
/// that failed to render. Neither blocks the other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub records: Catalogue,
    pub failures: Vec<FailureRecord>,
}

/// The unification join output: one row per reference-library name, one
/// column per participating library (reference first).
///
/// Serializes as an array of objects whose keys follow library-participation
/// order; unmatched cells are the empty string, never absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedTable {
    /// Column order: the reference library, then auxiliaries as supplied.
    pub libraries: Vec<String>,
    /// Each row is aligned with `libraries`; `row[0]` is the reference name.
    pub rows: Vec<Vec<String>>,
}

impl JoinedTable {
    /// Flattens the table into ordered JSON objects, one per row.
    pub fn to_objects(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.libraries
                    .iter()
                    .cloned()
                    .zip(row.iter().map(|v| serde_json::Value::String(v.clone())))
                    .collect()
            })
            .collect()
    }
}

impl Serialize for JoinedTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let objects = self.to_objects();
        let mut seq = serializer.serialize_seq(Some(objects.len()))?;
        for obj in &objects {
            seq.serialize_element(obj)?;
        }
        seq.end()
    }
}
