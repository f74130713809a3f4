//! Sparse (pydata/sparse) extractor: tabular layout, same longtable structure
//! as the NumPy reference manual.

use super::{harvest_longtable, SignatureExtractor};
use crate::ApiRecord;
use scraper::Html;

const SPARSE_DOCS_INDEX_URL: &str = "https://sparse.pydata.org/en/latest/generated/sparse.html";
const SPARSE_DOCS_ROOT_URL: &str = "https://sparse.pydata.org/en/latest/generated/";

pub struct Sparse;

impl SignatureExtractor for Sparse {
    fn library(&self) -> &'static str {
        "sparse"
    }

    fn index_url(&self) -> &'static str {
        SPARSE_DOCS_INDEX_URL
    }

    fn harvest_index(&self, index: &Html) -> Vec<ApiRecord> {
        harvest_longtable(index, SPARSE_DOCS_ROOT_URL)
    }
}
