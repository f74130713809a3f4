//! NumPy ndarray-method extractor: tabular layout over the reference manual's
//! method summary table. NumPy is the default reference library, so this
//! catalogue becomes the join key for everything else.

use super::{harvest_longtable, SignatureExtractor};
use crate::ApiRecord;
use scraper::Html;

const NUMPY_METHOD_DOCS_URL: &str =
    "https://docs.scipy.org/doc/numpy/reference/arrays.ndarray.html#array-methods";
const NUMPY_DOCS_ROOT_URL: &str = "https://docs.scipy.org/doc/numpy/reference/";

pub struct NumpyMethods;

impl SignatureExtractor for NumpyMethods {
    fn library(&self) -> &'static str {
        "numpy"
    }

    fn index_url(&self) -> &'static str {
        NUMPY_METHOD_DOCS_URL
    }

    fn harvest_index(&self, index: &Html) -> Vec<ApiRecord> {
        harvest_longtable(index, NUMPY_DOCS_ROOT_URL)
    }
}
