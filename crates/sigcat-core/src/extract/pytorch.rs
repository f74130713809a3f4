//! PyTorch extractor: tabular layout over the `torch.Tensor` reference page.
//!
//! Tensor methods are documented as definition lists under one section. The
//! page lists bare method names, so `tensor.` is prefixed onto both name and
//! signature, and only entries carrying a same-page anchor link are kept.

use super::{
    callable_name, child_elements, collapse_breaks, next_element, remove_breaks, text_of,
    SignatureExtractor,
};
use crate::ApiRecord;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

const PYTORCH_DOCS_INDEX_URL: &str = "https://pytorch.org/docs/stable/tensors.html";
const PYTORCH_DOCS_ROOT_URL: &str = "https://pytorch.org/docs/stable/tensors.html";

static TENSOR_SECTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r"#torch\.Tensor").expect("valid section selector"));
static ANCHOR_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.anchorjs-link").expect("valid anchor selector"));

pub struct PyTorch;

impl SignatureExtractor for PyTorch {
    fn library(&self) -> &'static str {
        "pytorch"
    }

    fn index_url(&self) -> &'static str {
        PYTORCH_DOCS_INDEX_URL
    }

    fn harvest_index(&self, index: &Html) -> Vec<ApiRecord> {
        let Some(container) = index
            .select(&TENSOR_SECTION)
            .next()
            .and_then(next_element)
        else {
            debug!("Unable to find the torch.Tensor section. Skipping...");
            return Vec::new();
        };

        let mut records = Vec::new();
        for entry in child_elements(container).filter(|el| el.value().name() == "dl") {
            let Some(definition) = child_elements(entry).next() else {
                continue;
            };
            let signature = remove_breaks(&text_of(definition));
            let base = callable_name(&signature).unwrap_or(&signature);
            let name = format!("tensor.{base}");

            let description = next_element(definition)
                .and_then(|dd| child_elements(dd).next())
                .map(|el| collapse_breaks(&text_of(el)))
                .unwrap_or_default();
            if description.is_empty() {
                debug!(
                    "Interface definition does not have a description. Interface: {}. Skipping...",
                    name
                );
                continue;
            }

            let Some(link) = definition
                .select(&ANCHOR_LINK)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                debug!(
                    "Interface does not have a documentation link. Interface: {}. Skipping...",
                    name
                );
                continue;
            };

            records.push(ApiRecord {
                name,
                description,
                signature: format!("tensor.{signature}"),
                url: format!("{PYTORCH_DOCS_ROOT_URL}{link}"),
                refs: std::collections::BTreeMap::new(),
            });
        }
        records
    }
}
