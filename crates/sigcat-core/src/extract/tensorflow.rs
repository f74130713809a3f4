//! TensorFlow extractor: per-page layout over the rendered "devsite" API
//! index. Symbol pages carry the interface name in the page title; module
//! pages are recognized by their `Module:` title and skipped.

use super::{collapse_breaks, next_element, text_of, SignatureExtractor};
use crate::ApiRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

const TENSORFLOW_DOCS_INDEX_URL: &str = "https://www.tensorflow.org/api_docs/python";

static RE_API_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tf\.").expect("valid include regex"));
static RE_API_EXCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^tf\.(?:[A-Z]|audio|autodiff|autograph|compat|config|data|debugging|distribute|dtypes|errors|estimator|experimental|feature_column|graph_util|image|io|keras|lite|lookup|losses|metrics|mixed_precision|mlir|nest|nn|optimizers|profiler|quantization|queue|ragged|raw_ops|saved_model|summary|sysconfig|test|tpu|train|types|version|xla)",
    )
    .expect("valid exclude regex")
});
static RE_MODULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Module:").expect("valid module regex"));

static PRIMARY_SYMBOLS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#primary_symbols_2").expect("valid symbols selector"));
static SYMBOL_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li a").expect("valid symbol link selector"));
static PAGE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1.devsite-page-title").expect("valid title selector"));
static TABLE_WRAPPER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".devsite-table-wrapper").expect("valid wrapper selector"));

pub struct TensorFlow;

impl SignatureExtractor for TensorFlow {
    fn library(&self) -> &'static str {
        "tensorflow"
    }

    fn index_url(&self) -> &'static str {
        TENSORFLOW_DOCS_INDEX_URL
    }

    fn candidates(&self, index: &Html) -> Vec<String> {
        let Some(list) = index
            .select(&PRIMARY_SYMBOLS)
            .next()
            .and_then(next_element)
            .filter(|el| el.value().name() == "ul")
        else {
            debug!("Unable to find the primary symbols list. Skipping...");
            return Vec::new();
        };

        let mut out = Vec::new();
        for link in list.select(&SYMBOL_LINKS) {
            let txt = text_of(link);
            if RE_API_INCLUDE.is_match(&txt) && !RE_API_EXCLUDE.is_match(&txt) {
                if let Some(href) = link.value().attr("href") {
                    out.push(href.to_string());
                }
            }
        }
        out
    }

    fn extract(&self, page: &Html, url: &str) -> Option<ApiRecord> {
        let Some(title) = page.select(&PAGE_TITLE).next() else {
            debug!("Unable to find interface definition. Skipping...");
            return None;
        };
        let signature = text_of(title);
        if RE_MODULE.is_match(&signature) {
            debug!("Found a module definition. Skipping...");
            return None;
        }

        let description = header_description(title).unwrap_or_default();
        if description.is_empty() {
            debug!("Interface definition does not have a description. Skipping...");
            return None;
        }

        debug!("Found an interface definition.");
        debug!("Name: {}", signature);
        debug!("Description: {}", description);

        Some(ApiRecord {
            name: signature.clone(),
            description,
            signature,
            url: url.to_string(),
            refs: std::collections::BTreeMap::new(),
        })
    }
}

/// Digs the first descriptive paragraph out of the devsite header layout:
/// two siblings past the title's parent, the paragraph immediately following
/// the signature table wrapper.
fn header_description(title: ElementRef<'_>) -> Option<String> {
    let parent = title.parent().and_then(ElementRef::wrap)?;
    let block = next_element(parent).and_then(next_element)?;
    let wrapper = block.select(&TABLE_WRAPPER).next()?;
    let paragraph = next_element(wrapper).filter(|el| el.value().name() == "p")?;
    Some(collapse_breaks(&text_of(paragraph)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.tensorflow.org/api_docs/python/tf/add";

    fn symbol_page(title: &str, description: &str) -> String {
        format!(
            r#"<div><h1 class="devsite-page-title">{title}</h1></div>
            <div>skipped sibling</div>
            <div>
              <div class="devsite-table-wrapper"><table></table></div>
              <p>{description}</p>
            </div>"#
        )
    }

    #[test]
    fn filters_primary_symbol_candidates() {
        let index = Html::parse_document(
            r##"<h2 id="primary_symbols_2">Primary symbols</h2>
            <ul>
              <li><a href="https://www.tensorflow.org/api_docs/python/tf/add">tf.add</a></li>
              <li><a href="https://www.tensorflow.org/api_docs/python/tf/keras/Model">tf.keras.Model</a></li>
              <li><a href="https://www.tensorflow.org/api_docs/python/tf/Variable">tf.Variable</a></li>
              <li><a href="https://example.com/other">numpy.add</a></li>
            </ul>"##,
        );
        assert_eq!(
            TensorFlow.candidates(&index),
            vec!["https://www.tensorflow.org/api_docs/python/tf/add".to_string()]
        );
    }

    #[test]
    fn extracts_symbol_page() {
        let page = Html::parse_document(&symbol_page("tf.add", "Returns x + y\nelement-wise."));
        let record = TensorFlow.extract(&page, PAGE_URL).unwrap();
        assert_eq!(record.name, "tf.add");
        assert_eq!(record.signature, "tf.add");
        assert_eq!(record.description, "Returns x + y element-wise.");
        assert_eq!(record.url, PAGE_URL);
    }

    #[test]
    fn module_pages_are_skipped() {
        let page = Html::parse_document(&symbol_page("Module: tf.math", "Math operations."));
        assert!(TensorFlow.extract(&page, PAGE_URL).is_none());
    }

    #[test]
    fn missing_description_rejects() {
        let page = Html::parse_document(
            r#"<div><h1 class="devsite-page-title">tf.add</h1></div>
            <div>skipped sibling</div>
            <div><div class="devsite-table-wrapper"><table></table></div></div>"#,
        );
        assert!(TensorFlow.extract(&page, PAGE_URL).is_none());
    }
}
