//! CuPy extractor: per-page layout over the Sphinx general index.
//!
//! CuPy's documentation is the one source that embeds explicit cross-library
//! anchors: "see also" blocks link to the equivalent NumPy interface. Those
//! anchors are recorded on the emitted record (`numpy` / `numpy_url`) and
//! seed the unification join.

use super::{
    callable_name, child_elements, clean_signature, collapse_breaks, next_element,
    strip_leading_newline, text_of, SignatureExtractor,
};
use crate::ApiRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

const CUPY_DOCS_INDEX_URL: &str = "https://docs-cupy.chainer.org/en/stable/genindex.html";
const CUPY_DOCS_ROOT_URL: &str = "https://docs-cupy.chainer.org/en/stable/";

static RE_API_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(in module cupy.*\)").expect("valid include regex"));
static RE_API_EXCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cupy\.(?:cuda|testing)").expect("valid exclude regex"));
static RE_UFUNC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?= ?<ufunc.*>").expect("valid ufunc regex"));
static RE_NUMPY_XREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(in NumPy.*\)").expect("valid xref regex"));

static INDEX_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".indextable li a").expect("valid index selector"));
static DATA_DEFINITION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dl.data dt").expect("valid data selector"));
static FUNCTION_DEFINITION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dl.function dt").expect("valid function selector"));
static SEE_ALSO_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.seealso a.reference.external").expect("valid see-also selector")
});

pub struct Cupy;

impl SignatureExtractor for Cupy {
    fn library(&self) -> &'static str {
        "cupy"
    }

    fn index_url(&self) -> &'static str {
        CUPY_DOCS_INDEX_URL
    }

    fn candidates(&self, index: &Html) -> Vec<String> {
        let mut out = Vec::new();
        for link in index.select(&INDEX_LINKS) {
            let txt = text_of(link);
            if RE_API_INCLUDE.is_match(&txt) && !RE_API_EXCLUDE.is_match(&txt) {
                if let Some(href) = link.value().attr("href") {
                    out.push(format!("{CUPY_DOCS_ROOT_URL}{href}"));
                }
            }
        }
        out
    }

    fn extract(&self, page: &Html, url: &str) -> Option<ApiRecord> {
        let definition = page
            .select(&DATA_DEFINITION)
            .next()
            .or_else(|| page.select(&FUNCTION_DEFINITION).next());
        let Some(definition) = definition else {
            debug!("Unable to find interface definition. Skipping...");
            return None;
        };

        let description_node =
            next_element(definition).filter(|el| el.value().name() == "dd")?;
        let description = child_elements(description_node)
            .next()
            .map(|el| collapse_breaks(&text_of(el)))
            .unwrap_or_default();
        if description.is_empty() {
            debug!("Interface definition does not have a description. Skipping...");
            return None;
        }

        let mut signature = clean_signature(&text_of(definition)).to_string();
        let mut name = match callable_name(&signature) {
            Some(name) => name.to_string(),
            None => {
                if !RE_UFUNC.is_match(&signature) {
                    debug!(
                        "Interface definition is not a function. Interface: {}. Skipping...",
                        signature
                    );
                    return None;
                }
                signature.clone()
            },
        };
        strip_leading_newline(&mut name, &mut signature);
        if signature.is_empty() {
            debug!("Unable to find interface definition. Skipping...");
            return None;
        }

        let (numpy, numpy_url) = numpy_anchor(description_node, &name).unwrap_or_default();

        debug!("Found an interface definition.");
        debug!("Name: {}", name);
        debug!("Signature: {}", signature);
        debug!("Description: {}", description);

        let mut record = ApiRecord {
            name,
            description,
            signature,
            url: url.to_string(),
            refs: std::collections::BTreeMap::new(),
        };
        record.refs.insert("numpy".to_string(), numpy);
        record.refs.insert("numpy_url".to_string(), numpy_url);
        Some(record)
    }
}

/// Searches the description's "see also" block for an external NumPy link
/// whose interface name matches the current one.
///
/// A link qualifies when its `title` matches `(in NumPy ...)` and the last
/// dotted segment of its text equals the last dotted segment of the current
/// name's first space-delimited token (case-sensitive, non-alphanumerics
/// stripped). The first satisfying match wins.
fn numpy_anchor(description_node: ElementRef<'_>, name: &str) -> Option<(String, String)> {
    let current = last_segment(name.split_whitespace().next().unwrap_or(""));
    if current.is_empty() {
        return None;
    }
    for link in description_node.select(&SEE_ALSO_LINKS) {
        let title = link.value().attr("title").unwrap_or("");
        if !RE_NUMPY_XREF.is_match(title) {
            continue;
        }
        let text = text_of(link);
        let text = text.trim();
        if last_segment(text) == current {
            let href = link.value().attr("href").unwrap_or("").to_string();
            debug!("Found a NumPy equivalent: {}", text);
            return Some((text.to_string(), href));
        }
    }
    None
}

/// Last dotted segment with non-alphanumeric characters stripped.
fn last_segment(token: &str) -> String {
    token
        .rsplit('.')
        .next()
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://docs-cupy.chainer.org/en/stable/reference/generated/cupy.add.html";

    fn extract(html: &str) -> Option<ApiRecord> {
        let page = Html::parse_document(html);
        Cupy.extract(&page, PAGE_URL)
    }

    #[test]
    fn filters_index_candidates() {
        let index = Html::parse_document(
            r##"<table class="indextable"><tr><td><ul>
            <li><a href="generated/cupy.add.html">add() (in module cupy)</a></li>
            <li><a href="generated/cupy.cuda.Device.html">Device (in module cupy.cuda)</a></li>
            <li><a href="generated/cupy.testing.assert_allclose.html">assert_allclose() (in module cupy.testing)</a></li>
            <li><a href="glossary.html">glossary</a></li>
            </ul></td></tr></table>"##,
        );
        let urls = Cupy.candidates(&index);
        assert_eq!(
            urls,
            vec!["https://docs-cupy.chainer.org/en/stable/generated/cupy.add.html".to_string()]
        );
    }

    #[test]
    fn extracts_function_definition() {
        let record = extract(
            r#"<dl class="function">
            <dt>cupy.add(x1, x2)[source]¶</dt>
            <dd><p>Adds two arrays
elementwise.</p></dd>
            </dl>"#,
        )
        .unwrap();
        assert_eq!(record.name, "cupy.add");
        assert_eq!(record.signature, "cupy.add(x1, x2)");
        assert_eq!(record.description, "Adds two arrays elementwise.");
        assert_eq!(record.url, PAGE_URL);
        assert_eq!(record.refs.get("numpy").unwrap(), "");
        assert_eq!(record.refs.get("numpy_url").unwrap(), "");
    }

    #[test]
    fn data_definition_takes_priority() {
        let record = extract(
            r#"<dl class="data"><dt>cupy.pi = 3.14159¶</dt><dd><p>Pi.</p></dd></dl>
            <dl class="function"><dt>cupy.other(x)¶</dt><dd><p>Other.</p></dd></dl>"#,
        );
        // Non-callable without the ufunc marker is rejected outright.
        assert!(record.is_none());
    }

    #[test]
    fn ufunc_assignment_is_accepted_as_non_callable() {
        let record = extract(
            r#"<dl class="data">
            <dt>cupy.absolute = &lt;ufunc 'cupy_absolute'&gt;¶</dt>
            <dd><p>Elementwise absolute value.</p></dd>
            </dl>"#,
        )
        .unwrap();
        assert_eq!(record.name, "cupy.absolute = <ufunc 'cupy_absolute'>");
        assert_eq!(record.signature, record.name);
    }

    #[test]
    fn empty_description_rejects() {
        let record = extract(
            r#"<dl class="function"><dt>cupy.add(x1, x2)¶</dt><dd></dd></dl>"#,
        );
        assert!(record.is_none());
    }

    #[test]
    fn missing_definition_rejects() {
        assert!(extract("<p>No definitions here.</p>").is_none());
    }

    #[test]
    fn see_also_anchor_recorded_when_names_agree() {
        let record = extract(
            r#"<dl class="function">
            <dt>cupy.add(x1, x2)¶</dt>
            <dd><p>Adds two arrays.</p>
            <div class="seealso"><p>
            <a class="reference external" href="https://docs.scipy.org/doc/numpy/reference/generated/numpy.add.html" title="(in NumPy v1.18)"><code>numpy.add</code></a>
            </p></div></dd>
            </dl>"#,
        )
        .unwrap();
        assert_eq!(record.refs.get("numpy").unwrap(), "numpy.add");
        assert_eq!(
            record.refs.get("numpy_url").unwrap(),
            "https://docs.scipy.org/doc/numpy/reference/generated/numpy.add.html"
        );
    }

    #[test]
    fn see_also_anchor_rejected_when_names_differ() {
        let record = extract(
            r#"<dl class="function">
            <dt>cupy.add(x1, x2)¶</dt>
            <dd><p>Adds two arrays.</p>
            <div class="seealso"><p>
            <a class="reference external" href="https://example.com/numpy.subtract.html" title="(in NumPy v1.18)"><code>numpy.subtract</code></a>
            </p></div></dd>
            </dl>"#,
        )
        .unwrap();
        assert_eq!(record.refs.get("numpy").unwrap(), "");
    }

    #[test]
    fn see_also_requires_numpy_title() {
        let record = extract(
            r#"<dl class="function">
            <dt>cupy.add(x1, x2)¶</dt>
            <dd><p>Adds two arrays.</p>
            <div class="seealso"><p>
            <a class="reference external" href="https://example.com/add.html" title="(in SciPy v1.4)"><code>scipy.add</code></a>
            </p></div></dd>
            </dl>"#,
        )
        .unwrap();
        assert_eq!(record.refs.get("numpy").unwrap(), "");
    }
}
