//! Page rendering: fetch a documentation URL and return its HTML.
//!
//! The pipeline does a static scrape of one page at a time (no JavaScript
//! execution), so "rendering" is an HTTP GET. The [`PageRenderer`] trait is
//! the seam the catalogue builder depends on; tests substitute an in-memory
//! implementation.

use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Browser engine selection, the pipeline's only runtime option.
///
/// With a static scrape the engine determines the user-agent profile sent to
/// the documentation servers rather than a spawned browser process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Engine {
    /// User-agent string matching the selected engine.
    pub fn user_agent(self) -> &'static str {
        match self {
            Self::Chromium => {
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/126.0.0.0 Safari/537.36"
            },
            Self::Firefox => "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
            Self::Webkit => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/17.4 Safari/605.1.15"
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
            Self::Webkit => "webkit",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Self::Chromium),
            "firefox" => Ok(Self::Firefox),
            "webkit" => Ok(Self::Webkit),
            other => Err(format!(
                "unknown engine '{other}' (expected one of: chromium, firefox, webkit)"
            )),
        }
    }
}

/// Capability to render a URL into HTML content.
///
/// Render failures are per-page and recoverable: the catalogue builder
/// records them and moves on.
#[async_trait]
pub trait PageRenderer {
    /// Renders the page at `url`, returning its HTML content.
    async fn render(&self, url: &str) -> Result<String>;
}

/// Production renderer backed by an HTTP client.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Creates a renderer with the default request timeout.
    pub fn new(engine: Engine) -> Result<Self> {
        Self::with_timeout(engine, Duration::from_secs(30))
    }

    /// Creates a renderer with a custom request timeout (primarily for tests).
    pub fn with_timeout(engine: Engine, timeout: Duration) -> Result<Self> {
        info!("Launching {} renderer...", engine);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(engine.user_agent())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        debug!("Navigating to {}.", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Render(format!("unexpected status {status} for {url}")));
        }

        debug!("Loading page content...");
        let content = response.text().await?;
        debug!("Fetched {} bytes from {}", content.len(), url);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn engine_round_trips_through_strings() {
        for engine in [Engine::Chromium, Engine::Firefox, Engine::Webkit] {
            assert_eq!(engine.as_str().parse::<Engine>().unwrap(), engine);
        }
        assert!("opera".parse::<Engine>().is_err());
        assert_eq!(Engine::default(), Engine::Chromium);
    }

    #[tokio::test]
    async fn render_returns_page_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(Engine::Chromium).unwrap();
        let body = renderer.render(&format!("{}/doc.html", server.uri())).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn render_maps_error_status_to_render_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.html"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(Engine::Firefox).unwrap();
        let err = renderer
            .render(&format!("{}/missing.html", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }
}
