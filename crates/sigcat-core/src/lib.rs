//! # sigcat-core
//!
//! Core functionality for sigcat — a normalized catalogue of public API
//! signatures scraped from the online documentation of several
//! numerical-computing libraries, cross-referenced against one reference
//! library's naming.
//!
//! ## Architecture
//!
//! The crate is organized around the pipeline stages:
//!
//! - **Rendering**: fetch a documentation URL and return its HTML
//!   ([`render::PageRenderer`], with an HTTP-backed production impl)
//! - **Extraction**: per-library [`extract::SignatureExtractor`]s sharing one
//!   grammar, producing uniform [`ApiRecord`]s
//! - **Building**: [`builder::build_catalogue`] walks candidate pages
//!   sequentially, tolerating individual-page failure
//! - **Unification**: [`unify::unify`] joins N catalogues against the
//!   reference library's naming
//! - **Codecs & artifacts**: JSON/delimited-text/HTML persistence
//!   ([`csv`], [`artifacts`])
//!
//! ## Quick start
//!
//! ```no_run
//! use sigcat_core::{build_catalogue, extract, Engine, HttpRenderer};
//!
//! # async fn run() -> sigcat_core::Result<()> {
//! let renderer = HttpRenderer::new(Engine::Chromium)?;
//! let extractor = extract::by_id("cupy")?;
//! let outcome = build_catalogue(&renderer, extractor.as_ref()).await?;
//! println!("Total APIs: {}", outcome.records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Failures are contained at the smallest unit: an unrenderable page becomes
//! a [`FailureRecord`], an extraction miss is a debug-level skip, a join
//! inconsistency is a logged warning. Only "cannot start" conditions
//! propagate as [`Error`].

/// Artifact read/write and file naming conventions
pub mod artifacts;
/// Catalogue builder: sequential render+extract over candidate URLs
pub mod builder;
/// Delimited-text codec with the project's escaping rules
pub mod csv;
/// Error types and result alias
pub mod error;
/// Per-library signature extractors and the shared extraction grammar
pub mod extract;
/// Page rendering over HTTP
pub mod render;
/// Core data types
pub mod types;
/// Cross-library unification join
pub mod unify;

pub use builder::build_catalogue;
pub use error::{Error, Result};
pub use render::{Engine, HttpRenderer, PageRenderer};
pub use types::{
    compare_by_name, sort_by_name, ApiRecord, Catalogue, FailureRecord, JoinedTable,
    ScrapeOutcome,
};
pub use unify::{unify, JoinInput};
