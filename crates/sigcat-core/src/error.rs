//! Error types and handling for sigcat-core operations.
//!
//! Failures are contained at the smallest unit that makes sense: a page that
//! cannot be rendered becomes a [`crate::FailureRecord`] rather than an error,
//! and a join input file that cannot be read is reported and skipped. The
//! variants below cover the failures that do propagate — mostly "cannot start"
//! conditions (unknown library, unreadable reference catalogue) and I/O on
//! required artifacts.

use thiserror::Error;

/// The main error type for sigcat-core operations.
///
/// All fallible public functions in sigcat-core return `Result<T, Error>`.
/// `Display` gives a user-facing message; the source chain is preserved for
/// the wrapped I/O, network, and JSON errors.
#[derive(Error, Debug)]
pub enum Error {
    /// File system operation failed (reading or writing an artifact).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response was obtained.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A page was fetched but could not be used (non-success status).
    #[error("Render error: {0}")]
    Render(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited-text encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The unification join could not be performed.
    #[error("Join error: {0}")]
    Join(String),

    /// The HTML template was missing or malformed.
    #[error("Template error: {0}")]
    Template(String),

    /// No extractor is registered for the requested library identifier.
    #[error("Unknown library: {0}")]
    UnknownLibrary(String),
}

/// Convenience alias used throughout sigcat-core.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category() {
        let err = Error::UnknownLibrary("cupyx".to_string());
        assert_eq!(err.to_string(), "Unknown library: cupyx");

        let err = Error::Render("unexpected status 503 for https://example.com".to_string());
        assert!(err.to_string().starts_with("Render error:"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
