// src/error.rs
//! Error types for the ingestion pipeline and the dataset loader.
//!
//! Every failure carries enough context to name the offending document.
//! Batch loops use [`Error::severity`] to decide between "log, skip, carry on"
//! and "stop the vendor run".

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How a batch loop should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// One document is bad; skip it and keep going.
    Recoverable,
    /// The extraction logic no longer matches the source; stop.
    Fatal,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed vendor document (missing header, wrong token count, ...)
    #[error("Unable to parse {doc}: {reason}")]
    Parse {
        /// Document or filter identifier
        doc: String,
        reason: String,
    },

    /// Template/geometry mismatch; the page no longer looks like we expect
    #[error("Layout mismatch in {doc}: {reason}")]
    Layout {
        doc: String,
        reason: String,
    },

    /// Schema constraint violated, or an empty dataset
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Requested filter ID or brand is not in the dataset
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub fn parse(doc: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse { doc: doc.into(), reason: reason.into() }
    }

    pub fn layout(doc: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Layout { doc: doc.into(), reason: reason.into() }
    }

    /// Parse and transport failures only cost one document.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Parse { .. } | Error::Http(_) => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Recoverable
    }
}
