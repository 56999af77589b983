//! Locator error types
//!
//! A snippet that cannot be found is not an error: lookups return `Ok(None)`.
//! The variants here cover collaborator failures and configuration problems.

use thiserror::Error;

/// Unified locator error type
#[derive(Debug, Error)]
pub enum LocateError {
    /// The document could not be opened or decoded
    #[error("Document load failed: {0}")]
    DocumentLoad(String),

    /// Requested page is outside the document (pages are 1-indexed)
    #[error("Page {page} out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    /// Text runs could not be extracted from a page
    #[error("Text extraction error: {0}")]
    TextExtraction(String),

    /// Collaborator call did not finish in time
    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error (std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed page dump or field list
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LocateError {
    /// Whether this error ends the whole resolution pass rather than one field
    ///
    /// Only a document that cannot be loaded is fatal. Everything a page can
    /// raise, IO included, drops just the field being resolved.
    pub fn is_fatal_to_pass(&self) -> bool {
        matches!(self, LocateError::DocumentLoad(_))
    }
}

/// Result type alias for locator operations
pub type Result<T> = std::result::Result<T, LocateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LocateError::PageOutOfRange { page: 4, page_count: 3 };
        assert_eq!(err.to_string(), "Page 4 out of range (document has 3 pages)");

        let err = LocateError::Timeout(15);
        assert_eq!(err.to_string(), "Operation timed out after 15 seconds");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(LocateError::DocumentLoad("corrupt xref".into()).is_fatal_to_pass());
        assert!(!LocateError::TextExtraction("bad font".into()).is_fatal_to_pass());
        assert!(!LocateError::Timeout(15).is_fatal_to_pass());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "page stream read failed");
        assert!(!LocateError::Io(io).is_fatal_to_pass());
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!LocateError::Json(json).is_fatal_to_pass());
    }
}
