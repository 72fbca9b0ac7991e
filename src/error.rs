//! Error types for the oodles library.

use std::io;
use thiserror::Error;

use crate::client::ServiceError;

/// Result type alias for oodles operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while addressing or editing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading local files (credentials, images).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured service identity cannot access the document.
    #[error(
        "Document {document_id} is not accessible: remember to share it with {service_email}"
    )]
    NotShared {
        /// Document that rejected the call
        document_id: String,
        /// Service-identity email the document must be shared with
        service_email: String,
    },

    /// The addressed document or element does not exist.
    #[error("{what} not found in document {document_id}")]
    NotFound {
        /// Document that was addressed
        document_id: String,
        /// Description of what was looked up
        what: String,
    },

    /// No sheet carries the requested title.
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// No column carries the requested header.
    #[error("Column '{0}' not found in header row")]
    ColumnNotFound(String),

    /// No image carries the requested title or description.
    #[error("Image titled '{0}' not found")]
    ImageNotFound(String),

    /// No text run contains the requested query.
    #[error("No text run contains '{0}'")]
    TextNotFound(String),

    /// The call violates a usage precondition.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Page number is past the end of the presentation.
    #[error("Page {0} is out of range (presentation has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// A document ID, URL or fetched tree could not be understood.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The document service failed for a reason other than access.
    #[error("{operation} failed for document {document_id}: {message}")]
    Service {
        /// Operation that was attempted
        operation: String,
        /// Document that was addressed
        document_id: String,
        /// Transport-level failure description
        message: String,
    },

    /// Object storage upload or URL signing failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be assembled.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map a collaborator failure onto the crate taxonomy.
    ///
    /// Permission failures carry `service_email` so the operator knows
    /// whom to share the document with.
    pub fn from_service(
        err: ServiceError,
        operation: &str,
        document_id: &str,
        service_email: &str,
    ) -> Self {
        match err {
            ServiceError::PermissionDenied => {
                log::warn!(
                    "{} on {} was refused, share the document with {}",
                    operation,
                    document_id,
                    service_email
                );
                Error::NotShared {
                    document_id: document_id.to_string(),
                    service_email: service_email.to_string(),
                }
            }
            ServiceError::NotFound(what) => Error::NotFound {
                document_id: document_id.to_string(),
                what,
            },
            ServiceError::Transport(message) => Error::Service {
                operation: operation.to_string(),
                document_id: document_id.to_string(),
                message,
            },
        }
    }

    /// Check if this error is an authorization failure.
    pub fn is_not_shared(&self) -> bool {
        matches!(self, Error::NotShared { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_shared_mentions_email() {
        let err = Error::from_service(
            ServiceError::PermissionDenied,
            "fetch",
            "doc123",
            "bot@project.iam.gserviceaccount.com",
        );
        assert!(err.is_not_shared());
        let text = err.to_string();
        assert!(text.contains("doc123"));
        assert!(text.contains("share it with bot@project.iam.gserviceaccount.com"));
    }

    #[test]
    fn test_transport_error_context() {
        let err = Error::from_service(
            ServiceError::Transport("503 backend error".into()),
            "batchUpdate",
            "doc9",
            "bot@x",
        );
        assert_eq!(
            err.to_string(),
            "batchUpdate failed for document doc9: 503 backend error"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (presentation has 5 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
