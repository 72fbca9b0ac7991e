//! Collaborator interfaces for the remote document service and object storage.
//!
//! The crate never talks HTTP itself. Callers hand in an implementation of
//! [`DocumentService`] (and optionally [`ObjectStorage`]) through
//! [`Config`](crate::Config); every fetch and batch update goes through it.
//!
//! # Example
//!
//! ```
//! use oodles::client::{DocumentService, FileInfo, Permission, ServiceResult};
//! use oodles::request::{Request, ValueInputOption, ValueRange};
//! use oodles::DocumentKind;
//! use serde_json::Value;
//!
//! struct Offline;
//!
//! impl DocumentService for Offline {
//!     fn fetch(&self, _kind: DocumentKind, _id: &str) -> ServiceResult<Value> {
//!         Ok(Value::Null)
//!     }
//!     fn batch_update(
//!         &self,
//!         _kind: DocumentKind,
//!         _id: &str,
//!         _requests: &[Request],
//!     ) -> ServiceResult<Value> {
//!         Ok(Value::Null)
//!     }
//!     fn get_values(&self, _id: &str, _range: &str) -> ServiceResult<Vec<Vec<Value>>> {
//!         Ok(Vec::new())
//!     }
//!     fn append_values(
//!         &self,
//!         _id: &str,
//!         _range: &str,
//!         _values: &ValueRange,
//!         _input: ValueInputOption,
//!     ) -> ServiceResult<Value> {
//!         Ok(Value::Null)
//!     }
//!     fn create_file(&self, _name: &str, _kind: DocumentKind) -> ServiceResult<String> {
//!         Ok("new-id".into())
//!     }
//!     fn copy_file(&self, _id: &str, _name: &str) -> ServiceResult<String> {
//!         Ok("copy-id".into())
//!     }
//!     fn rename_file(&self, _id: &str, _name: &str) -> ServiceResult<()> {
//!         Ok(())
//!     }
//!     fn delete_file(&self, _id: &str) -> ServiceResult<()> {
//!         Ok(())
//!     }
//!     fn list_files(&self, _query: Option<&str>) -> ServiceResult<Vec<FileInfo>> {
//!         Ok(Vec::new())
//!     }
//!     fn create_permission(&self, _id: &str, _permission: &Permission) -> ServiceResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::detect::DocumentKind;
use crate::request::{Request, ValueInputOption, ValueRange};

/// Result type returned by collaborator clients.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Failure reported by a collaborator client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The configured identity lacks access to the document.
    #[error("permission denied")]
    PermissionDenied,

    /// The addressed document, sheet or element does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Network or remote failure.
    #[error("{0}")]
    Transport(String),
}

/// Client for the three document-editing APIs plus file-level operations.
///
/// Implementations are expected to be blocking: every method returns once
/// the remote round-trip has completed. Requests passed to
/// [`batch_update`](DocumentService::batch_update) must be submitted in the
/// given order within a single call.
pub trait DocumentService: Send + Sync {
    /// Fetch the full raw tree of a document.
    fn fetch(&self, kind: DocumentKind, document_id: &str) -> ServiceResult<Value>;

    /// Submit an ordered list of edit instructions as one call.
    fn batch_update(
        &self,
        kind: DocumentKind,
        document_id: &str,
        requests: &[Request],
    ) -> ServiceResult<Value>;

    /// Read the cell values of a spreadsheet range (row-major).
    fn get_values(&self, spreadsheet_id: &str, range: &str) -> ServiceResult<Vec<Vec<Value>>>;

    /// Append values to a spreadsheet range.
    fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &ValueRange,
        input: ValueInputOption,
    ) -> ServiceResult<Value>;

    /// Create an empty file of the given kind and return its ID.
    fn create_file(&self, name: &str, kind: DocumentKind) -> ServiceResult<String>;

    /// Copy a file under a new name and return the copy's ID.
    fn copy_file(&self, file_id: &str, name: &str) -> ServiceResult<String>;

    /// Rename a file.
    fn rename_file(&self, file_id: &str, name: &str) -> ServiceResult<()>;

    /// Delete a file.
    fn delete_file(&self, file_id: &str) -> ServiceResult<()>;

    /// List files visible to the configured identity.
    fn list_files(&self, query: Option<&str>) -> ServiceResult<Vec<FileInfo>>;

    /// Grant a permission on a file.
    fn create_permission(&self, file_id: &str, permission: &Permission) -> ServiceResult<()>;
}

/// Client for the object store used to host replacement images.
pub trait ObjectStorage: Send + Sync {
    /// Upload a local file to `bucket` under `object`.
    fn upload(&self, local_path: &Path, bucket: &str, object: &str) -> ServiceResult<()>;

    /// Produce a retrievable URL for `object`, valid for `ttl`.
    fn signed_url(&self, bucket: &str, object: &str, ttl: Duration) -> ServiceResult<String>;
}

/// A file as reported by the file listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// File ID
    pub id: String,

    /// File name
    pub name: String,

    /// MIME type
    pub mime_type: String,
}

impl FileInfo {
    /// Kind of office document this file is, if any.
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_mime_type(&self.mime_type)
    }
}

/// Access level granted by a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read only
    Reader,
    /// Comment only
    Commenter,
    /// Read and write
    Writer,
    /// Full ownership
    Owner,
}

/// A user permission on a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Grantee email address
    pub email_address: String,

    /// Granted role
    pub role: Role,

    /// Transfer ownership to the grantee (only meaningful with `Role::Owner`)
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub transfer_ownership: bool,
}

impl Permission {
    /// Writer permission for a user.
    pub fn writer(email: impl Into<String>) -> Self {
        Self {
            email_address: email.into(),
            role: Role::Writer,
            transfer_ownership: false,
        }
    }

    /// Ownership transfer to a user.
    pub fn owner(email: impl Into<String>) -> Self {
        Self {
            email_address: email.into(),
            role: Role::Owner,
            transfer_ownership: true,
        }
    }
}
