//! File-level operations shared by presentations, spreadsheets and documents.

use crate::client::{FileInfo, Permission};
use crate::config::Config;
use crate::detect::DocumentKind;
use crate::error::Result;

/// Create an empty document of `kind` and return its ID.
pub fn create(config: &Config, kind: DocumentKind, title: &str) -> Result<String> {
    let id = config
        .service()
        .create_file(title, kind)
        .map_err(|e| config.service_error(e, "create", title))?;
    log::info!("created {} '{}' ({})", kind, title, id);
    Ok(id)
}

/// Copy a document under a new title and return the copy's ID.
pub fn copy(config: &Config, file_id: &str, title: &str) -> Result<String> {
    let id = config
        .service()
        .copy_file(file_id, title)
        .map_err(|e| config.service_error(e, "copy", file_id))?;
    log::info!("copied {} to '{}' ({})", file_id, title, id);
    Ok(id)
}

/// Rename a document.
pub fn rename(config: &Config, file_id: &str, title: &str) -> Result<()> {
    config
        .service()
        .rename_file(file_id, title)
        .map_err(|e| config.service_error(e, "rename", file_id))
}

/// Delete a document.
pub fn delete(config: &Config, file_id: &str) -> Result<()> {
    config
        .service()
        .delete_file(file_id)
        .map_err(|e| config.service_error(e, "delete", file_id))?;
    log::info!("deleted {}", file_id);
    Ok(())
}

/// Grant `permission` on a document.
pub fn share(config: &Config, file_id: &str, permission: &Permission) -> Result<()> {
    config
        .service()
        .create_permission(file_id, permission)
        .map_err(|e| config.service_error(e, "share", file_id))
}

/// List visible files, optionally only those of one kind.
pub fn list(config: &Config, kind: Option<DocumentKind>) -> Result<Vec<FileInfo>> {
    let query = kind.map(|k| format!("mimeType='{}'", k.mime_type()));
    let files = config
        .service()
        .list_files(query.as_deref())
        .map_err(|e| config.service_error(e, "list", "*"))?;
    Ok(match kind {
        Some(kind) => files.into_iter().filter(|f| f.kind() == Some(kind)).collect(),
        None => files,
    })
}
