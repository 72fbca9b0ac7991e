//! Text documents: replacing the whole body with marked-up lines.

use std::sync::Arc;

use crate::client::Permission;
use crate::config::Config;
use crate::detect::{resolve_document_id, DocumentKind};
use crate::error::Result;
use crate::files;
use crate::model::DocumentTree;
use crate::request::{docs as build, Request};

/// A fetched text document.
#[derive(Debug, Clone)]
pub struct Document {
    config: Arc<Config>,
    tree: DocumentTree,
}

impl Document {
    /// Fetch a document by ID or URL.
    pub fn open(config: Arc<Config>, reference: &str) -> Result<Self> {
        let id = resolve_document_id(reference, DocumentKind::Document)?;
        let tree = Self::fetch(&config, &id)?;
        Ok(Self { config, tree })
    }

    /// Create an empty document and fetch it.
    pub fn create(config: Arc<Config>, title: &str) -> Result<Self> {
        let id = files::create(&config, DocumentKind::Document, title)?;
        Self::open(config, &id)
    }

    fn fetch(config: &Config, id: &str) -> Result<DocumentTree> {
        let value = config
            .service()
            .fetch(DocumentKind::Document, id)
            .map_err(|e| config.service_error(e, "fetch", id))?;
        let mut tree = DocumentTree::from_value(value)?;
        if tree.document_id.is_empty() {
            tree.document_id = id.to_string();
        }
        Ok(tree)
    }

    /// Document ID.
    pub fn id(&self) -> &str {
        &self.tree.document_id
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.tree.title
    }

    /// Editing URL.
    pub fn url(&self) -> String {
        DocumentKind::Document.document_url(self.id())
    }

    /// The fetched tree.
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Fetch the document again.
    pub fn reload(&mut self) -> Result<()> {
        let id = self.id().to_string();
        self.tree = Self::fetch(&self.config, &id)?;
        Ok(())
    }

    /// Give `email` write access.
    pub fn share_with(&self, email: &str) -> Result<()> {
        files::share(&self.config, self.id(), &Permission::writer(email))
    }

    /// Rename the document.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        files::rename(&self.config, self.id(), title)?;
        self.tree.title = title.to_string();
        Ok(())
    }

    fn submit(&self, requests: &[Request], operation: &str) -> Result<()> {
        log::debug!(
            "{}: sending {} instructions to {}",
            operation,
            requests.len(),
            self.id()
        );
        self.config
            .service()
            .batch_update(DocumentKind::Document, self.id(), requests)
            .map_err(|e| self.config.service_error(e, operation, self.id()))?;
        Ok(())
    }

    /// Delete the whole body.
    ///
    /// The document is fetched first so the latest end index is used.
    pub fn clear(&mut self) -> Result<()> {
        self.reload()?;
        if let Some(request) = build::clear_body(self.tree.end_index()) {
            self.submit(&[request], "clear document")?;
            self.reload()?;
        }
        Ok(())
    }

    /// Replace the body with `lines`, one paragraph each.
    ///
    /// Lines may carry `<b>`, `<i>` and `<a href=...>` markup.
    pub fn set_content<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        self.clear()?;
        let requests = build::write_lines(lines);
        if requests.is_empty() {
            return Ok(());
        }
        self.submit(&requests, "set content")
    }
}
