//! Presentations: fetched once, addressed slide by slide.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use oodles::{Config, Presentation};
//!
//! # fn demo(config: Arc<Config>) -> oodles::Result<()> {
//! let presentation = Presentation::open(config, "1AbCdEfGhIjKlMnOp")?;
//! let slide = presentation.page(1)?;
//! if let Some(title) = slide.find("Quarterly") {
//!     title.set_text("Quarterly <b>results</b>")?;
//! }
//! # Ok(())
//! # }
//! ```

mod element;
mod page;

pub use element::{Chart, Charts, Image, ImageSource, Images, TextRun, TextRunCollection};
pub use page::Slide;

use std::sync::Arc;

use crate::batch::Dispatcher;
use crate::client::Permission;
use crate::config::Config;
use crate::detect::{resolve_document_id, DocumentKind};
use crate::error::{Error, Result};
use crate::files;
use crate::model::PresentationTree;

/// A fetched presentation.
#[derive(Debug, Clone)]
pub struct Presentation {
    config: Arc<Config>,
    tree: PresentationTree,
}

impl Presentation {
    /// Fetch a presentation by ID or URL.
    pub fn open(config: Arc<Config>, reference: &str) -> Result<Self> {
        let id = resolve_document_id(reference, DocumentKind::Presentation)?;
        let tree = Self::fetch(&config, &id)?;
        Ok(Self { config, tree })
    }

    /// Create an empty presentation and fetch it.
    pub fn create(config: Arc<Config>, title: &str) -> Result<Self> {
        let id = files::create(&config, DocumentKind::Presentation, title)?;
        Self::open(config, &id)
    }

    fn fetch(config: &Config, id: &str) -> Result<PresentationTree> {
        let value = config
            .service()
            .fetch(DocumentKind::Presentation, id)
            .map_err(|e| config.service_error(e, "fetch", id))?;
        let mut tree = PresentationTree::from_value(value)?;
        if tree.presentation_id.is_empty() {
            tree.presentation_id = id.to_string();
        }
        log::debug!("fetched presentation {} ({} slides)", id, tree.slides.len());
        Ok(tree)
    }

    /// Presentation ID.
    pub fn id(&self) -> &str {
        &self.tree.presentation_id
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.tree.title
    }

    /// Editing URL.
    pub fn url(&self) -> String {
        DocumentKind::Presentation.document_url(self.id())
    }

    /// Number of slides.
    pub fn page_count(&self) -> usize {
        self.tree.slides.len()
    }

    /// The fetched tree.
    pub fn tree(&self) -> &PresentationTree {
        &self.tree
    }

    /// Shared configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::clone(&self.config), self.id())
    }

    /// Slide by 1-based number.
    pub fn page(&self, number: usize) -> Result<Slide> {
        if number == 0 {
            return Err(Error::Precondition(
                "slides are numbered from 1; page 0 does not exist".into(),
            ));
        }
        let page = self
            .tree
            .slides
            .get(number - 1)
            .ok_or(Error::PageOutOfRange(number, self.page_count()))?;
        Ok(Slide::parse(self.dispatcher(), number, page))
    }

    /// All slides, in order.
    pub fn pages(&self) -> Vec<Slide> {
        let dispatcher = self.dispatcher();
        self.tree
            .slides
            .iter()
            .enumerate()
            .map(|(i, page)| Slide::parse(dispatcher.clone(), i + 1, page))
            .collect()
    }

    /// Fetch the presentation again; slides obtained earlier keep their snapshot.
    pub fn reload(&mut self) -> Result<()> {
        let id = self.id().to_string();
        self.tree = Self::fetch(&self.config, &id)?;
        Ok(())
    }

    /// Copy the presentation, by default as "Copy of <title>".
    pub fn copy(&self, title: Option<&str>) -> Result<Presentation> {
        let title = match title {
            Some(title) => title.to_string(),
            None => format!("Copy of {}", self.title()),
        };
        let id = files::copy(&self.config, self.id(), &title)?;
        Presentation::open(Arc::clone(&self.config), &id)
    }

    /// Give `email` write access.
    pub fn share_with(&self, email: &str) -> Result<()> {
        files::share(&self.config, self.id(), &Permission::writer(email))
    }

    /// Delete the presentation.
    pub fn delete(self) -> Result<()> {
        files::delete(&self.config, self.id())
    }
}
