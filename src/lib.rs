//! # oodles
//!
//! Element-level editing of cloud-office presentations, spreadsheets and
//! text documents.
//!
//! A document is fetched once into a typed snapshot. Slides expose handles
//! for their text runs, images and linked charts; mutating a handle turns
//! into an ordered list of wire instructions that is either submitted at
//! once or collected into a batch scope and submitted as one call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use oodles::{Config, Oodles};
//! # use oodles::client::DocumentService;
//!
//! # fn demo(service: Arc<dyn DocumentService>) -> oodles::Result<()> {
//! let oodles = Oodles::new(Config::new(service, "robot@project.iam.gserviceaccount.com"));
//!
//! let deck = oodles.presentation("https://docs.google.com/presentation/d/1AbC/edit")?;
//! let mut slide = deck.page(1)?;
//! slide.batch(|slide| {
//!     slide.set_text("{{title}}", "Weekly <b>report</b>")?;
//!     slide.images().replace(0, "https://example.com/plot.png")?;
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Markup**: `<b>`, `<i>` and `<a href=... color=...>` turned into style ranges
//! - **Element registry**: text runs, images and charts of a slide, queried by substring
//! - **Batch scopes**: many edits, one `batchUpdate` call
//! - **Data push**: tables appended column-major to sheets, charts built from columns
//! - **Documents**: bodies rewritten from marked-up lines

pub mod batch;
pub mod client;
pub mod config;
pub mod detect;
pub mod docs;
pub mod error;
pub mod files;
pub mod markup;
pub mod model;
pub mod request;
pub mod sheets;
pub mod slides;

// Re-export commonly used types
pub use batch::{BatchScope, BatchTarget, Dispatcher};
pub use client::{DocumentService, FileInfo, ObjectStorage, Permission, Role, ServiceError};
pub use config::{BucketPath, Config};
pub use detect::{detect_from_url, DocumentKind};
pub use docs::Document;
pub use error::{Error, Result};
pub use markup::{parse as parse_markup, ParsedMarkup, Rgb, StyleKind, StyleRange, TextSpan};
pub use model::{CellValue, Column, DataTable};
pub use request::Request;
pub use sheets::{ChartOptions, Sheet, SheetChart, Spreadsheet};
pub use slides::{
    Chart, Charts, Image, ImageSource, Images, Presentation, Slide, TextRun, TextRunCollection,
};

use std::sync::Arc;
use std::time::Duration;

/// Open a presentation by ID or URL.
pub fn open_presentation(config: Arc<Config>, reference: &str) -> Result<Presentation> {
    Presentation::open(config, reference)
}

/// Open a spreadsheet by ID or URL.
pub fn open_spreadsheet(config: Arc<Config>, reference: &str) -> Result<Spreadsheet> {
    Spreadsheet::open(config, reference)
}

/// Open a text document by ID or URL.
pub fn open_document(config: Arc<Config>, reference: &str) -> Result<Document> {
    Document::open(config, reference)
}

/// A document opened from a URL of any kind.
#[derive(Debug, Clone)]
pub enum Opened {
    /// Presentation
    Presentation(Presentation),
    /// Spreadsheet
    Spreadsheet(Spreadsheet),
    /// Text document
    Document(Document),
}

impl Opened {
    /// Kind of the opened document.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Opened::Presentation(_) => DocumentKind::Presentation,
            Opened::Spreadsheet(_) => DocumentKind::Spreadsheet,
            Opened::Document(_) => DocumentKind::Document,
        }
    }

    /// Document ID.
    pub fn id(&self) -> &str {
        match self {
            Opened::Presentation(p) => p.id(),
            Opened::Spreadsheet(s) => s.id(),
            Opened::Document(d) => d.id(),
        }
    }
}

/// Entry point holding the shared configuration.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use oodles::{Config, Oodles};
/// # use oodles::client::{DocumentService, ObjectStorage};
///
/// # fn demo(
/// #     service: Arc<dyn DocumentService>,
/// #     storage: Arc<dyn ObjectStorage>,
/// # ) -> oodles::Result<()> {
/// let oodles = Oodles::new(Config::new(service, "robot@project.iam.gserviceaccount.com"))
///     .with_storage(storage)
///     .with_signed_url_ttl(Duration::from_secs(300));
/// let report = oodles.create_document("Report")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Oodles {
    config: Arc<Config>,
}

impl Oodles {
    /// Create an entry point around a configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create an entry point from an already shared configuration.
    pub fn from_shared(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Create an entry point configured from the environment.
    pub fn from_env(
        service: Arc<dyn DocumentService>,
        storage: Option<Arc<dyn ObjectStorage>>,
    ) -> Result<Self> {
        Ok(Self::new(Config::from_env(service, storage)?))
    }

    /// Set the object-storage client.
    pub fn with_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        let config = Arc::make_mut(&mut self.config);
        *config = config.clone().with_storage(storage);
        self
    }

    /// Set the image bucket.
    pub fn with_bucket(mut self, bucket: BucketPath) -> Self {
        Arc::make_mut(&mut self.config).bucket = bucket;
        self
    }

    /// Set the validity of signed image URLs.
    pub fn with_signed_url_ttl(mut self, ttl: Duration) -> Self {
        Arc::make_mut(&mut self.config).signed_url_ttl = ttl;
        self
    }

    /// Shared configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Open a presentation by ID or URL.
    pub fn presentation(&self, reference: &str) -> Result<Presentation> {
        Presentation::open(Arc::clone(&self.config), reference)
    }

    /// Open a spreadsheet by ID or URL.
    pub fn spreadsheet(&self, reference: &str) -> Result<Spreadsheet> {
        Spreadsheet::open(Arc::clone(&self.config), reference)
    }

    /// Open a text document by ID or URL.
    pub fn document(&self, reference: &str) -> Result<Document> {
        Document::open(Arc::clone(&self.config), reference)
    }

    /// Open any document from its URL.
    pub fn open(&self, url: &str) -> Result<Opened> {
        let (kind, id) = detect_from_url(url)?;
        Ok(match kind {
            DocumentKind::Presentation => Opened::Presentation(self.presentation(&id)?),
            DocumentKind::Spreadsheet => Opened::Spreadsheet(self.spreadsheet(&id)?),
            DocumentKind::Document => Opened::Document(self.document(&id)?),
        })
    }

    /// Create an empty presentation.
    pub fn create_presentation(&self, title: &str) -> Result<Presentation> {
        Presentation::create(Arc::clone(&self.config), title)
    }

    /// Create an empty spreadsheet.
    pub fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet> {
        Spreadsheet::create(Arc::clone(&self.config), title)
    }

    /// Create an empty text document.
    pub fn create_document(&self, title: &str) -> Result<Document> {
        Document::create(Arc::clone(&self.config), title)
    }

    /// List visible files, optionally of one kind.
    pub fn list(&self, kind: Option<DocumentKind>) -> Result<Vec<FileInfo>> {
        files::list(&self.config, kind)
    }
}
