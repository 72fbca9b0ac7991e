//! Handles for the elements of a slide: text runs, images and charts.

use serde_json::Value;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::batch::Dispatcher;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::request::slides::{self as build, LinkChange};
use crate::request::Request;
use crate::sheets::SheetChart;

/// A run of text inside a shape.
///
/// Edits address the whole shape: its text is deleted, the new text is
/// inserted and this run's style is re-applied over all of it.
#[derive(Debug, Clone)]
pub struct TextRun {
    object_id: String,
    page_id: String,
    text: String,
    style: Value,
    dispatcher: Dispatcher,
}

impl TextRun {
    pub(crate) fn new(
        object_id: impl Into<String>,
        page_id: impl Into<String>,
        text: impl Into<String>,
        style: Value,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            page_id: page_id.into(),
            text: text.into(),
            style,
            dispatcher,
        }
    }

    /// Shape holding the run.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Slide holding the shape.
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Text as fetched (trimmed).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Style as fetched.
    pub fn style(&self) -> &Value {
        &self.style
    }

    /// Check if the text contains `query`.
    pub fn matches(&self, query: &str) -> bool {
        self.text.contains(query)
    }

    /// Instructions setting the shape's text to `value` (may carry markup).
    pub fn fill_requests(&self, value: &str) -> Vec<Request> {
        build::fill_text(&self.object_id, &self.style, value)
    }

    /// Instructions replacing `needle` with `replacement` in the text.
    pub fn replace_requests(&self, needle: &str, replacement: &str) -> Vec<Request> {
        build::replace_text(&self.object_id, &self.text, &self.style, needle, replacement)
    }

    /// Set the shape's text.
    pub fn set_text(&self, value: &str) -> Result<()> {
        self.dispatcher
            .submit(self.fill_requests(value), "set text")
    }

    /// Replace a substring of the shape's text.
    pub fn replace(&self, needle: &str, replacement: &str) -> Result<()> {
        self.dispatcher
            .submit(self.replace_requests(needle, replacement), "replace text")
    }
}

impl std::fmt::Display for TextRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Text runs edited together, with at most one run per shape.
#[derive(Debug, Clone)]
pub struct TextRunCollection {
    runs: Vec<TextRun>,
    ids: HashSet<String>,
    dispatcher: Dispatcher,
}

impl TextRunCollection {
    pub(crate) fn new(dispatcher: Dispatcher) -> Self {
        Self {
            runs: Vec::new(),
            ids: HashSet::new(),
            dispatcher,
        }
    }

    /// Add a run; returns `false` when its shape is already present.
    pub fn add(&mut self, run: TextRun) -> bool {
        if !self.ids.insert(run.object_id.clone()) {
            return false;
        }
        self.runs.push(run);
        true
    }

    /// Add every run of `other` whose shape is not present yet.
    pub fn extend(&mut self, other: TextRunCollection) {
        for run in other.runs {
            self.add(run);
        }
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Check if a shape is present.
    pub fn contains(&self, object_id: &str) -> bool {
        self.ids.contains(object_id)
    }

    /// Run by position.
    pub fn get(&self, index: usize) -> Option<&TextRun> {
        self.runs.get(index)
    }

    /// Iterate over runs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TextRun> {
        self.runs.iter()
    }

    /// Set the text of every shape in the collection in one call.
    pub fn set_text(&self, value: &str) -> Result<()> {
        let requests = self
            .runs
            .iter()
            .flat_map(|run| run.fill_requests(value))
            .collect();
        self.dispatcher.submit(requests, "set text")
    }

    /// Replace a substring in every shape of the collection in one call.
    pub fn replace(&self, needle: &str, replacement: &str) -> Result<()> {
        let requests = self
            .runs
            .iter()
            .flat_map(|run| run.replace_requests(needle, replacement))
            .collect();
        self.dispatcher.submit(requests, "replace text")
    }
}

impl<'a> IntoIterator for &'a TextRunCollection {
    type Item = &'a TextRun;
    type IntoIter = std::slice::Iter<'a, TextRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

/// Where the new content of an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A retrievable URL, used as-is
    Url(String),
    /// A local file, uploaded to object storage first
    LocalFile(PathBuf),
    /// Another source plus an outbound link (empty or `None` clears it)
    WithLink(Box<ImageSource>, Option<String>),
}

impl ImageSource {
    /// `Url` when `value` starts with `http`, `LocalFile` otherwise.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http") {
            ImageSource::Url(value.to_string())
        } else {
            ImageSource::LocalFile(PathBuf::from(value))
        }
    }

    /// Attach an outbound link to this source.
    pub fn with_link(self, link: Option<&str>) -> Self {
        ImageSource::WithLink(Box::new(self), link.map(str::to_string))
    }

    /// Check if resolving this source needs an upload.
    pub fn needs_upload(&self) -> bool {
        match self {
            ImageSource::Url(_) => false,
            ImageSource::LocalFile(_) => true,
            ImageSource::WithLink(inner, _) => inner.needs_upload(),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        ImageSource::parse(value)
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        ImageSource::parse(&value)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(value: PathBuf) -> Self {
        ImageSource::LocalFile(value)
    }
}

impl From<&Path> for ImageSource {
    fn from(value: &Path) -> Self {
        ImageSource::LocalFile(value.to_path_buf())
    }
}

impl From<(&str, &str)> for ImageSource {
    fn from((reference, link): (&str, &str)) -> Self {
        ImageSource::parse(reference).with_link(Some(link))
    }
}

/// Upload a local image and return a signed URL for it.
fn upload_image(config: &Config, path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("image file {} does not exist", path.display()),
        )));
    }
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Storage(format!("unusable file name: {}", path.display())))?;

    let storage = config.storage()?;
    let bucket = &config.bucket;
    let object = bucket.object_for(file_name);
    storage
        .upload(path, &bucket.bucket, &object)
        .map_err(|e| Error::Storage(format!("upload of {} failed: {}", path.display(), e)))?;
    let url = storage
        .signed_url(&bucket.bucket, &object, config.signed_url_ttl)
        .map_err(|e| Error::Storage(format!("signing {} failed: {}", object, e)))?;
    log::debug!("uploaded {} to gs://{}/{}", path.display(), bucket.bucket, object);
    Ok(url)
}

/// An image on a slide.
#[derive(Debug, Clone)]
pub struct Image {
    object_id: String,
    page_id: String,
    source_url: Option<String>,
    title: Option<String>,
    description: Option<String>,
    size: Value,
    transform: Value,
    dispatcher: Dispatcher,
}

impl Image {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        object_id: impl Into<String>,
        page_id: impl Into<String>,
        source_url: Option<String>,
        title: Option<String>,
        description: Option<String>,
        size: Value,
        transform: Value,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            page_id: page_id.into(),
            source_url,
            title,
            description,
            size,
            transform,
            dispatcher,
        }
    }

    /// Image element ID.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Slide holding the image.
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// URL of the current content, as fetched.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Alt-text title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Alt-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Size, as fetched.
    pub fn size(&self) -> &Value {
        &self.size
    }

    /// Transform, as fetched.
    pub fn transform(&self) -> &Value {
        &self.transform
    }

    /// Check if the title or description equals `key`.
    pub fn is_titled(&self, key: &str) -> bool {
        self.title.as_deref() == Some(key) || self.description.as_deref() == Some(key)
    }

    fn resolve(&self, source: &ImageSource) -> Result<(String, LinkChange)> {
        match source {
            ImageSource::Url(url) => Ok((url.clone(), LinkChange::Keep)),
            ImageSource::LocalFile(path) => {
                Ok((upload_image(self.dispatcher.config(), path)?, LinkChange::Keep))
            }
            ImageSource::WithLink(inner, link) => {
                let (url, _) = self.resolve(inner)?;
                Ok((url, LinkChange::from_url(link.as_deref())))
            }
        }
    }

    /// Instructions for a source that is already a URL.
    ///
    /// Fails with a precondition error for sources that need an upload.
    pub fn replace_requests(&self, source: &ImageSource) -> Result<Vec<Request>> {
        if source.needs_upload() {
            return Err(Error::Precondition(
                "local image files must be uploaded before building requests".into(),
            ));
        }
        let (url, link) = self.resolve(source)?;
        Ok(build::replace_image(&self.object_id, &url, &link))
    }

    /// Replace the image content, uploading local files first.
    pub fn replace(&self, source: impl Into<ImageSource>) -> Result<()> {
        let (url, link) = self.resolve(&source.into())?;
        self.dispatcher
            .submit(build::replace_image(&self.object_id, &url, &link), "replace image")
    }

    /// Replace the image with the content at `url`.
    pub fn set_image_url(&self, url: &str) -> Result<()> {
        self.replace(ImageSource::Url(url.to_string()))
    }

    /// Replace the image with a local file.
    pub fn set_image_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.replace(ImageSource::LocalFile(path.as_ref().to_path_buf()))
    }
}

/// The images of a slide, in page order.
#[derive(Debug, Clone, Default)]
pub struct Images {
    elements: Vec<Image>,
}

impl Images {
    pub(crate) fn add(&mut self, image: Image) {
        self.elements.push(image);
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the slide has no image.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Image by position.
    pub fn get(&self, index: usize) -> Option<&Image> {
        self.elements.get(index)
    }

    /// Image whose title or description equals `title`.
    pub fn by_title(&self, title: &str) -> Result<&Image> {
        self.elements
            .iter()
            .find(|image| image.is_titled(title))
            .ok_or_else(|| Error::ImageNotFound(title.to_string()))
    }

    /// Iterate over images.
    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.elements.iter()
    }

    /// Replace the image at `index`.
    pub fn replace(&self, index: usize, source: impl Into<ImageSource>) -> Result<()> {
        self.get(index)
            .ok_or_else(|| {
                Error::Precondition(format!(
                    "image index {} out of range ({} images)",
                    index,
                    self.len()
                ))
            })?
            .replace(source)
    }

    /// Replace the image carrying `title`.
    pub fn replace_titled(&self, title: &str, source: impl Into<ImageSource>) -> Result<()> {
        self.by_title(title)?.replace(source)
    }
}

/// A linked spreadsheet chart on a slide.
#[derive(Debug, Clone)]
pub struct Chart {
    object_id: String,
    page_id: String,
    linked: Option<SheetChart>,
    size: Value,
    transform: Value,
    dispatcher: Dispatcher,
}

impl Chart {
    pub(crate) fn new(
        object_id: impl Into<String>,
        page_id: impl Into<String>,
        linked: Option<SheetChart>,
        size: Value,
        transform: Value,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            page_id: page_id.into(),
            linked,
            size,
            transform,
            dispatcher,
        }
    }

    /// Chart element ID.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Slide holding the chart.
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Spreadsheet chart currently linked, as fetched.
    pub fn linked(&self) -> Option<&SheetChart> {
        self.linked.as_ref()
    }

    /// Instructions re-linking this element to `chart`.
    pub fn replace_requests(&self, chart: &SheetChart) -> Vec<Request> {
        build::replace_chart(
            &self.object_id,
            &self.page_id,
            &self.size,
            &self.transform,
            chart,
        )
    }

    /// Re-link this element to another spreadsheet chart.
    pub fn replace(&self, chart: &SheetChart) -> Result<()> {
        self.dispatcher
            .submit(self.replace_requests(chart), "replace chart")
    }
}

/// The linked charts of a slide, in page order.
#[derive(Debug, Clone, Default)]
pub struct Charts {
    elements: Vec<Chart>,
}

impl Charts {
    pub(crate) fn add(&mut self, chart: Chart) {
        self.elements.push(chart);
    }

    /// Number of charts.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the slide has no chart.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Chart by position.
    pub fn get(&self, index: usize) -> Option<&Chart> {
        self.elements.get(index)
    }

    /// Iterate over charts.
    pub fn iter(&self) -> std::slice::Iter<'_, Chart> {
        self.elements.iter()
    }

    /// Re-link the chart at `index`.
    pub fn replace(&self, index: usize, chart: &SheetChart) -> Result<()> {
        self.get(index)
            .ok_or_else(|| {
                Error::Precondition(format!(
                    "chart index {} out of range ({} charts)",
                    index,
                    self.len()
                ))
            })?
            .replace(chart)
    }
}
