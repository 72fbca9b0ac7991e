//! Per-slide element registry.

use crate::batch::{self, BatchScope, BatchTarget, Dispatcher};
use crate::error::{Error, Result};
use crate::model::PageTree;
use crate::sheets::SheetChart;

use super::element::{Chart, Charts, Image, Images, TextRun, TextRunCollection};

/// Runs whose trimmed text is this short or shorter are not registered.
const MIN_RUN_CHARS: usize = 1;

/// One slide of a fetched presentation, with typed handles for its elements.
///
/// The registry is a snapshot: edits are sent to the service but the local
/// text is not updated until the presentation is fetched again.
#[derive(Debug, Clone)]
pub struct Slide {
    number: usize,
    object_id: String,
    text_runs: Vec<TextRun>,
    images: Images,
    charts: Charts,
    dispatcher: Dispatcher,
}

impl Slide {
    /// Build the registry of a fetched page.
    ///
    /// Elements are classified in priority order: shapes with text yield
    /// text runs, then images, then linked charts. Anything else is skipped.
    pub fn parse(dispatcher: Dispatcher, number: usize, page: &PageTree) -> Self {
        let mut text_runs = Vec::new();
        let mut images = Images::default();
        let mut charts = Charts::default();

        for element in &page.page_elements {
            if let Some(text) = element.shape.as_ref().and_then(|s| s.text.as_ref()) {
                for run in text.text_elements.iter().filter_map(|e| e.text_run.as_ref()) {
                    let trimmed = run.content.trim();
                    if trimmed.chars().count() <= MIN_RUN_CHARS {
                        continue;
                    }
                    text_runs.push(TextRun::new(
                        &element.object_id,
                        &page.object_id,
                        trimmed,
                        run.style.clone(),
                        dispatcher.clone(),
                    ));
                }
            } else if let Some(image) = &element.image {
                images.add(Image::new(
                    &element.object_id,
                    &page.object_id,
                    image.source_url.clone().or_else(|| image.content_url.clone()),
                    element.title.clone(),
                    element.description.clone(),
                    element.size.clone(),
                    element.transform.clone(),
                    dispatcher.clone(),
                ));
            } else if let Some(chart) = &element.sheets_chart {
                let linked = (!chart.spreadsheet_id.is_empty())
                    .then(|| SheetChart::new(&chart.spreadsheet_id, chart.chart_id));
                charts.add(Chart::new(
                    &element.object_id,
                    &page.object_id,
                    linked,
                    element.size.clone(),
                    element.transform.clone(),
                    dispatcher.clone(),
                ));
            }
        }

        log::debug!(
            "slide {} ({}): {} text runs, {} images, {} charts",
            number,
            page.object_id,
            text_runs.len(),
            images.len(),
            charts.len()
        );

        Self {
            number,
            object_id: page.object_id.clone(),
            text_runs,
            images,
            charts,
            dispatcher,
        }
    }

    /// 1-based slide number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Slide object ID.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// All registered text runs, in page order.
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    /// Images, in page order.
    pub fn images(&self) -> &Images {
        &self.images
    }

    /// Linked charts, in page order.
    pub fn charts(&self) -> &Charts {
        &self.charts
    }

    /// The first run containing `query`, as a one-element collection.
    pub fn find(&self, query: &str) -> Option<TextRunCollection> {
        let run = self.text_runs.iter().find(|run| run.matches(query))?;
        let mut found = TextRunCollection::new(self.dispatcher.clone());
        found.add(run.clone());
        Some(found)
    }

    /// Every run containing `query`, in page order.
    pub fn find_all(&self, query: &str) -> TextRunCollection {
        let mut found = TextRunCollection::new(self.dispatcher.clone());
        for run in self.text_runs.iter().filter(|run| run.matches(query)) {
            found.add(run.clone());
        }
        found
    }

    /// Set the text of the first run containing `query`.
    pub fn set_text(&self, query: &str, value: &str) -> Result<()> {
        self.find(query)
            .ok_or_else(|| Error::TextNotFound(query.to_string()))?
            .set_text(value)
    }

    /// Replace `needle` in the first run containing `query`.
    pub fn replace_text(&self, query: &str, needle: &str, replacement: &str) -> Result<()> {
        self.find(query)
            .ok_or_else(|| Error::TextNotFound(query.to_string()))?
            .replace(needle, replacement)
    }

    /// Re-link the chart at `index` to a spreadsheet chart.
    pub fn replace_chart(&self, index: usize, chart: &SheetChart) -> Result<()> {
        self.charts.replace(index, chart)
    }

    /// Start collecting edits from this slide and its handles.
    pub fn begin_batch(&mut self) -> Result<BatchScope> {
        batch::enter(self)
    }

    /// Submit collected edits as one call; returns how many were sent.
    pub fn end_batch(&mut self) -> Result<usize> {
        batch::exit(self)
    }

    /// Run `f` with edits collected into one call.
    pub fn batch<R, F>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Slide) -> Result<R>,
    {
        batch::scoped(self, f)
    }
}

impl BatchTarget for Slide {
    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // Runs, images, charts and found collections hold clones of this
    // dispatcher and share its scope slot.
    fn attach_scope(&mut self, scope: Option<BatchScope>) {
        self.dispatcher.attach(scope);
    }
}
