//! Document kind detection from cloud-office URLs and bare IDs.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Kind of office document addressed by an ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Slides presentation
    Presentation,
    /// Spreadsheet
    Spreadsheet,
    /// Text document
    Document,
}

impl DocumentKind {
    /// URL path segment used by the office suite for this kind.
    pub fn url_segment(&self) -> &'static str {
        match self {
            DocumentKind::Presentation => "presentation",
            DocumentKind::Spreadsheet => "spreadsheets",
            DocumentKind::Document => "document",
        }
    }

    /// MIME type of files of this kind.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Presentation => "application/vnd.google-apps.presentation",
            DocumentKind::Spreadsheet => "application/vnd.google-apps.spreadsheet",
            DocumentKind::Document => "application/vnd.google-apps.document",
        }
    }

    /// Reverse of [`mime_type`](Self::mime_type).
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        [
            DocumentKind::Presentation,
            DocumentKind::Spreadsheet,
            DocumentKind::Document,
        ]
        .into_iter()
        .find(|kind| kind.mime_type() == mime_type)
    }

    /// Canonical browser URL of a document.
    pub fn document_url(&self, document_id: &str) -> String {
        format!(
            "https://docs.google.com/{}/d/{}",
            self.url_segment(),
            document_id
        )
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Presentation => write!(f, "presentation"),
            DocumentKind::Spreadsheet => write!(f, "spreadsheet"),
            DocumentKind::Document => write!(f, "document"),
        }
    }
}

const URL_PATTERN: &str =
    r"^https?://docs\.google\.com/(presentation|spreadsheets|document)/d/([A-Za-z0-9_-]+)";

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).unwrap())
}

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap())
}

/// Detect the document kind and ID from a browser URL.
///
/// # Example
/// ```
/// use oodles::detect::{detect_from_url, DocumentKind};
///
/// let (kind, id) = detect_from_url("https://docs.google.com/presentation/d/abc123/edit").unwrap();
/// assert_eq!(kind, DocumentKind::Presentation);
/// assert_eq!(id, "abc123");
/// ```
pub fn detect_from_url(url: &str) -> Result<(DocumentKind, String)> {
    let caps = url_regex()
        .captures(url.trim())
        .ok_or_else(|| Error::InvalidDocument(format!("not a document URL: {}", url)))?;

    let kind = match &caps[1] {
        "presentation" => DocumentKind::Presentation,
        "spreadsheets" => DocumentKind::Spreadsheet,
        _ => DocumentKind::Document,
    };
    Ok((kind, caps[2].to_string()))
}

/// Resolve a caller-supplied reference (bare ID or URL) to a document ID.
///
/// When a URL is given, its kind must match `expected`.
pub fn resolve_document_id(reference: &str, expected: DocumentKind) -> Result<String> {
    let reference = reference.trim();
    if id_regex().is_match(reference) {
        return Ok(reference.to_string());
    }

    let (kind, id) = detect_from_url(reference)?;
    if kind != expected {
        return Err(Error::InvalidDocument(format!(
            "expected a {} URL, got a {} URL",
            expected, kind
        )));
    }
    Ok(id)
}
