//! Single-pass parser for `<b>`, `<i>` and `<a href=... color=...>` markup.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::Rgb;

/// A styled span of clean text, in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    /// First code unit covered
    pub start: u32,
    /// One past the last code unit covered
    pub end: u32,
}

impl TextSpan {
    /// Create a span.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of code units covered.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A hyperlinked span of clean text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpan {
    /// Covered text
    pub span: TextSpan,
    /// Link target
    pub url: String,
    /// Foreground color, when one was given and parsed
    pub color: Option<Rgb>,
}

/// Attribute applied by a style range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StyleKind {
    /// Bold text
    Bold,
    /// Italic text
    Italic,
    /// Hyperlink, optionally colored
    Link {
        /// Link target
        url: String,
        /// Foreground color
        color: Option<Rgb>,
    },
}

/// A `(start, end, kind)` triple over clean text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRange {
    /// Covered text
    pub span: TextSpan,
    /// Applied attribute
    pub kind: StyleKind,
}

/// Result of parsing a tagged string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedMarkup {
    /// Text with every recognized tag removed
    pub text: String,

    /// Bold ranges, in the order their closing tags appeared
    pub bold: Vec<TextSpan>,

    /// Italic ranges, in the order their closing tags appeared
    pub italic: Vec<TextSpan>,

    /// Link ranges, in the order their closing tags appeared
    pub links: Vec<LinkSpan>,
}

impl ParsedMarkup {
    /// Check if any style range was produced.
    pub fn has_styles(&self) -> bool {
        !(self.bold.is_empty() && self.italic.is_empty() && self.links.is_empty())
    }

    /// Length of the clean text in UTF-16 code units.
    pub fn len_utf16(&self) -> u32 {
        utf16_len(&self.text)
    }

    /// All ranges: bold first, then italic, then links.
    pub fn style_ranges(&self) -> Vec<StyleRange> {
        let bold = self.bold.iter().map(|span| StyleRange {
            span: *span,
            kind: StyleKind::Bold,
        });
        let italic = self.italic.iter().map(|span| StyleRange {
            span: *span,
            kind: StyleKind::Italic,
        });
        let links = self.links.iter().map(|link| StyleRange {
            span: link.span,
            kind: StyleKind::Link {
                url: link.url.clone(),
                color: link.color,
            },
        });
        bold.chain(italic).chain(links).collect()
    }

    /// Render the ranges back onto the clean text as tags.
    ///
    /// Ranges sharing both ends nest bold outside italic outside link.
    pub fn to_markup(&self) -> String {
        let mut ranges: Vec<(StyleRange, u8)> = self
            .style_ranges()
            .into_iter()
            .map(|r| {
                let rank = match r.kind {
                    StyleKind::Bold => 0,
                    StyleKind::Italic => 1,
                    StyleKind::Link { .. } => 2,
                };
                (r, rank)
            })
            .collect();
        // Opening order: leftmost first, then widest, then by rank.
        ranges.sort_by(|(a, ra), (b, rb)| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(b.span.end.cmp(&a.span.end))
                .then(ra.cmp(rb))
        });

        let mut out = String::with_capacity(self.text.len() + ranges.len() * 8);
        let mut offset = 0u32;
        let mut chars = self.text.chars();
        loop {
            for (range, _) in ranges.iter().rev().filter(|(r, _)| r.span.end == offset) {
                out.push_str(close_tag(&range.kind));
            }
            for (range, _) in ranges.iter().filter(|(r, _)| r.span.start == offset) {
                out.push_str(&open_tag(&range.kind));
            }
            match chars.next() {
                Some(ch) => {
                    out.push(ch);
                    offset += ch.len_utf16() as u32;
                }
                None => break,
            }
        }
        out
    }
}

fn open_tag(kind: &StyleKind) -> String {
    match kind {
        StyleKind::Bold => "<b>".to_string(),
        StyleKind::Italic => "<i>".to_string(),
        StyleKind::Link { url, color: None } => format!("<a href=\"{}\">", url),
        StyleKind::Link {
            url,
            color: Some(color),
        } => format!("<a href=\"{}\" color=\"{}\">", url, color.to_hex()),
    }
}

fn close_tag(kind: &StyleKind) -> &'static str {
    match kind {
        StyleKind::Bold => "</b>",
        StyleKind::Italic => "</i>",
        StyleKind::Link { .. } => "</a>",
    }
}

/// Length of a string in UTF-16 code units.
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}

fn anchor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<a\s+([^<>]*)>").unwrap())
}

fn attribute_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?:^|\s){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        name
    ))
    .unwrap()
}

fn href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| attribute_regex("href"))
}

fn color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| attribute_regex("color"))
}

fn attribute_value(re: &Regex, attrs: &str) -> Option<String> {
    re.captures(attrs).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

/// A recognized tag at the cursor.
#[derive(Debug)]
enum Tag {
    OpenBold,
    CloseBold,
    OpenItalic,
    CloseItalic,
    OpenLink { url: String, color: Option<Rgb> },
    CloseLink,
}

/// Match a tag at the start of `rest`, returning it with its byte length.
fn match_tag(rest: &str) -> Option<(Tag, usize)> {
    let fixed = [
        ("<b>", Tag::OpenBold),
        ("</b>", Tag::CloseBold),
        ("<i>", Tag::OpenItalic),
        ("</i>", Tag::CloseItalic),
        ("</a>", Tag::CloseLink),
    ];
    for (literal, tag) in fixed {
        if rest.starts_with(literal) {
            return Some((tag, literal.len()));
        }
    }

    let caps = anchor_regex().captures(rest)?;
    let whole = caps.get(0)?;
    let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let url = attribute_value(href_regex(), attrs)?;
    let color = attribute_value(color_regex(), attrs).and_then(|c| Rgb::parse(&c));
    Some((Tag::OpenLink { url, color }, whole.end()))
}

/// Parser state: clean text plus one start stack per tag kind.
#[derive(Default)]
struct MarkupParser {
    out: ParsedMarkup,
    offset: u32,
    bold_starts: Vec<u32>,
    italic_starts: Vec<u32>,
    link_starts: Vec<(u32, String, Option<Rgb>)>,
}

impl MarkupParser {
    fn apply(&mut self, tag: Tag) {
        let offset = self.offset;
        match tag {
            Tag::OpenBold => self.bold_starts.push(offset),
            Tag::OpenItalic => self.italic_starts.push(offset),
            Tag::OpenLink { url, color } => self.link_starts.push((offset, url, color)),
            Tag::CloseBold => {
                if let Some(start) = self.bold_starts.pop() {
                    push_span(&mut self.out.bold, TextSpan::new(start, offset));
                }
            }
            Tag::CloseItalic => {
                if let Some(start) = self.italic_starts.pop() {
                    push_span(&mut self.out.italic, TextSpan::new(start, offset));
                }
            }
            Tag::CloseLink => {
                if let Some((start, url, color)) = self.link_starts.pop() {
                    let span = TextSpan::new(start, offset);
                    if !span.is_empty() {
                        self.out.links.push(LinkSpan { span, url, color });
                    }
                }
            }
        }
    }

    fn push_char(&mut self, ch: char) {
        self.out.text.push(ch);
        self.offset += ch.len_utf16() as u32;
    }

    fn finish(self) -> ParsedMarkup {
        let unclosed =
            self.bold_starts.len() + self.italic_starts.len() + self.link_starts.len();
        if unclosed > 0 {
            log::debug!("dropping {} unterminated markup tags", unclosed);
        }
        self.out
    }
}

fn push_span(spans: &mut Vec<TextSpan>, span: TextSpan) {
    if !span.is_empty() {
        spans.push(span);
    }
}

/// Parse a tagged string into clean text and style ranges.
///
/// Stray closing tags are ignored, unterminated opening tags produce no
/// range, and anything that does not form a recognized tag is kept as
/// literal text. Offsets are UTF-16 code units of the clean text.
///
/// # Example
/// ```
/// use oodles::markup::{parse, TextSpan};
///
/// let parsed = parse("Test <b>bold</b> and <i>italic</i> text");
/// assert_eq!(parsed.text, "Test bold and italic text");
/// assert_eq!(parsed.bold, vec![TextSpan::new(5, 9)]);
/// assert_eq!(parsed.italic, vec![TextSpan::new(14, 20)]);
/// ```
pub fn parse(raw: &str) -> ParsedMarkup {
    let mut parser = MarkupParser::default();
    let mut i = 0;
    while i < raw.len() {
        let rest = &raw[i..];
        if rest.starts_with('<') {
            if let Some((tag, consumed)) = match_tag(rest) {
                parser.apply(tag);
                i += consumed;
                continue;
            }
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        parser.push_char(ch);
        i += ch.len_utf8();
    }
    parser.finish()
}
