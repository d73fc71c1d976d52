//! Ordered, displayable chapter content.

use crate::render::xhtml::XhtmlSanitizer;
use std::fmt;
use std::sync::OnceLock;

/// A spine item reconciled with its navigation title and play order.
///
/// The sanitized markup is computed at most once, on first
/// [render](super::EpubDocument::render), and cached thereafter.
#[derive(Clone)]
pub struct ChapterPage {
    pub(crate) idref: String,
    pub(crate) href: String,
    pub(crate) path: String,
    pub(crate) order: u32,
    pub(crate) title: String,
    pub(crate) content: Vec<u8>,
    pub(crate) sanitized: OnceLock<String>,
}

impl ChapterPage {
    /// The manifest id of the chapter.
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// The manifest href of the chapter, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The archive path the content was read from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The play order of the navigation node this chapter was reconciled with.
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The raw, unprocessed chapter markup.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The cached sanitized markup, if the chapter was already rendered.
    pub fn rendered(&self) -> Option<&str> {
        self.sanitized.get().map(String::as_str)
    }

    pub fn is_rendered(&self) -> bool {
        self.sanitized.get().is_some()
    }

    pub(crate) fn render(&self, sanitizer: &XhtmlSanitizer) -> &str {
        self.sanitized
            .get_or_init(|| sanitizer.sanitize(&self.content).content)
    }
}

impl fmt::Debug for ChapterPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChapterPage")
            .field("idref", &self.idref)
            .field("href", &self.href)
            .field("order", &self.order)
            .field("title", &self.title)
            .field("content", &format_args!("{} bytes", self.content.len()))
            .field("rendered", &self.is_rendered())
            .finish()
    }
}

/// Equality ignores whether either chapter was rendered.
impl PartialEq for ChapterPage {
    fn eq(&self, other: &Self) -> bool {
        self.idref == other.idref
            && self.href == other.href
            && self.path == other.path
            && self.order == other.order
            && self.title == other.title
            && self.content == other.content
    }
}

impl Eq for ChapterPage {}
