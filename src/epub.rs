//! The EPUB document model produced by ingestion.
//!
//! Supports EPUB 2 packages navigated by an NCX document.
//!
//! For more information regarding the format, see:
//! <https://www.w3.org/TR/epub>

pub mod asset;
pub mod chapter;
pub(crate) mod consts;
pub mod errors;
pub mod manifest;
pub mod metadata;
mod options;
mod parser;
pub mod spine;
pub mod toc;

pub use self::options::IngestOptions;

use crate::archive::zip::ZipArchive;
use crate::epub::asset::{ImageAsset, StylesheetAsset};
use crate::epub::chapter::ChapterPage;
use crate::epub::errors::{ContainerFault, EpubError};
use crate::epub::manifest::Manifest;
use crate::epub::metadata::PackageMetadata;
use crate::epub::parser::{EpubParser, ParsedContent};
use crate::epub::spine::Spine;
use crate::epub::toc::NavTree;
use crate::errors::IngestResult;
use crate::render::xhtml::XhtmlSanitizer;
use crate::util::{self, uri};
use std::fmt::{self, Debug, Formatter};
use std::io::{Cursor, Read, Seek};

/// A fully ingested EPUB: metadata, navigation, ordered chapters,
/// stylesheets and images.
///
/// Every part is derived once during ingestion. The only state mutated afterward
/// is each chapter's memoized [rendition](Self::render), so a document can be
/// shared freely between threads.
///
/// # Examples
/// ```no_run
/// # use epub_ingest::errors::IngestResult;
/// use epub_ingest::{EpubDocument, IngestOptions};
///
/// # fn main() -> IngestResult<()> {
/// let file = std::fs::File::open("upload.epub").unwrap();
/// let document = EpubDocument::ingest_reader(file, &IngestOptions::new().strict(true))?;
///
/// for node in document.toc().top_level() {
///     println!("{} -> {}", node.title(), node.href());
/// }
/// for stylesheet in document.stylesheets() {
///     println!("{}", stylesheet.css());
/// }
/// # Ok(())
/// # }
/// ```
pub struct EpubDocument {
    package_path: String,
    base_path: String,
    opf_source: String,
    toc_source: String,
    metadata: PackageMetadata,
    manifest: Manifest,
    spine: Spine,
    toc: NavTree,
    chapters: Vec<ChapterPage>,
    stylesheets: Vec<StylesheetAsset>,
    images: Vec<ImageAsset>,
    sanitizer: XhtmlSanitizer,
}

impl EpubDocument {
    /// Ingests the bytes of an uploaded EPUB with default [`IngestOptions`].
    ///
    /// # Errors
    /// See [`Self::ingest_with`].
    pub fn ingest(bytes: &[u8]) -> IngestResult<Self> {
        Self::ingest_with(bytes, &IngestOptions::default())
    }

    /// Ingests the bytes of an uploaded EPUB.
    ///
    /// # Errors
    /// Ingestion either fully succeeds or fails with an
    /// [`IngestError`](crate::errors::IngestError); no partial document is produced:
    /// - [`EpubError::MalformedContainer`]: The bytes are not a zip archive,
    ///   or `META-INF/container.xml` is missing or malformed.
    /// - [`EpubError::TocResolution`]: The spine `toc` names no manifest item.
    /// - [`AssetRead`](crate::errors::IngestError::AssetRead): A chapter,
    ///   stylesheet, image or navigation document cannot be read.
    /// - [`Format`](crate::errors::IngestError::Format): The package or NCX
    ///   document is not well-formed, or lacks required elements.
    ///
    /// Malformed chapter markup and stylesheets are not errors;
    /// they degrade to their unprocessed form.
    pub fn ingest_with(bytes: &[u8], options: &IngestOptions) -> IngestResult<Self> {
        Self::ingest_reader(Cursor::new(bytes), options)
    }

    /// Ingests an EPUB from any seekable reader, such as a file handle.
    ///
    /// # Errors
    /// See [`Self::ingest_with`].
    pub fn ingest_reader<R: Read + Seek>(reader: R, options: &IngestOptions) -> IngestResult<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|error| EpubError::MalformedContainer(ContainerFault::UnreadableArchive(error)))?;
        let parsed = EpubParser::new(options, &archive).parse()?;

        Ok(Self::from_parsed(parsed, XhtmlSanitizer::new(options)))
    }

    fn from_parsed(parsed: ParsedContent, sanitizer: XhtmlSanitizer) -> Self {
        Self {
            package_path: parsed.package_path,
            base_path: parsed.base_path,
            opf_source: parsed.opf_source,
            toc_source: parsed.toc_source,
            metadata: parsed.metadata,
            manifest: parsed.manifest,
            spine: parsed.spine,
            toc: parsed.toc,
            chapters: parsed.chapters,
            stylesheets: parsed.stylesheets,
            images: parsed.images,
            sanitizer,
        }
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// The canonical chapter ordering: spine items reconciled with the
    /// navigation tree, in spine order.
    pub fn chapters(&self) -> &[ChapterPage] {
        &self.chapters
    }

    /// Every stylesheet declared by the manifest, in declaration order.
    pub fn stylesheets(&self) -> &[StylesheetAsset] {
        &self.stylesheets
    }

    /// Every image declared by the manifest, in declaration order.
    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    /// Returns the display-safe markup of `chapter`.
    ///
    /// The markup is sanitized on first call and memoized on the chapter;
    /// subsequent calls return the identical string.
    /// If sanitization fails, the raw chapter markup is returned (and cached) instead.
    pub fn render<'c>(&self, chapter: &'c ChapterPage) -> &'c str {
        chapter.render(&self.sanitizer)
    }

    /// The parsed navigation tree.
    pub fn toc(&self) -> &NavTree {
        &self.toc
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    /// The package (`.opf`) document exactly as stored in the archive.
    pub fn opf_source(&self) -> &str {
        &self.opf_source
    }

    /// The NCX document exactly as stored in the archive.
    pub fn toc_source(&self) -> &str {
        &self.toc_source
    }

    /// The archive path of the package document, such as `OEBPS/content.opf`.
    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    /// The directory prefix applied to every manifest href:
    /// empty when the package document is at the archive root, otherwise
    /// its directory with a trailing `/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the chapter with the given manifest href or archive path.
    ///
    /// Any fragment (`#section`) is ignored.
    pub fn chapter_by_href(&self, href: &str) -> Option<&ChapterPage> {
        let (path, _) = uri::split_fragment(href);

        self.chapters
            .iter()
            .find(|chapter| chapter.href == path || chapter.path == path)
    }

    /// The chapter following `chapter`, if any.
    pub fn next_chapter(&self, chapter: &ChapterPage) -> Option<&ChapterPage> {
        self.position(chapter)
            .and_then(|index| self.chapters.get(index + 1))
    }

    /// The chapter preceding `chapter`, if any.
    pub fn previous_chapter(&self, chapter: &ChapterPage) -> Option<&ChapterPage> {
        self.position(chapter)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.chapters.get(index))
    }

    fn position(&self, chapter: &ChapterPage) -> Option<usize> {
        self.chapters
            .iter()
            .position(|other| other.idref == chapter.idref && other.order == chapter.order)
    }

    /// Returns the image with the given manifest href or archive path.
    pub fn image_by_href(&self, href: &str) -> Option<&ImageAsset> {
        self.images
            .iter()
            .find(|image| image.href == href || image.path == href)
    }

    /// Returns the stylesheet with the given manifest href or archive path.
    pub fn stylesheet_by_href(&self, href: &str) -> Option<&StylesheetAsset> {
        self.stylesheets
            .iter()
            .find(|stylesheet| stylesheet.href == href || stylesheet.path == href)
    }

    pub fn has_stylesheets(&self) -> bool {
        !self.stylesheets.is_empty()
    }

    /// The title, made safe for use in a URL (see [`util::safe_name`]).
    pub fn safe_title(&self) -> Option<String> {
        self.metadata.title().map(util::safe_name)
    }

    /// The first author, made safe for use in a URL (see [`util::safe_name`]).
    pub fn safe_author(&self) -> Option<String> {
        self.metadata.authors().first().map(|author| util::safe_name(author))
    }
}

impl Debug for EpubDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpubDocument")
            .field("package_path", &self.package_path)
            .field("metadata", &self.metadata)
            .field("chapters", &self.chapters)
            .field("stylesheets", &self.stylesheets.len())
            .field("images", &self.images.len())
            .finish_non_exhaustive()
    }
}
