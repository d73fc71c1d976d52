//! # epub-ingest
//!
//! An EPUB ingestion engine that explodes an uploaded container archive
//! into a normalized, display-ready document model.
//!
//! Ingestion is a single synchronous pipeline:
//! 1. `META-INF/container.xml` is read to locate the package (`.opf`) document.
//! 2. The package document yields [metadata](epub::metadata::PackageMetadata),
//!    the [manifest](epub::manifest::Manifest), the [spine](epub::spine::Spine),
//!    and a reference to the NCX navigation document.
//! 3. The NCX document is parsed into a [navigation tree](epub::toc::NavTree).
//! 4. Spine order and navigation titles are reconciled into ordered
//!    [chapters](epub::chapter::ChapterPage).
//! 5. Stylesheets and images named by the manifest are extracted, with stylesheets
//!    [scoped](render::css::CssScoper) for embedding within a host page.
//!
//! Chapter markup is [sanitized](render::xhtml::XhtmlSanitizer) lazily on first
//! render and memoized afterward.
//!
//! ## Examples
//! ```no_run
//! # use epub_ingest::errors::IngestResult;
//! # fn main() -> IngestResult<()> {
//! let bytes = std::fs::read("upload.epub").unwrap();
//! let document = epub_ingest::ingest(&bytes)?;
//!
//! println!("Title = {:?}", document.metadata().title());
//!
//! for chapter in document.chapters() {
//!     println!("[{}] {}", chapter.order(), chapter.title());
//!     println!("{}", document.render(chapter));
//! }
//! # Ok(())
//! # }
//! ```

mod archive;
pub mod epub;
pub mod errors;
mod parser;
pub mod render;
pub mod util;

pub use self::epub::{EpubDocument, IngestOptions};

use crate::errors::IngestResult;

/// Ingests the bytes of an uploaded EPUB with default [`IngestOptions`].
///
/// # Errors
/// See [`EpubDocument::ingest_with`].
pub fn ingest(bytes: &[u8]) -> IngestResult<EpubDocument> {
    EpubDocument::ingest(bytes)
}
