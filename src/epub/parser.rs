mod assets;
mod container;
mod ncx;
mod package;
mod reconcile;

use crate::archive::Archive;
use crate::epub::IngestOptions;
use crate::epub::asset::{ImageAsset, StylesheetAsset};
use crate::epub::chapter::ChapterPage;
use crate::epub::manifest::Manifest;
use crate::epub::metadata::PackageMetadata;
use crate::epub::spine::Spine;
use crate::epub::toc::NavTree;
use crate::errors::{IngestError, IngestResult};
use crate::util::uri;

/// Everything derived from an archive during ingestion.
pub(super) struct ParsedContent {
    pub(super) package_path: String,
    pub(super) base_path: String,
    pub(super) opf_source: String,
    pub(super) toc_source: String,
    pub(super) metadata: PackageMetadata,
    pub(super) manifest: Manifest,
    pub(super) spine: Spine,
    pub(super) toc: NavTree,
    pub(super) chapters: Vec<ChapterPage>,
    pub(super) stylesheets: Vec<StylesheetAsset>,
    pub(super) images: Vec<ImageAsset>,
}

pub(super) struct EpubParser<'a> {
    options: &'a IngestOptions,
    archive: &'a dyn Archive,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(options: &'a IngestOptions, archive: &'a dyn Archive) -> Self {
        Self { options, archive }
    }

    /// Runs the whole pipeline; any error aborts ingestion.
    pub(super) fn parse(&self) -> IngestResult<ParsedContent> {
        // Parse "META-INF/container.xml"
        let package_path = self.parse_container()?;
        let base_path = uri::base_path(&package_path);
        log::debug!("Got package document as `{package_path}` (base path `{base_path}`)");

        // Parse "package.opf"
        let opf_source = self.read_text(&package_path)?;
        let package = self.parse_package(&base_path, &opf_source)?;

        // Parse "toc.ncx"
        let toc_item = package::locate_toc(&package.manifest, &package.spine)?;
        log::debug!("Got toc document as `{}`", toc_item.path());
        let toc_source = self.read_text(toc_item.path())?;
        let toc = self.parse_ncx(
            uri::parent(toc_item.path()),
            &toc_source,
            package.metadata.title(),
        )?;

        let chapters = self.reconcile(&package.manifest, &package.spine, &toc)?;
        let stylesheets = self.extract_stylesheets(&package.manifest)?;
        let images = self.extract_images(&package.manifest)?;

        Ok(ParsedContent {
            package_path,
            base_path,
            opf_source,
            toc_source,
            metadata: package.metadata,
            manifest: package.manifest,
            spine: package.spine,
            toc,
            chapters,
            stylesheets,
            images,
        })
    }

    /// Reads a resource referenced by the manifest.
    fn read_asset(&self, path: &str) -> IngestResult<Vec<u8>> {
        self.archive
            .read_utf8(path)
            .map_err(|source| Self::asset_error(path, source))
    }

    fn read_binary(&self, path: &str) -> IngestResult<Vec<u8>> {
        self.archive
            .read_bytes(path)
            .map_err(|source| Self::asset_error(path, source))
    }

    fn read_text(&self, path: &str) -> IngestResult<String> {
        self.archive
            .read_str(path)
            .map_err(|source| Self::asset_error(path, source))
    }

    fn asset_error(path: &str, source: crate::errors::ArchiveError) -> IngestError {
        IngestError::AssetRead {
            path: path.to_owned(),
            source,
        }
    }
}
