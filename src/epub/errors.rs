//! Error-related types for the EPUB structure.

use crate::archive::errors::ArchiveError;
use std::error::Error;

/// Possible format errors from an EPUB.
///
/// # Variants
/// ## Container Errors (`container.xml`)
/// - [`MalformedContainer`](EpubError::MalformedContainer)
/// ## OPF (`.opf`) Package Errors
/// - [`NoPackageFound`](EpubError::NoPackageFound)
/// - [`NoManifestFound`](EpubError::NoManifestFound)
/// - [`NoSpineFound`](EpubError::NoSpineFound)
/// - [`DuplicateItemId`](EpubError::DuplicateItemId)*
/// - [`MissingTitle`](EpubError::MissingTitle)*
/// ## Navigation Errors
/// - [`TocResolution`](EpubError::TocResolution)
/// - [`NoTocReference`](EpubError::NoTocReference)
///
/// Variants flagged with `*` are only raised when
/// [`IngestOptions::strict`](super::IngestOptions::strict) is enabled.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EpubError {
    ////////////////////////////////////////////////////////////////////////////////
    // Within `META-INF/container.xml`
    ////////////////////////////////////////////////////////////////////////////////
    /// The container is unusable: not a zip, or its descriptor is missing or malformed.
    ///
    /// Error Source: the archive or `META-INF/container.xml`
    #[error("Malformed container: {0}")]
    MalformedContainer(#[source] ContainerFault),

    ////////////////////////////////////////////////////////////////////////////////
    // Package-specific errors
    ////////////////////////////////////////////////////////////////////////////////
    /// The `package` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `package` element")]
    NoPackageFound,

    /// The `manifest` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `manifest` element")]
    NoManifestFound,

    /// The `spine` element is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `spine` element")]
    NoSpineFound,

    /// An `item` element within the manifest contains a duplicate `id`.
    ///
    /// Error Source: `.opf` file
    #[error("Duplicate manifest `item` ID found: {0}")]
    DuplicateItemId(String),

    /// The `dc:title` metadata entry is missing.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `dc:title` metadata entry")]
    MissingTitle,

    ////////////////////////////////////////////////////////////////////////////////
    // Navigation-specific errors
    ////////////////////////////////////////////////////////////////////////////////
    /// The `toc` field on the `spine` element references a non-existent manifest entry.
    ///
    /// Error Source: `.opf` file
    #[error("Invalid spine `toc` field that references a non-existent manifest entry by ID: {0}")]
    TocResolution(String),

    /// The spine has no `toc` field and the manifest declares no NCX document.
    ///
    /// Error Source: `.opf` file
    #[error("Missing spine `toc` field and no NCX manifest entry to fall back on")]
    NoTocReference,
}

/// The reason a container was rejected.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ContainerFault {
    /// The uploaded bytes are not a readable zip archive.
    #[error("the upload is not a readable zip archive")]
    UnreadableArchive(#[source] ArchiveError),

    /// `META-INF/container.xml` is absent or cannot be read.
    #[error("`META-INF/container.xml` cannot be read")]
    MissingDescriptor(#[source] ArchiveError),

    /// `META-INF/container.xml` is not well-formed XML.
    #[error("`META-INF/container.xml` is not well-formed")]
    UnparsableDescriptor(#[source] Box<dyn Error + Send + Sync + 'static>),

    /// No `rootfile` element declares a `full-path`.
    #[error("missing `rootfile` element referencing the package document")]
    MissingRootFile,
}
