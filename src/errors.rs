//! Error-related types for ingestion.
//!
//! Every error in this module is fatal: ingestion aborts and no
//! [`EpubDocument`](crate::EpubDocument) is produced.
//! Locally recoverable failures are reported as values instead; see
//! [`SanitizationFailure`](crate::render::xhtml::SanitizationFailure) and
//! [`StylesheetParseFailure`](crate::render::css::StylesheetParseFailure).

pub use crate::archive::errors::{ArchiveError, ArchiveResult};
pub use crate::epub::errors::{ContainerFault, EpubError};
pub use crate::util::utf::UtfError;
use std::error::Error;

/// Alias for `Result<T, IngestError>`.
pub type IngestResult<T> = Result<T, IngestError>;

/// Unified error type.
/// Possible errors when ingesting an EPUB.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    /// File access within the archive has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Essential files are missing or malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A resource referenced by the manifest cannot be read from the archive.
    ///
    /// This covers chapter content, stylesheets, and images alike.
    #[error("[AssetRead - `{path}`]: {source}")]
    AssetRead {
        /// The archive path that could not be read.
        path: String,
        /// The root cause of the error.
        source: ArchiveError,
    },
}

impl IngestError {
    /// Returns the EPUB-specific error, if this is one.
    pub fn as_epub_error(&self) -> Option<&EpubError> {
        match self {
            Self::Format(FormatError::Epub(error)) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if the container itself is malformed
    /// (not a zip, or no usable `META-INF/container.xml`).
    pub fn is_malformed_container(&self) -> bool {
        matches!(self.as_epub_error(), Some(EpubError::MalformedContainer(_)))
    }
}

impl From<EpubError> for IngestError {
    fn from(error: EpubError) -> Self {
        Self::Format(FormatError::Epub(error))
    }
}

/// Possible format errors during ingestion.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// File content unexpectedly causes an internal parser error.
    ///
    /// This originates from malformed content within the package or NCX document,
    /// such as improper XML.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// Format errors specific to the EPUB structure.
    #[error(transparent)]
    Epub(#[from] EpubError),
}
