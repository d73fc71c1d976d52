use crate::util::utf::UtfError;
use std::io;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from the archive of an uploaded EPUB.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The entry exists, although is unable to be read due to invalid UTF-8.
    ///
    /// This can occur when requesting to read an entry as a string.
    #[error("[InvalidUtf8Resource - `{path}`]: Resource value cannot be read as UTF-8")]
    InvalidUtf8Resource {
        /// The root cause of the error.
        source: UtfError,
        /// The archive path responsible for triggering the error.
        path: String,
    },

    /// A given path does not point to an entry within the archive.
    #[error("[InvalidResource - `{path}`]: {source}")]
    InvalidResource {
        /// The root cause of the error.
        source: io::Error,
        /// The archive path responsible for triggering the error.
        path: String,
    },

    /// The entry exists, although is unable to be read, typically I/O
    /// or a corrupt compressed stream.
    #[error("[CannotRead - `{path}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The archive path responsible for triggering the error.
        path: String,
    },

    /// The archive itself is unreadable due to an unsupported format or malformed state.
    ///
    /// This error is thrown **before** an archive is instantiated.
    #[error("[UnreadableArchive]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
    },
}
