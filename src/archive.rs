pub(crate) mod errors;
pub(crate) mod zip;

use crate::archive::errors::{ArchiveError, ArchiveResult};
use crate::util;

/// Read access to the entries of an uploaded container.
///
/// Paths are archive-absolute without a leading `/`, for example
/// `OEBPS/chapter1.xhtml`.
pub(crate) trait Archive {
    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>>;

    /// Reads an entry, converting UTF-16 (with a byte order mark) to UTF-8.
    fn read_utf8(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        util::utf::into_utf8(self.read_bytes(path)?).map_err(|source| {
            ArchiveError::InvalidUtf8Resource {
                source,
                path: path.to_owned(),
            }
        })
    }

    fn read_str(&self, path: &str) -> ArchiveResult<String> {
        util::utf::into_utf8_str(self.read_bytes(path)?).map_err(|source| {
            ArchiveError::InvalidUtf8Resource {
                source,
                path: path.to_owned(),
            }
        })
    }
}

/// Make the path "relative" otherwise retrieving the entry will not work.
///
/// `/OEBPS/toc.ncx` -> `OEBPS/toc.ncx`
fn entry_name(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
