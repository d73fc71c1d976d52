use crate::archive::errors::{ArchiveError, ArchiveResult};
use crate::archive::{self, Archive};
use std::io;
use std::io::{Read, Seek};
use std::sync::{Mutex, MutexGuard};
use zip::ZipArchive as Zip;
use zip::read::ZipFile;

pub(crate) struct ZipArchive<R>(Mutex<Zip<R>>);

impl<R: Read + Seek> ZipArchive<R> {
    pub(crate) fn new(reader: R) -> ArchiveResult<Self> {
        Zip::new(reader)
            .map(|zip| Self(Mutex::new(zip)))
            .map_err(|error| ArchiveError::UnreadableArchive {
                source: io::Error::from(error),
            })
    }

    fn get_file<'a>(archive: &'a mut Zip<R>, path: &str) -> ArchiveResult<ZipFile<'a, R>> {
        archive
            .by_name(archive::entry_name(path))
            .map_err(|error| ArchiveError::InvalidResource {
                source: io::Error::from(error),
                path: path.to_owned(),
            })
    }

    fn lock(&self) -> ArchiveResult<MutexGuard<'_, Zip<R>>> {
        self.0.lock().map_err(|_| ArchiveError::UnreadableArchive {
            source: io::Error::other("Poisoned ZipArchive"),
        })
    }
}

impl<R: Read + Seek> Archive for ZipArchive<R> {
    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        let mut lock = self.lock()?;
        let mut zip_file = Self::get_file(&mut lock, path)?;
        let mut buf = Vec::new();

        zip_file
            .read_to_end(&mut buf)
            .map(|_| buf)
            .map_err(|error| ArchiveError::CannotRead {
                source: error,
                path: path.to_owned(),
            })
    }
}
