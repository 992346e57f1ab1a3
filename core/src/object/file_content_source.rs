use std::convert::TryFrom;
use std::fs::{self, File};
use std::io::{self, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use super::{ContentSource, ContentSourceOpenResult};

/// A [`ContentSource`] backed by a regular file.
///
/// The length comes from the file's metadata at construction. The file is
/// reopened on every [`open`], so if it changes size in between, hashing
/// the object will fail rather than produce a wrong ID.
///
/// [`ContentSource`]: trait.ContentSource.html
/// [`open`]: trait.ContentSource.html#tymethod.open
pub struct FileContentSource {
    path: PathBuf,
    len: usize,
}

impl FileContentSource {
    /// Fails with `NotFound` if `path` is missing or names something other
    /// than a regular file (after following symlinks).
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<FileContentSource> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;

        if !metadata.is_file() {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let len = usize::try_from(metadata.len())
            .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))?;

        Ok(FileContentSource {
            path: path.to_path_buf(),
            len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for FileContentSource {
    fn len(&self) -> usize {
        self.len
    }

    fn open(&self) -> ContentSourceOpenResult {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}
