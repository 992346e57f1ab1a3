use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;

use super::{FileContentSource, Kind, Object};
use crate::path::os_str_bytes;

/// Hash the file at `path` as a blob object.
///
/// Regular files are hashed by content. A symbolic link is not followed;
/// its blob holds the link target path, which is what git records for
/// entries with mode `120000`.
pub fn blob_from_path<P: AsRef<Path>>(path: P) -> io::Result<Object> {
    let path = path.as_ref();
    let metadata = fs::symlink_metadata(path)?;

    let object = if metadata.file_type().is_symlink() {
        let target = fs::read_link(path)?;
        let target = os_str_bytes(target.as_os_str()).into_owned();
        Object::new(Kind::Blob, Box::new(target))?
    } else {
        Object::new(Kind::Blob, Box::new(FileContentSource::new(path)?))?
    };

    trace!(path = %path.display(), id = %object.id(), "hashed blob");
    Ok(object)
}
