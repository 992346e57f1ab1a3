use std::io::{self, Cursor, ErrorKind, Read};

use super::{ContentSource, ContentSourceOpenResult};

/// Upper bound on what [`ReadContentSource::new`] will buffer: 20 MiB.
///
/// [`ReadContentSource::new`]: struct.ReadContentSource.html#method.new
pub const MAX_READ_LEN: usize = 20 * 1024 * 1024;

/// A [`ContentSource`] that drains a one-shot reader (typically stdin) into
/// memory so it can be opened again for hashing and for storage.
///
/// [`ContentSource`]: trait.ContentSource.html
pub struct ReadContentSource {
    content: Vec<u8>,
}

impl ReadContentSource {
    /// Buffer everything `r` produces, failing with `InvalidData` once more
    /// than [`MAX_READ_LEN`] bytes arrive.
    ///
    /// [`MAX_READ_LEN`]: constant.MAX_READ_LEN.html
    pub fn new<R: Read>(r: R) -> io::Result<ReadContentSource> {
        ReadContentSource::with_limit(r, MAX_READ_LEN)
    }

    /// As [`new`](#method.new), with a caller-chosen limit.
    pub fn with_limit<R: Read>(r: R, limit: usize) -> io::Result<ReadContentSource> {
        let mut content = Vec::new();

        // One byte past the limit is enough to tell "exactly at" from "over".
        r.take((limit as u64).saturating_add(1)).read_to_end(&mut content)?;

        if content.len() > limit {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("input exceeds the {} byte limit", limit),
            ));
        }

        Ok(ReadContentSource { content })
    }
}

impl ContentSource for ReadContentSource {
    fn len(&self) -> usize {
        self.content.len()
    }

    fn open(&self) -> ContentSourceOpenResult {
        Ok(Box::new(Cursor::new(self.content.as_slice())))
    }
}
