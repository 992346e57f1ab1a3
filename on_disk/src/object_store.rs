//! Loose-object storage: one zlib-compressed file per object, named by its ID.

use std::fs::{self, File};
use std::io::{self, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use blobtree_core::object::{Header, HeaderError, Id, Kind, Object, Tree, MAX_HEADER_LEN};
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Error, Result};

/// Reads and writes objects under a single `objects` directory.
///
/// Each object lives at `<objects>/<first 2 hex digits>/<remaining 38>`
/// and contains the zlib-compressed bytes of `header ++ content`.
///
/// The store holds no open handles and no cache, so any number of stores
/// may point at the same (or different) directories within one process.
#[derive(Clone, Debug)]
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Create a store rooted at `objects_dir`.
    ///
    /// The directory need not exist yet; it is created by the first write.
    pub fn new<P: Into<PathBuf>>(objects_dir: P) -> ObjectStore {
        ObjectStore {
            objects_dir: objects_dir.into(),
        }
    }

    /// Return the directory this store reads from and writes to.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Return the path where the object with this ID is (or would be) stored.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        let hex = id.to_hex();
        self.objects_dir.join(&hex[..2]).join(&hex[2..])
    }

    /// Returns true if an object with this ID has been stored.
    pub fn contains(&self, id: &Id) -> bool {
        self.object_path(id).is_file()
    }

    /// Write an object into the store.
    ///
    /// If the object is already present, nothing is written. Because the
    /// path is derived from the content hash, the existing file necessarily
    /// holds the same bytes.
    ///
    /// The compressed object is written to a temporary file in the same
    /// directory and then renamed into place, so readers never observe a
    /// partially-written object.
    pub fn write(&self, object: &Object) -> Result<()> {
        let path = self.object_path(object.id());
        if path.exists() {
            debug!(id = %object.id(), "object already stored");
            return Ok(());
        }

        let dir = match path.parent() {
            Some(dir) => dir,
            None => &self.objects_dir,
        };
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut encoder = ZlibEncoder::new(&mut temp, Compression::default());
            encoder.write_all(&object.header().encode())?;

            let mut content = object.open()?;
            let n = io::copy(&mut content, &mut encoder)?;
            if n != object.len() as u64 {
                return Err(Error::IoError(io::Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "content of {} changed after hashing (expected {} bytes, read {})",
                        object.id(),
                        object.len(),
                        n
                    ),
                )));
            }

            encoder.finish()?;
        }

        temp.persist(&path).map_err(|err| Error::IoError(err.error))?;

        debug!(id = %object.id(), kind = %object.kind(), size = object.len(), "wrote object");
        Ok(())
    }

    /// Open a stored object for reading.
    ///
    /// The header is parsed before this returns; the returned reader is
    /// positioned at the first byte of the content. The underlying file is
    /// closed when the reader is dropped.
    pub fn open(&self, id: &Id) -> Result<ObjectReader> {
        self.open_with_capacity(id, 8 * 1024)
    }

    /// Read only the header of a stored object.
    ///
    /// At most a small prefix of the object is decompressed.
    pub fn read_header(&self, id: &Id) -> Result<Header> {
        Ok(self.open_with_capacity(id, MAX_HEADER_LEN)?.header())
    }

    /// Read a stored object's header and its entire content.
    pub fn read(&self, id: &Id) -> Result<(Header, Vec<u8>)> {
        let reader = self.open(id)?;
        let header = reader.header();
        let content = reader.read_content()?;
        Ok((header, content))
    }

    /// Read and decode a stored tree object.
    pub fn read_tree(&self, id: &Id) -> Result<Tree> {
        let reader = self.open(id)?;
        if reader.header().kind != Kind::Tree {
            return Err(Error::NotATree(*id));
        }

        let content = reader.read_content()?;
        Tree::decode(&content).map_err(|source| Error::CorruptTree { id: *id, source })
    }

    fn open_with_capacity(&self, id: &Id, capacity: usize) -> Result<ObjectReader> {
        let path = self.object_path(id);
        let file = File::open(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NotFound(*id),
            _ => Error::IoError(err),
        })?;

        let mut reader = BufReader::with_capacity(capacity, ZlibDecoder::new(file));
        let (header, _) = Header::read_from(&mut reader).map_err(|err| match err {
            HeaderError::IoError(source) => Error::CorruptObject { id: *id, source },
            source => Error::HeaderMalformed { id: *id, source },
        })?;

        Ok(ObjectReader {
            id: *id,
            header,
            reader,
        })
    }
}

/// A stored object whose header has been read and whose content is
/// available as a decompressed stream.
pub struct ObjectReader {
    id: Id,
    header: Header,
    reader: BufReader<ZlibDecoder<File>>,
}

impl ObjectReader {
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn header(&self) -> Header {
        self.header
    }

    /// Read the remaining content into memory.
    ///
    /// Fails with `CorruptObject` if the stream cannot be decompressed or if
    /// its length disagrees with the size recorded in the header.
    pub fn read_content(self) -> Result<Vec<u8>> {
        let mut content = Vec::with_capacity(self.header.size);
        self.copy_to(&mut content)?;
        Ok(content)
    }

    /// Stream the remaining content to `out` without interpretation.
    ///
    /// Returns the number of bytes written.
    pub fn copy_to<W: Write + ?Sized>(mut self, out: &mut W) -> Result<u64> {
        let mut buf = [0u8; 8192];
        let mut total = 0u64;

        loop {
            let n = match self.reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(ref err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::CorruptObject {
                        id: self.id,
                        source,
                    })
                }
            };

            out.write_all(&buf[..n])?;
            total += n as u64;
        }

        if total != self.header.size as u64 {
            return Err(Error::CorruptObject {
                id: self.id,
                source: io::Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "header declares {} bytes but content has {}",
                        self.header.size, total
                    ),
                ),
            });
        }

        Ok(total)
    }
}

impl Read for ObjectReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}
