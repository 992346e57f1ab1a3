//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.

use std::io::{self, Error, ErrorKind, Read};

use sha1::{Digest, Sha1};

mod blob;
pub use blob::blob_from_path;

mod content_source;
pub use content_source::{ContentSource, ContentSourceOpenResult};

mod file_content_source;
pub use file_content_source::FileContentSource;

mod header;
pub use header::{Header, HeaderError, MAX_HEADER_LEN};

mod id;
pub use id::{Id, ParseIdError, HEX_LEN, ID_LEN};

mod kind;
pub use kind::{Kind, ParseKindError};

pub(crate) mod parse_utils;

mod read_content_source;
pub use read_content_source::{ReadContentSource, MAX_READ_LEN};

mod tree;
pub use tree::{Tree, TreeEntry, TreeError};

/// Describes a single object stored (or about to be stored) in a git repository.
///
/// The ID is computed when the object is created, so an `Object` always
/// satisfies `id == SHA1(header ++ content)`.
pub struct Object {
    id: Id,
    kind: Kind,
    content_source: Box<dyn ContentSource>,
}

impl Object {
    /// Create a new Object, hashing its content to assign the ID.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn new(kind: Kind, content_source: Box<dyn ContentSource>) -> io::Result<Object> {
        let id = hash_content(kind, content_source.as_ref())?;
        Ok(Object {
            id,
            kind,
            content_source,
        })
    }

    /// Return the ID of the object.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the size (in bytes) of the object.
    pub fn len(&self) -> usize {
        self.content_source.len()
    }

    /// Returns true if the object is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the header that frames this object's content.
    pub fn header(&self) -> Header {
        Header::new(self.kind, self.len())
    }

    /// Returns a `BufRead` struct which can be used for reading the content.
    pub fn open(&self) -> ContentSourceOpenResult {
        self.content_source.open()
    }
}

fn hash_content(kind: Kind, content_source: &dyn ContentSource) -> io::Result<Id> {
    let mut hasher = Sha1::new();
    hasher.update(Header::new(kind, content_source.len()).encode());

    let mut reader = content_source.open()?;
    let mut buf = [0; 8192];
    let mut total = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(ref err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        hasher.update(&buf[..n]);
        total += n;
    }

    if total != content_source.len() {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!(
                "content length changed while hashing (expected {} bytes, read {})",
                content_source.len(),
                total
            ),
        ));
    }

    let mut id = [0u8; ID_LEN];
    id.copy_from_slice(hasher.finalize().as_slice());
    Ok(Id::from_bytes(id))
}
