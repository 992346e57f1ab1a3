//! Canonical binary encoding of a tree object's entry list.
//!
//! Each entry is written as `<mode> <name>\0<20-byte id>` with nothing
//! between consecutive entries. Entries are sorted byte-wise by name, so two
//! directories holding the same entries always encode (and hash) identically.

use std::io::{self, Cursor, Read};

use thiserror::Error;

use super::parse_utils::{self, Token};
use super::{Id, Kind, Object, ID_LEN};
use crate::FileMode;

/// Longest mode we accept, in octal digits.
const MAX_MODE_LEN: usize = 6;

/// Reasons why a tree cannot be built or decoded.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TreeError {
    #[error("entry at byte {offset} is truncated while reading its {field}")]
    Truncated { offset: usize, field: &'static str },

    #[error("entry at byte {offset} has invalid mode {mode:?}")]
    InvalidMode { offset: usize, mode: String },

    #[error("invalid entry name {0:?}")]
    InvalidName(String),

    #[error("duplicate entry name {0:?}")]
    DuplicateName(String),
}

/// A single `(mode, name, id)` record within a tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    mode: FileMode,
    name: Vec<u8>,
    id: Id,
}

impl TreeEntry {
    /// Create an entry. The name must be a single non-empty path segment
    /// containing neither `/` nor a null byte.
    pub fn new<N: Into<Vec<u8>>>(mode: FileMode, name: N, id: Id) -> Result<TreeEntry, TreeError> {
        let name = name.into();
        check_name(&name)?;
        Ok(TreeEntry { mode, name, id })
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.mode.to_string().as_bytes());
        out.push(b' ');
        out.extend_from_slice(&self.name);
        out.push(0);
        out.extend_from_slice(self.id.as_bytes());
    }
}

fn check_name(name: &[u8]) -> Result<(), TreeError> {
    if name.is_empty() || name.contains(&b'/') || name.contains(&0) {
        Err(TreeError::InvalidName(
            String::from_utf8_lossy(name).into_owned(),
        ))
    } else {
        Ok(())
    }
}

/// The decoded (or about to be encoded) entry list of a tree object.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Put `entries` into canonical order.
    ///
    /// Entries may be given in any order. It is an error for two entries to
    /// share a name.
    pub fn new(mut entries: Vec<TreeEntry>) -> Result<Tree, TreeError> {
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(pair) = entries.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(TreeError::DuplicateName(
                String::from_utf8_lossy(&pair[0].name).into_owned(),
            ));
        }

        Ok(Tree { entries })
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the entries into a tree object payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            entry.encode_into(&mut out);
        }
        out
    }

    /// Hash the encoded entries as a tree object.
    pub fn to_object(&self) -> io::Result<Object> {
        Object::new(Kind::Tree, Box::new(self.encode()))
    }

    /// Parse a tree object payload.
    ///
    /// Entries are returned in the order they were stored. A mode written
    /// without its leading zero (as git does for `40000`) is accepted.
    pub fn decode(content: &[u8]) -> Result<Tree, TreeError> {
        let mut r = Cursor::new(content);
        let mut entries = Vec::new();

        while (r.position() as usize) < content.len() {
            let offset = r.position() as usize;

            let mode = match next_token(&mut r, b' ', MAX_MODE_LEN + 1, offset, "mode")? {
                Token::Found(mode) => FileMode::from_octal_slice(&mode).ok_or_else(|| {
                    TreeError::InvalidMode {
                        offset,
                        mode: String::from_utf8_lossy(&mode).into_owned(),
                    }
                })?,
                Token::TooLong(mode) => {
                    return Err(TreeError::InvalidMode {
                        offset,
                        mode: String::from_utf8_lossy(&mode).into_owned(),
                    })
                }
                Token::Eof(_) => return Err(TreeError::Truncated { offset, field: "mode" }),
            };

            let name = match next_token(&mut r, 0, content.len(), offset, "name")? {
                Token::Found(name) => name,
                Token::Eof(_) | Token::TooLong(_) => {
                    return Err(TreeError::Truncated { offset, field: "name" })
                }
            };
            check_name(&name)?;

            let mut id = [0u8; ID_LEN];
            r.read_exact(&mut id).map_err(|_| TreeError::Truncated {
                offset,
                field: "object id",
            })?;

            entries.push(TreeEntry {
                mode,
                name,
                id: Id::from_bytes(id),
            });
        }

        Ok(Tree { entries })
    }
}

fn next_token(
    r: &mut Cursor<&[u8]>,
    delim: u8,
    limit: usize,
    offset: usize,
    field: &'static str,
) -> Result<Token, TreeError> {
    // An in-memory cursor only fails by running out of bytes.
    parse_utils::read_until_bounded(r, delim, limit)
        .map_err(|_| TreeError::Truncated { offset, field })
}
