use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Describes the fundamental git object type (blob, tree, commit, or tag).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
    Tag,
}

/// An error which can be returned when a type name is not one of the
/// four object kinds.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unrecognized object type `{0}`")]
pub struct ParseKindError(pub String);

impl Kind {
    /// Parse a kind from the raw bytes of an object header.
    pub fn from_bytes(name: &[u8]) -> Result<Kind, ParseKindError> {
        match name {
            b"blob" => Ok(Kind::Blob),
            b"tree" => Ok(Kind::Tree),
            b"commit" => Ok(Kind::Commit),
            b"tag" => Ok(Kind::Tag),
            _ => Err(ParseKindError(String::from_utf8_lossy(name).into_owned())),
        }
    }

    /// Return the name used for this kind in object headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
            Kind::Tag => "tag",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_bytes(s.as_bytes())
    }
}
