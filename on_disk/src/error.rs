use std::io;
use std::path::PathBuf;

use blobtree_core::object::{HeaderError, Id, TreeError};
use thiserror::Error;

/// Describes the potential error conditions that might arise from object store
/// and tree-building operations.
///
/// Every variant names the object or path it concerns. None of these are
/// transient, so nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} not found")]
    NotFound(Id),

    #[error("object {id} is corrupt: {source}")]
    CorruptObject {
        id: Id,
        #[source]
        source: io::Error,
    },

    #[error("object {id} has a malformed header: {source}")]
    HeaderMalformed {
        id: Id,
        #[source]
        source: HeaderError,
    },

    #[error("tree {id} is corrupt: {source}")]
    CorruptTree {
        id: Id,
        #[source]
        source: TreeError,
    },

    #[error("object {0} is not a tree")]
    NotATree(Id),

    #[error("cannot create tree from {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error hashing {path}: {source}")]
    HashFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot add {path} to tree: {source}")]
    InvalidEntry {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error("could not read ignore file {path}: {source}")]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid ignore pattern {pattern:?}: {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// A specialized `Result` type for object store operations.
pub type Result<T> = std::result::Result<T, Error>;
