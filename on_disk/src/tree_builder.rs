//! Recursive construction of tree objects from a directory on disk.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use blobtree_core::object::{blob_from_path, Id, Object, Tree, TreeEntry};
use blobtree_core::path::os_str_bytes;
use blobtree_core::FileMode;
use tracing::{debug, info};

use crate::{Error, IgnoreSet, ObjectStore, Result};

/// Name of the repository metadata directory, which is never part of a tree.
const GIT_DIR_NAME: &str = ".git";

/// Builds tree objects for directories, optionally writing every blob and
/// tree it creates into an object store.
///
/// Each call to [`build`](#method.build) returns the completed tree object
/// for one directory; subdirectories are built first and their objects
/// handed back up the call stack.
pub struct TreeBuilder<'a> {
    store: &'a ObjectStore,
    ignore: &'a IgnoreSet,
    persist: bool,
}

impl<'a> TreeBuilder<'a> {
    /// Paths in `ignore` are skipped. If `persist` is false, objects are
    /// hashed but nothing is written to `store`.
    pub fn new(store: &'a ObjectStore, ignore: &'a IgnoreSet, persist: bool) -> TreeBuilder<'a> {
        TreeBuilder {
            store,
            ignore,
            persist,
        }
    }

    /// Build the tree object for `dir`.
    ///
    /// Any directory or file that cannot be read aborts the whole build;
    /// no partial tree is returned.
    pub fn build(&self, dir: &Path) -> Result<Object> {
        debug!(dir = %dir.display(), "building tree");

        let read_dir = fs::read_dir(dir).map_err(|source| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();

        for dirent in read_dir {
            let dirent = dirent.map_err(|source| Error::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;

            let name = dirent.file_name();
            if name.as_os_str() == OsStr::new(GIT_DIR_NAME) {
                continue;
            }

            let path = dirent.path();
            if self.ignore.contains(&path) {
                debug!(path = %path.display(), "skipping ignored path");
                continue;
            }

            let metadata = fs::symlink_metadata(&path).map_err(|source| Error::HashFile {
                path: path.clone(),
                source,
            })?;

            let file_type = metadata.file_type();
            if !(file_type.is_dir() || file_type.is_file() || file_type.is_symlink()) {
                debug!(path = %path.display(), "skipping special file");
                continue;
            }

            let mode = FileMode::from_metadata(&metadata);
            let object = if mode.is_tree() {
                self.build(&path)?
            } else {
                self.hash_file(&path)?
            };

            let entry = TreeEntry::new(mode, os_str_bytes(&name).into_owned(), *object.id())
                .map_err(|source| Error::InvalidEntry { path, source })?;
            entries.push(entry);
        }

        let tree = Tree::new(entries).map_err(|source| Error::InvalidEntry {
            path: dir.to_path_buf(),
            source,
        })?;

        let object = tree.to_object()?;
        self.maybe_persist(&object)?;

        debug!(dir = %dir.display(), id = %object.id(), entries = tree.len(), "built tree");
        Ok(object)
    }

    fn hash_file(&self, path: &Path) -> Result<Object> {
        let object = blob_from_path(path).map_err(|source| Error::HashFile {
            path: path.to_path_buf(),
            source,
        })?;

        self.maybe_persist(&object)?;
        Ok(object)
    }

    fn maybe_persist(&self, object: &Object) -> Result<()> {
        if self.persist {
            self.store.write(object)
        } else {
            Ok(())
        }
    }
}

/// Build the tree for `root` and return its ID.
///
/// If `ignore_file` is given, its patterns are expanded against `root` before
/// the walk starts. If `persist` is true, every blob and tree is written to
/// `store`.
///
/// This is functionally similar to
/// [`git write-tree`](https://git-scm.com/docs/git-write-tree), except that
/// it reads the working directory rather than an index.
pub fn write_tree(
    store: &ObjectStore,
    root: &Path,
    ignore_file: Option<&Path>,
    persist: bool,
) -> Result<Id> {
    let root = root.canonicalize().map_err(|source| Error::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;

    let ignore = match ignore_file {
        Some(ignore_file) => IgnoreSet::from_file(ignore_file, &root)?,
        None => IgnoreSet::new(),
    };

    let tree = TreeBuilder::new(store, &ignore, persist).build(&root)?;

    info!(root = %root.display(), id = %tree.id(), persist, "wrote tree");
    Ok(*tree.id())
}
