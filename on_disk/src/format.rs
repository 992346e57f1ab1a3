//! Renders stored objects for display.

use std::io::Write;

use blobtree_core::object::{Id, Kind};
use blobtree_core::FileMode;

use crate::{ObjectStore, Result};

/// Minimum width of the size column in the long tree listing.
const SIZE_WIDTH: usize = 7;

/// Layout for a tree listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListFormat {
    /// `<mode> <type> <id>\t<name>`
    Default,

    /// As `Default`, with the object size before the tab.
    Long,

    /// Entry names only.
    NameOnly,
}

impl Default for ListFormat {
    fn default() -> ListFormat {
        ListFormat::Default
    }
}

/// Write a listing of the tree `id` to `out`, one line per entry in stored
/// order.
///
/// The listing is assembled in memory first, so a missing child object
/// leaves `out` untouched.
pub fn write_tree_listing<W: Write + ?Sized>(
    store: &ObjectStore,
    id: &Id,
    format: ListFormat,
    out: &mut W,
) -> Result<()> {
    let tree = store.read_tree(id)?;
    let mut listing: Vec<u8> = Vec::new();

    for entry in tree.entries() {
        if format != ListFormat::NameOnly {
            let (kind, size) = child_kind_and_size(store, entry.mode(), entry.id())?;
            write!(listing, "{} {} {}", entry.mode(), kind, entry.id())?;

            if format == ListFormat::Long {
                match size {
                    Some(size) => write!(listing, " {:>width$}", size, width = SIZE_WIDTH)?,
                    None => write!(listing, " {:>width$}", "-", width = SIZE_WIDTH)?,
                }
            }

            listing.push(b'\t');
        }

        listing.extend_from_slice(entry.name());
        listing.push(b'\n');
    }

    out.write_all(&listing)?;
    Ok(())
}

// Submodule entries point at commits in another repository, so there is
// nothing to look up locally.
fn child_kind_and_size(
    store: &ObjectStore,
    mode: FileMode,
    id: &Id,
) -> Result<(Kind, Option<usize>)> {
    if mode == FileMode::Submodule {
        return Ok((Kind::Commit, None));
    }

    let header = store.read_header(id)?;
    let size = match header.kind {
        Kind::Tree => None,
        _ => Some(header.size),
    };
    Ok((header.kind, size))
}

/// Copy the payload of object `id` to `out` without modification.
pub fn write_object_content<W: Write + ?Sized>(
    store: &ObjectStore,
    id: &Id,
    out: &mut W,
) -> Result<u64> {
    store.open(id)?.copy_to(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use blobtree_core::object::{Object, Tree, TreeEntry};
    use tempfile::{tempdir, TempDir};

    use crate::{write_tree, Error};

    fn scenario_store() -> (TempDir, ObjectStore, Id) {
        let dir = tempdir().unwrap();
        let work = dir.path().join("work");
        fs::create_dir_all(work.join("sub")).unwrap();
        fs::write(work.join("a.txt"), "hello").unwrap();
        fs::write(work.join("sub/b.txt"), "world").unwrap();

        let store = ObjectStore::new(dir.path().join("objects"));
        let root = write_tree(&store, &work, None, true).unwrap();
        (dir, store, root)
    }

    fn listing(store: &ObjectStore, id: &Id, format: ListFormat) -> String {
        let mut out = Vec::new();
        write_tree_listing(store, id, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn name_only() {
        let (_dir, store, root) = scenario_store();
        assert_eq!(listing(&store, &root, ListFormat::NameOnly), "a.txt\nsub\n");
    }

    #[test]
    fn default_format() {
        let (_dir, store, root) = scenario_store();
        assert_eq!(
            listing(&store, &root, ListFormat::Default),
            "100644 blob b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0\ta.txt\n\
             040000 tree 0980762b58316262116e0b114d3bd5d44256399f\tsub\n"
        );
    }

    #[test]
    fn long_format() {
        let (_dir, store, root) = scenario_store();
        assert_eq!(
            listing(&store, &root, ListFormat::Long),
            "100644 blob b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0       5\ta.txt\n\
             040000 tree 0980762b58316262116e0b114d3bd5d44256399f       -\tsub\n"
        );
    }

    #[test]
    fn long_format_widens_for_large_sizes() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path().join("objects"));

        let blob = Object::new(Kind::Blob, Box::new(vec![b'x'; 12_345_678])).unwrap();
        store.write(&blob).unwrap();

        let entry = TreeEntry::new(FileMode::Normal, b"big".to_vec(), *blob.id()).unwrap();
        let tree = Tree::new(vec![entry]).unwrap().to_object().unwrap();
        store.write(&tree).unwrap();

        assert_eq!(
            listing(&store, tree.id(), ListFormat::Long),
            format!("100644 blob {} 12345678\tbig\n", blob.id())
        );
    }

    #[test]
    fn submodule_entry_is_not_looked_up() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path().join("objects"));

        let commit = Id::from_hex("3f5e1c2c0a4b1f0e6f1d2c3b4a5968778695a4b3").unwrap();
        let entry = TreeEntry::new(FileMode::Submodule, b"vendor".to_vec(), commit).unwrap();
        let tree = Tree::new(vec![entry]).unwrap().to_object().unwrap();
        store.write(&tree).unwrap();

        assert_eq!(
            listing(&store, tree.id(), ListFormat::Long),
            format!("160000 commit {}       -\tvendor\n", commit)
        );
    }

    #[test]
    fn non_utf8_names_are_written_raw() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path().join("objects"));

        let blob = Object::new(Kind::Blob, Box::new(b"x".to_vec())).unwrap();
        store.write(&blob).unwrap();

        let entry = TreeEntry::new(FileMode::Normal, b"caf\xe9".to_vec(), *blob.id()).unwrap();
        let tree = Tree::new(vec![entry]).unwrap().to_object().unwrap();
        store.write(&tree).unwrap();

        let mut out = Vec::new();
        write_tree_listing(&store, tree.id(), ListFormat::NameOnly, &mut out).unwrap();
        assert_eq!(out, b"caf\xe9\n");
    }

    #[test]
    fn error_not_a_tree() {
        let (_dir, store, _root) = scenario_store();
        let blob = Id::from_hex("b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0").unwrap();

        let mut out = Vec::new();
        match write_tree_listing(&store, &blob, ListFormat::Default, &mut out) {
            Err(Error::NotATree(id)) => assert_eq!(id, blob),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn error_missing_child_leaves_output_untouched() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path().join("objects"));

        let missing = Id::from_hex("04fea06420ca60892f73becee3614f6d023a4b7f").unwrap();
        let entry = TreeEntry::new(FileMode::Normal, b"gone".to_vec(), missing).unwrap();
        let tree = Tree::new(vec![entry]).unwrap().to_object().unwrap();
        store.write(&tree).unwrap();

        let mut out = Vec::new();
        match write_tree_listing(&store, tree.id(), ListFormat::Default, &mut out) {
            Err(Error::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(out.is_empty());

        // Names alone never need the child.
        assert_eq!(listing(&store, tree.id(), ListFormat::NameOnly), "gone\n");
    }

    #[test]
    fn raw_content() {
        let (_dir, store, _root) = scenario_store();
        let blob = Id::from_hex("04fea06420ca60892f73becee3614f6d023a4b7f").unwrap();

        let mut out = Vec::new();
        let n = write_object_content(&store, &blob, &mut out).unwrap();
        assert_eq!(n, 5);
        assert_eq!(out, b"world");
    }
}
