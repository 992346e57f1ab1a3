//! This crate stores git-style loose objects on the local file system and
//! builds tree objects from directories.
//!
//! Objects use the same on-disk layout as command-line git
//! (`objects/<2 hex>/<38 hex>`, zlib-compressed), so a store may be pointed at
//! an existing repository's `.git/objects` folder. Only loose objects are
//! supported; there is no pack or index handling.

mod error;
pub use error::{Error, Result};

pub mod format;

mod ignore;
pub use ignore::IgnoreSet;

mod object_store;
pub use object_store::{ObjectReader, ObjectStore};

mod tree_builder;
pub use tree_builder::{write_tree, TreeBuilder};
