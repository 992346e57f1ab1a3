//! This crate implements the core data model for a content-addressed object
//! store: object kinds and IDs, the header that frames every object,
//! and the canonical binary encoding of trees.
//!
//! Nothing in this crate knows where objects are stored. See the
//! `blobtree_on_disk` crate for the compressed loose-object store.

mod file_mode;
pub use file_mode::FileMode;

pub mod object;
pub mod path;
