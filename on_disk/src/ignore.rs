use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;

use crate::{Error, Result};

/// The set of paths a single tree build should leave out.
///
/// Patterns are expanded once, against the root directory of the build, into
/// absolute paths. A pattern such as `*.txt` therefore matches only files
/// directly inside the root; use `sub/*.txt` to reach into subdirectories.
#[derive(Clone, Debug, Default)]
pub struct IgnoreSet {
    paths: HashSet<PathBuf>,
}

impl IgnoreSet {
    /// An ignore set that excludes nothing.
    pub fn new() -> IgnoreSet {
        IgnoreSet::default()
    }

    /// Read newline-separated glob patterns from `ignore_file` and expand
    /// them against `root`.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_file<P: AsRef<Path>, R: AsRef<Path>>(ignore_file: P, root: R) -> Result<IgnoreSet> {
        let ignore_file = ignore_file.as_ref();
        let text = fs::read_to_string(ignore_file).map_err(|source| Error::IgnoreFile {
            path: ignore_file.to_path_buf(),
            source,
        })?;

        IgnoreSet::from_patterns(text.lines(), root)
    }

    /// Expand glob patterns against `root`.
    pub fn from_patterns<'a, I, R>(patterns: I, root: R) -> Result<IgnoreSet>
    where
        I: IntoIterator<Item = &'a str>,
        R: AsRef<Path>,
    {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|source| Error::ReadDir {
            path: root.to_path_buf(),
            source,
        })?;
        let prefix = Pattern::escape(&root.to_string_lossy());

        let mut paths = HashSet::new();

        for line in patterns {
            let pattern = line.trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }

            let pattern = pattern.trim_matches('/');
            let full_pattern = format!("{}/{}", prefix, pattern);

            let matches = glob::glob(&full_pattern).map_err(|source| Error::IgnorePattern {
                pattern: pattern.to_string(),
                source,
            })?;

            for m in matches {
                match m {
                    Ok(path) => {
                        debug!(pattern, path = %path.display(), "ignoring");
                        paths.insert(path);
                    }
                    Err(err) => {
                        // Unreadable directories simply contribute no matches.
                        debug!(pattern, error = %err, "skipped while expanding pattern");
                    }
                }
            }
        }

        Ok(IgnoreSet { paths })
    }

    /// Returns true if `path` was matched by one of the patterns.
    ///
    /// `path` must be spelled the way the build spells it: the canonical
    /// root joined with the entry's name(s).
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
