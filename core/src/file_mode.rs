use std::fmt::{self, Display, Formatter};
use std::fs::Metadata;

/// Describes the file type as represented on disk.
///
/// Git uses a variation on the Unix file permissions flags to denote a file's
/// intended type on disk. The following values are recognized:
///
/// * `0o100644` - normal file
/// * `0o100755` - executable file
/// * `0o120000` - symbolic link
/// * `0o040000` - tree (subdirectory)
/// * `0o160000` - submodule (aka gitlink)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    SymbolicLink,
    Tree,
    Submodule,
}

impl FileMode {
    /// Convert from git file-mode integer to `FileMode` enum.
    ///
    /// Returns `None` if the value is not one of the recognized constants.
    pub fn from_value(value: u32) -> Option<FileMode> {
        match value {
            0o100644 => Some(FileMode::Normal),
            0o100755 => Some(FileMode::Executable),
            0o120000 => Some(FileMode::SymbolicLink),
            0o040000 => Some(FileMode::Tree),
            0o160000 => Some(FileMode::Submodule),
            _ => None,
        }
    }

    /// Convert from `FileMode` enum to git file-mode integer.
    pub fn to_value(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::SymbolicLink => 0o120000,
            FileMode::Tree => 0o040000,
            FileMode::Submodule => 0o160000,
        }
    }

    /// Parse the ASCII octal digits of a mode as found in a tree entry.
    ///
    /// Git itself writes trees as `40000` (no leading zero), so the value
    /// is compared numerically rather than as a 6-character string.
    pub fn from_octal_slice(octal: &[u8]) -> Option<FileMode> {
        if octal.is_empty() || octal.len() > 6 {
            return None;
        }

        let mut value = 0u32;
        for &c in octal {
            match c {
                b'0'..=b'7' => value = value << 3 | u32::from(c - b'0'),
                _ => return None,
            }
        }

        FileMode::from_value(value)
    }

    /// Derive the mode git would record for a file with this metadata.
    ///
    /// `metadata` should come from `symlink_metadata` so that links are
    /// reported as links rather than as their targets.
    pub fn from_metadata(metadata: &Metadata) -> FileMode {
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            FileMode::Tree
        } else if file_type.is_symlink() {
            FileMode::SymbolicLink
        } else if is_executable(metadata) {
            FileMode::Executable
        } else {
            FileMode::Normal
        }
    }

    /// Returns true if entries with this mode refer to tree objects.
    pub fn is_tree(self) -> bool {
        self == FileMode::Tree
    }
}

#[cfg(unix)]
fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &Metadata) -> bool {
    false
}

impl Display for FileMode {
    /// Always six digits, so trees are written as `040000`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:06o}", self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn from_value() {
        assert_eq!(FileMode::from_value(0o100644).unwrap(), FileMode::Normal);
        assert_eq!(
            FileMode::from_value(0o100755).unwrap(),
            FileMode::Executable
        );
        assert_eq!(
            FileMode::from_value(0o120000).unwrap(),
            FileMode::SymbolicLink
        );
        assert_eq!(FileMode::from_value(0o040000).unwrap(), FileMode::Tree);
        assert_eq!(FileMode::from_value(0o160000).unwrap(), FileMode::Submodule);
        assert!(FileMode::from_value(0o160001).is_none());
        assert!(FileMode::from_value(0).is_none());
    }

    #[test]
    fn from_octal_slice() {
        assert_eq!(FileMode::from_octal_slice(b"100644"), Some(FileMode::Normal));
        assert_eq!(FileMode::from_octal_slice(b"040000"), Some(FileMode::Tree));
        assert_eq!(FileMode::from_octal_slice(b"40000"), Some(FileMode::Tree));
        assert_eq!(
            FileMode::from_octal_slice(b"120000"),
            Some(FileMode::SymbolicLink)
        );

        assert_eq!(FileMode::from_octal_slice(b""), None);
        assert_eq!(FileMode::from_octal_slice(b"100648"), None);
        assert_eq!(FileMode::from_octal_slice(b"9100644"), None);
        assert_eq!(FileMode::from_octal_slice(b"100 644"), None);
    }

    #[test]
    fn display_is_six_digits() {
        assert_eq!(FileMode::Normal.to_string(), "100644");
        assert_eq!(FileMode::Executable.to_string(), "100755");
        assert_eq!(FileMode::SymbolicLink.to_string(), "120000");
        assert_eq!(FileMode::Tree.to_string(), "040000");
        assert_eq!(FileMode::Submodule.to_string(), "160000");
    }

    #[test]
    fn from_metadata() {
        let dir = tempfile::tempdir().unwrap();

        let file = dir.path().join("file");
        fs::write(&file, b"x").unwrap();

        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        assert_eq!(
            FileMode::from_metadata(&fs::symlink_metadata(&sub).unwrap()),
            FileMode::Tree
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
            assert_eq!(
                FileMode::from_metadata(&fs::symlink_metadata(&file).unwrap()),
                FileMode::Normal
            );

            fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();
            assert_eq!(
                FileMode::from_metadata(&fs::symlink_metadata(&file).unwrap()),
                FileMode::Executable
            );

            let link = dir.path().join("link");
            std::os::unix::fs::symlink(&file, &link).unwrap();
            assert_eq!(
                FileMode::from_metadata(&fs::symlink_metadata(&link).unwrap()),
                FileMode::SymbolicLink
            );
        }
    }
}
