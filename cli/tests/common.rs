use std::{fs, path::PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch directory holding a repository folder (`.git`) and a work tree
/// (`work`) next to it.
pub struct Scratch {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Scratch {
    pub fn new() -> Scratch {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("work")).unwrap();
        Scratch { dir }
    }

    /// `a.txt` ("hello") and `sub/b.txt` ("world").
    pub fn with_sample_tree() -> Scratch {
        let scratch = Scratch::new();
        scratch.write_file("a.txt", "hello");
        scratch.write_file("sub/b.txt", "world");
        scratch
    }

    pub fn git_dir(&self) -> PathBuf {
        self.dir.path().join(".git")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.work_dir().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn object_exists(&self, id: &str) -> bool {
        self.git_dir()
            .join("objects")
            .join(&id[..2])
            .join(&id[2..])
            .is_file()
    }

    /// A `blobtree` command pointed at this scratch repository and run from
    /// the work tree.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("blobtree").unwrap();
        cmd.current_dir(self.work_dir())
            .arg("--git-dir")
            .arg(self.git_dir());
        cmd
    }
}
