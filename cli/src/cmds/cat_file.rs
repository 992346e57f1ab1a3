use std::io::Write;

use crate::{App, Result};

use blobtree_core::object::Id;
use blobtree_on_disk::format::write_object_content;
use clap::{Arg, ArgGroup, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content, type, or size information for an object")
        .arg(
            Arg::with_name("p")
                .short("p")
                .help("Write the object's raw content to stdout"),
        )
        .arg(
            Arg::with_name("t")
                .short("t")
                .help("Show the object type"),
        )
        .arg(
            Arg::with_name("s")
                .short("s")
                .help("Show the object size in bytes"),
        )
        .group(
            ArgGroup::with_name("query")
                .args(&["p", "t", "s"])
                .required(true),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The full 40-digit ID of the object"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id: Id = args.value_of("object").unwrap_or_default().parse()?;
    let store = app.object_store();

    if args.is_present("p") {
        write_object_content(&store, &id, app)?;
    } else {
        let header = store.read_header(&id)?;
        if args.is_present("t") {
            writeln!(app, "{}", header.kind)?;
        } else {
            writeln!(app, "{}", header.size)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::App;

    use std::path::{Path, PathBuf};

    const HELLO_ID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

    fn repo_with_hello() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");

        App::run_with_stdin_and_args(
            b"hello".to_vec(),
            vec![
                "--git-dir",
                git_dir.to_str().unwrap(),
                "hash-object",
                "-w",
                "--stdin",
            ],
        )
        .unwrap();

        (dir, git_dir)
    }

    fn cat_file(git_dir: &Path, flag: &str, id: &str) -> crate::Result<Vec<u8>> {
        App::run_with_args(vec!["--git-dir", git_dir.to_str().unwrap(), "cat-file", flag, id])
    }

    #[test]
    fn content() {
        let (_dir, git_dir) = repo_with_hello();
        assert_eq!(cat_file(&git_dir, "-p", HELLO_ID).unwrap(), b"hello");
    }

    #[test]
    fn kind() {
        let (_dir, git_dir) = repo_with_hello();
        assert_eq!(cat_file(&git_dir, "-t", HELLO_ID).unwrap(), b"blob\n");
    }

    #[test]
    fn size() {
        let (_dir, git_dir) = repo_with_hello();
        assert_eq!(cat_file(&git_dir, "-s", HELLO_ID).unwrap(), b"5\n");
    }

    #[test]
    fn error_not_found() {
        let (_dir, git_dir) = repo_with_hello();
        let missing = "04fea06420ca60892f73becee3614f6d023a4b7f";

        let err = cat_file(&git_dir, "-t", missing).unwrap_err();
        assert_eq!(err.to_string(), format!("object {} not found", missing));
    }

    #[test]
    fn error_invalid_id() {
        let (_dir, git_dir) = repo_with_hello();
        assert!(cat_file(&git_dir, "-p", "not-an-id").is_err());
    }

    #[test]
    fn error_no_query_flag() {
        let err = App::run_with_args(vec!["cat-file", HELLO_ID]).unwrap_err();
        assert!(
            err.to_string()
                .contains("required arguments were not provided"),
            "\nincorrect error message:\n\n{}",
            err
        );
    }

    #[test]
    fn error_two_query_flags() {
        assert!(App::run_with_args(vec!["cat-file", "-t", "-s", HELLO_ID]).is_err());
    }
}
