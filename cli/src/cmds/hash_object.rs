use std::io::Write;

use crate::{App, Result};

use blobtree_core::object::{ContentSource, FileContentSource, Kind, Object, ReadContentSource};
use clap::{Arg, ArgMatches, Error, ErrorKind, SubCommand};
use tracing::debug;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally creates a blob from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .help("Specify the type (default 'blob')"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let object = object_from_args(app, &args)?;

    if args.is_present("w") {
        let store = app.object_store();
        store.write(&object)?;
    }

    debug!(id = %object.id(), kind = %object.kind(), len = object.len(), "hashed object");
    writeln!(app, "{}", object.id())?;

    Ok(())
}

fn object_from_args(app: &mut App, args: &ArgMatches) -> Result<Object> {
    let kind = type_from_args(&args)?;
    let content_source = content_source_from_args(app, &args)?;
    let object = Object::new(kind, content_source)?;
    Ok(object)
}

fn type_from_args(args: &ArgMatches) -> Result<Kind> {
    match args.value_of("t") {
        Some(type_str) => type_str.parse::<Kind>().map_err(|_| -> Box<dyn std::error::Error> {
            Box::new(Error {
                message: "-t must be one of blob, commit, tag, or tree".to_string(),
                kind: ErrorKind::InvalidValue,
                info: None,
            })
        }),
        None => Ok(Kind::Blob),
    }
}

fn content_source_from_args(app: &mut App, args: &ArgMatches) -> Result<Box<dyn ContentSource>> {
    let stdin = args.is_present("stdin");

    match (args.value_of("file"), stdin) {
        (Some(file), false) => Ok(Box::new(FileContentSource::new(file)?)),
        (None, true) => Ok(Box::new(ReadContentSource::new(&mut app.stdin)?)),
        _ => Err(Box::new(Error {
            message: "content source must be either --stdin or a file path".to_string(),
            kind: ErrorKind::MissingRequiredArgument,
            info: None,
        })),
    }
}

#[cfg(test)]
mod tests {
    use crate::App;

    use std::fs;

    const HELLO_ID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0\n";

    #[test]
    fn from_stdin_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");

        let stdout = App::run_with_stdin_and_args(
            b"hello".to_vec(),
            vec![
                "--git-dir",
                git_dir.to_str().unwrap(),
                "hash-object",
                "--stdin",
            ],
        )
        .unwrap();

        assert_eq!(stdout, HELLO_ID.as_bytes());
        assert!(!git_dir.exists());
    }

    #[test]
    fn from_file_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        let file = dir.path().join("hello.txt");
        fs::write(&file, "hello").unwrap();

        let stdout = App::run_with_args(vec![
            "--git-dir",
            git_dir.to_str().unwrap(),
            "hash-object",
            "-w",
            file.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(stdout, HELLO_ID.as_bytes());
        assert!(git_dir
            .join("objects/b6/fc4c620b67d95f953a5c1c1230aaab5db5a1b0")
            .is_file());
    }

    #[test]
    fn with_type() {
        let stdout = App::run_with_stdin_and_args(
            Vec::new(),
            vec!["hash-object", "-t", "tree", "--stdin"],
        )
        .unwrap();

        assert_eq!(stdout, b"4b825dc642cb6eb9a060e54bf8d69288fbee4904\n");
    }

    #[test]
    fn error_unknown_type() {
        let err = App::run_with_args(vec!["hash-object", "-t", "bogus", "--stdin"]).unwrap_err();
        assert!(
            err.to_string().contains("-t must be one of"),
            "\nincorrect error message:\n\n{}",
            err
        );
    }

    #[test]
    fn error_no_source() {
        let err = App::run_with_args(vec!["hash-object"]).unwrap_err();
        assert!(
            err.to_string()
                .contains("content source must be either --stdin or a file path"),
            "\nincorrect error message:\n\n{}",
            err
        );
    }

    #[test]
    fn error_both_sources() {
        let err = App::run_with_args(vec!["hash-object", "--stdin", "file.txt"]).unwrap_err();
        assert!(err
            .to_string()
            .contains("content source must be either --stdin or a file path"));
    }

    #[test]
    fn error_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(App::run_with_args(vec!["hash-object", missing.to_str().unwrap()]).is_err());
    }
}
