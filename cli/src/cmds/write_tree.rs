use std::io::Write;
use std::path::Path;

use crate::{App, Result};

use blobtree_on_disk::write_tree;
use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("write-tree")
        .about("Create a tree object from a directory")
        .arg(
            Arg::with_name("prefix")
                .long("prefix")
                .value_name("dir")
                .help("Directory to build the tree from (default: current directory)"),
        )
        .arg(
            Arg::with_name("ignore-file")
                .long("ignore-file")
                .value_name("file")
                .help("File of glob patterns, relative to the directory, to leave out"),
        )
        .arg(
            Arg::with_name("dry-run")
                .long("dry-run")
                .help("Compute the tree ID without writing any objects"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let root = Path::new(args.value_of("prefix").unwrap_or("."));
    let ignore_file = args.value_of("ignore-file").map(Path::new);
    let persist = !args.is_present("dry-run");

    let store = app.object_store();
    let id = write_tree(&store, root, ignore_file, persist)?;

    writeln!(app, "{}", id)?;
    Ok(())
}
