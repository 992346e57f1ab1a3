use crate::{App, Result};

use blobtree_core::object::Id;
use blobtree_on_disk::format::{write_tree_listing, ListFormat};
use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("ls-tree")
        .about("List the contents of a tree object")
        .arg(
            Arg::with_name("name-only")
                .long("name-only")
                .help("List only filenames, one per line"),
        )
        .arg(
            Arg::with_name("long")
                .short("l")
                .long("long")
                .conflicts_with("name-only")
                .help("Show object size of blob entries"),
        )
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("The full 40-digit ID of the tree"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id: Id = args.value_of("tree").unwrap_or_default().parse()?;

    let format = if args.is_present("name-only") {
        ListFormat::NameOnly
    } else if args.is_present("long") {
        ListFormat::Long
    } else {
        ListFormat::Default
    };

    let store = app.object_store();
    write_tree_listing(&store, &id, format, app)?;

    Ok(())
}
