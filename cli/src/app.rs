use std::io::{Read, Write};
use std::path::PathBuf;

#[cfg(test)]
use std::ffi::OsString;

use crate::{cmds, Result};

use blobtree_on_disk::ObjectStore;
use clap::{crate_version, AppSettings, Arg, ArgMatches};

const DEFAULT_GIT_DIR: &str = ".git";

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("blobtree")
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("git-dir")
                .long("git-dir")
                .value_name("dir")
                .global(true)
                .help("Path to the repository (default '.git'); objects live in its 'objects' folder"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .value_name("filter")
                .global(true)
                .help("Log filter written to stderr, e.g. 'debug' (default: RUST_LOG or 'warn')"),
        );

    cmds::add_subcommands(app)
}

/// Look up a global option, which may have been given either before or after
/// the subcommand name.
pub(crate) fn global_value<'m>(matches: &'m ArgMatches, name: &str) -> Option<&'m str> {
    matches
        .subcommand()
        .1
        .and_then(|sub_matches| sub_matches.value_of(name))
        .or_else(|| matches.value_of(name))
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    /// The object store selected by `--git-dir`.
    pub fn object_store(&self) -> ObjectStore {
        let git_dir = global_value(&self.arg_matches, "git-dir").unwrap_or(DEFAULT_GIT_DIR);
        ObjectStore::new(PathBuf::from(git_dir).join("objects"))
    }

    #[cfg(test)]
    pub fn run_with_stdin_and_args<I, T>(stdin: Vec<u8>, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("blobtree"));

        let mut stdin = std::io::Cursor::new(stdin);
        let mut stdout = Vec::new();

        App {
            arg_matches: clap_app().get_matches_from_safe(args)?,
            stdin: &mut stdin,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let stdin: Vec<u8> = Vec::new();
        App::run_with_stdin_and_args(stdin, args)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    #[cfg(not(tarpaulin_include))]
    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}
