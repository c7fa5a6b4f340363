//! `ethinfo manpages`: roff pages for the whole command tree.

use std::fs;
use std::path::Path;

use clap::CommandFactory;

use crate::cli::{Cli, ManpagesArgs};
use crate::error::CliError;

pub fn handle(args: &ManpagesArgs) -> Result<(), CliError> {
    fs::create_dir_all(&args.dir)?;
    let written = write_pages(&Cli::command(), &args.dir)?;
    tracing::info!(dir = %args.dir.display(), pages = written, "man pages written");
    Ok(())
}

/// Write `<name>.1` for a command, then recurse into its visible
/// subcommands as `<name>-<sub>.1`. Returns the number of pages written.
fn write_pages(cmd: &clap::Command, dir: &Path) -> Result<usize, CliError> {
    let name = cmd.get_name().to_owned();

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buf)?;
    fs::write(dir.join(format!("{name}.1")), buf)?;

    let mut written = 1;
    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        written += write_pages(&sub, dir)?;
    }
    Ok(written)
}
