//! Command dispatch: bridges CLI args -> core render pass -> output formatting.

pub mod config_cmd;
pub mod manpages;
pub mod ports;
pub mod stats;
pub mod util;

use ethinfo_core::Catalog;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::{self, Settings};
use crate::error::CliError;
use crate::output;

/// Resolved settings shared by the port-facing commands.
pub struct Context {
    pub settings: Settings,
    pub catalog: Catalog,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Context {
    pub fn from_global(global: &GlobalOpts) -> Result<Self, CliError> {
        let settings = config::resolve(global)?;
        let catalog = settings.load_catalog()?;
        Ok(Self {
            output: settings.output,
            color: output::should_color(settings.color),
            quiet: global.quiet,
            settings,
            catalog,
        })
    }
}

/// Dispatch a port-facing command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = Context::from_global(global)?;
    tracing::debug!(sources = ?ctx.settings.sources, "resolved sources");

    match cmd {
        Command::Ports(args) => ports::handle(args, &ctx).await,
        Command::Stats(args) => stats::handle(args, &ctx).await,
        // Handled before dispatch, without loading any port source
        Command::Config(_) | Command::Completions(_) | Command::Manpages(_) => unreachable!(),
    }
}
