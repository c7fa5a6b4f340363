//! `ethinfo stats <device>`: counter breakdown of one resolved port.

use ethinfo_core::{load_snapshot, render_pass};

use crate::cli::StatsArgs;
use crate::error::CliError;
use crate::output;

use super::Context;

pub async fn handle(args: StatsArgs, ctx: &Context) -> Result<(), CliError> {
    let snapshot = load_snapshot(&ctx.settings.sources).await;
    let info = render_pass(&snapshot, &ctx.catalog).ok_or(CliError::Suppressed)?;
    let report = info.find(&args.device)?;

    let out = output::render_stats(ctx.output, report, ctx.color)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
