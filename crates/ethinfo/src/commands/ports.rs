//! `ethinfo ports`: the port overview, once or on an interval.

use std::future::Future;
use std::io::{self, IsTerminal};
use std::time::Duration;

use chrono::Local;
use ethinfo_core::{load_snapshot, render_pass};

use crate::cli::PortsArgs;
use crate::error::CliError;
use crate::output;

use super::Context;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub async fn handle(args: PortsArgs, ctx: &Context) -> Result<(), CliError> {
    let Some(secs) = args.watch else {
        let out = render_once(&args, ctx).await?;
        output::print_output(&out, ctx.quiet);
        return Ok(());
    };

    let clear = io::stdout().is_terminal();
    let args = &args;
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    watch(Duration::from_secs(secs), shutdown, move || {
        refresh(args, ctx, secs, clear)
    })
    .await
}

/// Run `frame` on every tick until `shutdown` resolves. The shutdown future
/// is created once by the caller and raced against both the wait and the
/// frame itself, so an interrupt is never lost between ticks.
async fn watch<S, F, Fut>(period: Duration, shutdown: S, mut frame: F) -> Result<(), CliError>
where
    S: Future,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), CliError>>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }
        tokio::select! {
            _ = &mut shutdown => break,
            result = frame() => result?,
        }
    }
    tracing::debug!("watch interrupted");
    Ok(())
}

async fn refresh(args: &PortsArgs, ctx: &Context, secs: u64, clear: bool) -> Result<(), CliError> {
    let out = render_once(args, ctx).await?;
    if clear {
        print!("{CLEAR_SCREEN}");
    }
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    output::print_output(&format!("Every {secs}s: ethinfo ports  {stamp}\n"), ctx.quiet);
    output::print_output(&out, ctx.quiet);
    Ok(())
}

/// Fetch, resolve, and render one pass. Empty when swconfig suppresses
/// port information.
async fn render_once(args: &PortsArgs, ctx: &Context) -> Result<String, CliError> {
    let snapshot = load_snapshot(&ctx.settings.sources).await;
    match render_pass(&snapshot, &ctx.catalog) {
        Some(info) => output::render_ports(ctx.output, &info, args.stats, ctx.color),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn interrupt_during_a_frame_ends_the_loop() {
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let frames = AtomicUsize::new(0);

        // The first frame fires the interrupt and then hangs; the loop
        // must notice without waiting for the frame to finish.
        let frame = || {
            frames.fetch_add(1, Ordering::SeqCst);
            let tx = tx.take();
            async move {
                if let Some(tx) = tx {
                    let _ = tx.send(());
                }
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
        };
        let shutdown = async {
            let _ = rx.await;
        };

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            watch(Duration::from_millis(10), shutdown, frame),
        )
        .await;
        assert!(matches!(result, Ok(Ok(()))));
        assert_eq!(frames.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn frame_errors_stop_the_loop() {
        let frames = AtomicUsize::new(0);
        let frame = || {
            let n = frames.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 2 {
                    Err(CliError::Suppressed)
                } else {
                    Ok(())
                }
            }
        };

        let err = watch(Duration::from_millis(1), std::future::pending::<()>(), frame)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Suppressed));
        assert_eq!(frames.load(Ordering::SeqCst), 3);
    }
}
