//! Terminal-free tick loop behind `--ticks N`.

use std::io::Write;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, eyre};

use crate::app::App;
use crate::scheduler::Scheduler;
use crate::system::source::MetricsSource;

/// Run `ticks` scheduler ticks and write one JSON document per line to `out`.
///
/// Ticks are paced exactly like the interactive loop: the first fires at
/// once, each following one an `interval` after the previous refresh ended.
pub async fn run_headless<S, W>(
    app: &mut App<S>,
    interval: Duration,
    ticks: u64,
    out: &mut W,
) -> Result<()>
where
    S: MetricsSource,
    W: Write,
{
    if ticks == 0 {
        return Err(eyre!("--ticks must be greater than 0"));
    }

    let mut scheduler = Scheduler::new(interval);
    for n in 1..=ticks {
        let at = scheduler.next_tick().await;
        app.on_tick(at);
        scheduler.rearm();

        let json = serde_json::to_string(&app.state).wrap_err("failed to serialize snapshot")?;
        writeln!(out, "{json}").wrap_err("failed to write snapshot")?;
        tracing::debug!(tick = n, of = ticks, "headless snapshot written");
    }
    out.flush().wrap_err("failed to flush snapshots")?;

    Ok(())
}
