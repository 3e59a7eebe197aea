//! Continuous polling until interrupted.

use std::time::Duration;

use owo_colors::OwoColorize;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use tsw_core::Adapter;

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::commands::poll;
use crate::error::CliError;
use crate::output;

pub async fn handle(adapter: &Adapter, args: &WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let period = args
        .interval
        .map_or_else(|| adapter.config().shortest_interval(), Duration::from_secs);
    if period.is_zero() {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be at least one second".into(),
        });
    }

    info!(interval_secs = period.as_secs(), "watching panel");
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let color = output::should_color(global.color);
    let mut cycles = 0_u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }

        match adapter.poll().await {
            Ok(report) => {
                let rendered = poll::render(&report, false, args.filter.as_deref(), global)?;
                if matches!(global.output_format(), OutputFormat::Table) && !global.quiet {
                    print_header(color);
                }
                output::print_output(&rendered, global.quiet);
            }
            Err(e) => error!(error = %e, "poll cycle failed"),
        }

        cycles += 1;
        if args.count.is_some_and(|limit| cycles >= limit) {
            break;
        }
    }

    adapter.shutdown().await;
    Ok(())
}

fn print_header(color: bool) {
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if color {
        println!("{}", stamp.dimmed());
    } else {
        println!("{stamp}");
    }
}
