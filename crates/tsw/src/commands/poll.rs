//! One-shot poll handler.

use tsw_core::{Adapter, Report};

use crate::cli::{GlobalOpts, PollArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(adapter: &Adapter, args: &PollArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let report = adapter.poll().await;
    adapter.shutdown().await;
    let report = report?;

    let rendered = render(&report, args.controls, args.filter.as_deref(), global)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Render a report honouring `--controls` and `--filter`.
pub fn render(
    report: &Report,
    with_controls: bool,
    filter: Option<&str>,
    global: &GlobalOpts,
) -> Result<String, CliError> {
    let statistics = output::filter_statistics(&report.statistics, filter);
    if with_controls {
        let filtered = Report {
            statistics,
            controls: report.controls.clone(),
        };
        output::render_report(global.output_format(), &filtered)
    } else {
        output::render_statistics(global.output_format(), &statistics)
    }
}
