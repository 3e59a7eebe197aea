//! Control handler: `Group#Property=value` assignments.

use tracing::debug;

use tsw_core::{Adapter, Command, ControlValue};

use crate::cli::{ControlArgs, GlobalOpts};
use crate::commands::poll;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    adapter: &Adapter,
    args: &ControlArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let commands = args
        .assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = commands.len(), "applying controls");

    let result = match commands.as_slice() {
        [single] => adapter.apply_command(&single.name, &single.value).await,
        batch => adapter.apply_commands(batch).await,
    };
    if let Err(e) = result {
        adapter.shutdown().await;
        return Err(e.into());
    }

    if args.poll {
        let report = adapter.poll().await;
        adapter.shutdown().await;
        let rendered = poll::render(&report?, true, None, global)?;
        output::print_output(&rendered, global.quiet);
    } else {
        adapter.shutdown().await;
        if !global.quiet {
            eprintln!("Applied {} control(s)", commands.len());
        }
    }
    Ok(())
}

/// Split `Group#Property=value` into a command. Values are carried as text;
/// the adapter applies switch/slider semantics.
fn parse_assignment(assignment: &str) -> Result<Command, CliError> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| CliError::Validation {
            field: "control".into(),
            reason: format!("expected PROPERTY=VALUE, got '{assignment}'"),
        })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Validation {
            field: "control".into(),
            reason: format!("missing property name in '{assignment}'"),
        });
    }
    Ok(Command::new(name, ControlValue::from(value.trim())))
}
