//! Command dispatch: bridges CLI args -> adapter operations -> output formatting.

pub mod config_cmd;
pub mod control;
pub mod poll;
pub mod watch;

use tsw_core::Adapter;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a panel-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, adapter: &Adapter, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Poll(args) => poll::handle(adapter, &args, global).await,
        Command::Watch(args) => watch::handle(adapter, &args, global).await,
        Command::Control(args) => control::handle(adapter, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
