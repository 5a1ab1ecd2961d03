// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{CommandSet, parse_blocks_at};
use crate::engine::{DispatchCore, Dispatcher, Termination};
use crate::errors::{MuxError, Result};
use crate::exec::supervise;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - block parsing (fails before any process is started)
/// - one supervisor per command
/// - the dispatcher writing to this process's stdout / stderr
pub async fn run(args: CliArgs) -> Result<Termination> {
    if args.blocks.is_empty() {
        return Err(MuxError::MissingArguments);
    }

    let commands = parse_blocks_at(&args.blocks, args.block_offset)?;
    run_commands(&commands).await
}

/// Start every command of `commands` and dispatch their output until the
/// program should exit.
pub async fn run_commands(commands: &CommandSet) -> Result<Termination> {
    info!(
        commands = commands.len(),
        width = commands.display().width,
        "starting commands"
    );

    let channels = commands
        .commands()
        .iter()
        .map(|spec| {
            debug!(command = %spec.label(), exit = ?spec.exit_code, "launching supervisor");
            supervise(spec)
        })
        .collect();

    let core = DispatchCore::from_commands(commands);
    Dispatcher::with_stdio(core, channels).run().await
}
