// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! clap only handles the global flags; everything from the first `{` on is
//! collected verbatim and handed to [`crate::config::parse_blocks`].

use clap::{CommandFactory, Parser, ValueEnum};

const AFTER_HELP: &str = "\
OPTIONS (inside a block)
    name=<string>  prefix each line of output with this name
    exit=<number>  exit with this code when the command exits

EXAMPLES
    mux { echo hello } { echo world }
    mux { name=good ping -c1 example.com } { name=bad ping -c1 example.invalid }
    mux { exit=42 false } { sleep 1 }";

/// Command-line arguments for `mux`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mux",
    version,
    about = "A command multiplexer: run commands concurrently and interleave their output.",
    override_usage = concat!(
        "mux [--log-level <LEVEL>] { [options...] <command> } ",
        "[{ [options...] <command> } ...]"
    ),
    after_help = AFTER_HELP,
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MUX_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command blocks, e.g. `{ name=web ./serve --port 80 }`.
    #[arg(
        value_name = "BLOCK",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub blocks: Vec<String>,

    /// Number of arguments before the first block token.
    #[arg(skip)]
    pub block_offset: usize,
}

impl CliArgs {
    /// True when the invocation is `mux help ...`.
    pub fn wants_help(&self) -> bool {
        self.blocks.first().is_some_and(|t| t == "help")
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments.
///
/// `-h` / `--help` are handled by clap; a leading `help` token prints the
/// same long help. Both exit the process.
pub fn parse() -> CliArgs {
    let mut args = CliArgs::parse();
    args.block_offset = std::env::args_os()
        .len()
        .saturating_sub(1 + args.blocks.len());
    if args.wants_help() {
        // Nothing useful to do if stdout is gone.
        let _ = CliArgs::command().print_long_help();
        std::process::exit(0);
    }
    args
}
