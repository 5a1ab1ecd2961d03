// src/config/parser.rs

//! Block grammar for the command line.
//!
//! ```text
//! { [key=value ...] <executable> [args ...] } [{ ... } ...]
//! ```
//!
//! Options must come before the executable; once the executable has been
//! seen, every token up to the closing `}` is passed through as an argument
//! (including tokens that look like options or braces other than `}`).

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::model::{CommandBlock, CommandSet};
use crate::errors::{MuxError, Result};

static OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)=(.+)$").expect("option regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between blocks, expecting `{`.
    Start,
    /// Inside a block, before the executable.
    Options,
    /// After the executable, collecting arguments until `}`.
    Arguments,
}

/// Parse raw block tokens into a [`CommandSet`].
///
/// Errors carry the 1-based position of the offending token.
pub fn parse_blocks<S: AsRef<str>>(tokens: &[S]) -> Result<CommandSet> {
    parse_blocks_at(tokens, 0)
}

/// Like [`parse_blocks`], for tokens that follow `offset` other arguments on
/// the command line. Error positions count those arguments too.
pub fn parse_blocks_at<S: AsRef<str>>(tokens: &[S], offset: usize) -> Result<CommandSet> {
    let mut blocks = Vec::new();
    let mut current = CommandBlock::default();
    let mut state = State::Start;
    let mut opened_at = 0;

    for (idx, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let position = offset + idx + 1;

        match state {
            State::Start => {
                if token != "{" {
                    return Err(MuxError::parse(position, "expected '{'"));
                }
                opened_at = position;
                state = State::Options;
            }
            State::Options => {
                if let Some(caps) = OPTION.captures(token) {
                    apply_option(&mut current, &caps[1], &caps[2], position)?;
                } else if token == "}" {
                    return Err(MuxError::parse(position, "expected executable"));
                } else {
                    current.executable = token.to_string();
                    state = State::Arguments;
                }
            }
            State::Arguments => {
                if token == "}" {
                    debug!(
                        executable = %current.executable,
                        args = ?current.args,
                        "parsed command block"
                    );
                    blocks.push(std::mem::take(&mut current));
                    state = State::Start;
                } else {
                    current.args.push(token.to_string());
                }
            }
        }
    }

    if state != State::Start {
        return Err(MuxError::parse(opened_at, "unterminated block, expected '}'"));
    }

    Ok(CommandSet::from_blocks(blocks))
}

fn apply_option(block: &mut CommandBlock, key: &str, value: &str, position: usize) -> Result<()> {
    match key {
        "name" => block.name = Some(value.to_string()),
        "exit" => {
            let code = value
                .parse::<i32>()
                .map_err(|_| MuxError::parse(position, "option value should be a number"))?;
            block.exit_code = Some(code);
        }
        other => {
            return Err(MuxError::parse(position, format!("unknown option '{other}'")));
        }
    }
    Ok(())
}
