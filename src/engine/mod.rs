// src/engine/mod.rs

//! Fan-in engine for mux.
//!
//! This module ties together:
//! - the output channels of every supervised command
//! - routing of their lines to the parent's stdout / stderr
//! - the decision of when (and with which code) the program exits
//!
//! The pure state machine lives in [`core`]; the async/IO shell is
//! implemented in [`dispatcher`].

/// How the dispatcher stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every command channel closed and none asked for a specific exit code.
    AllClosed,
    /// Command `command` (index in command-line order) finished and was
    /// configured with `exit=<code>`.
    Forced { command: usize, code: i32 },
}

impl Termination {
    /// Process exit status to use for this termination.
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::AllClosed => 0,
            Termination::Forced { code, .. } => code,
        }
    }
}

pub mod core;
pub mod dispatcher;

pub use self::core::{ChannelState, DispatchCore, Step};
pub use dispatcher::Dispatcher;
