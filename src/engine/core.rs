// src/engine/core.rs

//! Pure dispatcher state machine.
//!
//! Tracks which command channels are still open and decides, when one
//! closes, whether the program keeps running or exits. It has **no**
//! channels, no Tokio types, and does not perform any IO, so it can be
//! unit tested directly.

use crate::config::CommandSet;
use crate::engine::Termination;

/// Lifecycle of one command channel. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    Closed,
}

/// Decision returned after each observed channel closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit(Termination),
}

#[derive(Debug, Clone)]
pub struct DispatchCore {
    exit_codes: Vec<Option<i32>>,
    states: Vec<ChannelState>,
    open: usize,
}

impl DispatchCore {
    /// One entry per command, in command order: the forced exit code, if any.
    pub fn new(exit_codes: Vec<Option<i32>>) -> Self {
        let states = vec![ChannelState::Open; exit_codes.len()];
        let open = exit_codes.len();
        Self {
            exit_codes,
            states,
            open,
        }
    }

    pub fn from_commands(commands: &CommandSet) -> Self {
        Self::new(commands.commands().iter().map(|c| c.exit_code).collect())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn open_channels(&self) -> usize {
        self.open
    }

    pub fn state(&self, index: usize) -> Option<ChannelState> {
        self.states.get(index).copied()
    }

    /// Decision before anything has been received: with no commands at all
    /// there is nothing to wait for.
    pub fn start(&self) -> Step {
        if self.open == 0 {
            Step::Exit(Termination::AllClosed)
        } else {
            Step::Continue
        }
    }

    /// Record that channel `index` has closed.
    ///
    /// - A command with an exit code ends the program with that code, no
    ///   matter how many other channels are still open.
    /// - Otherwise the program ends once the last channel has closed.
    /// - Repeated or out-of-range closures are ignored.
    pub fn on_closed(&mut self, index: usize) -> Step {
        match self.states.get_mut(index) {
            Some(state @ ChannelState::Open) => {
                *state = ChannelState::Closed;
                self.open -= 1;
            }
            _ => return Step::Continue,
        }

        if let Some(code) = self.exit_codes[index] {
            return Step::Exit(Termination::Forced {
                command: index,
                code,
            });
        }

        if self.open == 0 {
            Step::Exit(Termination::AllClosed)
        } else {
            Step::Continue
        }
    }
}
