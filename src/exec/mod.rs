// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the configured commands,
//! using `tokio::process::Command`, and turning everything they print into
//! [`Line`](crate::types::Line)s on a per-command channel.
//!
//! - [`supervisor`] spawns one child, waits for it, and owns its channel.
//! - [`emitter`] reads one stream of a child and forwards it line by line.
//! - [`format`] strips colour codes and adds the name prefix.
//! - [`stdin`] provides the never-ending stdin handed to every child.

pub mod emitter;
pub mod format;
pub mod stdin;
pub mod supervisor;

pub use emitter::LineEmitter;
pub use format::{LineFormatter, strip_ansi};
pub use stdin::BlockingStdin;
pub use supervisor::{CHANNEL_CAPACITY, supervise};
