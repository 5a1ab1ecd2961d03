// src/config/mod.rs

//! Command configuration for mux.
//!
//! Responsibilities:
//! - Define the parsed data model (`model.rs`).
//! - Turn raw `{ ... }` block tokens into that model (`parser.rs`).

pub mod model;
pub mod parser;

pub use model::{CommandBlock, CommandSet, CommandSpec, DisplayConfig};
pub use parser::{parse_blocks, parse_blocks_at};
