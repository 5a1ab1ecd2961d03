// src/config/model.rs

use std::sync::Arc;

/// Column layout shared by every command of one invocation.
///
/// Computed once from all `name=` options before any command starts, then
/// only ever read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    /// At least one command has a `name=`.
    pub names: bool,
    /// Widest configured name, in characters.
    pub width: usize,
}

impl DisplayConfig {
    /// Build the layout for the given set of optional names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        names
            .into_iter()
            .flatten()
            .fold(DisplayConfig::default(), |cfg, name| DisplayConfig {
                names: true,
                width: cfg.width.max(name.chars().count()),
            })
    }
}

/// One `{ ... }` block as written on the command line, before the shared
/// [`DisplayConfig`] is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBlock {
    pub name: Option<String>,
    pub exit_code: Option<i32>,
    pub executable: String,
    pub args: Vec<String>,
}

/// A fully parsed command, ready to be supervised.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub executable: String,
    pub args: Vec<String>,
    /// Display name from `name=`.
    pub name: Option<String>,
    /// Code from `exit=`. When set, the whole program exits with this code as
    /// soon as the command has finished.
    pub exit_code: Option<i32>,
    pub display: Arc<DisplayConfig>,
}

impl CommandSpec {
    /// Human-readable identifier for logs.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.executable)
    }
}

/// All commands of one invocation, in command-line order.
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    display: Arc<DisplayConfig>,
    commands: Vec<CommandSpec>,
}

impl CommandSet {
    pub fn from_blocks(blocks: Vec<CommandBlock>) -> Self {
        let display = Arc::new(DisplayConfig::from_names(
            blocks.iter().map(|b| b.name.as_deref()),
        ));

        let commands = blocks
            .into_iter()
            .map(|block| CommandSpec {
                executable: block.executable,
                args: block.args,
                name: block.name,
                exit_code: block.exit_code,
                display: Arc::clone(&display),
            })
            .collect();

        Self { display, commands }
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
